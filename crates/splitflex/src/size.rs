//! Per-panel size records and the slot array convention.
//!
//! A container with `N` panels is modelled as `2N - 1` slots: even slots hold
//! panels, odd slots are divider markers. Dividers carry no size; they only
//! mark where a drag can be applied.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A size is usable iff it is a finite number.
#[must_use]
pub fn is_valid_size(value: f64) -> bool {
    value.is_finite()
}

/// Position of a panel or divider in a [`SlotArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(usize);

impl SlotId {
    /// Wrap a raw slot index.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Slot of the `index`-th panel.
    #[must_use]
    pub const fn panel(index: usize) -> Self {
        Self(index * 2)
    }

    /// Slot of the `index`-th divider.
    #[must_use]
    pub const fn divider(index: usize) -> Self {
        Self(index * 2 + 1)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn is_panel(self) -> bool {
        self.0 % 2 == 0
    }

    #[must_use]
    pub const fn is_divider(self) -> bool {
        self.0 % 2 == 1
    }

    /// Panel ordinal, if this slot holds a panel.
    #[must_use]
    pub const fn panel_index(self) -> Option<usize> {
        if self.is_panel() {
            Some(self.0 / 2)
        } else {
            None
        }
    }

    /// Divider ordinal, if this slot holds a divider.
    #[must_use]
    pub const fn divider_index(self) -> Option<usize> {
        if self.is_divider() {
            Some(self.0 / 2)
        } else {
            None
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.divider_index() {
            Some(index) => write!(f, "divider#{index}"),
            None => write!(f, "panel#{}", self.0 / 2),
        }
    }
}

/// Size record of one panel at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    /// Extent along the layout axis, in pixels.
    pub current_size: f64,
    #[serde(default)]
    pub min_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
    /// Solid panels keep their size through every redistribution.
    #[serde(default)]
    pub is_solid: bool,
    /// Excluded from the responsiveness ratio.
    #[serde(default)]
    pub disable_responsive: bool,
}

impl PanelSize {
    /// A responsive, unbounded panel.
    #[must_use]
    pub const fn flexible(current_size: f64) -> Self {
        Self {
            current_size,
            min_size: 0.0,
            max_size: None,
            is_solid: false,
            disable_responsive: false,
        }
    }

    /// A fixed-size panel. Solid panels are non-responsive.
    #[must_use]
    pub const fn solid(current_size: f64) -> Self {
        Self {
            current_size,
            min_size: 0.0,
            max_size: None,
            is_solid: true,
            disable_responsive: true,
        }
    }

    #[must_use]
    pub const fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    #[must_use]
    pub const fn with_max_size(mut self, max_size: f64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    #[must_use]
    pub const fn with_disable_responsive(mut self, disable_responsive: bool) -> Self {
        self.disable_responsive = disable_responsive;
        self
    }

    /// Copy of this record with a new current size.
    #[must_use]
    pub const fn resized(self, current_size: f64) -> Self {
        Self {
            current_size,
            ..self
        }
    }

    /// Apply `offset` to the current size within this panel's bounds.
    ///
    /// Returns the new size and the part of `offset` that did not fit. The
    /// leftover always has the sign of `offset` and never exceeds it. A panel
    /// measured outside its bounds may move towards them but is never snapped
    /// onto them, so the leftover stays exact. The minimum is checked first.
    #[must_use]
    pub fn absorb(&self, offset: f64) -> (f64, f64) {
        let next_size = self.current_size + offset;
        let min_size = self.min_size.min(self.current_size);
        if next_size < min_size {
            return (min_size, next_size - min_size);
        }
        let max_size = self
            .max_size
            .filter(|max| is_valid_size(*max))
            .map(|max| max.max(self.current_size));
        if let Some(max_size) = max_size
            && next_size > max_size
        {
            return (max_size, next_size - max_size);
        }
        (next_size, 0.0)
    }

    /// Whether the current size lies within the configured bounds.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.current_size >= self.min_size
            && self
                .max_size
                .filter(|max| is_valid_size(*max))
                .is_none_or(|max| self.current_size <= max)
    }
}

/// One position in a [`SlotArray`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum Slot {
    Panel(PanelSize),
    Divider,
}

impl Slot {
    #[must_use]
    pub const fn as_panel(&self) -> Option<&PanelSize> {
        match self {
            Self::Panel(panel) => Some(panel),
            Self::Divider => None,
        }
    }
}

/// Alternating panel/divider sequence.
///
/// Treated as a value: every layout step consumes one array and produces a
/// new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotArray(Vec<Slot>);

impl SlotArray {
    /// Wrap raw slots. The caller is responsible for the alternation.
    #[must_use]
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self(slots)
    }

    /// Build `2N - 1` slots from `N` panels, inserting dividers between them.
    #[must_use]
    pub fn from_panels(panels: impl IntoIterator<Item = PanelSize>) -> Self {
        let mut slots = Vec::new();
        for panel in panels {
            if !slots.is_empty() {
                slots.push(Slot::Divider);
            }
            slots.push(Slot::Panel(panel));
        }
        Self(slots)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Slot] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Slot> {
        self.0.get(slot.get())
    }

    /// Size record of the `index`-th panel.
    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&PanelSize> {
        self.get(SlotId::panel(index)).and_then(Slot::as_panel)
    }

    /// Whether `slot` names a divider inside this array.
    #[must_use]
    pub fn contains_divider(&self, slot: SlotId) -> bool {
        matches!(self.get(slot), Some(Slot::Divider))
    }

    /// Iterate panels in order, skipping divider markers.
    pub fn panels(&self) -> impl Iterator<Item = &PanelSize> + '_ {
        self.0.iter().filter_map(Slot::as_panel)
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }

    #[must_use]
    pub fn divider_count(&self) -> usize {
        self.0.iter().filter(|slot| matches!(slot, Slot::Divider)).count()
    }

    /// Current sizes of all panels, in order.
    #[must_use]
    pub fn panel_sizes(&self) -> Vec<f64> {
        self.panels().map(|panel| panel.current_size).collect()
    }

    /// Sum of all panel sizes. Dividers contribute nothing.
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.panels().map(|panel| panel.current_size).sum()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Slot> {
        self.0
    }
}

impl FromIterator<Slot> for SlotArray {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Host-provided configuration of one panel.
///
/// Constant for the panel's lifetime unless the panel is registered again.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Explicit fixed size. Makes the panel solid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Initial size used before the first measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
    /// `None` means "derive from solidity".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_responsive: Option<bool>,
}

impl PanelConfig {
    /// A responsive panel with no bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn default_size(mut self, default_size: f64) -> Self {
        self.default_size = Some(default_size);
        self
    }

    #[must_use]
    pub fn min_size(mut self, min_size: f64) -> Self {
        self.min_size = Some(min_size);
        self
    }

    #[must_use]
    pub fn max_size(mut self, max_size: f64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    #[must_use]
    pub fn disable_responsive(mut self, disable_responsive: bool) -> Self {
        self.disable_responsive = Some(disable_responsive);
        self
    }

    /// A panel with a valid explicit size never takes part in redistribution.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.size.is_some_and(is_valid_size)
    }

    /// Solid panels are non-responsive unless explicitly overridden.
    #[must_use]
    pub fn is_responsive_disabled(&self) -> bool {
        self.disable_responsive.unwrap_or_else(|| self.is_solid())
    }

    /// Shrink factor the host applies to this panel.
    #[must_use]
    pub fn flex_shrink(&self) -> f64 {
        if self.is_solid() || self.disable_responsive == Some(true) {
            0.0
        } else {
            1.0
        }
    }

    /// Build the size record for a measured extent.
    ///
    /// The extent is kept as reported even when it lies outside the bounds;
    /// redistribution then only moves the panel towards them.
    #[must_use]
    pub fn measured(&self, current_size: f64) -> PanelSize {
        PanelSize {
            current_size,
            min_size: self.min_size.filter(|min| is_valid_size(*min)).unwrap_or(0.0),
            max_size: self.max_size.filter(|max| is_valid_size(*max)),
            is_solid: self.is_solid(),
            disable_responsive: self.is_responsive_disabled(),
        }
    }

    /// Reject configurations the solver cannot honour.
    pub fn validate(&self, slot: SlotId) -> Result<(), LayoutError> {
        for (field, value) in [
            ("size", self.size),
            ("default_size", self.default_size),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
        ] {
            if let Some(value) = value
                && (!is_valid_size(value) || value < 0.0)
            {
                return Err(LayoutError::InvalidSize { slot, field, value });
            }
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size)
            && max < min
        {
            return Err(LayoutError::InvalidBounds { slot, min, max });
        }
        Ok(())
    }
}

/// Flex properties the host applies to one panel element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub flex_grow: f64,
    pub flex_shrink: f64,
    /// Pixels.
    pub flex_basis: f64,
}

impl PanelStyle {
    /// Style derived from a committed snapshot.
    ///
    /// Responsive panels grow proportionally to their current size so that a
    /// container resize spreads slack in proportion; non-responsive panels
    /// hold their size as a basis.
    #[must_use]
    pub fn measured(config: &PanelConfig, size: &PanelSize, flex_grow_ratio: f64) -> Self {
        let flex_shrink = config.flex_shrink();
        if size.disable_responsive {
            Self {
                flex_grow: 0.0,
                flex_shrink,
                flex_basis: size.current_size,
            }
        } else {
            Self {
                flex_grow: flex_grow_ratio * size.current_size,
                flex_shrink,
                flex_basis: 0.0,
            }
        }
    }

    /// Style used before any snapshot exists.
    #[must_use]
    pub fn initial(config: &PanelConfig) -> Self {
        let flex_shrink = config.flex_shrink();
        match config
            .size
            .filter(|size| is_valid_size(*size))
            .or(config.default_size.filter(|size| is_valid_size(*size)))
        {
            Some(size) => Self {
                flex_grow: 0.0,
                flex_shrink,
                flex_basis: size,
            },
            None => Self {
                flex_grow: 1.0,
                flex_shrink,
                flex_basis: 0.0,
            },
        }
    }
}
