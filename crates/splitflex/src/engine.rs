//! Split container engine.
//!
//! One [`SplitEngine`] is built per container and passed to every panel and
//! divider at registration. Registration returns the stable [`SlotId`] the
//! host uses to address the element afterwards.
//!
//! Data flow for a drag:
//!
//! ```text
//! DividerAction -> DragSessionMachine -> Candidate -> before-apply hook
//!   -> committed snapshot -> (frame boundary) -> layout subscribers
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LayoutAxis;
use crate::channel::{SnapshotChannel, SubscriptionId};
use crate::error::{LayoutError, SlotKind};
use crate::resizer::{Candidate, Resizer};
use crate::session::{DividerAction, DragEffect, DragPhase, DragSessionMachine, DragTransition};
use crate::size::{PanelConfig, PanelStyle, Slot, SlotId, is_valid_size};
use crate::snapshot::{LayoutSnapshot, SnapshotCollector};

/// Reports the rendered extent of each panel along the layout axis.
pub trait ExtentSource {
    fn current_extent(&self, panel: SlotId) -> f64;
}

impl<F> ExtentSource for F
where
    F: Fn(SlotId) -> f64,
{
    fn current_extent(&self, panel: SlotId) -> f64 {
        self(panel)
    }
}

/// Extents indexed by panel ordinal. Missing panels measure as zero.
impl ExtentSource for [f64] {
    fn current_extent(&self, panel: SlotId) -> f64 {
        panel
            .panel_index()
            .and_then(|index| self.get(index).copied())
            .unwrap_or(0.0)
    }
}

/// Container-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub axis: LayoutAxis,
}

impl EngineConfig {
    #[must_use]
    pub fn row() -> Self {
        Self {
            axis: LayoutAxis::Row,
        }
    }

    #[must_use]
    pub fn column() -> Self {
        Self {
            axis: LayoutAxis::Column,
        }
    }
}

/// Lifecycle notifications for the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LayoutEvent {
    DividerActivated { divider: usize },
    DividerDeactivated { divider: usize },
    /// Released without moving.
    DividerClicked { divider: usize },
    /// Emitted at the frame boundary for panels whose delivered size changed.
    PanelSizeChanged { panel: usize, size: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SlotEntry {
    Panel(PanelConfig),
    Divider,
}

type BeforeApply = Box<dyn FnMut(&mut Resizer)>;

pub struct SplitEngine {
    config: EngineConfig,
    registry: Vec<SlotEntry>,
    machine: DragSessionMachine,
    before_apply: Option<BeforeApply>,
    committed: Option<LayoutSnapshot>,
    delivered: Option<LayoutSnapshot>,
    layout: SnapshotChannel<LayoutSnapshot>,
    events: SnapshotChannel<LayoutEvent>,
}

impl fmt::Debug for SplitEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("session", &self.machine.state().phase())
            .field("before_apply", &self.before_apply.is_some())
            .field("committed", &self.committed)
            .field("layout", &self.layout)
            .field("events", &self.events)
            .finish()
    }
}

impl SplitEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: Vec::new(),
            machine: DragSessionMachine::new(config.axis),
            before_apply: None,
            committed: None,
            delivered: None,
            layout: SnapshotChannel::new(),
            events: SnapshotChannel::new(),
        }
    }

    #[must_use]
    pub const fn axis(&self) -> LayoutAxis {
        self.config.axis
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.registry
            .iter()
            .filter(|entry| matches!(entry, SlotEntry::Panel(_)))
            .count()
    }

    /// Register the next panel. Panels occupy even slots.
    pub fn register_panel(&mut self, config: PanelConfig) -> Result<SlotId, LayoutError> {
        let slot = self.next_slot(SlotKind::Panel)?;
        config.validate(slot)?;
        self.registry.push(SlotEntry::Panel(config));
        tracing::debug!(%slot, solid = config.is_solid(), "panel registered");
        Ok(slot)
    }

    /// Register the next divider. Dividers occupy odd slots.
    pub fn register_divider(&mut self) -> Result<SlotId, LayoutError> {
        let slot = self.next_slot(SlotKind::Divider)?;
        self.registry.push(SlotEntry::Divider);
        tracing::debug!(%slot, "divider registered");
        Ok(slot)
    }

    fn next_slot(&self, kind: SlotKind) -> Result<SlotId, LayoutError> {
        let slot = SlotId::new(self.registry.len());
        let expected = if slot.is_panel() {
            SlotKind::Panel
        } else {
            SlotKind::Divider
        };
        if expected != kind {
            return Err(LayoutError::SlotOrder {
                slot,
                expected,
                found: kind,
            });
        }
        Ok(slot)
    }

    /// Build a fresh snapshot from the host's current panel extents.
    pub fn measure<H>(&self, host: &H) -> LayoutSnapshot
    where
        H: ExtentSource + ?Sized,
    {
        collect_registry(&self.registry, host)
    }

    /// Commit a fresh measurement, e.g. after mount or a container resize.
    pub fn refresh<H>(&mut self, host: &H)
    where
        H: ExtentSource + ?Sized,
    {
        let snapshot = self.measure(host);
        tracing::debug!(total = snapshot.total_size(), "layout refreshed");
        self.commit_snapshot(snapshot);
    }

    /// Install the hook every candidate passes through before commit.
    pub fn set_before_apply(&mut self, hook: impl FnMut(&mut Resizer) + 'static) {
        self.before_apply = Some(Box::new(hook));
    }

    pub fn clear_before_apply(&mut self) {
        self.before_apply = None;
    }

    /// Route one divider action through the drag session.
    pub fn dispatch<H>(&mut self, action: DividerAction, host: &H) -> DragTransition
    where
        H: ExtentSource + ?Sized,
    {
        let registry = &self.registry;
        let transition = self
            .machine
            .apply(&action, || collect_registry(registry, host));

        match &transition.effect {
            DragEffect::Activated { divider, candidate } => {
                if transition.from == DragPhase::Idle {
                    self.emit_divider_event(*divider, |divider| LayoutEvent::DividerActivated {
                        divider,
                    });
                }
                self.apply_candidate(candidate.clone());
            }
            DragEffect::Moved { candidate, .. } => {
                self.apply_candidate(candidate.clone());
            }
            DragEffect::Released { divider, clicked } => {
                self.emit_divider_event(*divider, |divider| LayoutEvent::DividerDeactivated {
                    divider,
                });
                if *clicked {
                    self.emit_divider_event(*divider, |divider| LayoutEvent::DividerClicked {
                        divider,
                    });
                }
            }
            DragEffect::Canceled { divider } => {
                self.emit_divider_event(*divider, |divider| LayoutEvent::DividerDeactivated {
                    divider,
                });
            }
            DragEffect::Noop { .. } => {}
        }

        transition
    }

    /// End any active drag without a release.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let transition = self.machine.force_cancel()?;
        if let DragEffect::Canceled { divider } = transition.effect {
            self.emit_divider_event(divider, |divider| LayoutEvent::DividerDeactivated {
                divider,
            });
        }
        Some(transition)
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.machine.is_active()
    }

    /// Handle over a fresh measurement for imperative resizes.
    pub fn resizer<H>(&self, host: &H) -> Resizer
    where
        H: ExtentSource + ?Sized,
    {
        Resizer::new(Candidate::external(self.measure(host)))
    }

    /// Commit the result of an imperative resize.
    ///
    /// The result passes through the before-apply hook like any other
    /// candidate. Returns whether a layout was committed.
    pub fn commit(&mut self, resizer: Resizer) -> bool {
        if resizer.is_discarded() {
            tracing::debug!("discarded resizer not committed");
            return false;
        }
        self.apply_candidate(resizer.into_candidate())
    }

    fn apply_candidate(&mut self, candidate: Candidate) -> bool {
        let mut resizer = Resizer::new(candidate);
        if let Some(hook) = self.before_apply.as_mut() {
            hook(&mut resizer);
        }
        let snapshot = resizer.into_result();
        if snapshot.discard {
            return false;
        }
        self.commit_snapshot(snapshot);
        true
    }

    fn commit_snapshot(&mut self, snapshot: LayoutSnapshot) {
        tracing::trace!(
            panels = snapshot.slots.panel_count(),
            ratio = snapshot.flex_grow_ratio,
            "layout committed"
        );
        self.committed = Some(snapshot.clone());
        self.layout.offer(snapshot);
    }

    /// Last committed layout, delivered or not.
    #[must_use]
    pub fn committed(&self) -> Option<&LayoutSnapshot> {
        self.committed.as_ref()
    }

    /// Last layout delivered to subscribers.
    #[must_use]
    pub fn delivered(&self) -> Option<&LayoutSnapshot> {
        self.delivered.as_ref()
    }

    pub fn subscribe_layout(
        &mut self,
        subscriber: impl FnMut(&LayoutSnapshot) + 'static,
    ) -> SubscriptionId {
        self.layout.subscribe(subscriber)
    }

    pub fn unsubscribe_layout(&mut self, id: SubscriptionId) -> bool {
        self.layout.unsubscribe(id)
    }

    pub fn subscribe_events(
        &mut self,
        subscriber: impl FnMut(&LayoutEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe_events(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Frame boundary: deliver the latest committed layout, if one is pending.
    ///
    /// Intermediate commits since the previous frame are skipped. Returns
    /// whether anything was delivered.
    pub fn flush_frame(&mut self) -> bool {
        let Some(snapshot) = self.layout.flush() else {
            return false;
        };
        tracing::trace!(coalesced = self.layout.coalesced(), "frame flushed");

        let previous = self.delivered.as_ref();
        let changes: Vec<LayoutEvent> = snapshot
            .slots
            .panels()
            .enumerate()
            .filter(|(index, panel)| {
                previous
                    .and_then(|prev| prev.slots.panel(*index))
                    .is_none_or(|prev| prev.current_size != panel.current_size)
            })
            .map(|(panel, record)| LayoutEvent::PanelSizeChanged {
                panel,
                size: record.current_size,
            })
            .collect();
        for event in &changes {
            self.events.emit(event);
        }

        self.delivered = Some(snapshot);
        true
    }

    /// Flex properties for panel `index` under the committed layout.
    #[must_use]
    pub fn panel_style(&self, index: usize) -> Option<PanelStyle> {
        let config = match self.registry.get(SlotId::panel(index).get())? {
            SlotEntry::Panel(config) => config,
            SlotEntry::Divider => return None,
        };
        let measured = self.committed.as_ref().and_then(|snapshot| {
            snapshot
                .slots
                .panel(index)
                .map(|size| PanelStyle::measured(config, size, snapshot.flex_grow_ratio))
        });
        Some(measured.unwrap_or_else(|| PanelStyle::initial(config)))
    }

    fn emit_divider_event(&mut self, divider: SlotId, event: impl FnOnce(usize) -> LayoutEvent) {
        if let Some(index) = divider.divider_index() {
            self.events.emit(&event(index));
        }
    }
}

fn collect_registry<H>(registry: &[SlotEntry], host: &H) -> LayoutSnapshot
where
    H: ExtentSource + ?Sized,
{
    let mut collector = SnapshotCollector::with_capacity(registry.len());
    for (index, entry) in registry.iter().enumerate() {
        let slot = SlotId::new(index);
        match entry {
            SlotEntry::Panel(config) => {
                let mut extent = host.current_extent(slot);
                if !is_valid_size(extent) {
                    tracing::warn!(%slot, extent, "host reported a non-finite extent; using 0");
                    extent = 0.0;
                }
                let measured = config.measured(extent);
                if !measured.is_within_bounds() {
                    tracing::warn!(
                        %slot,
                        extent,
                        min = measured.min_size,
                        max = ?measured.max_size,
                        "host reported an extent outside the panel bounds"
                    );
                }
                collector.collect(Slot::Panel(measured));
            }
            SlotEntry::Divider => collector.collect(Slot::Divider),
        }
    }
    collector.finish()
}
