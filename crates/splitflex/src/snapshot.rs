//! Layout snapshots and the responsiveness ratio.

use serde::{Deserialize, Serialize};

use crate::redistribute::redistribute;
use crate::size::{Slot, SlotArray, SlotId};

/// Slot array plus the ratio the host needs to turn sizes into flex weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub slots: SlotArray,
    /// `responsive panel count / responsive size sum`, or `0.0` when there
    /// is nothing responsive to weigh.
    pub flex_grow_ratio: f64,
    /// Set on snapshots that must not be committed.
    #[serde(default)]
    pub discard: bool,
}

impl LayoutSnapshot {
    /// Collect a snapshot from existing slots.
    #[must_use]
    pub fn from_slots(slots: SlotArray) -> Self {
        let mut collector = SnapshotCollector::with_capacity(slots.len());
        for slot in slots.into_inner() {
            collector.collect(slot);
        }
        collector.finish()
    }

    /// Snapshot after moving `divider` by `offset`, with the ratio recomputed.
    #[must_use]
    pub fn redistributed(&self, divider: SlotId, offset: f64) -> Self {
        Self::from_slots(redistribute(divider, offset, &self.slots))
    }

    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.slots.total_size()
    }
}

/// Accumulates slots into a [`LayoutSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotCollector {
    slots: Vec<Slot>,
    responsive_count: usize,
    responsive_size: f64,
}

impl SnapshotCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append one slot in layout order.
    pub fn collect(&mut self, slot: Slot) {
        if let Slot::Panel(panel) = &slot
            && !panel.disable_responsive
        {
            self.responsive_count += 1;
            self.responsive_size += panel.current_size;
        }
        self.slots.push(slot);
    }

    #[must_use]
    pub fn flex_grow_ratio(&self) -> f64 {
        if self.responsive_count == 0 || self.responsive_size <= 0.0 {
            return 0.0;
        }
        self.responsive_count as f64 / self.responsive_size
    }

    #[must_use]
    pub fn finish(self) -> LayoutSnapshot {
        let flex_grow_ratio = self.flex_grow_ratio();
        LayoutSnapshot {
            slots: SlotArray::from_slots(self.slots),
            flex_grow_ratio,
            discard: false,
        }
    }
}
