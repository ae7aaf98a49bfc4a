#![forbid(unsafe_code)]

//! Split-pane size redistribution.
//!
//! A container holds an ordered sequence of panels separated by draggable
//! dividers. This crate computes how moving one divider redistributes space
//! across every panel while keeping the total extent constant:
//!
//! - [`redistribute`] is the pure cascade solver over a [`SlotArray`].
//! - [`DragSessionMachine`] turns activate/move/deactivate actions into
//!   candidate layouts anchored to a baseline captured at activation.
//! - [`Resizer`] lets host logic inspect, adjust or veto a candidate before it
//!   is committed.
//! - [`SplitEngine`] wires the pieces together for one container and fans
//!   committed layouts out to subscribers once per frame.
//!
//! Rendering, CSS/style application and raw pointer capture belong to the
//! host. The host only reports panel extents and pointer coordinates, and
//! applies the [`PanelStyle`] derived from each committed snapshot.
//!
//! ```
//! use splitflex::{PanelSize, SlotArray, SlotId, redistribute};
//!
//! let slots = SlotArray::from_panels([
//!     PanelSize::flexible(100.0).with_min_size(50.0),
//!     PanelSize::flexible(100.0),
//!     PanelSize::flexible(100.0),
//! ]);
//!
//! // Drag the first divider 80px to the left: panel 0 stops at its minimum.
//! let next = redistribute(SlotId::divider(0), -80.0, &slots);
//! assert_eq!(next.panel_sizes(), vec![50.0, 150.0, 100.0]);
//! assert_eq!(next.total_size(), slots.total_size());
//! ```

use serde::{Deserialize, Serialize};

pub mod channel;
pub mod divider;
pub mod engine;
pub mod error;
pub mod redistribute;
pub mod resizer;
pub mod session;
pub mod size;
pub mod snapshot;

pub use channel::{SnapshotChannel, SubscriptionId};
pub use divider::{DividerGate, GateOutput, PointerPhase};
pub use engine::{EngineConfig, ExtentSource, LayoutEvent, SplitEngine};
pub use error::{LayoutError, SlotKind};
pub use redistribute::redistribute;
pub use resizer::{Candidate, CandidateOrigin, Resizer, SectionResize};
pub use session::{
    DividerAction, DividerActionKind, DragEffect, DragNoopReason, DragPhase, DragSessionMachine,
    DragSessionState, DragTransition,
};
pub use size::{PanelConfig, PanelSize, PanelStyle, Slot, SlotArray, SlotId, is_valid_size};
pub use snapshot::{LayoutSnapshot, SnapshotCollector};

/// Main axis of a split container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAxis {
    /// Panels laid out left to right; dividers move horizontally.
    #[default]
    Row,
    /// Panels laid out top to bottom; dividers move vertically.
    Column,
}

impl LayoutAxis {
    /// Project a pointer displacement onto this axis.
    #[must_use]
    pub fn component(self, delta: Coordinate) -> f64 {
        match self {
            Self::Row => delta.x,
            Self::Column => delta.y,
        }
    }

    /// Whether panels stack vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Column)
    }
}

/// Pointer position reported by the host, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    #[must_use]
    pub fn offset_from(self, origin: Self) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_component_picks_layout_direction() {
        let delta = Coordinate::new(12.0, -7.5);
        assert_eq!(LayoutAxis::Row.component(delta), 12.0);
        assert_eq!(LayoutAxis::Column.component(delta), -7.5);
        assert!(LayoutAxis::Column.is_vertical());
        assert!(!LayoutAxis::default().is_vertical());
    }

    #[test]
    fn offset_from_is_component_wise() {
        let delta = Coordinate::new(30.0, 40.0).offset_from(Coordinate::new(10.0, 50.0));
        assert_eq!(delta, Coordinate::new(20.0, -10.0));
    }

    #[test]
    fn axis_serializes_snake_case() {
        let json = serde_json::to_string(&LayoutAxis::Column).unwrap();
        assert_eq!(json, "\"column\"");
    }
}
