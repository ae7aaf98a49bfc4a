//! Per-divider input gate.
//!
//! Sits between the host's raw pointer handlers and the engine. A divider
//! listens to document-wide move/up events, so the gate only forwards them
//! while its own divider is activated. It stamps each release with the
//! "moved since activate" marker the drag session needs to tell clicks from
//! drags. Only motion along the container axis counts as a move.

use crate::{Coordinate, LayoutAxis};
use crate::session::{DividerAction, DividerActionKind};
use crate::size::SlotId;

/// Raw pointer phase as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// What the host should do with one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GateOutput {
    /// Action to dispatch to the engine.
    pub action: Option<DividerAction>,
    /// New activation status, only when it changed.
    pub status_changed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerGate {
    divider: SlotId,
    axis: LayoutAxis,
    activated: bool,
    origin: Coordinate,
    moved: bool,
}

impl DividerGate {
    #[must_use]
    pub const fn new(divider: SlotId, axis: LayoutAxis) -> Self {
        Self {
            divider,
            axis,
            activated: false,
            origin: Coordinate::ORIGIN,
            moved: false,
        }
    }

    #[must_use]
    pub const fn divider(&self) -> SlotId {
        self.divider
    }

    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, phase: PointerPhase, coordinate: Coordinate) -> GateOutput {
        match phase {
            PointerPhase::Down => {
                let status_changed = (!self.activated).then_some(true);
                self.activated = true;
                self.origin = coordinate;
                self.moved = false;
                GateOutput {
                    action: Some(DividerAction::activate(self.divider, coordinate)),
                    status_changed,
                }
            }
            PointerPhase::Move if self.activated => {
                if self.axis.component(coordinate.offset_from(self.origin)) != 0.0 {
                    self.moved = true;
                }
                GateOutput {
                    action: Some(DividerAction::move_to(self.divider, coordinate)),
                    status_changed: None,
                }
            }
            PointerPhase::Up if self.activated => {
                self.activated = false;
                GateOutput {
                    action: Some(DividerAction {
                        kind: DividerActionKind::Deactivate { moved: self.moved },
                        coordinate,
                        divider: self.divider,
                    }),
                    status_changed: Some(false),
                }
            }
            PointerPhase::Move | PointerPhase::Up => GateOutput::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64) -> Coordinate {
        Coordinate::new(x, 0.0)
    }

    #[test]
    fn ignores_document_events_while_inactive() {
        let mut gate = DividerGate::new(SlotId::divider(0), LayoutAxis::Row);
        assert_eq!(gate.handle(PointerPhase::Move, at(5.0)), GateOutput::default());
        assert_eq!(gate.handle(PointerPhase::Up, at(5.0)), GateOutput::default());
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut gate = DividerGate::new(SlotId::divider(2), LayoutAxis::Row);
        let down = gate.handle(PointerPhase::Down, at(10.0));
        assert_eq!(down.status_changed, Some(true));
        assert!(gate.is_activated());

        // A move that does not change the position keeps it a click.
        gate.handle(PointerPhase::Move, at(10.0));
        let up = gate.handle(PointerPhase::Up, at(10.0));
        assert_eq!(up.status_changed, Some(false));
        assert_eq!(
            up.action.map(|action| action.kind),
            Some(DividerActionKind::Deactivate { moved: false })
        );
    }

    #[test]
    fn release_after_drag_is_not_a_click() {
        let mut gate = DividerGate::new(SlotId::divider(0), LayoutAxis::Row);
        gate.handle(PointerPhase::Down, at(10.0));
        let moved = gate.handle(PointerPhase::Move, at(14.0));
        assert_eq!(
            moved.action,
            Some(DividerAction::move_to(SlotId::divider(0), at(14.0)))
        );
        let up = gate.handle(PointerPhase::Up, at(14.0));
        assert_eq!(
            up.action.map(|action| action.kind),
            Some(DividerActionKind::Deactivate { moved: true })
        );
        assert!(!gate.is_activated());
    }

    #[test]
    fn cross_axis_jitter_keeps_a_click() {
        let mut gate = DividerGate::new(SlotId::divider(0), LayoutAxis::Column);
        gate.handle(PointerPhase::Down, Coordinate::new(10.0, 50.0));
        gate.handle(PointerPhase::Move, Coordinate::new(11.0, 50.0));
        let up = gate.handle(PointerPhase::Up, Coordinate::new(11.0, 50.0));
        assert_eq!(
            up.action.map(|action| action.kind),
            Some(DividerActionKind::Deactivate { moved: false })
        );

        gate.handle(PointerPhase::Down, Coordinate::new(10.0, 50.0));
        gate.handle(PointerPhase::Move, Coordinate::new(10.0, 52.0));
        let up = gate.handle(PointerPhase::Up, Coordinate::new(10.0, 52.0));
        assert_eq!(
            up.action.map(|action| action.kind),
            Some(DividerActionKind::Deactivate { moved: true })
        );
    }

    #[test]
    fn repeated_press_does_not_repeat_status() {
        let mut gate = DividerGate::new(SlotId::divider(0), LayoutAxis::Row);
        gate.handle(PointerPhase::Down, at(0.0));
        let again = gate.handle(PointerPhase::Down, at(3.0));
        assert_eq!(again.status_changed, None);
        assert!(again.action.is_some());
    }
}
