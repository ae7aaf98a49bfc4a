//! Divider drag lifecycle.
//!
//! ```text
//! Idle --activate--> Active --move--> Active --deactivate--> Idle
//! ```
//!
//! Every move is solved against the baseline captured at activation, never
//! against the previous candidate, so returning the pointer to its origin
//! reproduces the baseline exactly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::resizer::Candidate;
use crate::size::SlotId;
use crate::snapshot::LayoutSnapshot;
use crate::{Coordinate, LayoutAxis};

/// Phase of a raw divider action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DividerActionKind {
    Activate,
    Move,
    /// `moved` is reported by the input layer: whether any move changed the
    /// pointer position since activation. A release without movement is a
    /// click.
    Deactivate { moved: bool },
}

/// One pointer action routed from a divider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividerAction {
    pub kind: DividerActionKind,
    pub coordinate: Coordinate,
    pub divider: SlotId,
}

impl DividerAction {
    #[must_use]
    pub const fn activate(divider: SlotId, coordinate: Coordinate) -> Self {
        Self {
            kind: DividerActionKind::Activate,
            coordinate,
            divider,
        }
    }

    #[must_use]
    pub const fn move_to(divider: SlotId, coordinate: Coordinate) -> Self {
        Self {
            kind: DividerActionKind::Move,
            coordinate,
            divider,
        }
    }

    #[must_use]
    pub const fn deactivate(divider: SlotId, coordinate: Coordinate, moved: bool) -> Self {
        Self {
            kind: DividerActionKind::Deactivate { moved },
            coordinate,
            divider,
        }
    }
}

/// Session state owned by [`DragSessionMachine`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragSessionState {
    #[default]
    Idle,
    Active {
        divider: SlotId,
        origin: Coordinate,
        baseline: Arc<LayoutSnapshot>,
    },
}

impl DragSessionState {
    /// State without the baseline payload, for diagnostics.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self {
            Self::Idle => DragPhase::Idle,
            Self::Active { divider, .. } => DragPhase::Active { divider: *divider },
        }
    }
}

/// Lightweight view of [`DragSessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Active { divider: SlotId },
}

/// Why an action left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    DividerMismatch,
    InvalidDivider,
}

/// Outcome of one lifecycle step.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    /// A session started (or re-anchored). The candidate is the baseline.
    Activated {
        divider: SlotId,
        candidate: Candidate,
    },
    Moved {
        divider: SlotId,
        offset: f64,
        candidate: Candidate,
    },
    /// The session ended. Carries no layout.
    Released { divider: SlotId, clicked: bool },
    /// The session was torn down without a release.
    Canceled { divider: SlotId },
    Noop { reason: DragNoopReason },
}

impl DragEffect {
    /// Candidate layout produced by this step, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Activated { candidate, .. } | Self::Moved { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

/// Drag session state machine for one container.
#[derive(Debug, Clone, Default)]
pub struct DragSessionMachine {
    axis: LayoutAxis,
    state: DragSessionState,
    transition_counter: u64,
}

impl DragSessionMachine {
    #[must_use]
    pub fn new(axis: LayoutAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn axis(&self) -> LayoutAxis {
        self.axis
    }

    #[must_use]
    pub const fn state(&self) -> &DragSessionState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragSessionState::Active { .. })
    }

    #[must_use]
    pub fn active_divider(&self) -> Option<SlotId> {
        match &self.state {
            DragSessionState::Active { divider, .. } => Some(*divider),
            DragSessionState::Idle => None,
        }
    }

    /// Drop any active session, e.g. when the host tears the container down
    /// mid-gesture. Returns `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let divider = self.active_divider()?;
        let from = self.state.phase();
        self.state = DragSessionState::Idle;
        tracing::debug!(%divider, "drag session canceled");
        Some(self.record(from, DragEffect::Canceled { divider }))
    }

    /// Apply one action. `measure` is called only when a session starts and
    /// must return the current full layout.
    pub fn apply<F>(&mut self, action: &DividerAction, measure: F) -> DragTransition
    where
        F: FnOnce() -> LayoutSnapshot,
    {
        let from = self.state.phase();
        let effect = match (&self.state, action.kind) {
            (DragSessionState::Active { divider, .. }, DividerActionKind::Activate)
                if *divider != action.divider =>
            {
                DragEffect::Noop {
                    reason: DragNoopReason::ActiveDragAlreadyInProgress,
                }
            }
            (_, DividerActionKind::Activate) => self.activate(action, measure),
            (DragSessionState::Idle, _) => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            (DragSessionState::Active { divider, .. }, _) if *divider != action.divider => {
                DragEffect::Noop {
                    reason: DragNoopReason::DividerMismatch,
                }
            }
            (
                DragSessionState::Active {
                    divider,
                    origin,
                    baseline,
                },
                DividerActionKind::Move,
            ) => {
                let offset = self.axis.component(action.coordinate.offset_from(*origin));
                let snapshot = baseline.redistributed(*divider, offset);
                DragEffect::Moved {
                    divider: *divider,
                    offset,
                    candidate: Candidate::drag(snapshot, *divider, Arc::clone(baseline)),
                }
            }
            (DragSessionState::Active { divider, .. }, DividerActionKind::Deactivate { moved }) => {
                let divider = *divider;
                self.state = DragSessionState::Idle;
                DragEffect::Released {
                    divider,
                    clicked: !moved,
                }
            }
        };

        match &effect {
            DragEffect::Noop { reason } => {
                tracing::trace!(divider = %action.divider, ?reason, "divider action ignored");
            }
            DragEffect::Moved { divider, offset, .. } => {
                tracing::trace!(%divider, offset, "drag moved");
            }
            DragEffect::Activated { divider, .. } => {
                tracing::debug!(%divider, axis = ?self.axis, "drag session activated");
            }
            DragEffect::Released { divider, clicked } => {
                tracing::debug!(%divider, clicked, "drag session released");
            }
            DragEffect::Canceled { .. } => {}
        }

        self.record(from, effect)
    }

    fn activate<F>(&mut self, action: &DividerAction, measure: F) -> DragEffect
    where
        F: FnOnce() -> LayoutSnapshot,
    {
        if !action.divider.is_divider() {
            return DragEffect::Noop {
                reason: DragNoopReason::InvalidDivider,
            };
        }
        let baseline = measure();
        if !baseline.slots.contains_divider(action.divider) {
            return DragEffect::Noop {
                reason: DragNoopReason::InvalidDivider,
            };
        }
        let baseline = Arc::new(baseline);
        self.state = DragSessionState::Active {
            divider: action.divider,
            origin: action.coordinate,
            baseline: Arc::clone(&baseline),
        };
        DragEffect::Activated {
            divider: action.divider,
            candidate: Candidate::drag((*baseline).clone(), action.divider, baseline),
        }
    }

    fn record(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.phase(),
            effect,
        }
    }
}
