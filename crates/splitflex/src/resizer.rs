//! Override/commit handle over a candidate layout.
//!
//! Before a candidate is committed the engine hands a [`Resizer`] to the
//! host's before-apply hook. The hook can query sizes, move dividers, resize
//! panels or veto the candidate with [`Resizer::discard`]. Panel and divider
//! indices here are ordinals (`0..N` panels, `0..N-1` dividers), not slot ids.

use std::sync::Arc;

use crate::size::{SlotId, is_valid_size};
use crate::snapshot::LayoutSnapshot;

/// Where a candidate came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOrigin {
    /// Produced by a drag session on `divider`.
    Drag {
        divider: SlotId,
        baseline: Arc<LayoutSnapshot>,
    },
    /// Produced by an imperative request from the host.
    External,
}

/// A layout waiting for the before-apply hook.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub snapshot: LayoutSnapshot,
    pub origin: CandidateOrigin,
}

impl Candidate {
    #[must_use]
    pub fn external(snapshot: LayoutSnapshot) -> Self {
        Self {
            snapshot,
            origin: CandidateOrigin::External,
        }
    }

    #[must_use]
    pub fn drag(snapshot: LayoutSnapshot, divider: SlotId, baseline: Arc<LayoutSnapshot>) -> Self {
        Self {
            snapshot,
            origin: CandidateOrigin::Drag { divider, baseline },
        }
    }
}

/// Target for [`Resizer::resize_section`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionResize {
    pub to_size: f64,
    /// Absorb the change with the divider before the panel instead of the
    /// one after it.
    pub prefer_move_left_divider: bool,
}

impl SectionResize {
    #[must_use]
    pub const fn to(to_size: f64) -> Self {
        Self {
            to_size,
            prefer_move_left_divider: false,
        }
    }

    #[must_use]
    pub const fn prefer_move_left_divider(mut self) -> Self {
        self.prefer_move_left_divider = true;
        self
    }
}

/// Query/mutation handle bound to one candidate.
///
/// Mutations replace the bound snapshot with a new value. Once discarded the
/// handle is inert.
#[derive(Debug, Clone)]
pub struct Resizer {
    candidate: Candidate,
    discarded: bool,
}

impl Resizer {
    #[must_use]
    pub fn new(candidate: Candidate) -> Self {
        let discarded = candidate.snapshot.discard;
        Self {
            candidate,
            discarded,
        }
    }

    /// Resize panel `index` to `request.to_size` by moving an adjacent divider.
    ///
    /// The divider after the panel is used unless the panel is last or the
    /// request prefers the divider before it. No-op for unknown panels,
    /// non-finite targets, or when the chosen divider does not exist.
    pub fn resize_section(&mut self, index: usize, request: SectionResize) {
        if self.discarded {
            return;
        }
        let Some(current) = self.section_size(index) else {
            return;
        };
        if !is_valid_size(current) || !is_valid_size(request.to_size) {
            return;
        }
        let offset = request.to_size - current;
        let is_last = index + 1 == self.candidate.snapshot.slots.panel_count();

        if is_last || request.prefer_move_left_divider {
            // Moving the leading divider backwards grows this panel.
            if let Some(divider) = index.checked_sub(1) {
                self.move_divider(divider, -offset);
            }
        } else {
            self.move_divider(index, offset);
        }
    }

    /// Move divider `index` by `offset` pixels.
    pub fn move_divider(&mut self, index: usize, offset: f64) {
        if self.discarded {
            return;
        }
        self.candidate.snapshot = self
            .candidate
            .snapshot
            .redistributed(SlotId::divider(index), offset);
    }

    /// Veto this candidate. Further mutations are ignored.
    pub fn discard(&mut self) {
        if !self.discarded {
            tracing::debug!("candidate discarded by before-apply hook");
        }
        self.discarded = true;
    }

    #[must_use]
    pub const fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Current size of panel `index`, `None` if there is no such panel.
    #[must_use]
    pub fn section_size(&self, index: usize) -> Option<f64> {
        self.candidate
            .snapshot
            .slots
            .panel(index)
            .map(|panel| panel.current_size)
    }

    /// Whether panel `index` differs from the drag baseline.
    ///
    /// Always `false` for external candidates and discarded handles.
    #[must_use]
    pub fn is_section_resized(&self, index: usize) -> bool {
        if self.discarded {
            return false;
        }
        let CandidateOrigin::Drag { baseline, .. } = &self.candidate.origin else {
            return false;
        };
        match (self.section_size(index), baseline.slots.panel(index)) {
            (Some(current), Some(original)) => current != original.current_size,
            _ => false,
        }
    }

    /// Whether divider `index` is the one being dragged.
    #[must_use]
    pub fn is_divider_activated(&self, index: usize) -> bool {
        matches!(
            self.candidate.origin,
            CandidateOrigin::Drag { divider, .. } if divider == SlotId::divider(index)
        )
    }

    /// Sum of all panel sizes.
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.candidate.snapshot.total_size()
    }

    #[must_use]
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.candidate.snapshot
    }

    #[must_use]
    pub fn origin(&self) -> &CandidateOrigin {
        &self.candidate.origin
    }

    /// The (possibly mutated) snapshot tagged with the discard flag.
    #[must_use]
    pub fn result(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            discard: self.discarded,
            ..self.candidate.snapshot.clone()
        }
    }

    #[must_use]
    pub fn into_result(self) -> LayoutSnapshot {
        self.into_candidate().snapshot
    }

    /// Consume the handle, keeping the origin for a further hook pass.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let mut candidate = self.candidate;
        candidate.snapshot.discard = self.discarded;
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{PanelSize, SlotArray};

    fn snapshot(sizes: &[f64]) -> LayoutSnapshot {
        LayoutSnapshot::from_slots(SlotArray::from_panels(
            sizes.iter().map(|size| PanelSize::flexible(*size)),
        ))
    }

    fn drag_resizer(sizes: &[f64], divider: usize) -> Resizer {
        let baseline = Arc::new(snapshot(sizes));
        Resizer::new(Candidate::drag(
            (*baseline).clone(),
            SlotId::divider(divider),
            baseline,
        ))
    }

    #[test]
    fn resize_middle_section_moves_right_divider() {
        let mut resizer = Resizer::new(Candidate::external(snapshot(&[200.0, 200.0, 200.0])));
        resizer.resize_section(1, SectionResize::to(300.0));
        assert_eq!(
            resizer.snapshot().slots.panel_sizes(),
            vec![200.0, 300.0, 100.0]
        );
    }

    #[test]
    fn resize_with_left_preference_moves_left_divider() {
        let mut resizer = Resizer::new(Candidate::external(snapshot(&[200.0, 200.0, 200.0])));
        resizer.resize_section(1, SectionResize::to(300.0).prefer_move_left_divider());
        assert_eq!(
            resizer.snapshot().slots.panel_sizes(),
            vec![100.0, 300.0, 200.0]
        );
    }

    #[test]
    fn resize_last_section_uses_left_divider() {
        let mut resizer = Resizer::new(Candidate::external(snapshot(&[200.0, 200.0, 200.0])));
        resizer.resize_section(2, SectionResize::to(250.0));
        assert_eq!(
            resizer.snapshot().slots.panel_sizes(),
            vec![200.0, 150.0, 250.0]
        );
    }

    #[test]
    fn resize_without_usable_divider_is_noop() {
        let mut single = Resizer::new(Candidate::external(snapshot(&[300.0])));
        single.resize_section(0, SectionResize::to(100.0));
        assert_eq!(single.section_size(0), Some(300.0));

        let mut first = Resizer::new(Candidate::external(snapshot(&[100.0, 100.0])));
        first.resize_section(0, SectionResize::to(50.0).prefer_move_left_divider());
        assert_eq!(first.snapshot().slots.panel_sizes(), vec![100.0, 100.0]);

        first.resize_section(9, SectionResize::to(50.0));
        first.resize_section(0, SectionResize::to(f64::NAN));
        assert_eq!(first.snapshot().slots.panel_sizes(), vec![100.0, 100.0]);
    }

    #[test]
    fn negative_target_clamps_to_minimum() {
        let mut resizer = Resizer::new(Candidate::external(snapshot(&[100.0, 100.0])));
        resizer.resize_section(0, SectionResize::to(-40.0));
        assert_eq!(resizer.snapshot().slots.panel_sizes(), vec![0.0, 200.0]);
    }

    #[test]
    fn discard_makes_handle_inert() {
        let mut resizer = drag_resizer(&[100.0, 100.0], 0);
        resizer.move_divider(0, 20.0);
        resizer.discard();
        resizer.move_divider(0, 50.0);
        resizer.resize_section(0, SectionResize::to(10.0));
        assert_eq!(resizer.section_size(0), Some(120.0));
        assert!(!resizer.is_section_resized(0));
        let result = resizer.into_result();
        assert!(result.discard);
    }

    #[test]
    fn resized_and_activated_queries_follow_origin() {
        let mut resizer = drag_resizer(&[100.0, 100.0, 100.0], 1);
        assert!(matches!(
            resizer.origin(),
            CandidateOrigin::Drag { divider, .. } if *divider == SlotId::divider(1)
        ));
        assert!(resizer.is_divider_activated(1));
        assert!(!resizer.is_divider_activated(0));
        assert!(!resizer.is_section_resized(1));

        resizer.move_divider(1, 25.0);
        assert!(resizer.is_section_resized(1));
        assert!(resizer.is_section_resized(2));
        assert!(!resizer.is_section_resized(0));
        assert!(!resizer.is_section_resized(5));

        let external = Resizer::new(Candidate::external(snapshot(&[100.0, 100.0])));
        assert_eq!(external.origin(), &CandidateOrigin::External);
        assert!(!external.is_divider_activated(0));
        assert!(!external.is_section_resized(0));
    }

    #[test]
    fn totals_and_unknown_sections() {
        let resizer = Resizer::new(Candidate::external(snapshot(&[120.0, 80.0, 50.0])));
        assert_eq!(resizer.total_size(), 250.0);
        assert_eq!(resizer.section_size(3), None);
        assert!(!resizer.result().discard);
    }
}
