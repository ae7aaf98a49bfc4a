//! Property invariants for divider redistribution and drag sessions.
//!
//! Sizes and offsets are whole pixels so sums stay exact in `f64` and the
//! conservation check can use equality.

use proptest::prelude::*;
use splitflex::{
    Coordinate, DividerAction, DragSessionMachine, LayoutAxis, LayoutSnapshot, PanelSize,
    SlotArray, SlotId, redistribute,
};

fn panel_strategy() -> impl Strategy<Value = PanelSize> {
    (
        0u32..400,
        0u32..200,
        prop::option::of(0u32..200),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(size, below, above, solid, disable_responsive)| {
            let current = f64::from(size);
            let mut panel = if solid {
                PanelSize::solid(current)
            } else {
                PanelSize::flexible(current).with_disable_responsive(disable_responsive)
            };
            panel = panel.with_min_size(f64::from(size.saturating_sub(below)));
            if let Some(above) = above {
                panel = panel.with_max_size(f64::from(size + above));
            }
            panel
        })
}

/// Panels whose measured size may sit outside their own bounds, as happens
/// when the host resizes the container.
fn measured_panel_strategy() -> impl Strategy<Value = PanelSize> {
    (
        0u32..600,
        0u32..400,
        prop::option::of(0u32..300),
        any::<bool>(),
    )
        .prop_map(|(size, min, extra, solid)| {
            let current = f64::from(size);
            let mut panel = if solid {
                PanelSize::solid(current)
            } else {
                PanelSize::flexible(current)
            };
            panel = panel.with_min_size(f64::from(min));
            if let Some(extra) = extra {
                panel = panel.with_max_size(f64::from(min + extra));
            }
            panel
        })
}

fn layout_strategy() -> impl Strategy<Value = SlotArray> {
    prop::collection::vec(panel_strategy(), 2..8).prop_map(SlotArray::from_panels)
}

fn layout_with_divider() -> impl Strategy<Value = (SlotArray, SlotId, f64)> {
    layout_strategy().prop_flat_map(|slots| {
        let dividers = slots.divider_count();
        (
            Just(slots),
            (0..dividers).prop_map(SlotId::divider),
            (-600i32..600).prop_map(f64::from),
        )
    })
}

fn measured_layout_with_divider() -> impl Strategy<Value = (SlotArray, SlotId, f64)> {
    prop::collection::vec(measured_panel_strategy(), 2..8)
        .prop_map(SlotArray::from_panels)
        .prop_flat_map(|slots| {
            let dividers = slots.divider_count();
            (
                Just(slots),
                (0..dividers).prop_map(SlotId::divider),
                (-800i32..800).prop_map(f64::from),
            )
        })
}

fn assert_within_bounds(slots: &SlotArray) {
    for panel in slots.panels() {
        assert!(panel.is_within_bounds(), "panel out of bounds: {panel:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn redistribution_conserves_total_size((slots, divider, offset) in layout_with_divider()) {
        let next = redistribute(divider, offset, &slots);
        prop_assert_eq!(next.total_size(), slots.total_size());
        prop_assert_eq!(next.len(), slots.len());
    }

    #[test]
    fn redistribution_respects_bounds((slots, divider, offset) in layout_with_divider()) {
        let next = redistribute(divider, offset, &slots);
        assert_within_bounds(&next);
    }

    #[test]
    fn measured_layouts_conserve_total_size(
        (slots, divider, offset) in measured_layout_with_divider(),
    ) {
        let next = redistribute(divider, offset, &slots);
        prop_assert_eq!(next.total_size(), slots.total_size());
    }

    #[test]
    fn out_of_bounds_panels_only_move_towards_bounds(
        (slots, divider, offset) in measured_layout_with_divider(),
    ) {
        let next = redistribute(divider, offset, &slots);
        for (before, after) in slots.panels().zip(next.panels()) {
            if before.is_within_bounds() {
                prop_assert!(after.is_within_bounds(), "{:?} -> {:?}", before, after);
                continue;
            }
            prop_assert!(after.current_size >= before.min_size.min(before.current_size));
            if let Some(max) = before.max_size {
                prop_assert!(after.current_size <= max.max(before.current_size));
            }
        }
    }

    #[test]
    fn solid_panels_are_never_resized((slots, divider, offset) in layout_with_divider()) {
        let next = redistribute(divider, offset, &slots);
        for (before, after) in slots.panels().zip(next.panels()) {
            if before.is_solid {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn zero_offset_is_identity((slots, divider, _offset) in layout_with_divider()) {
        prop_assert_eq!(redistribute(divider, 0.0, &slots), slots);
    }

    #[test]
    fn divider_moves_in_requested_direction((slots, divider, offset) in layout_with_divider()) {
        let next = redistribute(divider, offset, &slots);
        let split = divider.get();
        let before: f64 = slots.as_slice()[..split]
            .iter()
            .filter_map(|slot| slot.as_panel())
            .map(|panel| panel.current_size)
            .sum();
        let after: f64 = next.as_slice()[..split]
            .iter()
            .filter_map(|slot| slot.as_panel())
            .map(|panel| panel.current_size)
            .sum();
        let moved = after - before;
        prop_assert!(moved.abs() <= offset.abs());
        prop_assert!(moved == 0.0 || moved.signum() == offset.signum());
    }

    #[test]
    fn returning_to_origin_restores_baseline(
        (slots, divider, _offset) in layout_with_divider(),
        path in prop::collection::vec(-500i32..500, 1..12),
    ) {
        let baseline = LayoutSnapshot::from_slots(slots);
        let mut machine = DragSessionMachine::new(LayoutAxis::Row);
        let origin = Coordinate::new(1000.0, 0.0);
        machine.apply(&DividerAction::activate(divider, origin), || baseline.clone());

        for step in path {
            let position = Coordinate::new(origin.x + f64::from(step), 0.0);
            let transition = machine.apply(&DividerAction::move_to(divider, position), || {
                unreachable!("baseline is captured once")
            });
            let candidate = transition.effect.candidate().expect("move yields a candidate");
            prop_assert_eq!(candidate.snapshot.total_size(), baseline.total_size());
        }

        let back = machine.apply(&DividerAction::move_to(divider, origin), || baseline.clone());
        prop_assert_eq!(&back.effect.candidate().expect("candidate").snapshot, &baseline);
    }
}

#[test]
fn cascade_example_from_three_equal_panels() {
    let slots = SlotArray::from_panels([
        PanelSize::flexible(100.0).with_min_size(50.0),
        PanelSize::flexible(100.0),
        PanelSize::flexible(100.0),
    ]);
    let next = redistribute(SlotId::divider(0), -80.0, &slots);
    assert_eq!(next.panel_sizes(), vec![50.0, 150.0, 100.0]);
}

#[test]
fn long_cascade_across_many_saturated_panels() {
    let slots = SlotArray::from_panels([
        PanelSize::flexible(100.0),
        PanelSize::flexible(60.0).with_min_size(50.0),
        PanelSize::solid(30.0),
        PanelSize::flexible(60.0).with_min_size(40.0),
        PanelSize::flexible(80.0),
    ]);
    // Push the first divider 120px right. The bounded panels give 10 and 20,
    // the solid panel is skipped and the last panel runs out after 80, so the
    // divider only travels 110px.
    let next = redistribute(SlotId::divider(0), 120.0, &slots);
    assert_eq!(next.panel_sizes(), vec![210.0, 50.0, 30.0, 40.0, 0.0]);
    assert_eq!(next.total_size(), slots.total_size());
}
