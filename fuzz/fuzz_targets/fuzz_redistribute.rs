#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splitflex::{PanelSize, SlotArray, SlotId, redistribute};

#[derive(Debug, Arbitrary)]
struct FuzzPanel {
    size: u16,
    min: u16,
    extra: Option<u16>,
    solid: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    panels: Vec<FuzzPanel>,
    divider: u8,
    offset: i32,
}

fuzz_target!(|input: FuzzInput| {
    if input.panels.len() < 2 || input.panels.len() > 64 {
        return;
    }
    let slots = SlotArray::from_panels(input.panels.iter().map(|panel| {
        let size = f64::from(panel.size);
        let mut record = if panel.solid {
            PanelSize::solid(size)
        } else {
            PanelSize::flexible(size)
        };
        // The measured size may sit outside the bounds.
        record = record.with_min_size(f64::from(panel.min));
        if let Some(extra) = panel.extra {
            record = record.with_max_size(f64::from(panel.min) + f64::from(extra));
        }
        record
    }));
    let divider = SlotId::divider(usize::from(input.divider) % slots.divider_count());
    let offset = f64::from(input.offset);

    let next = redistribute(divider, offset, &slots);

    // Whole-pixel inputs keep every sum exact.
    assert_eq!(next.total_size(), slots.total_size(), "total size changed");
    for (before, after) in slots.panels().zip(next.panels()) {
        if before.is_within_bounds() {
            assert!(after.is_within_bounds(), "left its bounds");
        }
        assert!(
            after.current_size >= before.min_size.min(before.current_size),
            "moved away from minimum"
        );
        if let Some(max) = before.max_size {
            assert!(
                after.current_size <= max.max(before.current_size),
                "moved away from maximum"
            );
        }
        if before.is_solid {
            assert_eq!(before, after, "solid panel resized");
        }
    }
});
