#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splitflex::{
    Coordinate, DividerAction, EngineConfig, PanelConfig, SectionResize, SlotId, SplitEngine,
};

#[derive(Debug, Arbitrary)]
enum Step {
    Activate { divider: u8, x: i16, y: i16 },
    Move { divider: u8, x: i16, y: i16 },
    Deactivate { divider: u8, moved: bool },
    Resize { panel: u8, to: u16, left: bool },
    Cancel,
    Flush,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    extents: Vec<(u16, Option<u16>)>,
    vertical: bool,
    steps: Vec<Step>,
}

fuzz_target!(|input: FuzzInput| {
    if input.extents.is_empty() || input.extents.len() > 16 || input.steps.len() > 256 {
        return;
    }
    let config = if input.vertical {
        EngineConfig::column()
    } else {
        EngineConfig::row()
    };
    let mut engine = SplitEngine::new(config);
    let host: Vec<f64> = input
        .extents
        .iter()
        .map(|(extent, _)| f64::from(*extent))
        .collect();
    for (index, (extent, min)) in input.extents.iter().enumerate() {
        if index > 0 {
            engine.register_divider().expect("divider after panel");
        }
        let mut panel = PanelConfig::new();
        if let Some(min) = min {
            panel = panel.min_size(f64::from(*min.min(extent)));
        }
        engine.register_panel(panel).expect("valid panel config");
    }
    let total: f64 = host.iter().sum();

    for step in input.steps {
        match step {
            Step::Activate { divider, x, y } => {
                let action = DividerAction::activate(
                    SlotId::divider(usize::from(divider)),
                    Coordinate::new(f64::from(x), f64::from(y)),
                );
                engine.dispatch(action, &host[..]);
            }
            Step::Move { divider, x, y } => {
                let action = DividerAction::move_to(
                    SlotId::divider(usize::from(divider)),
                    Coordinate::new(f64::from(x), f64::from(y)),
                );
                engine.dispatch(action, &host[..]);
            }
            Step::Deactivate { divider, moved } => {
                let action = DividerAction::deactivate(
                    SlotId::divider(usize::from(divider)),
                    Coordinate::ORIGIN,
                    moved,
                );
                engine.dispatch(action, &host[..]);
            }
            Step::Resize { panel, to, left } => {
                let mut resizer = engine.resizer(&host[..]);
                let mut request = SectionResize::to(f64::from(to));
                if left {
                    request = request.prefer_move_left_divider();
                }
                resizer.resize_section(usize::from(panel), request);
                engine.commit(resizer);
            }
            Step::Cancel => {
                engine.force_cancel();
            }
            Step::Flush => {
                engine.flush_frame();
            }
        }

        if let Some(committed) = engine.committed() {
            assert_eq!(committed.total_size(), total, "committed total drifted");
            assert_eq!(committed.slots.panel_count(), host.len());
        }
    }
});
