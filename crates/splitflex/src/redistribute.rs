//! Divider displacement solver.
//!
//! Moving a divider by `offset` grows one side and shrinks the other. Each
//! side is resolved independently against the original slots: the nearest
//! panel takes as much of the offset as its bounds allow and the remainder
//! cascades outward. Solid panels and divider markers pass the offset through
//! untouched. When one side saturates first, the other side is re-resolved
//! with the amount the limiting side actually absorbed, so the panel total
//! never changes.

use crate::size::{Slot, SlotArray, SlotId};

/// Walk direction away from the moved divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Backward,
    Forward,
}

#[derive(Debug)]
struct SideResolution {
    /// Slots on this side, in original array order.
    slots: Vec<Slot>,
    /// Offset that no panel on this side could absorb.
    remaining: f64,
}

impl SideResolution {
    fn used(&self, requested: f64) -> f64 {
        requested - self.remaining
    }
}

/// Apply `offset` at `divider`, returning the redistributed slots.
///
/// A positive offset moves the divider towards the end of the sequence:
/// panels before it grow, panels after it shrink. Returns an unchanged copy
/// when `divider` does not name a divider in `slots` or `offset` is zero or
/// not finite.
#[must_use]
pub fn redistribute(divider: SlotId, offset: f64, slots: &SlotArray) -> SlotArray {
    if !slots.contains_divider(divider) {
        tracing::trace!(slot = divider.get(), "redistribute ignored: not a divider");
        return slots.clone();
    }
    if offset == 0.0 || !offset.is_finite() {
        return slots.clone();
    }

    let raw = slots.as_slice();
    let at = divider.get();

    let backward = resolve_side(raw, at, offset, Trend::Backward);
    let forward = resolve_side(raw, at, -offset, Trend::Forward);

    let backward_used = backward.used(offset);
    let forward_used = forward.used(-offset);

    let (backward, forward, applied) = if backward_used == -forward_used {
        (backward, forward, backward_used)
    } else if backward_used.abs() < forward_used.abs() {
        // Panels before the divider saturated first.
        let forward = resolve_side(raw, at, -backward_used, Trend::Forward);
        (backward, forward, backward_used)
    } else {
        let backward = resolve_side(raw, at, -forward_used, Trend::Backward);
        (backward, forward, -forward_used)
    };

    tracing::trace!(slot = at, offset, applied, "redistributed");

    let mut next = backward.slots;
    next.reserve(raw.len() - next.len());
    next.push(raw[at]);
    next.extend(forward.slots);
    SlotArray::from_slots(next)
}

fn resolve_side(slots: &[Slot], divider: usize, offset: f64, trend: Trend) -> SideResolution {
    match trend {
        Trend::Backward => {
            let mut side = absorb_run(slots[..divider].iter().rev(), offset);
            side.slots.reverse();
            side
        }
        Trend::Forward => absorb_run(slots[divider + 1..].iter(), offset),
    }
}

/// Feed `offset` through `run` in walk order, nearest slot first.
fn absorb_run<'a>(run: impl Iterator<Item = &'a Slot>, offset: f64) -> SideResolution {
    let mut remaining = offset;
    let slots = run
        .map(|slot| match *slot {
            Slot::Panel(panel) if remaining != 0.0 && !panel.is_solid => {
                let (size, overflow) = panel.absorb(remaining);
                remaining = overflow;
                Slot::Panel(panel.resized(size))
            }
            other => other,
        })
        .collect();

    SideResolution { slots, remaining }
}
