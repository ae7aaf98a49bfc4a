//! Configuration and registration errors.
//!
//! Layout computation itself never fails: bad indices and saturated bounds
//! degrade to no-ops. Only the host-facing setup path returns these.

use std::fmt;

use crate::size::SlotId;

/// Kind of slot expected at a registration position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Panel,
    Divider,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => f.write_str("panel"),
            Self::Divider => f.write_str("divider"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Registration broke the panel/divider alternation.
    SlotOrder {
        slot: SlotId,
        expected: SlotKind,
        found: SlotKind,
    },
    /// A configured size is not a finite, non-negative number.
    InvalidSize {
        slot: SlotId,
        field: &'static str,
        value: f64,
    },
    /// `max_size` is below `min_size`.
    InvalidBounds { slot: SlotId, min: f64, max: f64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotOrder {
                slot,
                expected,
                found,
            } => write!(
                f,
                "slot {} must be a {expected}, got a {found}",
                slot.get()
            ),
            Self::InvalidSize { slot, field, value } => {
                write!(f, "{slot}: {field} must be finite and >= 0 (got {value})")
            }
            Self::InvalidBounds { slot, min, max } => {
                write!(f, "{slot}: max_size {max} is below min_size {min}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_slot() {
        let err = LayoutError::SlotOrder {
            slot: SlotId::new(1),
            expected: SlotKind::Divider,
            found: SlotKind::Panel,
        };
        assert_eq!(err.to_string(), "slot 1 must be a divider, got a panel");

        let err = LayoutError::InvalidBounds {
            slot: SlotId::panel(2),
            min: 50.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "panel#2: max_size 10 is below min_size 50");
    }
}
