//! Scoring rules
//!
//! - A freeze that clears `n` rows awards `100 * n^2`.
//! - A legal manual soft-drop step awards a flat point.
//! - Gravity steps award nothing, and a soft drop that cannot descend awards
//!   only the clear bonus of the resulting freeze.

use crate::types::{LINE_CLEAR_BASE, SOFT_DROP_POINTS};

/// Points for clearing `rows` rows in one freeze
pub fn line_clear_points(rows: usize) -> u32 {
    let n = rows as u32;
    LINE_CLEAR_BASE.saturating_mul(n.saturating_mul(n))
}

/// Points for `steps` legal soft-drop steps
pub fn soft_drop_points(steps: u32) -> u32 {
    steps.saturating_mul(SOFT_DROP_POINTS)
}
