//! Confidence-factor combination
//!
//! Two independent rules reaching the same conclusion value corroborate
//! each other: `cf1 + cf2 * (1 - cf1)` when both are non-negative.
//! Any negative input falls back to `max(cf1, cf2)`. This is a
//! simplification, not the full MYCIN disbelief model.

/// Full belief
pub const CERTAIN: f64 = 1.0;

/// No evidence either way
pub const UNKNOWN: f64 = 0.0;

/// Merges two confidence factors for the same conclusion value.
pub fn combine(cf1: f64, cf2: f64) -> f64 {
    if cf1 >= 0.0 && cf2 >= 0.0 {
        cf1 + cf2 * (1.0 - cf1)
    } else {
        cf1.max(cf2)
    }
}
