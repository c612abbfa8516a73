//! Predicates over a single analog value.
//!
//! Full travel is compared exactly: the SDK reports `1.0` and `0.0` at the
//! ends of travel.

/// Value as a percentage. Not clamped.
pub fn value_to_percent(value: f32) -> f32 {
    value * 100.0
}

/// `value == 1.0`.
#[expect(clippy::float_cmp, reason = "full travel is reported as exactly 1.0")]
pub fn is_fully_down(value: f32) -> bool {
    value == 1.0
}

/// `value == 0.0`.
#[expect(clippy::float_cmp, reason = "rest is reported as exactly 0.0")]
pub fn is_fully_up(value: f32) -> bool {
    value == 0.0
}

/// Any actuation at all.
pub fn is_down(value: f32) -> bool {
    value > 0.0
}

/// Anything short of full travel.
pub fn is_up(value: f32) -> bool {
    value < 1.0
}
