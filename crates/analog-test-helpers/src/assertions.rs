//! Assertions for analog readings.

/// Tolerance for comparing computed analog values.
pub const ANALOG_TOLERANCE: f32 = 1e-4;

/// Assert that a computed reading or percentage matches `expected` within
/// [`ANALOG_TOLERANCE`].
///
/// # Panics
///
/// Panics with both values and their difference when they disagree.
#[track_caller]
pub fn assert_analog_eq(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    if diff.is_nan() || diff > ANALOG_TOLERANCE {
        panic!("analog value {actual} differs from {expected} by {diff}");
    }
}

/// Assert that every sample value lies in the analog range `[0.0, 1.0]`.
///
/// # Panics
///
/// Panics on the first value outside the range.
#[track_caller]
pub fn assert_analog_range(values: impl IntoIterator<Item = f32>) {
    for (i, value) in values.into_iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            panic!("sample {i} has value {value}, outside [0.0, 1.0]");
        }
    }
}
