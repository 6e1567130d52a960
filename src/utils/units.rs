//! Unit conversions.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Lowest gain in dB. Anything at or below is treated as silence.
pub const MIN_GAIN_DB: f32 = -120.0;

/// Highest gain in dB applied by the modulation. Larger values are stored
/// but never boost the signal.
pub const MAX_GAIN_DB: f32 = 0.0;

/// Converts decibels to a linear amplitude factor.
///
/// Returns `0.0` for `db <= MIN_GAIN_DB`.
#[inline]
pub fn gain_to_linear(db: f32) -> f32 {
    if db > MIN_GAIN_DB {
        10.0_f32.powf(db * 0.05)
    } else {
        0.0
    }
}

/// Clamps a gain to the applied range and converts it to a coefficient in
/// `0.0..=1.0`.
#[inline]
pub fn gain_coefficient(db: f32) -> f32 {
    gain_to_linear(db.clamp(MIN_GAIN_DB, MAX_GAIN_DB))
}
