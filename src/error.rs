//! Configuration errors.
//!
//! These only come out of constructors. Anything odd arriving while
//! processing audio is clamped in place instead.

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The sample rate was zero, negative or not finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// A wavetable needs at least one entry.
    #[error("wavetable length must be greater than zero")]
    InvalidTableLength,
}
