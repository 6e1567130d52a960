//! Single-period waveform tables for the modulation oscillator.
//!
//! Tables are computed once when an effect is created and are read-only
//! afterwards. Each effect owns its tables.

use alloc::boxed::Box;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::error::Error;

/// Waveform stored in a [`WaveTable`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WaveShape {
    #[default]
    Sine,
    Square,
}

impl WaveShape {
    /// Maps a continuous mode control to a shape.
    ///
    /// The value is rounded to the nearest integer first: `<= 0` selects
    /// [`WaveShape::Sine`], anything above selects [`WaveShape::Square`].
    /// NaN selects sine.
    #[inline]
    pub fn from_control(mode: f32) -> Self {
        if mode.round() > 0.0 {
            Self::Square
        } else {
            Self::Sine
        }
    }
}

/// One period of a waveform in the range `-1.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    shape: WaveShape,
    samples: Box<[f32]>,
}

impl WaveTable {
    /// Builds a table with `length` entries.
    ///
    /// Entry `i` of the sine table is `sin(2π·i/length)`. The square table
    /// holds `+1.0` where that sine is strictly positive and `-1.0`
    /// elsewhere, zero crossings included.
    pub fn build(length: usize, shape: WaveShape) -> Result<Self, Error> {
        if length == 0 {
            return Err(Error::InvalidTableLength);
        }

        let step = 2.0 * core::f64::consts::PI / length as f64;
        let samples = (0..length)
            .map(|i| {
                let s = (i as f64 * step).sin();
                match shape {
                    WaveShape::Sine => s as f32,
                    WaveShape::Square => {
                        if s > 0.0 {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                }
            })
            .collect();

        Ok(Self { shape, samples })
    }

    #[inline]
    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a successfully built table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Returns the entry at `floor(phase * len)`.
    ///
    /// `phase` is expected in `0.0..1.0`. The index is clamped to the last
    /// entry because `phase * len` can round up to `len` for a phase just
    /// below one.
    #[inline]
    pub fn at_phase(&self, phase: f32) -> f32 {
        let last = self.samples.len() - 1;
        let index = ((phase * self.samples.len() as f32) as usize).min(last);
        self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(
            WaveTable::build(0, WaveShape::Sine),
            Err(Error::InvalidTableLength)
        );
    }

    #[test]
    fn lookup_never_leaves_table() {
        let table = WaveTable::build(512, WaveShape::Square).unwrap();
        let just_below_one = 1.0 - f32::EPSILON / 2.0;
        assert_eq!(table.at_phase(just_below_one), -1.0);
        assert_eq!(table.at_phase(0.0), -1.0);
    }

    #[test]
    fn mode_rounding() {
        assert_eq!(WaveShape::from_control(-3.0), WaveShape::Sine);
        assert_eq!(WaveShape::from_control(0.0), WaveShape::Sine);
        assert_eq!(WaveShape::from_control(0.49), WaveShape::Sine);
        assert_eq!(WaveShape::from_control(0.5), WaveShape::Square);
        assert_eq!(WaveShape::from_control(1.0), WaveShape::Square);
        assert_eq!(WaveShape::from_control(f32::NAN), WaveShape::Sine);
    }
}
