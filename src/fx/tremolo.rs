//! Wavetable tremolo.
//!
//! Amplitude modulation of a mono signal. The modulation swings between
//! unity gain and a target gain set in dB, at a rate set in Hz, following a
//! sine or square table.
//!
//! Gain and rate are latched once per block and chase their targets with a
//! one-pole smoother, so live parameter changes do not click. Nothing in the
//! block or sample path allocates, locks or logs.

use log::{debug, warn};

use crate::error::Error;
use crate::utils::{one_pole, settle};
use crate::utils::units::gain_coefficient;
use crate::wavetable::{WaveShape, WaveTable};
use crate::{DEFAULT_SAMPLE_RATE, DEFAULT_TABLE_LENGTH};

/// Fraction of the remaining distance to the target covered per block.
pub const SMOOTHING_COEFFICIENT: f32 = 0.1;

/// Rates at or below zero, or not finite, are replaced by this.
pub const MIN_FREQUENCY_HZ: f32 = 0.001;

/// Smoothed values closer than this to their target snap onto it, so a
/// decay towards zero never stalls in the subnormal range.
pub const SETTLE_THRESHOLD: f32 = 1e-6;

// Half a period per sample, i.e. the Nyquist rate.
const MAX_PHASE_INCREMENT: f64 = 0.5;

/// Construction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sample rate in Hz. Must be positive and finite. Default is `48000.0`.
    pub sample_rate: f32,

    /// Entries per waveform period. Must be non-zero. Default is `512`.
    pub table_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            table_length: DEFAULT_TABLE_LENGTH,
        }
    }
}

/// Control values supplied with every block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Gain at the modulation trough in dB. Applied within `-120.0` to `0.0`,
    /// values above `0.0` act as unity. Default is `-6.0`.
    pub gain_db: f32,

    /// Modulation rate in Hz, expected above `0.0`. Default is `1.0`.
    pub frequency_hz: f32,

    /// Waveform selection, rounded to the nearest integer: `<= 0` is sine,
    /// `> 0` is square. Default is `0.0`.
    pub mode: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gain_db: -6.0,
            frequency_hz: 1.0,
            mode: 0.0,
        }
    }
}

/// Whether the effect is inside a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Created or deactivated. Blocks render silence.
    #[default]
    Inactive,

    /// Activated and processing blocks.
    Active,
}

#[derive(Debug, Clone)]
pub struct Tremolo {
    sample_rate: f32,
    sine: WaveTable,
    square: WaveTable,

    state: Activation,
    shape: WaveShape,

    // Oscillator state. Accumulated in double precision so long sessions
    // at low rates do not drift.
    phase: f64,
    phase_increment: f64,

    // Smoothed gain.
    gain_db: f32,
    gain_coefficient: f32,
    gain_coefficient_target: f32,

    // Smoothed rate.
    frequency: f32,
    frequency_target: f32,
    frequency_last: f32,
}

impl Tremolo {
    /// Creates an inactive effect with the default table length.
    pub fn new(sample_rate: f32) -> Result<Self, Error> {
        Self::from_config(&Config {
            sample_rate,
            ..Config::default()
        })
    }

    /// Creates an inactive effect and builds its wavetables.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
            warn!("rejecting sample rate {} Hz", config.sample_rate);
            return Err(Error::InvalidSampleRate(config.sample_rate));
        }

        let build = |shape| {
            WaveTable::build(config.table_length, shape).map_err(|err| {
                warn!("rejecting wavetable length {}", config.table_length);
                err
            })
        };
        let sine = build(WaveShape::Sine)?;
        let square = build(WaveShape::Square)?;

        let defaults = Parameters::default();
        let mut tremolo = Self {
            sample_rate: config.sample_rate,
            sine,
            square,
            state: Activation::Inactive,
            shape: WaveShape::default(),
            phase: 0.0,
            phase_increment: 0.0,
            gain_db: defaults.gain_db,
            gain_coefficient: 0.0,
            gain_coefficient_target: 0.0,
            frequency: 0.0,
            frequency_target: 0.0,
            frequency_last: 0.0,
        };
        tremolo.reset(defaults.gain_db, defaults.frequency_hz);

        debug!(
            "tremolo created at {} Hz with {} entry tables",
            config.sample_rate, config.table_length
        );

        Ok(tremolo)
    }

    /// Starts a session.
    ///
    /// Resets the phase and snaps the smoothed gain and rate straight to the
    /// given values. This is the only way to discard smoothing state.
    pub fn activate(&mut self, gain_db: f32, frequency_hz: f32) {
        self.reset(gain_db, frequency_hz);
        self.state = Activation::Active;

        debug!(
            "tremolo activated: gain {} dB, rate {} Hz",
            self.gain_db, self.frequency
        );
    }

    /// Ends a session. Blocks render silence until the next activation.
    pub fn deactivate(&mut self) {
        self.state = Activation::Inactive;
        debug!("tremolo deactivated");
    }

    /// Latches new control values and advances the smoothers by one step.
    ///
    /// A target only moves when its control value differs from the one seen
    /// last time, so an unchanged control lets the smoother settle.
    #[inline]
    pub fn begin_block(&mut self, gain_db: f32, frequency_hz: f32) {
        let gain_db = if gain_db.is_nan() { self.gain_db } else { gain_db };
        if gain_db != self.gain_db {
            self.gain_coefficient_target = gain_coefficient(gain_db);
            self.gain_db = gain_db;
        }

        let frequency_hz = sanitize_frequency(frequency_hz);
        if frequency_hz != self.frequency_last {
            self.frequency_target = frequency_hz;
            self.frequency_last = frequency_hz;
        }

        one_pole(
            &mut self.gain_coefficient,
            self.gain_coefficient_target,
            SMOOTHING_COEFFICIENT,
        );
        settle(
            &mut self.gain_coefficient,
            self.gain_coefficient_target,
            SETTLE_THRESHOLD,
        );
        one_pole(
            &mut self.frequency,
            self.frequency_target,
            SMOOTHING_COEFFICIENT,
        );
        settle(&mut self.frequency, self.frequency_target, SETTLE_THRESHOLD);

        self.update_phase_increment();
    }

    /// Modulates one sample and advances the oscillator.
    ///
    /// Returns `0.0` without touching the phase while inactive.
    #[inline]
    pub fn process_sample(&mut self, input: f32, shape: WaveShape) -> f32 {
        if self.state != Activation::Active {
            return 0.0;
        }

        self.render_sample(input, shape)
    }

    /// Processes one block from `input` into `output`.
    ///
    /// Both slices must have the same length. Renders silence while
    /// inactive. If `output` is longer than `input` anyway, the excess is
    /// cleared.
    #[inline]
    pub fn process_block(&mut self, parameters: &Parameters, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());

        let length = input.len().min(output.len());
        output[length..].fill(0.0);
        let output = &mut output[..length];

        if self.state != Activation::Active {
            output.fill(0.0);
            return;
        }

        self.begin_block(parameters.gain_db, parameters.frequency_hz);
        let shape = WaveShape::from_control(parameters.mode);

        for (in_sample, out_sample) in input.iter().zip(output.iter_mut()) {
            *out_sample = self.render_sample(*in_sample, shape);
        }
    }

    /// Processes one block in place.
    #[inline]
    pub fn process_replacing(&mut self, parameters: &Parameters, in_out: &mut [f32]) {
        if self.state != Activation::Active {
            in_out.fill(0.0);
            return;
        }

        self.begin_block(parameters.gain_db, parameters.frequency_hz);
        let shape = WaveShape::from_control(parameters.mode);

        for in_out_sample in in_out.iter_mut() {
            *in_out_sample = self.render_sample(*in_out_sample, shape);
        }
    }

    pub fn state(&self) -> Activation {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == Activation::Active
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn table_length(&self) -> usize {
        self.sine.len()
    }

    /// Table used for `shape`.
    pub fn table(&self, shape: WaveShape) -> &WaveTable {
        match shape {
            WaveShape::Sine => &self.sine,
            WaveShape::Square => &self.square,
        }
    }

    /// Shape read by the most recent sample.
    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    /// Oscillator position within one period, in `0.0..1.0`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase advance per sample, at most `0.5`.
    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    /// Last gain control value seen, unclamped.
    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    /// Current smoothed linear gain at the modulation trough.
    pub fn gain_coefficient(&self) -> f32 {
        self.gain_coefficient
    }

    pub fn gain_coefficient_target(&self) -> f32 {
        self.gain_coefficient_target
    }

    /// Current smoothed rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn frequency_target(&self) -> f32 {
        self.frequency_target
    }

    fn reset(&mut self, gain_db: f32, frequency_hz: f32) {
        if !gain_db.is_nan() {
            self.gain_db = gain_db;
        }
        self.gain_coefficient_target = gain_coefficient(self.gain_db);
        self.gain_coefficient = self.gain_coefficient_target;

        let frequency_hz = sanitize_frequency(frequency_hz);
        self.frequency = frequency_hz;
        self.frequency_target = frequency_hz;
        self.frequency_last = frequency_hz;

        self.phase = 0.0;
        self.update_phase_increment();
    }

    #[inline]
    fn update_phase_increment(&mut self) {
        self.phase_increment =
            (self.frequency as f64 / self.sample_rate as f64).min(MAX_PHASE_INCREMENT);
    }

    #[inline]
    fn render_sample(&mut self, input: f32, shape: WaveShape) -> f32 {
        self.shape = shape;

        let wave = self.table(shape).at_phase(self.phase as f32);
        let coefficient = self.gain_coefficient;
        let output =
            input * (0.5 * (1.0 + coefficient) + 0.5 * (1.0 - coefficient) * wave);

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        output
    }
}

#[inline]
fn sanitize_frequency(frequency_hz: f32) -> f32 {
    if frequency_hz.is_finite() && frequency_hz > MIN_FREQUENCY_HZ {
        frequency_hz
    } else {
        MIN_FREQUENCY_HZ
    }
}
