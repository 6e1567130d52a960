#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod fx;
pub mod plugin;
pub mod utils;
pub mod wavetable;

pub use error::Error;
pub use fx::tremolo::{Activation, Config, Parameters, Tremolo};
pub use wavetable::{WaveShape, WaveTable};

/// Number of entries per waveform period unless configured otherwise.
pub const DEFAULT_TABLE_LENGTH: usize = 512;

/// Sample rate assumed by [`Config::default`].
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
