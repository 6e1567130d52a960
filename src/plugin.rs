//! Host-facing wrapper.
//!
//! Plugin hosts address an effect through numbered ports and drive it
//! through a fixed lifecycle: instantiate, activate, run repeatedly,
//! deactivate, drop. [`Instance`] keeps the latest control port values and
//! forwards each stage to one [`Tremolo`].

use log::debug;

use crate::error::Error;
use crate::fx::tremolo::{Parameters, Tremolo};

/// Port indices as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Port {
    /// Control: gain at the modulation trough in dB.
    Gain = 0,
    /// Control: modulation rate in Hz.
    Frequency = 1,
    /// Audio in.
    Input = 2,
    /// Audio out.
    Output = 3,
    /// Control: waveform, `<= 0` sine, `> 0` square after rounding.
    Mode = 4,
}

impl Port {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Gain),
            1 => Some(Self::Frequency),
            2 => Some(Self::Input),
            3 => Some(Self::Output),
            4 => Some(Self::Mode),
            _ => None,
        }
    }

    pub fn is_control(self) -> bool {
        matches!(self, Self::Gain | Self::Frequency | Self::Mode)
    }
}

/// One effect per audio channel session.
#[derive(Debug, Clone)]
pub struct Instance {
    tremolo: Tremolo,
    controls: Parameters,
}

impl Instance {
    pub fn instantiate(sample_rate: f32) -> Result<Self, Error> {
        let tremolo = Tremolo::new(sample_rate)?;
        debug!("instance created at {sample_rate} Hz");

        Ok(Self {
            tremolo,
            controls: Parameters::default(),
        })
    }

    /// Stores a control value. Audio ports are ignored.
    pub fn connect_control(&mut self, port: Port, value: f32) {
        match port {
            Port::Gain => self.controls.gain_db = value,
            Port::Frequency => self.controls.frequency_hz = value,
            Port::Mode => self.controls.mode = value,
            Port::Input | Port::Output => {}
        }
    }

    /// Same as [`Instance::connect_control`] for hosts that only know port
    /// numbers. Unknown indices are ignored.
    pub fn set_control_by_index(&mut self, index: u32, value: f32) {
        if let Some(port) = Port::from_index(index) {
            self.connect_control(port, value);
        }
    }

    /// Starts processing from the current control values.
    pub fn activate(&mut self) {
        self.tremolo
            .activate(self.controls.gain_db, self.controls.frequency_hz);
    }

    /// Processes one block with the current control values.
    #[inline]
    pub fn run(&mut self, input: &[f32], output: &mut [f32]) {
        self.tremolo.process_block(&self.controls, input, output);
    }

    pub fn deactivate(&mut self) {
        self.tremolo.deactivate();
    }

    pub fn controls(&self) -> &Parameters {
        &self.controls
    }

    pub fn engine(&self) -> &Tremolo {
        &self.tremolo
    }
}
