use core::fmt;

use crate::constants::{audio, clock};
use crate::utils::{clamp_divisor, floor_to_i32};

/// Rejected carrier or bandwidth settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterError {
    InvalidFrequency(f32),
    FrequencyOutOfRange(f32),
    InvalidBandwidth(f32),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::InvalidFrequency(freq) => {
                write!(f, "frequency must be a positive number of MHz, got {}", freq)
            }
            ParameterError::FrequencyOutOfRange(freq) => write!(
                f,
                "frequency {} MHz cannot be produced from the {} MHz PLLD",
                freq,
                clock::PLLD_FREQUENCY_MHZ
            ),
            ParameterError::InvalidBandwidth(bw) => {
                write!(f, "bandwidth must be a positive number, got {}", bw)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParameterError {}

/// Carrier settings fixed for the whole broadcast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulationParameters {
    frequency: f32,
    center_divisor: u32,
    bandwidth: f32,
}

impl ModulationParameters {
    pub fn new(frequency: f32, bandwidth: f32) -> Result<Self, ParameterError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ParameterError::InvalidFrequency(frequency));
        }
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(ParameterError::InvalidBandwidth(bandwidth));
        }

        let scaled = (clock::PLLD_FREQUENCY_MHZ / frequency) * clock::DIVISOR_SCALE;
        // DIVI must be non-zero and the whole divisor has to fit in 24 bits
        if !(clock::DIVISOR_SCALE..=clock::DIV_MASK as f32).contains(&scaled) {
            return Err(ParameterError::FrequencyOutOfRange(frequency));
        }

        Ok(Self {
            frequency,
            center_divisor: scaled as u32,
            bandwidth,
        })
    }

    /// Same as `new` with the default bandwidth of 25
    pub fn with_default_bandwidth(frequency: f32) -> Result<Self, ParameterError> {
        Self::new(frequency, audio::DEFAULT_BANDWIDTH)
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn center_divisor(&self) -> u32 {
        self.center_divisor
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// DIV value to write for `sample`
    pub fn carrier_divisor(&self, sample: i16) -> u32 {
        let offset = divisor_offset(sample, self.bandwidth);
        clamp_divisor((self.center_divisor as i32).saturating_add(offset))
    }
}

/// Deviation from the center divisor for one sample: floor(s / 65536 * bw)
pub fn divisor_offset(sample: i16, bandwidth: f32) -> i32 {
    floor_to_i32(sample as f32 / audio::SAMPLE_SCALE * bandwidth)
}
