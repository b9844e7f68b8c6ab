// src/common/config.rs

use super::error::ModelError;
use super::timing;
use core::time::Duration;

// === Circuit ===

/// Number of raw samples summed into one resistance measurement.
pub const SAMPLE_COUNT: u8 = 8;

/// Load resistor of the voltage divider, in ohms.
pub const LOAD_RESISTANCE_OHMS: f32 = 1000.0;

/// Full-scale code of a 10-bit ADC.
pub const ADC_MAX: u16 = 1024;

// === Unit conversion ===

/// ppm of ethanol vapour per mg/L.
pub const PPM_PER_MG_PER_L: f32 = 500.0;

/// BAC in per mille (g/L) per mg/L of breath alcohol.
///
/// 1 mg/L breath = 0.001 mg/mL, and with a 2000:1 blood:breath ratio
/// BAC = (BrAC / 1000) * 2000.
pub const BAC_PER_MG_PER_L: f32 = 2.0;

/// Legal driving BAC limit in per mille (Ukraine).
///
/// Exposed for callers only; the driver never enforces it.
pub const LEGAL_BAC_LIMIT: f32 = 0.20;

/// Returns `true` if a BAC estimate is strictly above `limit`.
#[inline]
pub fn exceeds_legal_limit(bac: f32, limit: f32) -> bool {
    bac > limit
}

/// Sampling and circuit parameters for one sensor.
///
/// Fixed for the lifetime of a model; validated when the model is built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SensorConfig {
    /// Raw samples per resistance measurement (must be > 0).
    pub sample_count: u8,
    /// Wait after each raw sample.
    pub sample_interval: Duration,
    /// Heater warm-up used by `heat()`.
    pub heating_time: Duration,
    /// Load resistor in ohms (finite, > 0).
    pub load_resistance_ohms: f32,
    /// ADC full-scale code (> 0).
    pub adc_max: u16,
    /// How long a single conversion may stay `WouldBlock`.
    pub conversion_timeout: Duration,
}

impl SensorConfig {
    pub const DEFAULT: SensorConfig = SensorConfig {
        sample_count: SAMPLE_COUNT,
        sample_interval: timing::SAMPLE_INTERVAL,
        heating_time: timing::HEATING_TIME,
        load_resistance_ohms: LOAD_RESISTANCE_OHMS,
        adc_max: ADC_MAX,
        conversion_timeout: timing::CONVERSION_TIMEOUT,
    };

    /// Checks the invariants the resistance formula relies on.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.sample_count == 0 {
            return Err(ModelError::InvalidConfig("sample count must be non-zero"));
        }
        if !self.load_resistance_ohms.is_finite() || self.load_resistance_ohms <= 0.0 {
            return Err(ModelError::InvalidConfig("load resistance must be positive"));
        }
        if self.adc_max == 0 {
            return Err(ModelError::InvalidConfig("ADC full scale must be non-zero"));
        }
        Ok(())
    }

    /// Time one resistance measurement blocks for.
    pub fn sampling_duration(&self) -> Duration {
        self.sample_interval * u32::from(self.sample_count)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
