// src/sensor/model.rs

// Calibration state and conversion math shared by the sync and async runners.
// Nothing in here touches hardware.

use crate::common::{
    config::BAC_PER_MG_PER_L, CalibrationCurve, ModelError, Reading, SensorConfig,
};

#[derive(Debug, Clone)]
pub(crate) struct ModelState {
    reference: Option<f32>,
    curve: CalibrationCurve,
    config: SensorConfig,
}

impl ModelState {
    pub(crate) fn new(curve: CalibrationCurve, config: SensorConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(ModelState {
            reference: None,
            curve,
            config,
        })
    }

    /// Default config is known to be valid.
    pub(crate) const fn with_default_config(curve: CalibrationCurve) -> Self {
        ModelState {
            reference: None,
            curve,
            config: SensorConfig::DEFAULT,
        }
    }

    #[inline]
    pub(crate) fn curve(&self) -> &CalibrationCurve {
        &self.curve
    }

    #[inline]
    pub(crate) fn config(&self) -> &SensorConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn reference(&self) -> Option<f32> {
        self.reference
    }

    #[inline]
    pub(crate) fn set_reference(&mut self, r0: f32) {
        self.reference = Some(r0);
    }

    /// `R0`, if it can be divided by.
    pub(crate) fn valid_reference(&self) -> Result<f32, ModelError> {
        match self.reference {
            Some(r0) if r0.is_finite() && r0 > 0.0 => Ok(r0),
            _ => Err(ModelError::InvalidReference),
        }
    }

    /// Voltage divider: `Rs = ADC_MAX * RL * n / sum - RL`.
    pub(crate) fn resistance_from_sum(&self, sum: u32) -> Result<f32, ModelError> {
        if sum == 0 {
            log_warn!("all ADC samples read zero");
            return Err(ModelError::InvalidReading);
        }

        let rl = self.config.load_resistance_ohms;
        let full_scale = f32::from(self.config.adc_max);
        let count = f32::from(self.config.sample_count);
        let rs = full_scale * rl * count / sum as f32 - rl;

        // Average at or above full scale: no current through the sensor.
        if !rs.is_finite() || rs <= 0.0 {
            log_warn!("raw sum {} gives non-physical resistance", sum);
            return Err(ModelError::InvalidReading);
        }

        log_trace!("raw sum {} -> Rs {} ohm", sum, rs);
        Ok(rs)
    }

    pub(crate) fn ratio(&self, rs: f32) -> Result<f32, ModelError> {
        let r0 = self.valid_reference()?;
        let ratio = rs / r0;
        if ratio.is_finite() {
            Ok(ratio)
        } else {
            Err(ModelError::InvalidReading)
        }
    }

    pub(crate) fn ppm(&self, rs: f32) -> Result<f32, ModelError> {
        self.curve.ppm(self.ratio(rs)?)
    }

    pub(crate) fn mg_per_l(&self, rs: f32) -> Result<f32, ModelError> {
        self.curve.mg_per_l(self.ratio(rs)?)
    }

    pub(crate) fn bac(&self, rs: f32) -> Result<f32, ModelError> {
        Ok(BAC_PER_MG_PER_L * self.mg_per_l(rs)?)
    }

    /// Every unit from one `Rs`, evaluating the curve once.
    pub(crate) fn reading(&self, rs: f32) -> Result<Reading, ModelError> {
        let ratio = self.ratio(rs)?;
        let value = self.curve.evaluate(ratio)?;
        let unit = self.curve.unit;
        let mg_per_l = unit.to_mg_per_l(value);
        Ok(Reading {
            resistance_ohms: rs,
            ratio,
            ppm: unit.to_ppm(value),
            mg_per_l,
            bac: BAC_PER_MG_PER_L * mg_per_l,
        })
    }
}
