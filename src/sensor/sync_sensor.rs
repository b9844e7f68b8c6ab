// src/sensor/sync_sensor.rs

use super::model::ModelState;
use crate::common::{
    error::Mq3Error,
    hal_traits::{AnalogSampler, SensorTimer},
    timing, CalibrationCurve, Reading, SensorConfig,
};

/// Blocking MQ-3 driver.
///
/// Owns the ADC and delay capabilities and the clean-air reference `R0`.
/// Every read blocks for `sample_count * sample_interval` (160 ms by default).
/// There is no internal locking; share it behind a mutex if needed.
pub struct SensorModel<S, T>
where
    S: AnalogSampler,
    T: SensorTimer,
{
    sampler: S,
    timer: T,
    channel: S::Channel,
    state: ModelState,
}

impl<S, T> SensorModel<S, T>
where
    S: AnalogSampler,
    T: SensorTimer,
{
    /// Creates a sensor on `channel` with the default curve and configuration.
    ///
    /// `R0` is unset: call [`calibrate`](Self::calibrate) or
    /// [`set_reference_resistance`](Self::set_reference_resistance) before any
    /// ratio-based read.
    pub fn new(sampler: S, timer: T, channel: S::Channel) -> Self {
        Self::with_curve(sampler, timer, channel, CalibrationCurve::default())
    }

    /// Creates a sensor using a specific concentration curve.
    pub fn with_curve(sampler: S, timer: T, channel: S::Channel, curve: CalibrationCurve) -> Self {
        SensorModel {
            sampler,
            timer,
            channel,
            state: ModelState::with_default_config(curve),
        }
    }

    /// Creates a sensor with a custom curve and configuration.
    pub fn with_config(
        sampler: S,
        timer: T,
        channel: S::Channel,
        curve: CalibrationCurve,
        config: SensorConfig,
    ) -> Result<Self, Mq3Error<S::Error>> {
        let state = ModelState::new(curve, config)?;
        Ok(SensorModel {
            sampler,
            timer,
            channel,
            state,
        })
    }

    /// Gives back the injected capabilities.
    pub fn release(self) -> (S, T) {
        (self.sampler, self.timer)
    }

    pub fn channel(&self) -> S::Channel {
        self.channel
    }

    pub fn curve(&self) -> &CalibrationCurve {
        self.state.curve()
    }

    pub fn config(&self) -> &SensorConfig {
        self.state.config()
    }

    /// Last `R0` stored by `calibrate()` or `set_reference_resistance()`.
    pub fn get_reference_resistance(&self) -> Option<f32> {
        self.state.reference()
    }

    /// Restores a previously measured `R0` (e.g. loaded from flash by the caller).
    pub fn set_reference_resistance(&mut self, r0: f32) {
        self.state.set_reference(r0);
    }

    /// Blocks for the configured heater warm-up time.
    pub fn heat(&mut self) {
        log_debug!("heating for {} ms", self.state.config().heating_time.as_millis() as u32);
        self.timer.delay(self.state.config().heating_time);
    }

    // --- Public Blocking Methods ---

    /// Measures the current sensor resistance `Rs` in ohms.
    pub fn sample_resistance(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        let count = self.state.config().sample_count;
        let interval = self.state.config().sample_interval;

        let mut sum: u32 = 0;
        for _ in 0..count {
            sum += u32::from(self.sample_once()?);
            self.timer.delay(interval);
        }

        Ok(self.state.resistance_from_sum(sum)?)
    }

    /// Measures `Rs` in clean air and stores it as `R0`.
    ///
    /// The sensor must be in alcohol-free air and past its heating time. On
    /// failure the previous reference is kept.
    pub fn calibrate(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        let r0 = self.sample_resistance()?;
        self.state.set_reference(r0);
        log_debug!("calibrated R0 = {} ohm", r0);
        Ok(r0)
    }

    /// `Rs / R0`.
    pub fn read_ratio(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance()?;
        Ok(self.state.ratio(rs)?)
    }

    /// Alcohol concentration in ppm.
    pub fn read_alcohol_ppm(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance()?;
        Ok(self.state.ppm(rs)?)
    }

    /// Alcohol concentration in mg/L.
    pub fn read_alcohol_mg_per_l(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance()?;
        Ok(self.state.mg_per_l(rs)?)
    }

    /// Blood alcohol estimate in per mille, assuming a 2000:1 blood:breath ratio.
    pub fn read_bac(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance()?;
        Ok(self.state.bac(rs)?)
    }

    /// Ratio and every concentration unit from a single sampling window.
    pub fn read_all(&mut self) -> Result<Reading, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance()?;
        Ok(self.state.reading(rs)?)
    }

    // --- Low-Level ADC Helper (Private) ---

    /// One conversion, polling `WouldBlock` until ready or timed out.
    fn sample_once(&mut self) -> Result<u16, Mq3Error<S::Error>> {
        let timeout_us = self.state.config().conversion_timeout.as_micros();
        let poll_us = timing::CONVERSION_POLL_INTERVAL.as_micros();
        let mut waited_us: u128 = 0;

        loop {
            match self.sampler.sample_raw(self.channel) {
                Ok(raw) => return Ok(raw),
                Err(nb::Error::WouldBlock) => {
                    if waited_us >= timeout_us {
                        log_warn!("ADC conversion timed out");
                        return Err(Mq3Error::Timeout);
                    }
                    self.timer.delay(timing::CONVERSION_POLL_INTERVAL);
                    waited_us += poll_us;
                }
                Err(nb::Error::Other(e)) => return Err(Mq3Error::ChannelUnavailable(e)),
            }
        }
    }
}
