// src/sensor/async_sensor.rs

use super::model::ModelState;
use crate::common::{
    error::Mq3Error,
    hal_traits::AnalogSamplerAsync,
    timing::{delay_steps, DelayStep},
    CalibrationCurve, Reading, SensorConfig,
};
use core::time::Duration;
use embedded_hal_async::delay::DelayNs;

/// Async MQ-3 driver.
///
/// Same operations as [`SensorModel`](super::SensorModel), but each wait
/// between samples is an await point so other tasks run while the sensor
/// settles. Samples are still taken one after another and only summed once
/// all of them are in.
pub struct AsyncSensorModel<S, D>
where
    S: AnalogSamplerAsync,
    D: DelayNs,
{
    sampler: S,
    delay: D,
    channel: S::Channel,
    state: ModelState,
}

impl<S, D> AsyncSensorModel<S, D>
where
    S: AnalogSamplerAsync,
    D: DelayNs,
{
    pub fn new(sampler: S, delay: D, channel: S::Channel) -> Self {
        Self::with_curve(sampler, delay, channel, CalibrationCurve::default())
    }

    pub fn with_curve(sampler: S, delay: D, channel: S::Channel, curve: CalibrationCurve) -> Self {
        AsyncSensorModel {
            sampler,
            delay,
            channel,
            state: ModelState::with_default_config(curve),
        }
    }

    pub fn with_config(
        sampler: S,
        delay: D,
        channel: S::Channel,
        curve: CalibrationCurve,
        config: SensorConfig,
    ) -> Result<Self, Mq3Error<S::Error>> {
        let state = ModelState::new(curve, config)?;
        Ok(AsyncSensorModel {
            sampler,
            delay,
            channel,
            state,
        })
    }

    pub fn release(self) -> (S, D) {
        (self.sampler, self.delay)
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

    pub fn get_reference_resistance(&self) -> Option<f32> {
        self.state.reference()
    }

    pub fn set_reference_resistance(&mut self, r0: f32) {
        self.state.set_reference(r0);
    }

    pub async fn heat(&mut self) {
        let heating_time = self.state.config().heating_time;
        log_debug!("heating for {} ms", heating_time.as_millis() as u32);
        self.wait(heating_time).await;
    }

    pub async fn sample_resistance(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        let count = self.state.config().sample_count;
        let interval = self.state.config().sample_interval;

        let mut sum: u32 = 0;
        for _ in 0..count {
            let raw = self
                .sampler
                .sample_raw(self.channel)
                .await
                .map_err(Mq3Error::ChannelUnavailable)?;
            sum += u32::from(raw);
            self.wait(interval).await;
        }

        Ok(self.state.resistance_from_sum(sum)?)
    }

    pub async fn calibrate(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        let r0 = self.sample_resistance().await?;
        self.state.set_reference(r0);
        log_debug!("calibrated R0 = {} ohm", r0);
        Ok(r0)
    }

    pub async fn read_ratio(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance().await?;
        Ok(self.state.ratio(rs)?)
    }

    pub async fn read_alcohol_ppm(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance().await?;
        Ok(self.state.ppm(rs)?)
    }

    pub async fn read_alcohol_mg_per_l(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance().await?;
        Ok(self.state.mg_per_l(rs)?)
    }

    pub async fn read_bac(&mut self) -> Result<f32, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance().await?;
        Ok(self.state.bac(rs)?)
    }

    pub async fn read_all(&mut self) -> Result<Reading, Mq3Error<S::Error>> {
        self.state.valid_reference()?;
        let rs = self.sample_resistance().await?;
        Ok(self.state.reading(rs)?)
    }

    async fn wait(&mut self, duration: Duration) {
        for step in delay_steps(duration) {
            match step {
                DelayStep::Millis(ms) => self.delay.delay_ms(ms).await,
                DelayStep::Micros(us) => self.delay.delay_us(us).await,
            }
        }
    }
}
