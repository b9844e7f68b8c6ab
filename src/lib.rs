// src/lib.rs

//! Driver for the MQ-3 resistive alcohol sensor.
//!
//! The sensor sits in a voltage divider with a fixed load resistor. The driver
//! averages raw ADC samples into the sensor resistance `Rs`, divides it by the
//! clean-air baseline `R0` and pushes the ratio through a power-law curve to
//! get a concentration in ppm, mg/L, or an estimated blood alcohol content.
//!
//! The ADC and the delay are injected through [`AnalogSampler`] and
//! [`SensorTimer`], so the crate stays `no_std` and HAL-agnostic.
//!
//! ```
//! use mq3::{FnSampler, SensorModel, SensorTimer};
//!
//! struct NoDelay;
//! impl SensorTimer for NoDelay {
//!     fn delay_us(&mut self, _us: u32) {}
//!     fn delay_ms(&mut self, _ms: u32) {}
//! }
//!
//! // Every sample reads 1000 counts: Rs = 1024 * 1000 / 1000 - 1000 = 24 ohm.
//! let adc: FnSampler<_, u8> = FnSampler::new(|_channel: u8| -> nb::Result<u16, ()> { Ok(1000) });
//! let mut sensor = SensorModel::new(adc, NoDelay, 0);
//!
//! let r0 = sensor.calibrate().unwrap();
//! assert_eq!(r0, 24.0);
//! assert_eq!(sensor.read_ratio().unwrap(), 1.0);
//! ```

#![no_std] // Specify no_std at the crate root

#[macro_use]
mod logging;

pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use common::{
    AnalogSampler, CalibrationCurve, ConcentrationUnit, FnSampler, ModelError, Mq3Error, Reading,
    SensorConfig, SensorTimer,
};
pub use sensor::SensorModel;

#[cfg(feature = "async")]
pub use common::AnalogSamplerAsync;
#[cfg(feature = "async")]
pub use sensor::AsyncSensorModel;

#[cfg(feature = "impl-native")]
pub use common::HalDelay;
