// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod curve;
pub mod error;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs (constants - users can access via common::config::*)
pub use config::{exceeds_legal_limit, SensorConfig, LEGAL_BAC_LIMIT};

// From curve.rs
pub use curve::{CalibrationCurve, ConcentrationUnit};

// From error.rs
pub use error::{ModelError, Mq3Error};

// From hal_traits.rs
pub use hal_traits::{AnalogSampler, FnSampler, SensorTimer}; // Core sync traits

// From types.rs
pub use types::Reading;

// --- Feature-gated re-exports ---

// Async traits (from hal_traits.rs)
#[cfg(feature = "async")]
pub use hal_traits::AnalogSamplerAsync;

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::HalDelay;
