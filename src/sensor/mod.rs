// src/sensor/mod.rs

// Shared logic (used by both sync and async sensor runners)
mod model; // Calibration state and the Rs -> ratio -> concentration math

// Specific runner implementations
pub mod sync_sensor; // Blocking runner over `SensorTimer`

// Asynchronous runner (feature-gated)
#[cfg(feature = "async")]
pub mod async_sensor;

// --- Public Re-exports ---
pub use sync_sensor::SensorModel;

#[cfg(feature = "async")]
pub use async_sensor::AsyncSensorModel;
