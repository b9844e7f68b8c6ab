// src/common/error.rs

/// Errors raised by the sensor model itself, independent of any hardware.
///
/// Returned by the pure conversion helpers ([`CalibrationCurve`](super::CalibrationCurve),
/// [`SensorConfig`](super::SensorConfig)) and folded into [`Mq3Error`] by the runners.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModelError {
    /// A ratio-based read was requested before a usable `R0` was set.
    #[error("Reference resistance is not set or not positive")]
    InvalidReference,

    /// The raw samples do not describe a physical resistance
    /// (zero sum, non-finite or non-positive result).
    #[error("Invalid sensor reading")]
    InvalidReading,

    /// A configuration value is out of range.
    #[error("Invalid sensor configuration: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum Mq3Error<E = ()>
where
    E: core::fmt::Debug, // Debug for the generic ADC error
{
    /// `R0` was never set (or set to zero, negative or non-finite).
    #[error("Reference resistance is not set or not positive")]
    InvalidReference,

    /// Accumulated ADC sum is zero or produced a non-finite/non-positive resistance.
    #[error("Invalid sensor reading")]
    InvalidReading,

    /// Underlying error from the ADC capability, surfaced unchanged.
    #[error("ADC channel unavailable: {0:?}")]
    ChannelUnavailable(E),

    /// The ADC conversion did not complete within the configured timeout.
    #[error("ADC conversion timed out")]
    Timeout,

    /// Sensor configuration rejected at construction.
    #[error("Invalid sensor configuration: {0}")]
    InvalidConfig(&'static str),
}

impl<E: core::fmt::Debug> From<ModelError> for Mq3Error<E> {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidReference => Mq3Error::InvalidReference,
            ModelError::InvalidReading => Mq3Error::InvalidReading,
            ModelError::InvalidConfig(reason) => Mq3Error::InvalidConfig(reason),
        }
    }
}

impl<E: core::fmt::Debug + PartialEq> PartialEq for Mq3Error<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ChannelUnavailable(a), Self::ChannelUnavailable(b)) => a == b,
            (Self::InvalidConfig(a), Self::InvalidConfig(b)) => a == b,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug> defmt::Format for Mq3Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidReference => defmt::write!(fmt, "Reference resistance not set"),
            Self::InvalidReading => defmt::write!(fmt, "Invalid sensor reading"),
            Self::ChannelUnavailable(e) => {
                defmt::write!(fmt, "ADC channel unavailable: {}", defmt::Debug2Format(e))
            }
            Self::Timeout => defmt::write!(fmt, "ADC conversion timed out"),
            Self::InvalidConfig(reason) => defmt::write!(fmt, "Invalid configuration: {}", reason),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockAdcError;

    #[test]
    fn test_model_error_maps_to_flat_variants() {
        let e: Mq3Error<MockAdcError> = ModelError::InvalidReference.into();
        assert_eq!(e, Mq3Error::InvalidReference);
        let e: Mq3Error<MockAdcError> = ModelError::InvalidReading.into();
        assert_eq!(e, Mq3Error::InvalidReading);
        let e: Mq3Error<MockAdcError> = ModelError::InvalidConfig("sample count").into();
        assert_eq!(e, Mq3Error::InvalidConfig("sample count"));
    }

    #[test]
    fn test_partial_eq_compares_payloads() {
        assert_eq!(
            Mq3Error::ChannelUnavailable(MockAdcError),
            Mq3Error::ChannelUnavailable(MockAdcError)
        );
        assert_ne!(Mq3Error::<MockAdcError>::InvalidConfig("a"), Mq3Error::InvalidConfig("b"));
        assert_ne!(Mq3Error::<MockAdcError>::Timeout, Mq3Error::InvalidReading);
    }

    #[test]
    fn test_display_messages() {
        let mut out = HeaplessString::<64>::new();
        write!(out, "{}", Mq3Error::ChannelUnavailable(MockAdcError)).unwrap();
        assert_eq!(out.as_str(), "ADC channel unavailable: MockAdcError");

        out.clear();
        write!(out, "{}", ModelError::InvalidConfig("load resistance")).unwrap();
        assert_eq!(out.as_str(), "Invalid sensor configuration: load resistance");

        out.clear();
        write!(out, "{}", Mq3Error::<()>::InvalidReference).unwrap();
        assert_eq!(out.as_str(), "Reference resistance is not set or not positive");
    }
}
