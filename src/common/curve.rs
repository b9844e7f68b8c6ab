// src/common/curve.rs

use super::config::PPM_PER_MG_PER_L;
use super::error::ModelError;
use core::fmt;
use libm::powf;

/// Unit a [`CalibrationCurve`] produces directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConcentrationUnit {
    /// Parts per million.
    Ppm,
    /// Milligrams per litre of air.
    MgPerL,
}

impl ConcentrationUnit {
    /// Converts `value`, expressed in `self`, into ppm.
    #[inline]
    pub fn to_ppm(self, value: f32) -> f32 {
        match self {
            ConcentrationUnit::Ppm => value,
            ConcentrationUnit::MgPerL => value * PPM_PER_MG_PER_L,
        }
    }

    /// Converts `value`, expressed in `self`, into mg/L.
    #[inline]
    pub fn to_mg_per_l(self, value: f32) -> f32 {
        match self {
            ConcentrationUnit::Ppm => value / PPM_PER_MG_PER_L,
            ConcentrationUnit::MgPerL => value,
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcentrationUnit::Ppm => write!(f, "ppm"),
            ConcentrationUnit::MgPerL => write!(f, "mg/L"),
        }
    }
}

/// Power-law fit of the sensitivity curve: `concentration = a * (Rs/R0)^b`.
///
/// The constants are read off the datasheet's log-log plot and depend on the
/// target gas and the sensor batch, so the curve is a value the caller picks
/// rather than something baked into the model.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationCurve {
    /// Scale factor `a`.
    pub a: f32,
    /// Exponent `b` (negative for MQ sensors: resistance drops as gas rises).
    pub b: f32,
    /// Unit of `a * ratio^b`.
    pub unit: ConcentrationUnit,
}

impl CalibrationCurve {
    /// Alcohol curve yielding ppm. Fit: `f(x) = 4.7360598103 * x^-1.1125227969`.
    pub const MQ3_PPM: CalibrationCurve = CalibrationCurve {
        a: 4.7,
        b: -1.11,
        unit: ConcentrationUnit::Ppm,
    };

    /// Alcohol curve yielding mg/L directly.
    pub const MQ3_MG_PER_L: CalibrationCurve = CalibrationCurve {
        a: 0.4,
        b: -1.437,
        unit: ConcentrationUnit::MgPerL,
    };

    pub const fn new(a: f32, b: f32, unit: ConcentrationUnit) -> Self {
        Self { a, b, unit }
    }

    /// Evaluates the curve at `ratio`, in [`Self::unit`].
    pub fn evaluate(&self, ratio: f32) -> Result<f32, ModelError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ModelError::InvalidReading);
        }
        let value = self.a * powf(ratio, self.b);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::InvalidReading)
        }
    }

    /// Concentration in ppm at `ratio`.
    pub fn ppm(&self, ratio: f32) -> Result<f32, ModelError> {
        self.evaluate(ratio).map(|v| self.unit.to_ppm(v))
    }

    /// Concentration in mg/L at `ratio`.
    pub fn mg_per_l(&self, ratio: f32) -> Result<f32, ModelError> {
        self.evaluate(ratio).map(|v| self.unit.to_mg_per_l(v))
    }
}

impl Default for CalibrationCurve {
    fn default() -> Self {
        Self::MQ3_PPM
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5 * b.abs().max(1.0)
    }

    #[test]
    fn test_ppm_curve_at_half_ratio() {
        let ppm = CalibrationCurve::MQ3_PPM.ppm(0.5).unwrap();
        assert!(close(ppm, 4.7 * powf(0.5, -1.11)));
        // 0.5^-1.11 is about 2.1585
        assert!((ppm - 10.145).abs() < 0.01);
    }

    #[test]
    fn test_ratio_one_gives_a() {
        assert_eq!(CalibrationCurve::MQ3_PPM.evaluate(1.0).unwrap(), 4.7);
        assert_eq!(CalibrationCurve::MQ3_MG_PER_L.evaluate(1.0).unwrap(), 0.4);
    }

    #[test]
    fn test_unit_conversion_follows_primary_unit() {
        let ppm_curve = CalibrationCurve::MQ3_PPM;
        assert!(close(ppm_curve.mg_per_l(1.0).unwrap(), 4.7 / 500.0));

        let mg_curve = CalibrationCurve::MQ3_MG_PER_L;
        assert!(close(mg_curve.mg_per_l(1.0).unwrap(), 0.4));
        assert!(close(mg_curve.ppm(1.0).unwrap(), 200.0));
    }

    #[test]
    fn test_invalid_ratios() {
        let curve = CalibrationCurve::default();
        assert_eq!(curve.evaluate(0.0), Err(ModelError::InvalidReading));
        assert_eq!(curve.evaluate(-1.0), Err(ModelError::InvalidReading));
        assert_eq!(curve.evaluate(f32::NAN), Err(ModelError::InvalidReading));
        assert_eq!(curve.evaluate(f32::INFINITY), Err(ModelError::InvalidReading));
    }

    #[test]
    fn test_concentration_falls_as_ratio_rises() {
        let curve = CalibrationCurve::MQ3_PPM;
        let low = curve.ppm(0.2).unwrap();
        let high = curve.ppm(2.0).unwrap();
        assert!(low > high);
    }

    #[test]
    fn test_unit_display() {
        use core::fmt::Write;
        let mut out = heapless::String::<8>::new();
        write!(out, "{}", ConcentrationUnit::MgPerL).unwrap();
        assert_eq!(out.as_str(), "mg/L");
    }
}
