// src/common/types.rs

use super::config::exceeds_legal_limit;

/// Every quantity derived from a single resistance measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Sensor resistance `Rs` in ohms.
    pub resistance_ohms: f32,
    /// `Rs / R0`.
    pub ratio: f32,
    /// Alcohol concentration in ppm.
    pub ppm: f32,
    /// Alcohol concentration in mg/L.
    pub mg_per_l: f32,
    /// Estimated blood alcohol content in per mille. Not a clinical value.
    pub bac: f32,
}

impl Reading {
    /// `true` if the BAC estimate is above `limit`
    /// (e.g. [`LEGAL_BAC_LIMIT`](super::config::LEGAL_BAC_LIMIT)).
    pub fn exceeds(&self, limit: f32) -> bool {
        exceeds_legal_limit(self.bac, limit)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::LEGAL_BAC_LIMIT;

    fn reading_with_bac(bac: f32) -> Reading {
        Reading {
            resistance_ohms: 24.0,
            ratio: 0.5,
            ppm: 250.0 * bac,
            mg_per_l: bac / 2.0,
            bac,
        }
    }

    #[test]
    fn test_exceeds_above_limit() {
        assert!(reading_with_bac(0.5).exceeds(LEGAL_BAC_LIMIT));
        assert!(reading_with_bac(0.21).exceeds(LEGAL_BAC_LIMIT));
    }

    #[test]
    fn test_exceeds_is_strict() {
        assert!(!reading_with_bac(LEGAL_BAC_LIMIT).exceeds(LEGAL_BAC_LIMIT));
        assert!(!reading_with_bac(0.0).exceeds(LEGAL_BAC_LIMIT));
    }
}
