// src/common/timing.rs

use core::time::Duration;

// Nominal values for an MQ-3 on a 10-bit Arduino-class ADC. All of them can be
// overridden per sensor through `SensorConfig`.

// === Sampling ===

/// Wait after each raw sample before taking the next one.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(20);

/// Total time one resistance measurement blocks with the default settings
/// (8 samples x 20 ms).
pub const SAMPLING_DURATION: Duration = Duration::from_millis(8 * 20);

// === Heater ===

/// Heater warm-up before the sensor output is stable enough to calibrate.
/// Tracked by the caller; the model only offers `heat()` as a convenience.
pub const HEATING_TIME: Duration = Duration::from_millis(6000);

// === ADC conversion polling ===

/// Upper bound on how long a single conversion may report `WouldBlock`.
pub const CONVERSION_TIMEOUT: Duration = Duration::from_millis(10);

/// Delay between two polls of a conversion that is not ready yet.
pub const CONVERSION_POLL_INTERVAL: Duration = Duration::from_micros(100);

// === Delay splitting ===

/// One call into a millisecond or microsecond delay primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelayStep {
    Millis(u32),
    Micros(u32),
}

/// Breaks a [`Duration`] into `u32` delay calls that together wait at least
/// that long.
///
/// Whole milliseconds come first, in chunks of at most `u32::MAX`. Whatever is
/// left below one millisecond follows as a single microsecond step, rounded up
/// to the next microsecond.
pub fn delay_steps(duration: Duration) -> DelaySteps {
    let sub_milli_nanos = duration.subsec_nanos() % 1_000_000;
    DelaySteps {
        millis: duration.as_millis(),
        micros: sub_milli_nanos.div_ceil(1_000),
    }
}

/// Iterator returned by [`delay_steps`].
#[derive(Debug, Clone)]
pub struct DelaySteps {
    millis: u128,
    micros: u32,
}

impl Iterator for DelaySteps {
    type Item = DelayStep;

    fn next(&mut self) -> Option<DelayStep> {
        if self.millis > 0 {
            let step = self.millis.min(u128::from(u32::MAX)) as u32;
            self.millis -= u128::from(step);
            Some(DelayStep::Millis(step))
        } else if self.micros > 0 {
            let step = self.micros;
            self.micros = 0;
            Some(DelayStep::Micros(step))
        } else {
            None
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn total_nanos(duration: Duration) -> u128 {
        delay_steps(duration)
            .map(|step| match step {
                DelayStep::Millis(ms) => u128::from(ms) * 1_000_000,
                DelayStep::Micros(us) => u128::from(us) * 1_000,
            })
            .sum()
    }

    #[test]
    fn test_whole_millis_is_one_step() {
        let mut steps = delay_steps(SAMPLE_INTERVAL);
        assert_eq!(steps.next(), Some(DelayStep::Millis(20)));
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_sub_millis_only_uses_micros() {
        let mut steps = delay_steps(CONVERSION_POLL_INTERVAL);
        assert_eq!(steps.next(), Some(DelayStep::Micros(100)));
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_mixed_duration_splits_millis_then_micros() {
        let mut steps = delay_steps(Duration::from_micros(1500));
        assert_eq!(steps.next(), Some(DelayStep::Millis(1)));
        assert_eq!(steps.next(), Some(DelayStep::Micros(500)));
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_sub_micro_remainder_rounds_up() {
        let mut steps = delay_steps(Duration::from_nanos(1500));
        assert_eq!(steps.next(), Some(DelayStep::Micros(2)));
        assert_eq!(steps.next(), None);
        assert_eq!(delay_steps(Duration::from_nanos(1)).next(), Some(DelayStep::Micros(1)));
        assert!(total_nanos(Duration::from_nanos(1_000_001)) >= 1_000_001);
    }

    #[test]
    fn test_zero_duration_has_no_steps() {
        assert_eq!(delay_steps(Duration::ZERO).next(), None);
    }

    #[test]
    fn test_long_duration_is_split_not_capped() {
        let duration = Duration::from_secs(10_000_000);
        let steps = delay_steps(duration);
        assert_eq!(steps.clone().count(), 3);
        assert!(steps.clone().all(|s| matches!(s, DelayStep::Millis(_))));
        assert_eq!(total_nanos(duration), duration.as_nanos());
    }
}
