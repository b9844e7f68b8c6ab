// src/common/hal_traits.rs

use core::fmt::Debug;
use core::marker::PhantomData;
use core::time::Duration;

use super::timing::{delay_steps, DelayStep};

/// Abstraction for the delay operations the sensor needs between samples.
///
/// Note: This could be replaced by `embedded_hal::delay::DelayNs` directly;
/// `HalDelay` (feature `impl-native`) adapts one into the other.
pub trait SensorTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Delay for at least `duration`.
    ///
    /// Whole milliseconds go through `delay_ms`, the rest through `delay_us`
    /// rounded up. Durations beyond `u32::MAX` ms take several calls.
    fn delay(&mut self, duration: Duration) {
        for step in delay_steps(duration) {
            match step {
                DelayStep::Millis(ms) => self.delay_ms(ms),
                DelayStep::Micros(us) => self.delay_us(us),
            }
        }
    }
}

/// Abstraction for a single-shot ADC conversion.
pub trait AnalogSampler {
    /// Identifies the analog input (pin number, channel handle, ...).
    type Channel: Copy;

    /// Associated error type for conversion failures.
    type Error: Debug;

    /// Attempts to read one raw code from `channel`, in `[0, ADC_MAX)`.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` while the conversion is still in
    /// progress. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn sample_raw(&mut self, channel: Self::Channel) -> nb::Result<u16, Self::Error>;
}

/// Abstraction for an asynchronous ADC conversion (requires 'async' feature).
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AnalogSamplerAsync {
    /// Identifies the analog input.
    type Channel: Copy;

    /// Associated error type for conversion failures.
    type Error: Debug;

    /// Asynchronously reads one raw code from `channel`.
    async fn sample_raw(&mut self, channel: Self::Channel) -> Result<u16, Self::Error>;
}

/// Wraps a closure as an [`AnalogSampler`].
///
/// Lets any HAL's ADC be plugged in without a dedicated adapter type:
///
/// ```ignore
/// let sampler = FnSampler::new(|pin: u8| adc.read(pin));
/// ```
pub struct FnSampler<F, C> {
    read: F,
    _channel: PhantomData<fn(C)>,
}

impl<F, C> FnSampler<F, C> {
    pub fn new(read: F) -> Self {
        FnSampler {
            read,
            _channel: PhantomData,
        }
    }

    /// Returns the wrapped closure.
    pub fn into_inner(self) -> F {
        self.read
    }
}

impl<F, C, E> AnalogSampler for FnSampler<F, C>
where
    F: FnMut(C) -> nb::Result<u16, E>,
    C: Copy,
    E: Debug,
{
    type Channel = C;
    type Error = E;

    fn sample_raw(&mut self, channel: C) -> nb::Result<u16, E> {
        (self.read)(channel)
    }
}

/// Adapts an embedded-hal v1 delay provider into a [`SensorTimer`].
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct HalDelay<D>(pub D);

#[cfg(feature = "impl-native")]
impl<D: embedded_hal::delay::DelayNs> SensorTimer for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTimer {
        ms_calls: u32,
        total_ms: u64,
        us_calls: u32,
        total_us: u64,
    }
    impl SensorTimer for RecordingTimer {
        fn delay_us(&mut self, us: u32) {
            self.us_calls += 1;
            self.total_us += u64::from(us);
        }
        fn delay_ms(&mut self, ms: u32) {
            self.ms_calls += 1;
            self.total_ms += u64::from(ms);
        }
    }

    #[test]
    fn test_delay_whole_millis_uses_delay_ms() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_millis(20));
        assert_eq!((timer.ms_calls, timer.total_ms), (1, 20));
        assert_eq!(timer.us_calls, 0);
    }

    #[test]
    fn test_delay_sub_millis_uses_delay_us() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_micros(1500));
        assert_eq!(timer.total_ms, 1);
        assert_eq!(timer.total_us, 500);
    }

    #[test]
    fn test_delay_rounds_sub_micro_remainder_up() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_nanos(1500));
        assert_eq!(timer.total_ms, 0);
        assert_eq!(timer.total_us, 2);
    }

    #[test]
    fn test_delay_beyond_u32_millis_is_not_truncated() {
        let mut timer = RecordingTimer::default();
        timer.delay(Duration::from_secs(10_000_000));
        assert_eq!(timer.total_ms, 10_000_000_000);
        assert_eq!(timer.ms_calls, 3);
        assert_eq!(timer.us_calls, 0);
    }

    #[test]
    fn test_fn_sampler_forwards_channel_and_errors() {
        let mut sampler: FnSampler<_, u8> = FnSampler::new(|ch: u8| -> nb::Result<u16, &'static str> {
            match ch {
                0 => Ok(512),
                1 => Err(nb::Error::WouldBlock),
                _ => Err(nb::Error::Other("no such channel")),
            }
        });
        assert!(matches!(sampler.sample_raw(0), Ok(512)));
        assert!(matches!(sampler.sample_raw(1), Err(nb::Error::WouldBlock)));
        assert!(matches!(sampler.sample_raw(7), Err(nb::Error::Other("no such channel"))));
    }
}
