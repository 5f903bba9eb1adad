//! Concrete backoff strategies
//!
//! Unbounded interval generators. Bound them with `RetryBoundedBackOff`.

use rand::Rng;
use std::io;
use std::time::{Duration, Instant};

use crate::backoff::{BackOff, Interval};

pub const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_RANDOMIZATION_FACTOR: f64 = 0.5;
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_ELAPSED_TIME: Duration = Duration::from_secs(15 * 60);

/// Exponentially growing, randomized intervals.
///
/// Each call returns the current interval scaled by a random factor in
/// `[1 - randomization_factor, 1 + randomization_factor]`, then grows the
/// current interval by `multiplier` up to `max_interval`. After
/// `max_elapsed_time` has passed since the last reset it returns
/// `Interval::Stop`.
#[derive(Debug, Clone)]
pub struct ExponentialBackOff {
    initial_interval: Duration,
    multiplier: f64,
    randomization_factor: f64,
    max_interval: Duration,
    max_elapsed_time: Option<Duration>,
    current_interval: Duration,
    started_at: Instant,
}

impl ExponentialBackOff {
    pub fn builder() -> ExponentialBackOffBuilder {
        ExponentialBackOffBuilder::default()
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    fn randomized(&self) -> Duration {
        let current = self.current_interval.as_secs_f64();
        let delta = self.randomization_factor * current;
        if delta <= 0.0 {
            return self.current_interval;
        }
        let value = rand::thread_rng().gen_range((current - delta)..=(current + delta));
        Duration::from_secs_f64(value.max(0.0))
    }

    fn advance(&mut self) {
        let next = self.current_interval.as_secs_f64() * self.multiplier;
        self.current_interval = if next >= self.max_interval.as_secs_f64() {
            self.max_interval
        } else {
            Duration::from_secs_f64(next)
        };
    }
}

impl Default for ExponentialBackOff {
    fn default() -> Self {
        ExponentialBackOffBuilder::default().build()
    }
}

impl BackOff for ExponentialBackOff {
    fn next_interval(&mut self) -> io::Result<Interval> {
        if let Some(limit) = self.max_elapsed_time {
            if self.started_at.elapsed() > limit {
                return Ok(Interval::Stop);
            }
        }

        let wait = self.randomized();
        self.advance();
        Ok(Interval::Wait(wait))
    }

    fn reset(&mut self) {
        self.current_interval = self.initial_interval;
        self.started_at = Instant::now();
    }
}

/// Builder for [`ExponentialBackOff`]
#[derive(Debug, Clone)]
pub struct ExponentialBackOffBuilder {
    initial_interval: Duration,
    multiplier: f64,
    randomization_factor: f64,
    max_interval: Duration,
    max_elapsed_time: Option<Duration>,
}

impl Default for ExponentialBackOffBuilder {
    fn default() -> Self {
        Self {
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            multiplier: DEFAULT_MULTIPLIER,
            randomization_factor: DEFAULT_RANDOMIZATION_FACTOR,
            max_interval: DEFAULT_MAX_INTERVAL,
            max_elapsed_time: Some(DEFAULT_MAX_ELAPSED_TIME),
        }
    }
}

impl ExponentialBackOffBuilder {
    pub fn initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn randomization_factor(mut self, factor: f64) -> Self {
        self.randomization_factor = factor;
        self
    }

    pub fn max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    /// `None` never stops on elapsed time.
    pub fn max_elapsed_time(mut self, limit: Option<Duration>) -> Self {
        self.max_elapsed_time = limit;
        self
    }

    pub fn build(self) -> ExponentialBackOff {
        ExponentialBackOff {
            initial_interval: self.initial_interval,
            multiplier: self.multiplier,
            randomization_factor: self.randomization_factor,
            max_interval: self.max_interval,
            max_elapsed_time: self.max_elapsed_time,
            current_interval: self.initial_interval,
            started_at: Instant::now(),
        }
    }
}

/// Intervals growing by a fixed step: `initial`, `initial + step`, ...
/// capped at `max_interval`. Never stops on its own.
#[derive(Debug, Clone)]
pub struct LinearBackOff {
    initial: Duration,
    step: Duration,
    max_interval: Duration,
    attempt: u32,
}

impl LinearBackOff {
    pub fn new(initial: Duration, step: Duration, max_interval: Duration) -> Self {
        Self {
            initial,
            step,
            max_interval,
            attempt: 0,
        }
    }
}

impl BackOff for LinearBackOff {
    fn next_interval(&mut self) -> io::Result<Interval> {
        let wait = self
            .initial
            .saturating_add(self.step.saturating_mul(self.attempt))
            .min(self.max_interval);
        self.attempt = self.attempt.saturating_add(1);
        Ok(Interval::Wait(wait))
    }

    fn reset(&mut self) {
        self.attempt = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(backoff: &mut impl BackOff) -> u64 {
        backoff.next_interval().unwrap().millis().unwrap()
    }

    #[test]
    fn test_exponential_without_jitter_grows_and_caps() {
        let mut backoff = ExponentialBackOff::builder()
            .initial_interval(Duration::from_millis(100))
            .multiplier(2.0)
            .randomization_factor(0.0)
            .max_interval(Duration::from_millis(500))
            .max_elapsed_time(None)
            .build();

        let seen: Vec<u64> = (0..6).map(|_| millis(&mut backoff)).collect();
        assert_eq!(seen, vec![100, 200, 400, 500, 500, 500]);
    }

    #[test]
    fn test_exponential_jitter_stays_in_range() {
        let mut backoff = ExponentialBackOff::builder()
            .initial_interval(Duration::from_millis(1000))
            .multiplier(1.0)
            .randomization_factor(0.5)
            .max_elapsed_time(None)
            .build();

        for _ in 0..50 {
            let wait = millis(&mut backoff);
            assert!((500..=1500).contains(&wait), "wait {} out of range", wait);
        }
    }

    #[test]
    fn test_exponential_reset_restarts_sequence() {
        let mut backoff = ExponentialBackOff::builder()
            .initial_interval(Duration::from_millis(10))
            .multiplier(3.0)
            .randomization_factor(0.0)
            .max_elapsed_time(None)
            .build();

        assert_eq!(millis(&mut backoff), 10);
        assert_eq!(millis(&mut backoff), 30);
        backoff.reset();
        assert_eq!(backoff.current_interval(), Duration::from_millis(10));
        assert_eq!(millis(&mut backoff), 10);
    }

    #[test]
    fn test_exponential_stops_after_elapsed_time() {
        let mut backoff = ExponentialBackOff::builder()
            .max_elapsed_time(Some(Duration::ZERO))
            .build();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(backoff.next_interval().unwrap(), Interval::Stop);
    }

    #[test]
    fn test_linear_sequence_and_reset() {
        let mut backoff = LinearBackOff::new(
            Duration::from_millis(1),
            Duration::from_millis(1),
            Duration::from_millis(4),
        );
        let seen: Vec<u64> = (0..6).map(|_| millis(&mut backoff)).collect();
        assert_eq!(seen, vec![1, 2, 3, 4, 4, 4]);

        backoff.reset();
        assert_eq!(millis(&mut backoff), 1);
    }
}
