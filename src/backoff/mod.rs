//! Backoff module
//!
//! Interval generators for retrying remote calls, the attempt-bounded
//! wrapper around them, and the retry loop that consumes both.

pub mod bounded;
pub mod operations;
pub mod strategy;

use std::io;
use std::time::Duration;

pub use bounded::RetryBoundedBackOff;
pub use operations::{Sleeper, ThreadSleeper, retry_with_backoff};
pub use strategy::{ExponentialBackOff, ExponentialBackOffBuilder, LinearBackOff};

/// Outcome of asking a backoff for its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// Wait this long, then retry.
    Wait(Duration),
    /// Give up.
    Stop,
}

impl Interval {
    /// Convenience constructor for a wait in milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Interval::Wait(Duration::from_millis(millis))
    }

    /// Wait length in milliseconds, `None` for `Stop`
    pub fn millis(&self) -> Option<u64> {
        match self {
            Interval::Wait(d) => Some(d.as_millis() as u64),
            Interval::Stop => None,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Interval::Stop)
    }
}

/// A stateful generator of wait intervals between retries.
pub trait BackOff {
    /// Next interval to wait before retrying, or `Interval::Stop`.
    fn next_interval(&mut self) -> io::Result<Interval>;

    /// Restart the sequence as if freshly constructed.
    fn reset(&mut self);
}

impl<B: BackOff + ?Sized> BackOff for Box<B> {
    fn next_interval(&mut self) -> io::Result<Interval> {
        (**self).next_interval()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
