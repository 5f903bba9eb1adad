//! Attempt-bounded backoff
//!
//! Wraps an unbounded backoff and stops it after a fixed number of retries.

use log::debug;
use std::io;

use crate::backoff::{BackOff, Interval};
use crate::error::BackoffError;

/// Caps the number of intervals an inner backoff may produce.
///
/// Once `max_retries` intervals have been handed out, every further call to
/// `next_interval` returns `Interval::Stop` without consulting the inner
/// backoff. `reset` restarts both the count and the inner sequence.
///
/// One instance drives one retry loop at a time.
#[derive(Debug, Clone)]
pub struct RetryBoundedBackOff<B> {
    max_retries: u32,
    retries_attempted: u32,
    delegate: B,
}

impl<B: BackOff> RetryBoundedBackOff<B> {
    pub fn new(max_retries: i32, delegate: B) -> Result<Self, BackoffError> {
        if max_retries < 0 {
            return Err(BackoffError::InvalidArgument(
                "Maximum number of retries must not be less than 0.".into(),
            ));
        }

        Ok(Self {
            max_retries: max_retries as u32,
            retries_attempted: 0,
            delegate,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retries_attempted(&self) -> u32 {
        self.retries_attempted
    }

    pub fn delegate(&self) -> &B {
        &self.delegate
    }
}

impl<B: BackOff> BackOff for RetryBoundedBackOff<B> {
    fn next_interval(&mut self) -> io::Result<Interval> {
        if self.retries_attempted >= self.max_retries {
            debug!(
                "Retry budget of {} exhausted, stopping",
                self.max_retries
            );
            return Ok(Interval::Stop);
        }

        // A failing delegate does not consume an attempt.
        let interval = self.delegate.next_interval()?;
        self.retries_attempted += 1;
        Ok(interval)
    }

    fn reset(&mut self) {
        self.retries_attempted = 0;
        self.delegate.reset();
    }
}
