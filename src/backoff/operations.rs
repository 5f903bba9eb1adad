//! Retry loop driven by a backoff

use log::{debug, warn};
use std::io;
use std::thread;
use std::time::Duration;

use crate::backoff::{BackOff, Interval};

/// Waits between attempts. Swappable so tests never block.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Runs `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or `backoff` says stop.
///
/// The backoff is reset first, so each call starts a fresh cycle. When the
/// backoff stops, the last error from `operation` is returned as is.
pub fn retry_with_backoff<T, B, S, P, F>(
    backoff: &mut B,
    sleeper: &S,
    should_retry: P,
    mut operation: F,
) -> io::Result<T>
where
    B: BackOff + ?Sized,
    S: Sleeper + ?Sized,
    P: Fn(&io::Error) -> bool,
    F: FnMut() -> io::Result<T>,
{
    backoff.reset();
    let mut attempt: u32 = 1;

    loop {
        let err = match operation() {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !should_retry(&err) {
            return Err(err);
        }

        match backoff.next_interval()? {
            Interval::Wait(delay) => {
                debug!(
                    "Attempt {} failed ({}), retrying in {} ms",
                    attempt,
                    err,
                    delay.as_millis()
                );
                sleeper.sleep(delay);
                attempt += 1;
            }
            Interval::Stop => {
                warn!("Giving up after {} attempt(s): {}", attempt, err);
                return Err(err);
            }
        }
    }
}
