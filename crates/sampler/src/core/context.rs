//! Per-attempt record handed to sampler callbacks

use std::time::Duration;

use super::fault::Outcome;

/// Immutable description of one probe attempt.
///
/// A fresh context is built for every attempt and lent to the callbacks
/// for the duration of the call. The context passed to `on_timeout`
/// carries no outcome.
#[derive(Debug)]
pub struct AttemptContext<'a, T, E> {
    /// 1-based attempt number within the current run
    pub attempt_number: u32,
    /// Time since the run's first attempt
    pub elapsed: Duration,
    /// Budget left in the run, never below zero
    pub time_remaining: Duration,
    /// Human-readable probe identifier
    pub func_name: &'a str,
    /// Value or error produced by this attempt, `None` for timeout contexts
    pub outcome: Option<Outcome<&'a T, &'a E>>,
}

impl<'a, T, E> AttemptContext<'a, T, E> {
    /// The probe's value, if the attempt succeeded
    pub fn result(&self) -> Option<&'a T> {
        match self.outcome {
            Some(Outcome::Success(v)) => Some(v),
            _ => None,
        }
    }

    /// The probe's error, if the attempt failed
    pub fn exception(&self) -> Option<&'a E> {
        match self.outcome {
            Some(Outcome::Failure(e)) => Some(e),
            _ => None,
        }
    }

    /// Elapsed time in real seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Remaining budget in real seconds
    pub fn time_remaining_secs(&self) -> f64 {
        self.time_remaining.as_secs_f64()
    }
}
