//! Error types for sampler construction and runs

use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a [`Sampler`](crate::Sampler).
///
/// These are programmer errors: they surface synchronously from the
/// constructor and never later during a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The run budget is zero
    #[error("Invalid sampler configuration: timeout must be greater than zero")]
    ZeroTimeout,

    /// The inter-attempt delay is zero
    #[error("Invalid sampler configuration: interval must be greater than zero")]
    ZeroInterval,

    /// A single inter-attempt cycle does not fit into the budget
    #[error(
        "Invalid sampler configuration: interval {interval:?} exceeds timeout {timeout:?}, \
         the timeout cannot be guaranteed"
    )]
    IntervalExceedsTimeout {
        /// Configured inter-attempt delay
        interval: Duration,
        /// Configured run budget
        timeout: Duration,
    },

    /// A real-seconds value could not be represented as a duration
    #[error("Invalid sampler configuration: {field} = {value} is not a valid number of seconds")]
    InvalidDuration {
        /// Name of the offending setting
        field: &'static str,
        /// Rejected input
        value: String,
    },
}

/// Errors yielded by a sampler run.
///
/// `E` is the probe's own error type; it only appears in
/// [`SamplerError::Probe`] when the sampler was built with `reraise(true)`.
#[derive(Error, Debug)]
pub enum SamplerError<E> {
    /// The wall-clock budget elapsed before the consumer stopped the run
    #[error("Timed out after {timeout:?} waiting for {func_name} ({attempts} attempts)")]
    TimeoutExpired {
        /// Name of the polled probe
        func_name: String,
        /// Configured run budget
        timeout: Duration,
        /// Number of probe invocations made during the run
        attempts: u32,
    },

    /// The probe failed and the sampler re-raises probe failures
    #[error("Probe {func_name} failed: {source}")]
    Probe {
        /// Name of the polled probe
        func_name: String,
        /// The probe's error
        #[source]
        source: E,
    },

    /// The probe reported an operator interrupt
    #[error("Interrupted while polling")]
    Interrupted,

    /// The probe requested process exit
    #[error("Exit requested with code {code}")]
    Exit {
        /// Requested exit status
        code: i32,
    },

    /// `reset()` was called while a run is in progress
    #[error("Cannot reset sampler while iteration is in progress")]
    ResetInProgress,

    /// A waiter was asked to drive a run that already finished
    #[error("Sampler run already finished, call reset() to start a new run")]
    Finished,

    /// Construction failed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl<E> SamplerError<E> {
    /// Check if the run ended because the budget was exhausted
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExpired { .. })
    }

    /// Check if the error is one of the two unrecoverable signals
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Interrupted | Self::Exit { .. })
    }

    /// Check if the error reports misuse of the sampler API
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::ResetInProgress | Self::Finished)
    }

    /// Borrow the probe error, if this is a re-raised probe failure
    pub fn probe_error(&self) -> Option<&E> {
        match self {
            Self::Probe { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Take the probe error, if this is a re-raised probe failure
    pub fn into_probe_error(self) -> Option<E> {
        match self {
            Self::Probe { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for sampler runs
pub type SamplerResult<T, E> = Result<T, SamplerError<E>>;

/// Result type for sampler construction
pub type ConfigResult<T> = Result<T, ConfigError>;
