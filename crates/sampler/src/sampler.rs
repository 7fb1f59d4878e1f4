//! Bounded-time polling engine
//!
//! A [`Sampler`] repeatedly invokes a zero-argument probe, yielding every
//! successful value, until the wall-clock budget is exhausted. It is a
//! plain [`Iterator`]: the consumer pulls values and stops by ceasing to
//! pull, and the final item of an exhausted run is
//! [`SamplerError::TimeoutExpired`].
//!
//! ```rust
//! use std::time::Duration;
//! use sampler::{Fault, Sampler, SamplerError};
//!
//! let mut calls = 0;
//! let mut sampler = Sampler::new(
//!     Duration::from_millis(40),
//!     Duration::from_millis(10),
//!     move || {
//!         calls += 1;
//!         Ok::<_, Fault<std::io::Error>>(calls)
//!     },
//! )?;
//!
//! for sample in sampler.samples() {
//!     if sample? >= 2 {
//!         break;
//!     }
//! }
//! assert!(sampler.reset().is_ok());
//! # Ok::<(), SamplerError<std::io::Error>>(())
//! ```
//!
//! ## Timing model
//!
//! Each step sleeps for `interval` (except the first step of a run),
//! checks the budget once, then invokes the probe once. A probe that runs
//! past the budget is never pre-empted: its attempt completes and yields
//! before the next budget check ends the run.

use std::any::type_name;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::{
    AttemptContext, ConfigResult, Fault, Outcome, SamplerConfig, SamplerError,
};
use crate::hooks::{self, Callback, CallbackResult, Hook};

type Probe<T, E> = Box<dyn FnMut() -> Result<T, Fault<E>>>;

/// Lifecycle of a sampler run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerState {
    /// No run has started since construction or the last `reset()`
    Idle,
    /// A run has started and has not ended
    Running,
    /// The budget ran out
    Exhausted,
    /// The consumer stopped the run, or a fault ended it
    Stopped,
}

impl SamplerState {
    /// Check if a run ended and the sampler needs `reset()` before reuse
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Exhausted | Self::Stopped)
    }
}

impl fmt::Display for SamplerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

enum Step<T, E> {
    Yield(T),
    Retry,
    Abort(SamplerError<E>),
}

/// Bounded-time polling engine.
///
/// `T` is the probe's value type and `E` its ordinary error type. See the
/// [module documentation](self) for the timing model.
pub struct Sampler<T, E> {
    timeout: Duration,
    interval: Duration,
    reraise: bool,
    func_name: String,
    probe: Probe<T, E>,
    on_attempt: Option<Callback<T, E>>,
    on_exception: Option<Callback<T, E>>,
    on_timeout: Option<Callback<T, E>>,
    state: SamplerState,
    started_at: Option<Instant>,
    attempts: u32,
}

impl<T, E> Sampler<T, E> {
    /// Create a sampler polling `probe` every `interval` for at most `timeout`.
    ///
    /// Fails when either duration is zero or `interval > timeout`.
    pub fn new<F>(timeout: Duration, interval: Duration, probe: F) -> ConfigResult<Self>
    where
        F: FnMut() -> Result<T, Fault<E>> + 'static,
    {
        let config = SamplerConfig::new(timeout, interval)?;
        Ok(Self::build(config, probe_name::<F>(), Box::new(probe)))
    }

    /// Create a sampler from a [`SamplerConfig`], including its re-raise policy
    pub fn from_config<F>(config: &SamplerConfig, probe: F) -> ConfigResult<Self>
    where
        F: FnMut() -> Result<T, Fault<E>> + 'static,
    {
        config.validate()?;
        Ok(Self::build(*config, probe_name::<F>(), Box::new(probe)))
    }

    fn build(config: SamplerConfig, func_name: String, probe: Probe<T, E>) -> Self {
        Self {
            timeout: config.timeout,
            interval: config.interval,
            reraise: config.reraise,
            func_name,
            probe,
            on_attempt: None,
            on_exception: None,
            on_timeout: None,
            state: SamplerState::Idle,
            started_at: None,
            attempts: 0,
        }
    }

    /// Propagate the first ordinary probe failure instead of retrying
    #[must_use]
    pub fn reraise(mut self, reraise: bool) -> Self {
        self.reraise = reraise;
        self
    }

    /// Override the probe name used in logs, contexts and errors
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.func_name = name.into();
        self
    }

    /// Invoke `callback` after every completed attempt
    #[must_use]
    pub fn on_attempt<C>(mut self, callback: C) -> Self
    where
        C: for<'a> FnMut(&AttemptContext<'a, T, E>) -> CallbackResult + 'static,
    {
        self.on_attempt = Some(Box::new(callback));
        self
    }

    /// Invoke `callback` after attempts whose probe failed
    #[must_use]
    pub fn on_exception<C>(mut self, callback: C) -> Self
    where
        C: for<'a> FnMut(&AttemptContext<'a, T, E>) -> CallbackResult + 'static,
    {
        self.on_exception = Some(Box::new(callback));
        self
    }

    /// Invoke `callback` once when a run's budget is exhausted
    #[must_use]
    pub fn on_timeout<C>(mut self, callback: C) -> Self
    where
        C: for<'a> FnMut(&AttemptContext<'a, T, E>) -> CallbackResult + 'static,
    {
        self.on_timeout = Some(Box::new(callback));
        self
    }

    /// Configured run budget
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured pause between attempts
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether probe failures are re-raised
    pub fn is_reraise(&self) -> bool {
        self.reraise
    }

    /// Probe name used in logs, contexts and errors
    pub fn func_name(&self) -> &str {
        &self.func_name
    }

    /// Current lifecycle state
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// When the current (or last) run started, `None` while idle
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Number of probe invocations in the current (or last) run
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Budget left in the current run.
    ///
    /// Reads the full timeout before a run starts and never goes below zero.
    pub fn time_remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.elapsed())
    }

    fn elapsed(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |start| start.elapsed())
    }

    /// End a running run early.
    ///
    /// Has no effect unless the sampler is [`SamplerState::Running`].
    pub fn stop(&mut self) {
        if self.state == SamplerState::Running {
            debug!(
                probe = %self.func_name,
                attempts = self.attempts,
                "Sampler stopped by consumer"
            );
            self.state = SamplerState::Stopped;
        }
    }

    /// Return to [`SamplerState::Idle`] so the next pull starts a fresh budget.
    ///
    /// Fails with [`SamplerError::ResetInProgress`] while a run is in
    /// progress; stop it first or let it finish.
    pub fn reset(&mut self) -> Result<(), SamplerError<E>> {
        if self.state == SamplerState::Running {
            return Err(SamplerError::ResetInProgress);
        }
        self.state = SamplerState::Idle;
        self.started_at = None;
        self.attempts = 0;
        Ok(())
    }

    /// Iterate over samples, stopping the run when the iterator is dropped.
    ///
    /// Breaking out of a `for` loop over `samples()` ends the run, so
    /// `reset()` succeeds right after the loop.
    pub fn samples(&mut self) -> Samples<'_, T, E> {
        Samples { sampler: self }
    }

    fn begin(&mut self) {
        self.started_at = Some(Instant::now());
        self.attempts = 0;
        self.state = SamplerState::Running;
    }

    fn pause(&self) {
        debug!(
            probe = %self.func_name,
            interval_ms = self.interval.as_millis() as u64,
            "Going to sleep for {:?} before next iteration",
            self.interval
        );
        thread::sleep(self.interval);
    }

    fn expire(&mut self, elapsed: Duration) -> SamplerError<E> {
        self.state = SamplerState::Exhausted;

        let ctx = AttemptContext {
            attempt_number: self.attempts,
            elapsed,
            time_remaining: self.timeout.saturating_sub(elapsed),
            func_name: &self.func_name,
            outcome: None,
        };
        hooks::fire(Hook::OnTimeout, self.on_timeout.as_mut(), &ctx);

        debug!(
            probe = %self.func_name,
            attempts = self.attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            "Timed out after {:?} waiting for {}",
            self.timeout,
            self.func_name
        );

        SamplerError::TimeoutExpired {
            func_name: self.func_name.clone(),
            timeout: self.timeout,
            attempts: self.attempts,
        }
    }

    fn abort(&mut self, error: SamplerError<E>) -> Step<T, E> {
        self.state = SamplerState::Stopped;
        Step::Abort(error)
    }
}

impl<T, E: fmt::Debug> Sampler<T, E> {
    fn attempt(&mut self) -> Step<T, E> {
        self.attempts += 1;

        // Signals short-circuit before any callback or swallow policy.
        let outcome = match (self.probe)() {
            Ok(value) => Outcome::Success(value),
            Err(Fault::Error(error)) => Outcome::Failure(error),
            Err(Fault::Interrupt) => return self.abort(SamplerError::Interrupted),
            Err(Fault::Exit(code)) => return self.abort(SamplerError::Exit { code }),
        };

        let elapsed = self.elapsed();
        let ctx = AttemptContext {
            attempt_number: self.attempts,
            elapsed,
            time_remaining: self.timeout.saturating_sub(elapsed),
            func_name: &self.func_name,
            outcome: Some(outcome.as_ref()),
        };
        hooks::fire(Hook::OnAttempt, self.on_attempt.as_mut(), &ctx);

        if ctx.exception().is_some() {
            hooks::fire(Hook::OnException, self.on_exception.as_mut(), &ctx);
        }

        if let (Some(error), false) = (ctx.exception(), self.reraise) {
            debug!(
                probe = %self.func_name,
                attempt = self.attempts,
                error = ?error,
                "{} raised {}",
                self.func_name,
                type_name::<E>()
            );
        }

        match outcome {
            Outcome::Success(value) => Step::Yield(value),
            Outcome::Failure(source) if self.reraise => {
                let func_name = self.func_name.clone();
                self.abort(SamplerError::Probe { func_name, source })
            }
            Outcome::Failure(_) => Step::Retry,
        }
    }
}

impl<T, E: fmt::Debug> Iterator for Sampler<T, E> {
    type Item = Result<T, SamplerError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            SamplerState::Idle => self.begin(),
            SamplerState::Running => {}
            SamplerState::Exhausted | SamplerState::Stopped => return None,
        }

        loop {
            if self.attempts > 0 {
                self.pause();
            }

            let elapsed = self.elapsed();
            if elapsed >= self.timeout {
                return Some(Err(self.expire(elapsed)));
            }

            match self.attempt() {
                Step::Yield(value) => return Some(Ok(value)),
                Step::Retry => {}
                Step::Abort(error) => return Some(Err(error)),
            }
        }
    }
}

impl<T, E> fmt::Debug for Sampler<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("func_name", &self.func_name)
            .field("timeout", &self.timeout)
            .field("interval", &self.interval)
            .field("reraise", &self.reraise)
            .field("state", &self.state)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// Iterator over a sampler's results that stops the run on drop.
///
/// Returned by [`Sampler::samples`].
pub struct Samples<'s, T, E> {
    sampler: &'s mut Sampler<T, E>,
}

impl<T, E: fmt::Debug> Iterator for Samples<'_, T, E> {
    type Item = Result<T, SamplerError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.sampler.next()
    }
}

impl<T, E> Drop for Samples<'_, T, E> {
    fn drop(&mut self) {
        self.sampler.stop();
    }
}

/// Readable probe name derived from the callable's type.
///
/// `app::checks::pod_ready` becomes `pod_ready`; closures keep the name of
/// their enclosing function, e.g. `wait_for_pods::{{closure}}`.
pub(crate) fn probe_name<F>() -> String {
    let full = type_name::<F>();
    let path = full.split('<').next().unwrap_or(full);
    let segments: Vec<&str> = path.split("::").collect();

    match segments.as_slice() {
        [.., parent, last] if last.starts_with("{{closure}}") => format!("{parent}::{last}"),
        [.., last] => (*last).to_string(),
        [] => full.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    type Probe = Result<u32, Fault<io::Error>>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn pod_ready() -> Probe {
        Ok(1)
    }

    #[test]
    fn rejects_interval_above_timeout() {
        let err = Sampler::new(ms(10), ms(20), || -> Probe { Ok(1) }).unwrap_err();
        assert_eq!(
            err,
            crate::ConfigError::IntervalExceedsTimeout {
                interval: ms(20),
                timeout: ms(10),
            }
        );
    }

    #[test]
    fn starts_idle_with_full_budget() {
        let sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        assert_eq!(sampler.state(), SamplerState::Idle);
        assert_eq!(sampler.time_remaining(), ms(50));
        assert!(sampler.started_at().is_none());
        assert_eq!(sampler.attempts(), 0);
    }

    #[test]
    fn first_pull_starts_run() {
        let mut sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        assert_eq!(sampler.next().unwrap().unwrap(), 1);
        assert_eq!(sampler.state(), SamplerState::Running);
        assert!(sampler.started_at().is_some());
        assert_eq!(sampler.attempts(), 1);
        assert!(sampler.time_remaining() <= ms(50));
    }

    #[test]
    fn exhausted_sampler_yields_nothing_until_reset() {
        let mut sampler = Sampler::new(ms(20), ms(10), pod_ready).unwrap();
        let last = sampler.by_ref().last().unwrap();
        assert!(last.unwrap_err().is_timeout());
        assert_eq!(sampler.state(), SamplerState::Exhausted);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.time_remaining(), Duration::ZERO);

        sampler.reset().unwrap();
        assert_eq!(sampler.state(), SamplerState::Idle);
        assert!(sampler.next().unwrap().is_ok());
    }

    #[test]
    fn reset_while_running_is_usage_error() {
        let mut sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        sampler.next();
        assert!(matches!(sampler.reset(), Err(SamplerError::ResetInProgress)));

        sampler.stop();
        assert_eq!(sampler.state(), SamplerState::Stopped);
        assert!(sampler.reset().is_ok());
    }

    #[test]
    #[allow(clippy::never_loop)]
    fn dropping_samples_stops_the_run() {
        let mut sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        for sample in sampler.samples() {
            assert_eq!(sample.unwrap(), 1);
            break;
        }
        assert_eq!(sampler.state(), SamplerState::Stopped);
        assert!(sampler.reset().is_ok());
    }

    #[test]
    fn stop_is_noop_when_idle() {
        let mut sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        sampler.stop();
        assert_eq!(sampler.state(), SamplerState::Idle);
    }

    #[test]
    fn names_fn_items_by_their_last_segment() {
        let sampler = Sampler::new(ms(50), ms(10), pod_ready).unwrap();
        assert_eq!(sampler.func_name(), "pod_ready");
    }

    #[test]
    fn names_closures_after_enclosing_fn() {
        let sampler = Sampler::new(ms(50), ms(10), || -> Probe { Ok(1) }).unwrap();
        assert_eq!(
            sampler.func_name(),
            "names_closures_after_enclosing_fn::{{closure}}"
        );
        assert_eq!(sampler.named("custom").func_name(), "custom");
    }

    #[test]
    fn from_config_carries_reraise() {
        let config = SamplerConfig::new(ms(50), ms(10)).unwrap().with_reraise(true);
        let sampler = Sampler::from_config(&config, pod_ready).unwrap();
        assert!(sampler.is_reraise());
        assert_eq!(sampler.timeout(), ms(50));
        assert_eq!(sampler.interval(), ms(10));
    }

    #[test]
    fn state_display() {
        assert_eq!(SamplerState::Exhausted.to_string(), "exhausted");
        assert!(SamplerState::Stopped.is_finished());
        assert!(!SamplerState::Running.is_finished());
    }
}
