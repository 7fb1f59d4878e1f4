//! Waiters that drive a sampler to completion
//!
//! Both waiters pull samples until one equals the target or the budget
//! runs out. They differ only in what they return: `wait_for_value` hands
//! back the matching value and treats a timeout as an error by default,
//! while `wait_for_status` answers yes or no and treats a timeout as a
//! normal "no".

use std::fmt::Debug;

use tracing::error;

use crate::core::SamplerError;
use crate::sampler::Sampler;

enum Waited<T, E> {
    Matched(T),
    TimedOut(SamplerError<E>),
}

impl<T, E> Sampler<T, E>
where
    T: PartialEq + Debug,
    E: Debug,
{
    /// Wait until the probe returns `target` and return the matching value.
    ///
    /// A timeout is reported as [`SamplerError::TimeoutExpired`].
    pub fn wait_for_value(&mut self, target: &T) -> Result<T, SamplerError<E>> {
        match self.drive(target)? {
            Waited::Matched(value) => Ok(value),
            Waited::TimedOut(timeout) => Err(timeout),
        }
    }

    /// Wait until the probe returns `target`.
    ///
    /// Returns `Ok(None)` on timeout unless `raise_on_timeout` is set.
    pub fn wait_for_value_with(
        &mut self,
        target: &T,
        raise_on_timeout: bool,
    ) -> Result<Option<T>, SamplerError<E>> {
        match self.drive(target)? {
            Waited::Matched(value) => Ok(Some(value)),
            Waited::TimedOut(timeout) if raise_on_timeout => Err(timeout),
            Waited::TimedOut(_) => Ok(None),
        }
    }

    /// Wait until the probe returns `expected`; `Ok(false)` on timeout.
    pub fn wait_for_status(&mut self, expected: &T) -> Result<bool, SamplerError<E>> {
        self.wait_for_status_with(expected, false)
    }

    /// Wait until the probe returns `expected`.
    ///
    /// Returns `Ok(false)` on timeout unless `raise_on_timeout` is set.
    pub fn wait_for_status_with(
        &mut self,
        expected: &T,
        raise_on_timeout: bool,
    ) -> Result<bool, SamplerError<E>> {
        Ok(self.wait_for_value_with(expected, raise_on_timeout)?.is_some())
    }

    fn drive(&mut self, target: &T) -> Result<Waited<T, E>, SamplerError<E>> {
        if self.state().is_finished() {
            return Err(SamplerError::Finished);
        }

        while let Some(sample) = self.next() {
            match sample {
                Ok(value) if value == *target => {
                    self.stop();
                    return Ok(Waited::Matched(value));
                }
                Ok(_) => {}
                Err(timeout @ SamplerError::TimeoutExpired { .. }) => {
                    error!(
                        probe = %self.func_name(),
                        target = ?target,
                        timeout_ms = self.timeout().as_millis() as u64,
                        "function {} failed to return expected value {:?} during {:?} timeout",
                        self.func_name(),
                        target,
                        self.timeout()
                    );
                    return Ok(Waited::TimedOut(timeout));
                }
                Err(other) => return Err(other),
            }
        }

        // The iterator only ends after a terminal item has been returned.
        Err(SamplerError::Finished)
    }
}
