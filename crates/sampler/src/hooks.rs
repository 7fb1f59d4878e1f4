//! Callback hooks invoked around probe attempts
//!
//! Callbacks replace subclassing the sampler: `on_attempt` runs after every
//! attempt, `on_exception` additionally after failed ones, and `on_timeout`
//! once when a run is exhausted. A callback that returns an error or panics
//! is logged at warn level and otherwise ignored; it can never change the
//! control flow of the polling loop.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::core::AttemptContext;

/// Error a callback may return
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of every callback
pub type CallbackResult = Result<(), CallbackError>;

pub(crate) type Callback<T, E> =
    Box<dyn for<'a> FnMut(&AttemptContext<'a, T, E>) -> CallbackResult>;

/// Identifies which callback slot is being invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// After every completed attempt
    OnAttempt,
    /// After attempts whose probe failed
    OnException,
    /// When the run budget is exhausted
    OnTimeout,
}

impl Hook {
    /// Name used in log lines
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OnAttempt => "on_attempt",
            Self::OnException => "on_exception",
            Self::OnTimeout => "on_timeout",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `callback` (if set) with `ctx`, containing any failure.
pub(crate) fn fire<T, E>(
    hook: Hook,
    callback: Option<&mut Callback<T, E>>,
    ctx: &AttemptContext<'_, T, E>,
) {
    let Some(callback) = callback else {
        return;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| callback(ctx))) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
            warn!(
                callback = hook.name(),
                probe = ctx.func_name,
                attempt = ctx.attempt_number,
                error = %error,
                "Callback {hook} raised an error: {error}"
            );
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(
                callback = hook.name(),
                probe = ctx.func_name,
                attempt = ctx.attempt_number,
                "Callback {hook} raised a panic: {message}"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
