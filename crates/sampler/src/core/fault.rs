//! Probe failure channel and attempt outcomes

use std::fmt;

/// How a probe invocation failed.
///
/// Ordinary failures are [`Fault::Error`] and are subject to the sampler's
/// swallow/re-raise policy. [`Fault::Interrupt`] and [`Fault::Exit`] are
/// process-termination signals: they end the run immediately and are
/// never passed to callbacks.
///
/// `From<E>` is implemented so a probe returning `Result<T, Fault<E>>`
/// can use `?` on its own fallible calls:
///
/// ```rust
/// use sampler::Fault;
///
/// fn read_marker(path: &str) -> Result<String, Fault<std::io::Error>> {
///     Ok(std::fs::read_to_string(path)?)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault<E> {
    /// Ordinary probe failure
    Error(E),
    /// Operator-issued interrupt
    Interrupt,
    /// Explicit process-exit request
    Exit(i32),
}

impl<E> Fault<E> {
    /// Check if this fault bypasses the swallow/re-raise policy
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Interrupt | Self::Exit(_))
    }

    /// Map the ordinary error, leaving signals untouched
    pub fn map<F, U>(self, f: F) -> Fault<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Error(e) => Fault::Error(f(e)),
            Self::Interrupt => Fault::Interrupt,
            Self::Exit(code) => Fault::Exit(code),
        }
    }
}

impl<E> From<E> for Fault<E> {
    fn from(error: E) -> Self {
        Self::Error(error)
    }
}

impl<E: fmt::Display> fmt::Display for Fault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{e}"),
            Self::Interrupt => write!(f, "interrupted"),
            Self::Exit(code) => write!(f, "exit requested ({code})"),
        }
    }
}

/// Outcome of one completed attempt: either the probe's value or its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The probe returned a value
    Success(T),
    /// The probe failed with an ordinary error
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Borrow both sides of the outcome
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(v) => Outcome::Success(v),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Check for success
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_mark_wraps_ordinary_errors() {
        fn parse(input: &str) -> Result<u32, Fault<std::num::ParseIntError>> {
            Ok(input.parse::<u32>()?)
        }

        assert_eq!(parse("7"), Ok(7));
        assert!(matches!(parse("x"), Err(Fault::Error(_))));
    }

    #[test]
    fn signals_survive_map() {
        let f: Fault<&str> = Fault::Exit(2);
        assert_eq!(f.map(str::len), Fault::Exit(2));
        assert!(Fault::<()>::Interrupt.is_signal());
        assert!(!Fault::Error(()).is_signal());
        assert_eq!(Fault::Error("boom").map(str::len), Fault::Error(4));
    }

    #[test]
    fn outcome_as_ref() {
        let ok: Outcome<u8, String> = Outcome::Success(1);
        assert_eq!(ok.as_ref(), Outcome::Success(&1));
        assert!(ok.is_success());
        let err: Outcome<u8, String> = Outcome::Failure("no".into());
        assert!(!err.as_ref().is_success());
    }
}
