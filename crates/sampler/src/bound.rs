//! Probes with pre-bound arguments
//!
//! Lets a multi-argument function serve as a probe without hand-writing a
//! closure. Positional arguments are bound as a tuple, keyword-style
//! arguments as a struct; the function receives them by reference on every
//! attempt.
//!
//! ```rust
//! use std::time::Duration;
//! use sampler::{Fault, Sampler};
//!
//! fn sum(&(a, b, c): &(u32, u32, Option<u32>)) -> Result<u32, Fault<()>> {
//!     Ok(c.map_or(0, |_| a + b))
//! }
//!
//! let mut sampler = Sampler::with_args(
//!     Duration::from_millis(10),
//!     Duration::from_millis(10),
//!     sum,
//!     (1, 2, Some(3)),
//! )
//! .unwrap();
//! assert_eq!(sampler.next().unwrap().unwrap(), 3);
//! ```

use std::fmt;
use std::time::Duration;

use crate::core::{ConfigResult, Fault, SamplerConfig};
use crate::sampler::{Sampler, probe_name};

/// A function paired with the arguments it is called with on every attempt.
pub struct BoundArgs<A, F> {
    func: F,
    args: A,
}

impl<A, F> BoundArgs<A, F> {
    /// Bind `args` to `func`
    pub const fn new(func: F, args: A) -> Self {
        Self { func, args }
    }

    /// The bound arguments
    pub const fn args(&self) -> &A {
        &self.args
    }

    /// Invoke the function with the bound arguments
    pub fn call<T, E>(&mut self) -> Result<T, Fault<E>>
    where
        F: FnMut(&A) -> Result<T, Fault<E>>,
    {
        (self.func)(&self.args)
    }
}

impl<A: fmt::Debug, F> fmt::Debug for BoundArgs<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundArgs")
            .field("func", &probe_name::<F>())
            .field("args", &self.args)
            .finish()
    }
}

impl<T, E> Sampler<T, E> {
    /// Create a sampler whose probe is `func(&args)`.
    ///
    /// Behaves exactly like [`Sampler::new`]; the probe name is taken from
    /// `func` rather than from the wrapping closure.
    pub fn with_args<A, F>(
        timeout: Duration,
        interval: Duration,
        func: F,
        args: A,
    ) -> ConfigResult<Self>
    where
        A: 'static,
        F: FnMut(&A) -> Result<T, Fault<E>> + 'static,
    {
        let config = SamplerConfig::new(timeout, interval)?;
        Self::bound_from_config(&config, BoundArgs::new(func, args))
    }

    /// Create a sampler from a [`SamplerConfig`] and a [`BoundArgs`] probe
    pub fn bound_from_config<A, F>(
        config: &SamplerConfig,
        mut bound: BoundArgs<A, F>,
    ) -> ConfigResult<Self>
    where
        A: 'static,
        F: FnMut(&A) -> Result<T, Fault<E>> + 'static,
    {
        let name = probe_name::<F>();
        Ok(Self::from_config(config, move || bound.call())?.named(name))
    }
}
