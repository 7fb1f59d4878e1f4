//! # Sampler
//!
//! Bounded-time polling for conditions that converge eventually: a pod
//! becoming ready, a resource reaching a phase, a command printing the
//! expected output.
//!
//! ## Features
//!
//! - **Sampler**: an [`Iterator`] over probe results that ends when the
//!   wall-clock budget runs out
//! - **Fault policy**: ordinary probe failures are swallowed or re-raised;
//!   interrupt and exit signals always propagate
//! - **Callbacks**: `on_attempt`, `on_exception`, `on_timeout` hooks with
//!   per-attempt context
//! - **Bound arguments**: poll a multi-argument function without a closure
//! - **Waiters**: drive a run until a target value or status is observed
//!
//! ## Quick Start
//!
//! ```rust
//! use sampler::prelude::*;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), SamplerError<std::io::Error>> {
//!     let mut phase = ["Pending", "Pending", "Running"].into_iter();
//!     let mut sampler = Sampler::new(
//!         Duration::from_secs(1),
//!         Duration::from_millis(10),
//!         move || Ok::<_, Fault<std::io::Error>>(phase.next().unwrap_or("Running")),
//!     )?;
//!
//!     assert!(sampler.wait_for_status(&"Running")?);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core module with fundamental types
pub mod core;

mod bound;
mod hooks;
mod sampler;
mod wait;

pub use bound::BoundArgs;
pub use hooks::{CallbackError, CallbackResult, Hook};
pub use sampler::{Sampler, SamplerState, Samples};

// Public API - core types
pub use core::{
    AttemptContext, ConfigError, ConfigResult, Fault, Outcome, SamplerConfig, SamplerError,
    SamplerResult,
};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{AttemptContext, Fault, SamplerConfig, SamplerError, SamplerResult};
    pub use crate::{CallbackResult, Sampler, SamplerState};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
