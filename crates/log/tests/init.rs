//! Global initialization
//!
//! Kept in its own test binary: installing the global subscriber is a
//! one-shot operation per process.

use sampler_log::{Config, Error, Format};

#[test]
fn second_init_reports_error() {
    let guard = sampler_log::init_with(Config::default().with_format(Format::Json)).unwrap();
    assert_eq!(guard.config().format, Format::Json);
    sampler_log::info!("first subscriber installed");

    let again = sampler_log::init();
    assert!(matches!(again, Err(Error::AlreadyInitialized(_))));
}
