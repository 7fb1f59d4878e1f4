//! Configuration types and presets
//!
//! - `base`: core configuration structs (`Config`, `Format`)
//! - `display`: what each log line shows
//! - `presets`: environment, development and production setups

mod base;
mod display;
mod presets;

pub use base::{Config, Format};
pub use display::DisplayConfig;
