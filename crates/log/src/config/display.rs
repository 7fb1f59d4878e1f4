//! Display configuration

use serde::{Deserialize, Serialize};

/// What each rendered log line shows
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            colors: cfg!(feature = "ansi") && std::io::IsTerminal::is_terminal(&std::io::stderr()),
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `SAMPLER_LOG_TIME`, `SAMPLER_LOG_SOURCE` and `SAMPLER_LOG_COLORS`
    pub(super) fn parse_env(&mut self) {
        if let Ok(v) = std::env::var("SAMPLER_LOG_TIME") {
            self.time = flag(&v);
        }
        if let Ok(v) = std::env::var("SAMPLER_LOG_SOURCE") {
            self.source = flag(&v);
        }
        if let Ok(v) = std::env::var("SAMPLER_LOG_COLORS") {
            self.colors = flag(&v);
        }
    }
}

fn flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert!(flag("1"));
        assert!(flag("yes"));
        assert!(!flag("0"));
        assert!(!flag("FALSE"));
    }
}
