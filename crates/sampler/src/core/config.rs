//! Serializable sampler settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
use super::error::{ConfigError, ConfigResult};

/// Timing and fault policy for a [`Sampler`](crate::Sampler).
///
/// Durations use human-readable strings when (de)serialized:
///
/// ```toml
/// timeout = "5m"
/// interval = "10s"
/// reraise = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerConfig {
    /// Wall-clock budget for one run
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Pause between attempts
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Propagate the first probe failure instead of retrying
    #[serde(default)]
    pub reraise: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            reraise: false,
        }
    }
}

impl SamplerConfig {
    /// Create a validated configuration
    pub fn new(timeout: Duration, interval: Duration) -> ConfigResult<Self> {
        let config = Self {
            timeout,
            interval,
            reraise: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a validated configuration from real seconds
    ///
    /// Negative, non-finite or overflowing inputs are rejected.
    pub fn from_secs_f64(timeout: f64, interval: f64) -> ConfigResult<Self> {
        let timeout = secs("timeout", timeout)?;
        let interval = secs("interval", interval)?;
        Self::new(timeout, interval)
    }

    /// Set the re-raise policy
    #[must_use]
    pub const fn with_reraise(mut self, reraise: bool) -> Self {
        self.reraise = reraise;
        self
    }

    /// Check the construction rules
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.interval > self.timeout {
            return Err(ConfigError::IntervalExceedsTimeout {
                interval: self.interval,
                timeout: self.timeout,
            });
        }
        Ok(())
    }

    /// Upper bound on the number of values an always-succeeding probe
    /// yields before the run is exhausted
    ///
    /// Fields are public and deserialization does not validate, so the
    /// construction rules are checked first.
    pub fn max_attempts(&self) -> ConfigResult<u64> {
        self.validate()?;
        Ok((self.timeout.as_nanos() / self.interval.as_nanos()) as u64 + 1)
    }
}

fn secs(field: &'static str, value: f64) -> ConfigResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn parses_human_readable_durations() {
        let config: SamplerConfig =
            serde_json::from_str(r#"{"timeout": "1m 30s", "interval": "500ms"}"#).unwrap();
        assert_eq!(
            config,
            SamplerConfig {
                timeout: Duration::from_secs(90),
                interval: Duration::from_millis(500),
                reraise: false,
            }
        );
    }

    #[test]
    fn serializes_back_to_human_readable() {
        let config = SamplerConfig::new(Duration::from_secs(4), Duration::from_secs(1))
            .unwrap()
            .with_reraise(true);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["timeout"], "4s");
        assert_eq!(json["interval"], "1s");
        assert_eq!(json["reraise"], true);
    }

    #[test]
    fn rejects_unknown_fields() {
        let parsed = serde_json::from_str::<SamplerConfig>(
            r#"{"timeout": "1s", "interval": "1s", "sleep": "1s"}"#,
        );
        assert!(parsed.is_err());
    }

    #[rstest]
    #[case(1.0, 2.0, ConfigError::IntervalExceedsTimeout {
        interval: Duration::from_secs(2),
        timeout: Duration::from_secs(1),
    })]
    #[case(0.0, 0.0, ConfigError::ZeroTimeout)]
    #[case(1.0, 0.0, ConfigError::ZeroInterval)]
    fn rejects_invalid_budgets(#[case] timeout: f64, #[case] interval: f64, #[case] expected: ConfigError) {
        assert_eq!(SamplerConfig::from_secs_f64(timeout, interval), Err(expected));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unrepresentable_seconds(#[case] timeout: f64) {
        assert!(matches!(
            SamplerConfig::from_secs_f64(timeout, 1.0),
            Err(ConfigError::InvalidDuration { field: "timeout", .. })
        ));
    }

    #[test]
    fn equal_interval_and_timeout_is_valid() {
        let config = SamplerConfig::from_secs_f64(1.0, 1.0).unwrap();
        assert_eq!(config.max_attempts(), Ok(2));
    }

    #[test]
    fn max_attempts_rejects_unvalidated_zero_interval() {
        let config: SamplerConfig =
            serde_json::from_str(r#"{"timeout": "1s", "interval": "0s"}"#).unwrap();
        assert_eq!(config.max_attempts(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn default_is_valid() {
        assert!(SamplerConfig::default().validate().is_ok());
    }

    proptest! {
        #[test]
        fn interval_above_timeout_always_rejected(timeout_ms in 1u64..100_000, extra in 1u64..100_000) {
            let config = SamplerConfig {
                timeout: Duration::from_millis(timeout_ms),
                interval: Duration::from_millis(timeout_ms + extra),
                reraise: false,
            };
            let rejected = matches!(config.validate(), Err(ConfigError::IntervalExceedsTimeout { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn interval_within_timeout_accepted(timeout_ms in 1u64..100_000, interval_ms in 1u64..100_000) {
            prop_assume!(interval_ms <= timeout_ms);
            let config = SamplerConfig::new(
                Duration::from_millis(timeout_ms),
                Duration::from_millis(interval_ms),
            );
            prop_assert!(config.is_ok());
        }
    }
}
