//! Logger builder implementation

#[macro_use]
mod format;

// External dependencies
use tracing::Subscriber;
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

// Internal crates
use crate::config::{Config, Format};
use crate::{Error, Result};

pub(crate) type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync + 'static>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Handle returned once the global subscriber is installed
#[derive(Debug)]
pub struct LoggerGuard {
    config: Config,
}

impl LoggerGuard {
    /// Configuration the subscriber was built from
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build the subscriber without installing it.
    ///
    /// Useful for scoping a subscriber with `tracing::subscriber::with_default`.
    pub fn subscriber(&self) -> Result<impl Subscriber + Send + Sync + use<>> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| Error::Filter(format!("{}: {}", &self.config.level, e)))?;

        let display = &self.config.display;
        let fmt_layer = match self.config.format {
            Format::Pretty => create_fmt_layer!(pretty, display),
            Format::Compact => create_fmt_layer!(compact, display),
            Format::Json => create_json_layer!(display),
        };

        Ok(Registry::default().with(filter).with(fmt_layer))
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> Result<LoggerGuard> {
        self.subscriber()?
            .try_init()
            .map_err(|e| Error::AlreadyInitialized(e.to_string()))?;

        Ok(LoggerGuard {
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Format::Pretty)]
    #[case(Format::Compact)]
    #[case(Format::Json)]
    fn builds_every_format(#[case] format: Format) {
        let builder = LoggerBuilder::from_config(Config::default().with_format(format));
        let subscriber = builder.subscriber().unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(format = %format, "Subscriber ready");
        });
    }

    #[test]
    fn rejects_invalid_filter() {
        let builder = LoggerBuilder::from_config(Config::default().with_level("sampler=verbose"));
        assert!(matches!(builder.subscriber(), Err(Error::Filter(_))));
    }

    #[test]
    fn honours_untimed_display() {
        let mut config = Config::default();
        config.display.time = false;
        assert!(LoggerBuilder::from_config(config).subscriber().is_ok());
    }
}
