use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "vignette_engine=debug,wgpu=warn"). When absent, `RUST_LOG` is used, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }
}

/// Where the active filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterSource {
    Explicit(String),
    Env(String),
    Default(log::LevelFilter),
}

pub(crate) fn resolve_filter(config: &LoggingConfig, env: Option<String>) -> FilterSource {
    let non_empty = |s: &String| !s.trim().is_empty();

    if let Some(filter) = config.filter.clone().filter(non_empty) {
        FilterSource::Explicit(filter)
    } else if let Some(filter) = env.filter(non_empty) {
        FilterSource::Env(filter)
    } else {
        FilterSource::Default(config.default_level)
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Explicit(filter) | FilterSource::Env(filter) => {
                builder.parse_filters(&filter);
            }
            FilterSource::Default(level) => {
                builder.filter_level(level);
                // wgpu is chatty at info.
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig::default().with_filter(Some("debug".into()));
        assert_eq!(
            resolve_filter(&cfg, Some("warn".into())),
            FilterSource::Explicit("debug".into())
        );
    }

    #[test]
    fn env_used_without_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(resolve_filter(&cfg, Some("warn".into())), FilterSource::Env("warn".into()));
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let cfg = LoggingConfig::default().with_filter(Some("  ".into()));
        assert_eq!(
            resolve_filter(&cfg, Some(String::new())),
            FilterSource::Default(log::LevelFilter::Info)
        );
    }
}
