//! Tracing setup for the binaries and demos.
//!
//! The library only emits `tracing` events; installing a subscriber is up
//! to the caller. `init_tracing` is idempotent and the first call wins.
//! `RUST_LOG` overrides the configured filter when set.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Warn,
            module_filters: vec![
                ("possibility_engine::core::catalog".to_string(), LogLevel::Info),
                ("possibility_engine::core::generator".to_string(), LogLevel::Info),
            ],
            show_targets: true,
        }
    }
}

impl TracingConfig {
    /// Everything from this crate at `level`, other crates at warn.
    pub fn verbose(level: LogLevel) -> Self {
        Self {
            default_level: LogLevel::Warn,
            module_filters: vec![("possibility_engine".to_string(), level)],
            show_targets: true,
        }
    }

    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_writer(std::io::stderr)
            .compact();

        // Another subscriber may already be installed by the host
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_string_lists_modules() {
        let filter = TracingConfig::default().to_env_filter_string();
        assert!(filter.starts_with("warn"));
        assert!(filter.contains("possibility_engine::core::generator=info"));
    }

    #[test]
    fn verbose_targets_crate() {
        let filter = TracingConfig::verbose(LogLevel::Trace).to_env_filter_string();
        assert_eq!(filter, "warn,possibility_engine=trace");
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing_default();
        init_tracing(&TracingConfig::verbose(LogLevel::Debug));
    }
}
