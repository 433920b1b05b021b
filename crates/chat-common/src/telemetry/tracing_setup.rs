//! Tracing and logging setup
//!
//! The library crates only emit events. Binaries install a subscriber with
//! [`try_init_tracing`] or [`try_init_tracing_with_config`]; `RUST_LOG`
//! always wins over the configured level.

use std::env;
use std::fmt as std_fmt;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ConfigError;

/// Transport crates that are noisy at debug level
const QUIET_TARGETS: &[&str] = &[
    "tungstenite=warn",
    "tokio_tungstenite=warn",
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
];

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-field human readable lines
    #[default]
    Full,
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "pretty" => Some(Self::Full),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscriber options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level used when `RUST_LOG` is unset
    pub level: Level,
    pub format: LogFormat,
    /// Include file and line numbers
    pub file_line: bool,
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Full,
            file_line: false,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Read `CHAT_LOG_LEVEL` and `CHAT_LOG_FORMAT`
    ///
    /// # Errors
    /// Returns an error if either variable is set to an unknown value
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TracingConfig::from_env`] over an arbitrary lookup
    ///
    /// # Errors
    /// Returns an error if either variable is set to an unknown value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("CHAT_LOG_LEVEL") {
            config.level = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHAT_LOG_LEVEL", raw))?;
        }
        if let Some(raw) = lookup("CHAT_LOG_FORMAT") {
            config.format = LogFormat::from_str(&raw)
                .ok_or(ConfigError::InvalidValue("CHAT_LOG_FORMAT", raw))?;
        }
        // Source locations are only worth the noise when debugging
        config.file_line = config.level >= Level::DEBUG;
        Ok(config)
    }

    fn default_filter(&self) -> EnvFilter {
        let mut directives = vec![self.level.to_string().to_lowercase()];
        directives.extend(QUIET_TARGETS.iter().map(|d| (*d).to_string()));
        EnvFilter::new(directives.join(","))
    }
}

/// Install a subscriber with the default configuration
///
/// # Errors
/// Fails if a global subscriber is already installed
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Install a subscriber
///
/// # Errors
/// Fails if a global subscriber is already installed
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.default_filter());

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_names(config.thread_names),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_names(config.thread_names),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_names(config.thread_names),
            )
            .try_init(),
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
