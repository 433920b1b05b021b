//! Client configuration
//!
//! Loads credentials and endpoints from environment variables.

use std::env;
use std::time::Duration;

use chat_core::{Token, TokenKind};

/// Connection settings shared by the gateway and REST clients
#[derive(Clone)]
pub struct ClientConfig {
    /// Session or bot credential
    pub token: Token,
    /// Event stream endpoint
    pub gateway_url: String,
    /// REST API base URL
    pub api_url: String,
    /// File upload service base URL
    pub upload_url: String,
    /// Time between two pings
    pub heartbeat_interval: Duration,
    /// Pause before redialing after a transport failure
    pub reconnect_delay: Duration,
    /// `User-Agent` header sent with REST requests
    pub user_agent: String,
}

// Default value functions
fn default_gateway_url() -> String {
    "wss://ws.revolt.chat/?version=1&format=json".to_string()
}

fn default_api_url() -> String {
    "https://api.revolt.chat/".to_string()
}

fn default_upload_url() -> String {
    "https://autumn.revolt.chat/".to_string()
}

fn default_heartbeat_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_reconnect_delay() -> Duration {
    Duration::from_secs(3)
}

fn default_user_agent() -> String {
    format!("chat-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Configuration with default endpoints for the given credential
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self {
            token,
            gateway_url: default_gateway_url(),
            api_url: default_api_url(),
            upload_url: default_upload_url(),
            heartbeat_interval: default_heartbeat_interval(),
            reconnect_delay: default_reconnect_delay(),
            user_agent: default_user_agent(),
        }
    }

    #[must_use]
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    /// Returns an error if `CHAT_TOKEN` is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if `CHAT_TOKEN` is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup("CHAT_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingVar("CHAT_TOKEN"))?;
        let kind = match lookup("CHAT_TOKEN_KIND") {
            Some(raw) => raw
                .parse::<TokenKind>()
                .map_err(|_| ConfigError::InvalidValue("CHAT_TOKEN_KIND", raw))?,
            None => TokenKind::default(),
        };

        let mut config = Self::new(Token::new(kind, value));
        if let Some(url) = lookup("CHAT_GATEWAY_URL") {
            config.gateway_url = url;
        }
        if let Some(url) = lookup("CHAT_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = lookup("CHAT_UPLOAD_URL") {
            config.upload_url = url;
        }
        if let Some(ms) = parse_millis(&lookup, "CHAT_HEARTBEAT_INTERVAL_MS")? {
            config.heartbeat_interval = ms;
        }
        if let Some(ms) = parse_millis(&lookup, "CHAT_RECONNECT_DELAY_MS")? {
            config.reconnect_delay = ms;
        }
        if let Some(user_agent) = lookup("CHAT_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(Some(Duration::from_millis(ms))),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
        None => Ok(None),
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token)
            .field("gateway_url", &self.gateway_url)
            .field("api_url", &self.api_url)
            .field("upload_url", &self.upload_url)
            .field("heartbeat_interval", &self.heartbeat_interval)
            .field("reconnect_delay", &self.reconnect_delay)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
