//! Session credentials
//!
//! A token is either a user session token or a bot token. The kind decides
//! which header carries it on REST requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// User session token
    User,
    /// Bot token
    #[default]
    Bot,
}

impl TokenKind {
    /// HTTP header used to carry this kind of token
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::User => "X-Session-Token",
            Self::Bot => "X-Bot-Token",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = TokenKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "bot" => Ok(Self::Bot),
            _ => Err(TokenKindParseError(s.to_string())),
        }
    }
}

/// Error when parsing a token kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token kind: {0} (expected \"user\" or \"bot\")")]
pub struct TokenKindParseError(pub String);

/// Credential used for the gateway and REST API
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Create a bot token
    #[must_use]
    pub fn bot(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Bot, value)
    }

    /// Create a user session token
    #[must_use]
    pub fn user(value: impl Into<String>) -> Self {
        Self::new(TokenKind::User, value)
    }

    /// Header name for this token
    #[inline]
    pub fn header_name(&self) -> &'static str {
        self.kind.header_name()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// Never print the secret
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("value", &"<redacted>")
            .finish()
    }
}
