//! Server-reported protocol errors

use std::fmt;

use serde_json::Value;

/// Error identifiers the server sends in `Error` frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorKind {
    /// Uncategorised error
    LabelMe,
    /// Server ran into an issue
    InternalError,
    /// Authentication details are incorrect
    InvalidSession,
    /// User has not chosen a username yet
    OnboardingNotFinished,
    /// Connection is already authenticated
    AlreadyAuthenticated,
    /// Identifier this client does not know
    Unknown,
}

impl ProtocolErrorKind {
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "LabelMe" => Self::LabelMe,
            "InternalError" | "InternalServer" => Self::InternalError,
            "InvalidSession" | "NotFound" => Self::InvalidSession,
            "OnboardingNotFinished" => Self::OnboardingNotFinished,
            "AlreadyAuthenticated" => Self::AlreadyAuthenticated,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LabelMe => "LabelMe",
            Self::InternalError => "InternalError",
            Self::InvalidSession => "InvalidSession",
            Self::OnboardingNotFinished => "OnboardingNotFinished",
            Self::AlreadyAuthenticated => "AlreadyAuthenticated",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::LabelMe => "uncategorised error",
            Self::InternalError => "the server ran into an issue",
            Self::InvalidSession => "authentication details are incorrect",
            Self::OnboardingNotFinished => "user has not chosen a username",
            Self::AlreadyAuthenticated => "this connection is already authenticated",
            Self::Unknown => "unrecognised error",
        }
    }

    /// Whether retrying with the same credential can succeed
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::InvalidSession | Self::OnboardingNotFinished)
    }
}

impl fmt::Display for ProtocolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by the server
///
/// `raw` keeps the identifier exactly as received so unknown kinds stay
/// inspectable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{raw}: {}", kind.description())]
pub struct ProtocolError {
    pub kind: ProtocolErrorKind,
    pub raw: String,
}

impl ProtocolError {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: ProtocolErrorKind::from_id(&raw),
            raw,
        }
    }

    /// Build from an `Error` or `NotFound` frame
    ///
    /// The `error` field may be a bare identifier or an object carrying the
    /// identifier in `type`. `NotFound` frames carry none and map to an
    /// invalid session.
    #[must_use]
    pub fn from_frame(frame: &Value) -> Self {
        if frame.get("type").and_then(Value::as_str) == Some("NotFound") {
            return Self::new("NotFound");
        }
        let id = match frame.get("error") {
            Some(Value::String(id)) => id.as_str(),
            Some(Value::Object(map)) => map.get("type").and_then(Value::as_str).unwrap_or("LabelMe"),
            _ => "LabelMe",
        };
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_id() {
        assert_eq!(ProtocolErrorKind::from_id("InvalidSession"), ProtocolErrorKind::InvalidSession);
        assert_eq!(ProtocolErrorKind::from_id("InternalServer"), ProtocolErrorKind::InternalError);
        assert_eq!(ProtocolErrorKind::from_id("NotFound"), ProtocolErrorKind::InvalidSession);
        assert_eq!(ProtocolErrorKind::from_id("Banana"), ProtocolErrorKind::Unknown);
    }

    #[test]
    fn test_from_frame_string_error() {
        let err = ProtocolError::from_frame(&json!({ "type": "Error", "error": "InvalidSession" }));
        assert_eq!(err.kind, ProtocolErrorKind::InvalidSession);
        assert_eq!(err.to_string(), "InvalidSession: authentication details are incorrect");
    }

    #[test]
    fn test_from_frame_object_error() {
        let err = ProtocolError::from_frame(&json!({
            "type": "Error",
            "error": { "type": "AlreadyAuthenticated" }
        }));
        assert_eq!(err.kind, ProtocolErrorKind::AlreadyAuthenticated);
    }

    #[test]
    fn test_from_frame_not_found() {
        let err = ProtocolError::from_frame(&json!({ "type": "NotFound" }));
        assert_eq!(err.kind, ProtocolErrorKind::InvalidSession);
        assert_eq!(err.raw, "NotFound");
    }

    #[test]
    fn test_unknown_keeps_raw() {
        let err = ProtocolError::from_frame(&json!({ "type": "Error", "error": "SomethingNew" }));
        assert_eq!(err.kind, ProtocolErrorKind::Unknown);
        assert_eq!(err.raw, "SomethingNew");
        assert!(!err.kind.is_fatal());
    }
}
