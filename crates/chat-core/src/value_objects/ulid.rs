//! ULID - 128-bit lexically sortable identifier
//!
//! Structure (26 Crockford base32 characters):
//! - Characters 0-9:   Timestamp (48 bits, milliseconds since Unix epoch)
//! - Characters 10-25: Randomness (80 bits)
//!
//! Every entity on the platform is keyed by a ULID. The wire format is the
//! plain string; decoding never rejects an odd string so that unexpected
//! server data cannot fail a whole frame. Use [`Ulid::parse`] where strict
//! validation matters.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Crockford base32 alphabet (no I, L, O, U)
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of an encoded ULID
pub const ULID_LEN: usize = 26;

/// Opaque, lexically sortable identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ulid(String);

impl Ulid {
    /// Wrap a raw string without validation
    #[inline]
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse and validate a ULID string
    pub fn parse(s: &str) -> Result<Self, UlidParseError> {
        decode(s)?;
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Generate a fresh ULID for the current time
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let random: u128 = rand::thread_rng().gen::<u128>() & ((1u128 << 80) - 1);
        Self::from_parts(millis, random)
    }

    /// Build a ULID from a millisecond timestamp and 80 random bits
    pub fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        let value = (u128::from(timestamp_ms & 0xFFFF_FFFF_FFFF) << 80) | (random & ((1u128 << 80) - 1));
        Self(encode(value))
    }

    /// Get the string representation
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the ID is empty (never valid as a cache key)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the ID is a well-formed ULID
    pub fn is_valid(&self) -> bool {
        decode(&self.0).is_ok()
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    pub fn timestamp_ms(&self) -> Option<u64> {
        decode(&self.0).ok().map(|v| (v >> 80) as u64)
    }

    /// Convert timestamp to DateTime<Utc>
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        use chrono::{TimeZone, Utc};
        let millis = i64::try_from(self.timestamp_ms()?).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Consume and return the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn encode(mut value: u128) -> String {
    let mut out = [0u8; ULID_LEN];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
    out.iter().map(|&b| b as char).collect()
}

fn decode(s: &str) -> Result<u128, UlidParseError> {
    if s.len() != ULID_LEN {
        return Err(UlidParseError::InvalidLength(s.len()));
    }
    let mut value: u128 = 0;
    for (i, c) in s.chars().enumerate() {
        let upper = c.to_ascii_uppercase() as u8;
        let idx = ALPHABET
            .iter()
            .position(|&a| a == upper)
            .ok_or(UlidParseError::InvalidChar(c))?;
        // The first character only carries 3 bits
        if i == 0 && idx > 7 {
            return Err(UlidParseError::Overflow);
        }
        value = (value << 5) | idx as u128;
    }
    Ok(value)
}

/// Error when parsing a ULID from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UlidParseError {
    #[error("invalid ulid length: expected 26, got {0}")]
    InvalidLength(usize),

    #[error("invalid ulid character: {0:?}")]
    InvalidChar(char),

    #[error("ulid timestamp overflows 48 bits")]
    Overflow,
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ulid {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Ulid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Ulid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Ulid {
    type Err = UlidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::parse(s)
    }
}

impl Serialize for Ulid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Ulid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Ulid)
    }
}
