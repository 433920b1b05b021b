//! Custom emoji entity

use serde::{Deserialize, Serialize};

use crate::traits::Cacheable;
use crate::value_objects::{EmojiFlags, Ulid};

/// Owner of a custom emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EmojiParent {
    /// Emoji belongs to a server
    Server { id: Ulid },
    /// Emoji was detached from its server
    Detached,
}

/// Custom emoji as sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub parent: EmojiParent,
    pub creator_id: Ulid,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub nsfw: bool,
}

/// Cached projection of a custom emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedEmoji {
    pub id: Ulid,
    pub parent: EmojiParent,
    pub creator_id: Ulid,
    pub name: String,
    pub flags: EmojiFlags,
}

impl OptimizedEmoji {
    /// Server the emoji belongs to, if any
    pub fn server(&self) -> Option<&Ulid> {
        match &self.parent {
            EmojiParent::Server { id } => Some(id),
            EmojiParent::Detached => None,
        }
    }
}

impl From<&CustomEmoji> for OptimizedEmoji {
    fn from(e: &CustomEmoji) -> Self {
        let mut flags = EmojiFlags::empty();
        flags.set(EmojiFlags::ANIMATED, e.animated);
        flags.set(EmojiFlags::NSFW, e.nsfw);

        Self {
            id: e.id.clone(),
            parent: e.parent.clone(),
            creator_id: e.creator_id.clone(),
            name: e.name.clone(),
            flags,
        }
    }
}

impl Cacheable for OptimizedEmoji {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Emoji reference used by reaction events
///
/// Reactions carry either a custom emoji ID or a unicode emoji string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReactionEmoji {
    Custom(Ulid),
    Unicode(String),
}

impl ReactionEmoji {
    fn classify(s: String) -> Self {
        // Custom emoji IDs are ULIDs and start with an ASCII digit or letter
        match s.chars().next() {
            Some(c) if c.is_ascii_alphanumeric() => Self::Custom(Ulid::from_raw(s)),
            _ => Self::Unicode(s),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom(id) => id.as_str(),
            Self::Unicode(s) => s,
        }
    }
}

impl Serialize for ReactionEmoji {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReactionEmoji {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_wire_format() {
        let emoji: CustomEmoji = serde_json::from_value(serde_json::json!({
            "_id": "01H00000000000000000EMOJI1",
            "parent": { "type": "Server", "id": "01H0000000000000000SERVER1" },
            "creator_id": "01H000000000000000000USER1",
            "name": "party",
            "animated": true
        }))
        .unwrap();

        let cached = OptimizedEmoji::from(&emoji);
        assert!(cached.flags.contains(EmojiFlags::ANIMATED));
        assert!(!cached.flags.contains(EmojiFlags::NSFW));
        assert_eq!(cached.server().map(Ulid::as_str), Some("01H0000000000000000SERVER1"));
    }

    #[test]
    fn test_detached_parent() {
        let parent: EmojiParent = serde_json::from_str(r#"{"type":"Detached"}"#).unwrap();
        assert_eq!(parent, EmojiParent::Detached);
    }

    #[test]
    fn test_reaction_emoji_classification() {
        let custom: ReactionEmoji = serde_json::from_str("\"01H00000000000000000EMOJI1\"").unwrap();
        assert!(matches!(custom, ReactionEmoji::Custom(_)));

        let unicode: ReactionEmoji = serde_json::from_str("\"\u{1F600}\"").unwrap();
        assert_eq!(unicode, ReactionEmoji::Unicode("\u{1F600}".into()));
    }
}
