//! Member entity - a user's membership in a server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::{Attachment, OptimizedAttachment};
use crate::traits::Cacheable;
use crate::value_objects::Ulid;

/// Composite member key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId {
    pub server: Ulid,
    pub user: Ulid,
}

/// Member as sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    #[serde(default)]
    pub roles: Vec<Ulid>,
    #[serde(default)]
    pub timeout: Option<DateTime<Utc>>,
}

/// Cached projection of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedMember {
    pub id: MemberId,
    pub joined_at: DateTime<Utc>,
    /// Empty when no nickname is set
    pub nickname: String,
    pub avatar: Option<OptimizedAttachment>,
    pub roles: Vec<Ulid>,
    pub timeout: Option<DateTime<Utc>>,
}

impl OptimizedMember {
    /// Fresh member record for a user that just joined
    pub fn joined(server: Ulid, user: Ulid, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: MemberId { server, user },
            joined_at,
            nickname: String::new(),
            avatar: None,
            roles: Vec::new(),
            timeout: None,
        }
    }

    #[inline]
    pub fn has_role(&self, role: &Ulid) -> bool {
        self.roles.contains(role)
    }

    /// Apply a `ServerMemberUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialMember, clear: &[MemberClearField]) {
        if let Some(nickname) = &data.nickname {
            self.nickname.clone_from(nickname);
        }
        if let Some(avatar) = &data.avatar {
            self.avatar = Some(avatar.into());
        }
        if let Some(roles) = &data.roles {
            self.roles.clone_from(roles);
        }
        if let Some(timeout) = data.timeout {
            self.timeout = Some(timeout);
        }

        for field in clear {
            match field {
                MemberClearField::Nickname => self.nickname.clear(),
                MemberClearField::Avatar => self.avatar = None,
                MemberClearField::Roles => self.roles.clear(),
                MemberClearField::Timeout => self.timeout = None,
                MemberClearField::Unknown => {}
            }
        }
    }
}

impl From<&Member> for OptimizedMember {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.clone(),
            joined_at: m.joined_at,
            nickname: m.nickname.clone().unwrap_or_default(),
            avatar: m.avatar.as_ref().map(Into::into),
            roles: m.roles.clone(),
            timeout: m.timeout,
        }
    }
}

// Members are grouped by server, so the user ID is the key within a group
impl Cacheable for OptimizedMember {
    fn cache_key(&self) -> &Ulid {
        &self.id.user
    }
}

/// Changed member fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialMember {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<Attachment>,
    #[serde(default)]
    pub roles: Option<Vec<Ulid>>,
    #[serde(default)]
    pub timeout: Option<DateTime<Utc>>,
}

/// Member fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberClearField {
    Nickname,
    Avatar,
    Roles,
    Timeout,
    #[serde(other)]
    Unknown,
}
