//! Role entity - a named permission set within a server

use serde::{Deserialize, Serialize};

use crate::traits::Cacheable;
use crate::value_objects::{PermissionOverride, RoleFlags, Ulid};

/// Role as sent by the server
///
/// Roles carry no ID of their own on the wire; they are keyed by the map
/// they arrive in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionOverride,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub rank: i64,
}

/// Cached projection of a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedRole {
    pub id: Ulid,
    pub name: String,
    pub permissions: PermissionOverride,
    /// Empty when no colour is set
    pub colour: String,
    pub rank: i64,
    pub flags: RoleFlags,
}

impl OptimizedRole {
    /// Build the projection for the role stored under `id`
    pub fn from_wire(id: Ulid, role: &Role) -> Self {
        let mut flags = RoleFlags::empty();
        flags.set(RoleFlags::HOIST, role.hoist);

        Self {
            id,
            name: role.name.clone(),
            permissions: role.permissions,
            colour: role.colour.clone().unwrap_or_default(),
            rank: role.rank,
            flags,
        }
    }

    #[inline]
    pub fn is_hoisted(&self) -> bool {
        self.flags.contains(RoleFlags::HOIST)
    }

    /// Apply a `ServerRoleUpdate` patch
    pub fn apply_patch(&mut self, data: &PartialRole, clear: &[RoleClearField]) {
        if let Some(name) = data.name.as_deref().filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(permissions) = data.permissions {
            self.permissions = permissions;
        }
        if let Some(colour) = data.colour.as_deref().filter(|c| !c.is_empty()) {
            self.colour = colour.to_string();
        }
        if let Some(hoist) = data.hoist {
            self.flags.set(RoleFlags::HOIST, hoist);
        }
        if let Some(rank) = data.rank {
            self.rank = rank;
        }

        for field in clear {
            match field {
                RoleClearField::Colour => self.colour.clear(),
                RoleClearField::Unknown => {}
            }
        }
    }
}

impl Cacheable for OptimizedRole {
    fn cache_key(&self) -> &Ulid {
        &self.id
    }
}

/// Changed role fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialRole {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Option<PermissionOverride>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub hoist: Option<bool>,
    #[serde(default)]
    pub rank: Option<i64>,
}

impl PartialRole {
    /// A patch carrying every required field describes a newly created role
    pub fn as_created(&self) -> Option<Role> {
        match (&self.name, self.permissions, self.hoist, self.rank) {
            (Some(name), Some(permissions), Some(hoist), Some(rank)) if !name.is_empty() => {
                Some(Role {
                    name: name.clone(),
                    permissions,
                    colour: self.colour.clone().filter(|c| !c.is_empty()),
                    hoist,
                    rank,
                })
            }
            _ => None,
        }
    }
}

/// Role fields that a patch can reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleClearField {
    Colour,
    #[serde(other)]
    Unknown,
}
