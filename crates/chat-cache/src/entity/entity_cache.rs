//! Per-kind containers for every cached entity.

use std::sync::Arc;

use chat_core::{
    OptimizedChannel, OptimizedEmoji, OptimizedMember, OptimizedMessage, OptimizedRole,
    OptimizedServer, OptimizedUser, OptimizedWebhook, Ulid,
};
use parking_lot::RwLock;

use crate::store::{CacheConfig, GroupedCache, GroupedCacheConfig, KeyedCache};

/// Shared handle to the entity cache
pub type SharedEntityCache = Arc<EntityCache>;

/// Capacity policy for each container
#[derive(Debug, Clone, Default)]
pub struct EntityCacheConfig {
    pub users: CacheConfig<OptimizedUser>,
    pub servers: CacheConfig<OptimizedServer>,
    pub channels: CacheConfig<OptimizedChannel>,
    pub emojis: CacheConfig<OptimizedEmoji>,
    pub webhooks: CacheConfig<OptimizedWebhook>,
    /// Messages grouped by channel
    pub messages: GroupedCacheConfig<OptimizedMessage>,
    /// Members grouped by server
    pub members: GroupedCacheConfig<OptimizedMember>,
    /// Roles grouped by server
    pub roles: GroupedCacheConfig<OptimizedRole>,
}

impl EntityCacheConfig {
    /// Every container enabled without limits
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            users: CacheConfig::unlimited(),
            servers: CacheConfig::unlimited(),
            channels: CacheConfig::unlimited(),
            emojis: CacheConfig::unlimited(),
            webhooks: CacheConfig::unlimited(),
            messages: GroupedCacheConfig::unlimited(),
            members: GroupedCacheConfig::unlimited(),
            roles: GroupedCacheConfig::unlimited(),
        }
    }
}

/// Local mirror of the entities seen on the event stream
///
/// Reads through the convenience getters return clones so no lock outlives
/// the call. Handlers that need read-modify-write go through the container
/// accessors and hold the write lock for the duration of the mutation only.
#[derive(Debug, Default)]
pub struct EntityCache {
    users: RwLock<KeyedCache<OptimizedUser>>,
    servers: RwLock<KeyedCache<OptimizedServer>>,
    channels: RwLock<KeyedCache<OptimizedChannel>>,
    emojis: RwLock<KeyedCache<OptimizedEmoji>>,
    webhooks: RwLock<KeyedCache<OptimizedWebhook>>,
    messages: RwLock<GroupedCache<OptimizedMessage>>,
    members: RwLock<GroupedCache<OptimizedMember>>,
    roles: RwLock<GroupedCache<OptimizedRole>>,
}

impl EntityCache {
    #[must_use]
    pub fn new(config: EntityCacheConfig) -> Self {
        Self {
            users: RwLock::new(KeyedCache::new(config.users)),
            servers: RwLock::new(KeyedCache::new(config.servers)),
            channels: RwLock::new(KeyedCache::new(config.channels)),
            emojis: RwLock::new(KeyedCache::new(config.emojis)),
            webhooks: RwLock::new(KeyedCache::new(config.webhooks)),
            messages: RwLock::new(GroupedCache::new(config.messages)),
            members: RwLock::new(GroupedCache::new(config.members)),
            roles: RwLock::new(GroupedCache::new(config.roles)),
        }
    }

    /// Create a shared cache
    #[must_use]
    pub fn shared(config: EntityCacheConfig) -> SharedEntityCache {
        Arc::new(Self::new(config))
    }

    // ========================================================================
    // Containers
    // ========================================================================

    #[inline]
    pub fn users(&self) -> &RwLock<KeyedCache<OptimizedUser>> {
        &self.users
    }

    #[inline]
    pub fn servers(&self) -> &RwLock<KeyedCache<OptimizedServer>> {
        &self.servers
    }

    #[inline]
    pub fn channels(&self) -> &RwLock<KeyedCache<OptimizedChannel>> {
        &self.channels
    }

    #[inline]
    pub fn emojis(&self) -> &RwLock<KeyedCache<OptimizedEmoji>> {
        &self.emojis
    }

    #[inline]
    pub fn webhooks(&self) -> &RwLock<KeyedCache<OptimizedWebhook>> {
        &self.webhooks
    }

    #[inline]
    pub fn messages(&self) -> &RwLock<GroupedCache<OptimizedMessage>> {
        &self.messages
    }

    #[inline]
    pub fn members(&self) -> &RwLock<GroupedCache<OptimizedMember>> {
        &self.members
    }

    #[inline]
    pub fn roles(&self) -> &RwLock<GroupedCache<OptimizedRole>> {
        &self.roles
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn user(&self, id: &Ulid) -> Option<OptimizedUser> {
        self.users.read().get(id).cloned()
    }

    pub fn server(&self, id: &Ulid) -> Option<OptimizedServer> {
        self.servers.read().get(id).cloned()
    }

    pub fn channel(&self, id: &Ulid) -> Option<OptimizedChannel> {
        self.channels.read().get(id).cloned()
    }

    pub fn emoji(&self, id: &Ulid) -> Option<OptimizedEmoji> {
        self.emojis.read().get(id).cloned()
    }

    pub fn webhook(&self, id: &Ulid) -> Option<OptimizedWebhook> {
        self.webhooks.read().get(id).cloned()
    }

    pub fn message(&self, channel: &Ulid, id: &Ulid) -> Option<OptimizedMessage> {
        self.messages.read().get(channel, id).cloned()
    }

    pub fn member(&self, server: &Ulid, user: &Ulid) -> Option<OptimizedMember> {
        self.members.read().get(server, user).cloned()
    }

    pub fn role(&self, server: &Ulid, id: &Ulid) -> Option<OptimizedRole> {
        self.roles.read().get(server, id).cloned()
    }

    /// Drop every cached entity
    pub fn clear(&self) {
        self.users.write().clear();
        self.servers.write().clear();
        self.channels.write().clear();
        self.emojis.write().clear();
        self.webhooks.write().clear();
        self.messages.write().clear();
        self.members.write().clear();
        self.roles.write().clear();
    }
}
