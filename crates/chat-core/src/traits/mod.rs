//! Traits shared by cached entities

use crate::value_objects::Ulid;

/// An entity that can be stored in a keyed cache
///
/// Parent-scoped entities (messages, members, roles) return their own ID;
/// the parent is supplied separately when inserting.
pub trait Cacheable {
    /// Key under which the entity is stored
    fn cache_key(&self) -> &Ulid;
}
