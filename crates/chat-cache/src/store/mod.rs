//! Generic cache containers.
//!
//! - `KeyedCache`: entities keyed by their own ID
//! - `GroupedCache`: entities keyed by (parent ID, entity ID)

mod capacity;
mod grouped;
mod keyed;

pub use capacity::{
    Admission, CacheConfig, Capacity, GroupedAdmission, GroupedCacheConfig, UNLIMITED,
};
pub use grouped::GroupedCache;
pub use keyed::KeyedCache;
