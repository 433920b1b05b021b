//! Capacity policy shared by every cache container.

use std::fmt;
use std::sync::Arc;

use chat_core::Ulid;

/// Sentinel accepted by `Capacity::from(i64)` for "no limit"
pub const UNLIMITED: i64 = -1;

/// How many entries a container (or one dimension of it) may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capacity {
    /// Nothing is cached
    #[default]
    Disabled,
    /// No upper bound
    Unlimited,
    /// At most this many entries
    Bounded(usize),
}

impl Capacity {
    /// Bounded capacity; zero means disabled
    #[must_use]
    pub const fn bounded(max: usize) -> Self {
        if max == 0 {
            Self::Disabled
        } else {
            Self::Bounded(max)
        }
    }

    /// Whether this dimension allows any entry at all
    #[inline]
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Disabled | Self::Bounded(0) => false,
            Self::Unlimited | Self::Bounded(_) => true,
        }
    }

    /// Upper bound, if any
    #[inline]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Bounded(max) if max > 0 => Some(max),
            _ => None,
        }
    }
}

impl From<i64> for Capacity {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::Disabled,
            v if v < 0 => Self::Unlimited,
            v => Self::bounded(v as usize),
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Unlimited => f.write_str("unlimited"),
            Self::Bounded(max) => write!(f, "{max}"),
        }
    }
}

/// Admission predicate for single-keyed containers
pub type Admission<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// Admission predicate for parent-scoped containers, receives the parent ID
pub type GroupedAdmission<V> = Arc<dyn Fn(&Ulid, &V) -> bool + Send + Sync>;

/// Configuration for a [`KeyedCache`](super::KeyedCache)
pub struct CacheConfig<V> {
    /// Maximum number of entries
    pub max_size: Capacity,
    /// Refuse new entries when full instead of evicting one
    pub reject_on_overflow: bool,
    /// Veto individual entities before the overflow logic runs
    pub admission: Option<Admission<V>>,
}

impl<V> CacheConfig<V> {
    #[must_use]
    pub fn new(max_size: Capacity) -> Self {
        Self {
            max_size,
            reject_on_overflow: false,
            admission: None,
        }
    }

    /// Caching disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Capacity::Disabled)
    }

    /// No upper bound
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(Capacity::Unlimited)
    }

    /// At most `max` entries
    #[must_use]
    pub fn bounded(max: usize) -> Self {
        Self::new(Capacity::bounded(max))
    }

    /// Refuse inserts when full
    #[must_use]
    pub fn reject_on_overflow(mut self) -> Self {
        self.reject_on_overflow = true;
        self
    }

    /// Install an admission predicate
    #[must_use]
    pub fn with_admission<F>(mut self, check: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.admission = Some(Arc::new(check));
        self
    }
}

impl<V> Default for CacheConfig<V> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<V> Clone for CacheConfig<V> {
    fn clone(&self) -> Self {
        Self {
            max_size: self.max_size,
            reject_on_overflow: self.reject_on_overflow,
            admission: self.admission.clone(),
        }
    }
}

impl<V> fmt::Debug for CacheConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("max_size", &self.max_size)
            .field("reject_on_overflow", &self.reject_on_overflow)
            .field("admission", &self.admission.is_some())
            .finish()
    }
}

/// Configuration for a [`GroupedCache`](super::GroupedCache)
///
/// Each limit is independent; a `Disabled` dimension simply imposes no
/// bound. Caching is off only when all three are `Disabled`.
pub struct GroupedCacheConfig<V> {
    /// Maximum number of distinct parents
    pub max_groups: Capacity,
    /// Maximum number of entries under one parent
    pub max_per_group: Capacity,
    /// Maximum number of entries across all parents
    pub max_total: Capacity,
    /// Refuse new entries when a limit is hit instead of evicting
    pub reject_on_overflow: bool,
    /// Veto individual entities before the overflow logic runs
    pub admission: Option<GroupedAdmission<V>>,
}

impl<V> GroupedCacheConfig<V> {
    /// Caching disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_groups: Capacity::Disabled,
            max_per_group: Capacity::Disabled,
            max_total: Capacity::Disabled,
            reject_on_overflow: false,
            admission: None,
        }
    }

    /// No upper bound in any dimension
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_total: Capacity::Unlimited,
            ..Self::disabled()
        }
    }

    #[must_use]
    pub fn with_max_groups(mut self, max: Capacity) -> Self {
        self.max_groups = max;
        self
    }

    #[must_use]
    pub fn with_max_per_group(mut self, max: Capacity) -> Self {
        self.max_per_group = max;
        self
    }

    #[must_use]
    pub fn with_max_total(mut self, max: Capacity) -> Self {
        self.max_total = max;
        self
    }

    /// Refuse inserts when a limit is hit
    #[must_use]
    pub fn reject_on_overflow(mut self) -> Self {
        self.reject_on_overflow = true;
        self
    }

    /// Install an admission predicate
    #[must_use]
    pub fn with_admission<F>(mut self, check: F) -> Self
    where
        F: Fn(&Ulid, &V) -> bool + Send + Sync + 'static,
    {
        self.admission = Some(Arc::new(check));
        self
    }

    /// Whether any dimension is configured
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.max_groups.is_enabled() || self.max_per_group.is_enabled() || self.max_total.is_enabled()
    }
}

impl<V> Default for GroupedCacheConfig<V> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<V> Clone for GroupedCacheConfig<V> {
    fn clone(&self) -> Self {
        Self {
            max_groups: self.max_groups,
            max_per_group: self.max_per_group,
            max_total: self.max_total,
            reject_on_overflow: self.reject_on_overflow,
            admission: self.admission.clone(),
        }
    }
}

impl<V> fmt::Debug for GroupedCacheConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedCacheConfig")
            .field("max_groups", &self.max_groups)
            .field("max_per_group", &self.max_per_group)
            .field("max_total", &self.max_total)
            .field("reject_on_overflow", &self.reject_on_overflow)
            .field("admission", &self.admission.is_some())
            .finish()
    }
}
