//! # Tag Aggregator
//!
//! Builds the course -> tag-set index used to annotate search results, and
//! caches it per (source, id, year).
//!
//! Published curriculum years are immutable once created, so a computed
//! index never goes stale: the cache is populate-once-per-key for the
//! process lifetime, with no eviction. The cache is injected rather than
//! hidden behind a global memo so tests get a fresh one per case.
//! Computation is a pure function of its key; two threads racing to
//! populate the same key write equivalent values, so no population lock is
//! held across the store call.

use crate::loader::{resolve_degree_rows, resolve_option_rows};
use crate::store::CatalogStore;
use crate::types::{CourseCode, CurriculaError, RequirementRow, TagCode};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

/// Mapping from course code to every tag that course can satisfy.
pub type TagIndex = BTreeMap<CourseCode, BTreeSet<TagCode>>;

/// Which requirement table an index is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagSource {
    /// Degree requirement rows.
    Degree,
    /// Option requirement rows.
    Option,
}

type CacheKey = (TagSource, String, u16);

// =============================================================================
// CACHE
// =============================================================================

/// Process-wide tag-index cache: populate once per key, never evict.
#[derive(Debug, Default)]
pub struct TagIndexCache {
    entries: RwLock<BTreeMap<CacheKey, TagIndex>>,
}

impl TagIndexCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &CacheKey) -> Option<TagIndex> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn insert(&self, key: CacheKey, index: TagIndex) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, index);
    }

    /// Number of populated keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check whether the cache is unpopulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// INDEX CONSTRUCTION
// =============================================================================

/// The tag index for (source, id, year), computed on first access.
///
/// Year resolution follows the loader's policy (exact year, else the latest
/// published year); the result is cached under the REQUESTED year, which is
/// safe because published snapshots never change.
pub fn tag_index(
    store: &impl CatalogStore,
    cache: &TagIndexCache,
    source: TagSource,
    id: &str,
    year: u16,
) -> Result<TagIndex, CurriculaError> {
    let key = (source, id.to_string(), year);
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let rows = match source {
        TagSource::Degree => resolve_degree_rows(store, id, year)?,
        TagSource::Option => resolve_option_rows(store, id, year)?,
    };

    let mut index = TagIndex::new();
    for row in rows {
        let RequirementRow { tag, courses, .. } = row;
        for course in courses {
            index.entry(course).or_default().insert(tag.clone());
        }
    }

    cache.insert(key, index.clone());
    Ok(index)
}

/// Merge two tag indexes; colliding courses get the UNION of both tag sets.
#[must_use]
pub fn merge_tag_indexes(mut base: TagIndex, other: TagIndex) -> TagIndex {
    for (course, tags) in other {
        base.entry(course).or_default().extend(tags);
    }
    base
}

// =============================================================================
// TESTS
// =============================================================================
