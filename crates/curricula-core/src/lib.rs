//! # curricula-core
//!
//! The deterministic requirement-matching engine for Curricula - THE LOGIC.
//!
//! This crate reconciles a student's completed-course list against a
//! program's published requirement rows and reports what remains
//! outstanding, including course substitution and double-counting
//! prevention across requirement lists. It also derives the course -> tag
//! index that annotates catalog search results.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure and synchronous: no async, no network dependencies
//! - Is deterministic: `BTreeMap` only, integer arithmetic only
//! - Owns no persistence; raw rows arrive through the `CatalogStore` trait
//! - Treats expected data gaps (unknown program, absent year) as empty
//!   results, never as errors

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod engine;
pub mod loader;
pub mod options;
pub mod search;
pub mod similarity;
pub mod store;
pub mod substitution;
pub mod tags;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AdditionalReqCount, Course, CourseCode, CurriculaError, DegreeRequirements, MinLevel,
    MissingList, MissingReport, OptionRequirement, OptionRequirements, PoolRequirement,
    RequirementRow, TagCode,
};

// =============================================================================
// RE-EXPORTS: Matching Engine
// =============================================================================

pub use engine::compute_missing;
pub use loader::{load_degree_requirements, load_option_requirements};
pub use options::find_missing_requirements;
pub use substitution::SubstitutionTable;

// =============================================================================
// RE-EXPORTS: Tags & Search
// =============================================================================

pub use aggregator::{TagIndex, TagIndexCache, TagSource, merge_tag_indexes, tag_index};
pub use search::{CourseWithTags, PlanRef, SearchRequest, search_courses};
pub use similarity::{SIMILARITY_FLOOR, SIMILARITY_SCALE, similarity};
pub use store::{
    CatalogEntry, CatalogSnapshot, CatalogStore, CourseRecord, DegreeRowRecord, MemoryCatalog,
    OptionRowRecord, SearchPredicate,
};
pub use tags::{TagCategory, TagInfo, tag_info};
