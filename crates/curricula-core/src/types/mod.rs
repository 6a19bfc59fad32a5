//! # Core Type Definitions
//!
//! This module contains all exchange types for the Curricula matching engine:
//! - Course and tag identifiers (`CourseCode`, `TagCode`)
//! - Published requirement rows (`RequirementRow`)
//! - Normalized requirement sets (`DegreeRequirements`, `OptionRequirements`)
//! - Engine output structures (`MissingReport`, `MissingList`)
//! - Annotated course types (`Course`, `MinLevel`)
//! - Error types (`CurriculaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Normalize identifiers on construction so equality is canonical

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// A numbered academic term tag: one digit followed by one uppercase letter
/// ("1A".."4B"). Rows tagged this way are mandatory-schedule requirements.
static TERM_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d[A-Z]$").expect("term tag pattern is valid"));

/// Tag codes whose rows are milestones or work terms, tracked outside
/// requirement evaluation. Rows carrying these never reach any report.
const MILESTONE_TAGS: [&str; 4] = ["MLSTN", "PDENG", "WKRPT", "PD"];

// =============================================================================
// COURSE & TAG IDENTIFIERS
// =============================================================================

/// Canonical course identifier.
///
/// Published tables are inconsistent about spacing ("MSCI 211" vs "MSCI211"),
/// so the constructor strips every non-alphanumeric byte. Two spellings of
/// the same course always compare equal, and normalization is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Create a normalized course code.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.chars().filter(char::is_ascii_alphanumeric).collect())
    }

    /// Get the canonical code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the code is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for CourseCode {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CourseCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short requirement/tag code classifying a course's role in a program
/// ("1A", "TE", "CSE", "elective", ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct TagCode(String);

impl TagCode {
    /// Create a new tag code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is a numbered-term tag ("1A".."4B").
    ///
    /// Term-tagged rows are mandatory-schedule requirements; their count
    /// becomes `number_of_mandatory_courses` in the missing report.
    #[must_use]
    pub fn is_term(&self) -> bool {
        TERM_TAG.is_match(&self.0)
    }

    /// Check whether this tag marks a milestone/work-term row (MLSTN, PDENG,
    /// WKRPT, PD). Such rows are excluded from requirement evaluation.
    #[must_use]
    pub fn is_milestone(&self) -> bool {
        MILESTONE_TAGS.contains(&self.0.as_str())
    }
}

impl From<&str> for TagCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// REQUIREMENT ROWS
// =============================================================================

/// One published requirement row for a program or option.
///
/// A row with exactly one course is a mandatory single course; a row with
/// more is a pool requirement asking for `number_of_courses` picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRow {
    /// Term or category tag ("1A", "TE", "elective", ...).
    pub tag: TagCode,
    /// Ordered course pool, split from the comma-delimited source column.
    pub courses: Vec<CourseCode>,
    /// Number of courses required from the pool.
    pub number_of_courses: u32,
}

impl RequirementRow {
    /// Create a new requirement row.
    #[must_use]
    pub fn new(tag: impl Into<TagCode>, courses: Vec<CourseCode>, number_of_courses: u32) -> Self {
        Self {
            tag: tag.into(),
            courses,
            number_of_courses,
        }
    }
}

// =============================================================================
// NORMALIZED REQUIREMENT SETS
// =============================================================================

/// A named pool requirement: pick `number_of_courses` from `courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRequirement {
    /// The course pool.
    pub courses: Vec<CourseCode>,
    /// Number of picks required.
    pub number_of_courses: u32,
}

/// Normalized degree requirements: mandatory singletons plus named pools.
///
/// Milestone-tagged rows (MLSTN/PDENG/WKRPT/PD) never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DegreeRequirements {
    /// Single-course mandatory requirements.
    pub mandatory_courses: Vec<CourseCode>,
    /// Pool requirements keyed by category tag. Last writer wins when two
    /// rows share a tag; rows are not merged.
    pub additional_reqs: BTreeMap<TagCode, PoolRequirement>,
}

/// One elective-pool requirement of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRequirement {
    /// Requirement-list name; doubles as the tag code for annotation.
    pub name: TagCode,
    /// The course pool.
    pub courses: Vec<CourseCode>,
    /// Number of picks required.
    pub number_of_courses: u32,
}

/// The requirement lists published for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OptionRequirements {
    /// The option identifier the lists belong to.
    pub option_name: String,
    /// Requirement lists in source order.
    pub requirements: Vec<OptionRequirement>,
}

// =============================================================================
// ENGINE OUTPUT
// =============================================================================

/// Progress counter for one additional-requirement category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalReqCount {
    /// Courses completed toward the category.
    pub completed: u32,
    /// Courses required in total.
    pub total: u32,
    /// The category's tag code.
    pub tag: TagCode,
}

/// Missing-requirement report for a degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MissingReport {
    /// Unsatisfied mandatory requirements: a bare course code for single
    /// rows, or the outstanding pool parenthesized ("(CS137, MATH115)").
    pub mandatory_courses: Vec<String>,
    /// Count of term-coded rows over the whole requirement set, before any
    /// exclusion filtering.
    pub number_of_mandatory_courses: usize,
    /// Additional-requirement progress keyed by the category's long name.
    pub additional_reqs: BTreeMap<String, AdditionalReqCount>,
}

/// Per-list matching result for an option requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingList {
    /// The requirement-list name.
    pub list_name: TagCode,
    /// Satisfaction map: course -> taken. Courses consumed by an earlier
    /// list in the same computation are absent, not marked `false`.
    pub courses: BTreeMap<CourseCode, bool>,
    /// Number of courses needed to complete the list.
    #[serde(rename = "totalToComplete")]
    pub total_to_complete: u32,
    /// The list's tag code.
    pub tag: TagCode,
}

// =============================================================================
// COURSE CATALOG
// =============================================================================

/// A course catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Canonical course code.
    pub course_code: CourseCode,
    /// Display name.
    pub course_name: String,
    /// Calendar description.
    #[serde(default)]
    pub description: String,
}

/// Parsed minimum-level annotation for a course.
///
/// Defaults to empty when the source annotation is absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MinLevel {
    /// Minimum academic level ("3A"), empty when unknown.
    pub level: String,
    /// Human-readable description, empty when unknown.
    pub description: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Curricula engine.
///
/// Expected data gaps (unknown program, absent year, malformed min-level
/// annotations) are recovered locally as empty values and never surface
/// here; only unknown tag codes and storage failures are hard errors.
#[derive(Debug, Error)]
pub enum CurriculaError {
    /// A tag code is not present in the tag catalog.
    #[error("Unknown tag code: {0}")]
    UnknownTag(String),

    /// A catalog snapshot could not be read or parsed.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// A storage failure propagated from a `CatalogStore` implementation.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_code_strips_non_alphanumerics() {
        assert_eq!(CourseCode::new("MSCI 211"), CourseCode::new("MSCI211"));
        assert_eq!(CourseCode::new("CS-137").as_str(), "CS137");
    }

    #[test]
    fn course_code_normalization_idempotent() {
        let once = CourseCode::new("MSCI 211");
        let twice = CourseCode::new(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn course_code_deserializes_normalized() {
        let code: CourseCode = serde_json::from_str("\"MSCI 211\"").expect("deserialize");
        assert_eq!(code.as_str(), "MSCI211");
    }

    #[test]
    fn term_tags_match_digit_letter_pattern() {
        assert!(TagCode::new("1A").is_term());
        assert!(TagCode::new("4B").is_term());
        assert!(!TagCode::new("TE").is_term());
        assert!(!TagCode::new("1a").is_term());
        assert!(!TagCode::new("10A").is_term());
    }

    #[test]
    fn milestone_set_is_exactly_four_codes() {
        for code in ["MLSTN", "PDENG", "WKRPT", "PD"] {
            assert!(TagCode::new(code).is_milestone(), "{code}");
        }
        // Work-term bookkeeping tags are not excluded from evaluation.
        assert!(!TagCode::new("WKTRM").is_milestone());
        assert!(!TagCode::new("WTREF").is_milestone());
        assert!(!TagCode::new("1A").is_milestone());
    }

    #[test]
    fn missing_list_serializes_total_to_complete_field() {
        let list = MissingList {
            list_name: TagCode::new("elective"),
            courses: BTreeMap::new(),
            total_to_complete: 2,
            tag: TagCode::new("elective"),
        };
        let json = serde_json::to_string(&list).expect("serialize");
        assert!(json.contains("\"totalToComplete\":2"));
    }
}
