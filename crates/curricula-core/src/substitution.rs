//! # Course Substitution Table
//!
//! Declarative course-equivalency rules consulted during matching.
//!
//! Completing a course can exempt a sibling course inside the same
//! requirement pool (the calendar's "may substitute for" clauses). The table
//! maps a completed course to the set of pool courses it exempts; the
//! matching passes consult it generically, so new equivalencies are data,
//! not code.

use crate::types::CourseCode;
use std::collections::{BTreeMap, BTreeSet};

/// Course-equivalency table: completed course -> courses it exempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    exemptions: BTreeMap<CourseCode, BTreeSet<CourseCode>>,
}

impl SubstitutionTable {
    /// Create an empty table (no equivalencies).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            exemptions: BTreeMap::new(),
        }
    }

    /// Register an equivalency: completing `taken` exempts `exempted`.
    #[must_use]
    pub fn with_exemption(
        mut self,
        taken: impl Into<CourseCode>,
        exempted: impl Into<CourseCode>,
    ) -> Self {
        self.exemptions
            .entry(taken.into())
            .or_default()
            .insert(exempted.into());
        self
    }

    /// Courses exempted by completing `taken`, in deterministic order.
    pub fn exempted_by(&self, taken: &CourseCode) -> impl Iterator<Item = &CourseCode> {
        self.exemptions.get(taken).into_iter().flatten()
    }

    /// Number of courses with at least one exemption rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exemptions.len()
    }

    /// Check whether the table has no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exemptions.is_empty()
    }
}

impl Default for SubstitutionTable {
    /// The published equivalency set: MSCI211 exempts MSCI311.
    fn default() -> Self {
        Self::empty().with_exemption("MSCI211", "MSCI311")
    }
}

// =============================================================================
// TESTS
// =============================================================================
