//! # Option Requirement Matcher
//!
//! Matches a completed-course list against an option's requirement lists
//! and reports, per list, which pool courses are satisfied.
//!
//! Lists are processed in source order and share one remaining-courses
//! accumulator: a completion consumed by an earlier list is gone. When the
//! same course appears in several pools the EARLIEST-processed list wins;
//! later lists skip the course entirely (absent from their maps, not marked
//! `false`).

use crate::substitution::SubstitutionTable;
use crate::tags;
use crate::types::{CourseCode, CurriculaError, MissingList, OptionRequirement};
use std::collections::{BTreeMap, BTreeSet};

/// Check whether an earlier-processed list already recorded this course as
/// satisfied.
fn satisfied_earlier(lists: &[MissingList], course: &CourseCode) -> bool {
    lists
        .iter()
        .any(|list| list.courses.get(course) == Some(&true))
}

/// Match the taken courses against each requirement list in order.
///
/// Per pool course: skip when an earlier list consumed it; otherwise mark
/// `true`/`false` by membership in the remaining completions. A `true` mark
/// consumes the completion (single consumption) and applies the
/// substitution table to the rest of this pool — exempted siblings are
/// skipped outright, never reported missing.
///
/// Returns `CurriculaError::UnknownTag` when a list name is not a
/// catalogued tag code.
pub fn find_missing_requirements(
    taken: &[CourseCode],
    requirements: &[OptionRequirement],
    substitutions: &SubstitutionTable,
) -> Result<Vec<MissingList>, CurriculaError> {
    let mut remaining: Vec<CourseCode> = taken.to_vec();
    let mut lists: Vec<MissingList> = Vec::new();

    for requirement in requirements {
        tags::tag_info(requirement.name.as_str())?;

        let mut courses: BTreeMap<CourseCode, bool> = BTreeMap::new();
        let mut exempted: BTreeSet<CourseCode> = BTreeSet::new();

        for course in &requirement.courses {
            if exempted.contains(course) || satisfied_earlier(&lists, course) {
                continue;
            }

            let position = remaining.iter().position(|c| c == course);
            courses.insert(course.clone(), position.is_some());

            if let Some(idx) = position {
                remaining.remove(idx);
                for exempt in substitutions.exempted_by(course) {
                    exempted.insert(exempt.clone());
                }
            }
        }

        lists.push(MissingList {
            list_name: requirement.name.clone(),
            courses,
            total_to_complete: requirement.number_of_courses,
            tag: requirement.name.clone(),
        });
    }

    Ok(lists)
}

// =============================================================================
// TESTS
// =============================================================================
