//! # Requirement Matching Engine
//!
//! Reconciles a student's completed-course list against a program's
//! requirement rows and reports what remains outstanding.
//!
//! ## Consumption model
//!
//! A taken course satisfies at most one requirement row. The engine threads
//! an explicit remaining-courses list through the rows in source order; a
//! matched course is removed from it and can never be counted again. The
//! caller's taken list is untouched.
//!
//! Within a pool row the remaining courses are scanned in REVERSE order — a
//! deliberate tie-break favoring later-listed completions when a course
//! could satisfy more than one pool.

use crate::substitution::SubstitutionTable;
use crate::tags;
use crate::types::{
    AdditionalReqCount, CourseCode, CurriculaError, MissingReport, RequirementRow,
};
use std::collections::BTreeSet;

/// Compute the missing-requirement report for a degree.
///
/// Rows are evaluated in source order. Milestone rows (MLSTN/PDENG/WKRPT/PD)
/// are skipped entirely; `number_of_mandatory_courses` counts term-coded
/// rows over the WHOLE set, before that filtering. The substitution table is
/// consulted whenever a pool course is consumed: every course the completed
/// one exempts drops out of the pool, so it is neither reported missing nor
/// allowed to absorb a second completion.
///
/// Returns `CurriculaError::UnknownTag` when a non-milestone row carries a
/// tag code outside the tag catalog.
pub fn compute_missing(
    rows: &[RequirementRow],
    taken: &[CourseCode],
    substitutions: &SubstitutionTable,
) -> Result<MissingReport, CurriculaError> {
    let mut report = MissingReport {
        number_of_mandatory_courses: rows.iter().filter(|row| row.tag.is_term()).count(),
        ..MissingReport::default()
    };

    let mut remaining: Vec<CourseCode> = taken.to_vec();

    for row in rows {
        if row.tag.is_milestone() {
            continue;
        }
        let info = tags::tag_info(row.tag.as_str())?;

        if row.courses.len() > 1 {
            evaluate_pool(row, info.long_name, substitutions, &mut remaining, &mut report);
        } else if let Some(course) = row.courses.first() {
            evaluate_single(row, course, info.long_name, &remaining, &mut report);
        }
    }

    Ok(report)
}

/// Evaluate one pool row against the remaining taken courses.
fn evaluate_pool(
    row: &RequirementRow,
    long_name: &str,
    substitutions: &SubstitutionTable,
    remaining: &mut Vec<CourseCode>,
    report: &mut MissingReport,
) {
    let mut pool: BTreeSet<CourseCode> = row.courses.iter().cloned().collect();
    let mut outstanding: Vec<CourseCode> = row.courses.clone();
    let mut satisfied: u32 = 0;

    // Reverse scan; removal by index keeps earlier entries stable.
    for idx in (0..remaining.len()).rev() {
        if !pool.contains(&remaining[idx]) {
            continue;
        }
        let hit = remaining.remove(idx);
        satisfied += 1;
        if row.tag.is_term() {
            outstanding.retain(|course| course != &hit);
        }
        for exempt in substitutions.exempted_by(&hit) {
            pool.remove(exempt);
            outstanding.retain(|course| course != exempt);
        }
    }

    if row.tag.is_term() {
        if satisfied < row.number_of_courses {
            let codes: Vec<&str> = outstanding.iter().map(CourseCode::as_str).collect();
            report
                .mandatory_courses
                .push(format!("({})", codes.join(", ")));
        }
    } else {
        let entry = report
            .additional_reqs
            .entry(long_name.to_string())
            .or_insert_with(|| AdditionalReqCount {
                completed: 0,
                total: 0,
                tag: row.tag.clone(),
            });
        entry.completed += satisfied;
        entry.total += row.number_of_courses;
    }
}

/// Evaluate one single-course row.
///
/// A present single is NOT consumed: the same completion may still satisfy
/// a later pool. Only absences are reported.
fn evaluate_single(
    row: &RequirementRow,
    course: &CourseCode,
    long_name: &str,
    remaining: &[CourseCode],
    report: &mut MissingReport,
) {
    if remaining.contains(course) {
        return;
    }
    if row.tag.is_term() {
        report.mandatory_courses.push(course.as_str().to_string());
    } else {
        report.additional_reqs.insert(
            long_name.to_string(),
            AdditionalReqCount {
                completed: 0,
                total: 1,
                tag: row.tag.clone(),
            },
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
