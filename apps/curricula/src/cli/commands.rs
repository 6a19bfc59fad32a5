//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command loads the catalog snapshot, runs the corresponding
//! curricula-core operation, and prints the result as text or JSON.

use crate::catalog;
use curricula_core::loader::resolve_degree_rows;
use curricula_core::{
    CatalogStore, CourseCode, CurriculaError, PlanRef, SearchRequest, SubstitutionTable, TagCode,
    TagIndexCache, TagSource, compute_missing, find_missing_requirements,
    load_degree_requirements, load_option_requirements, search_courses, tag_index,
};
use std::path::Path;

/// Normalize a comma-split completed-course argument.
fn parse_taken(taken: &[String]) -> Vec<CourseCode> {
    taken
        .iter()
        .map(|raw| CourseCode::new(raw.as_str()))
        .filter(|code| !code.is_empty())
        .collect()
}

/// Pretty-print any serializable value as JSON.
fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// DEGREES COMMAND
// =============================================================================

/// List degree programs in the catalog.
pub fn cmd_degrees(catalog_path: &Path, json_mode: bool) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let names = store.degree_names()?;

    if json_mode {
        print_json(&names);
        return Ok(());
    }

    println!("Degree programs ({}):", names.len());
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

// =============================================================================
// REQS COMMAND
// =============================================================================

/// Show normalized requirements for a degree.
pub fn cmd_reqs(
    catalog_path: &Path,
    json_mode: bool,
    degree: &str,
    year: u16,
) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let requirements = load_degree_requirements(&store, degree, year)?;

    if json_mode {
        print_json(&requirements);
        return Ok(());
    }

    println!("Requirements for {} ({})", degree, year);
    println!();
    println!("Mandatory courses:");
    for course in &requirements.mandatory_courses {
        println!("  {}", course);
    }
    println!();
    println!("Additional requirements:");
    for (tag, pool) in &requirements.additional_reqs {
        let codes: Vec<&str> = pool.courses.iter().map(CourseCode::as_str).collect();
        println!("  {}: {} of [{}]", tag, pool.number_of_courses, codes.join(", "));
    }
    Ok(())
}

// =============================================================================
// MISSING COMMAND
// =============================================================================

/// Report missing degree requirements for completed courses.
pub fn cmd_missing(
    catalog_path: &Path,
    json_mode: bool,
    degree: &str,
    year: u16,
    taken: &[String],
) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let rows = resolve_degree_rows(&store, degree, year)?;
    let report = compute_missing(&rows, &parse_taken(taken), &SubstitutionTable::default())?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Missing requirements for {} ({})", degree, year);
    println!();
    println!("Term-coded requirement rows: {}", report.number_of_mandatory_courses);
    println!();
    if report.mandatory_courses.is_empty() {
        println!("All mandatory requirements satisfied");
    } else {
        println!("Missing mandatory requirements:");
        for missing in &report.mandatory_courses {
            println!("  {}", missing);
        }
    }
    println!();
    println!("Additional requirements:");
    for (name, count) in &report.additional_reqs {
        println!("  {}: {} / {}", name, count.completed, count.total);
    }
    Ok(())
}

// =============================================================================
// OPTION-MISSING COMMAND
// =============================================================================

/// Report missing option requirements for completed courses.
pub fn cmd_option_missing(
    catalog_path: &Path,
    json_mode: bool,
    option: &str,
    year: u16,
    taken: &[String],
) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let requirements = load_option_requirements(&store, option, year)?;
    let lists = find_missing_requirements(
        &parse_taken(taken),
        &requirements.requirements,
        &SubstitutionTable::default(),
    )?;

    if json_mode {
        print_json(&lists);
        return Ok(());
    }

    println!("Missing requirements for {} ({})", option, year);
    for list in &lists {
        println!();
        println!("{} (need {}):", list.list_name, list.total_to_complete);
        for (course, satisfied) in &list.courses {
            let mark = if *satisfied { "x" } else { " " };
            println!("  [{}] {}", mark, course);
        }
    }
    Ok(())
}

// =============================================================================
// TAGS COMMAND
// =============================================================================

/// Show the course -> tag index for a degree.
pub fn cmd_tags(
    catalog_path: &Path,
    json_mode: bool,
    degree: &str,
    year: u16,
) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let cache = TagIndexCache::new();
    let index = tag_index(&store, &cache, TagSource::Degree, degree, year)?;

    if json_mode {
        print_json(&index);
        return Ok(());
    }

    println!("Tag index for {} ({})", degree, year);
    for (course, tags) in &index {
        let codes: Vec<&str> = tags.iter().map(TagCode::as_str).collect();
        println!("  {}: {}", course, codes.join(", "));
    }
    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Search the course catalog, optionally constrained by tag.
pub fn cmd_search(
    catalog_path: &Path,
    json_mode: bool,
    query: &str,
    tag: Option<&str>,
    degree: Option<&str>,
    year: Option<u16>,
    option: Option<&str>,
    option_year: Option<u16>,
    offset: usize,
    limit: usize,
) -> Result<(), CurriculaError> {
    let store = catalog::load_catalog(catalog_path)?;
    let cache = TagIndexCache::new();

    let degree_plan = match (degree, year) {
        (Some(id), Some(year)) => Some(PlanRef::new(id, year)),
        _ => None,
    };
    let option_plan = match (option, option_year) {
        (Some(id), Some(year)) => Some(PlanRef::new(id, year)),
        _ => None,
    };

    let request = SearchRequest {
        text: query.to_string(),
        tag: tag.map(TagCode::new),
        degree: degree_plan,
        option: option_plan,
        offset,
        limit,
    };
    let results = search_courses(&store, &cache, &request)?;

    if json_mode {
        print_json(&results);
        return Ok(());
    }

    println!("{} result(s)", results.len());
    for result in &results {
        let tag_codes: Vec<&str> = result.tags.iter().map(|t| t.code).collect();
        let mut line = format!(
            "  {}  {}  [{}]",
            result.course.course_code,
            result.course.course_name,
            tag_codes.join(", ")
        );
        if !result.min_level.level.is_empty() {
            line.push_str(&format!("  (min level {})", result.min_level.level));
        }
        println!("{}", line);
    }
    Ok(())
}
