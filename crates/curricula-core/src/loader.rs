//! # Requirement Loader
//!
//! Resolves the requirement rows applicable to a (program, year) request and
//! normalizes them into mandatory singletons and named pools.
//!
//! ## Year resolution
//!
//! Exact-year rows win. When the requested year has no rows, the loader
//! silently falls back to the LATEST year published for that program — even
//! when the request sits between two published years (requesting 2016 with
//! 2015 and 2017 published returns 2017). That quirk ships in production
//! data consumers; `fallback_prefers_global_max_year` pins it so nobody
//! "fixes" it without a product decision.

use crate::store::CatalogStore;
use crate::types::{
    CurriculaError, DegreeRequirements, OptionRequirement, OptionRequirements, PoolRequirement,
    RequirementRow,
};

// =============================================================================
// YEAR RESOLUTION
// =============================================================================

/// Degree rows for (program, year), with the max-year fallback.
///
/// An unknown program resolves to the empty set, not an error.
pub fn resolve_degree_rows(
    store: &impl CatalogStore,
    program: &str,
    year: u16,
) -> Result<Vec<RequirementRow>, CurriculaError> {
    let rows = store.degree_rows(program, year)?;
    if !rows.is_empty() {
        return Ok(rows);
    }
    match store.max_degree_year(program)? {
        Some(latest) => store.degree_rows(program, latest),
        None => Ok(Vec::new()),
    }
}

/// Option rows for (option, year), with the max-year fallback.
pub fn resolve_option_rows(
    store: &impl CatalogStore,
    option: &str,
    year: u16,
) -> Result<Vec<RequirementRow>, CurriculaError> {
    let rows = store.option_rows(option, year)?;
    if !rows.is_empty() {
        return Ok(rows);
    }
    match store.max_option_year(option)? {
        Some(latest) => store.option_rows(option, latest),
        None => Ok(Vec::new()),
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Load and normalize the degree requirements for (program, year).
///
/// Milestone rows are dropped; a one-course row becomes a mandatory course;
/// a multi-course row becomes the named pool for its tag (last writer wins
/// when two rows share a tag).
pub fn load_degree_requirements(
    store: &impl CatalogStore,
    program: &str,
    year: u16,
) -> Result<DegreeRequirements, CurriculaError> {
    let rows = resolve_degree_rows(store, program, year)?;
    let mut requirements = DegreeRequirements::default();

    for row in rows {
        if row.tag.is_milestone() {
            continue;
        }
        let RequirementRow {
            tag,
            courses,
            number_of_courses,
        } = row;
        match courses.len() {
            0 => {}
            1 => requirements.mandatory_courses.extend(courses),
            _ => {
                requirements.additional_reqs.insert(
                    tag,
                    PoolRequirement {
                        courses,
                        number_of_courses,
                    },
                );
            }
        }
    }

    Ok(requirements)
}

/// Load the requirement lists for (option, year), in source order.
pub fn load_option_requirements(
    store: &impl CatalogStore,
    option: &str,
    year: u16,
) -> Result<OptionRequirements, CurriculaError> {
    let rows = resolve_option_rows(store, option, year)?;
    let requirements = rows
        .into_iter()
        .map(|row| OptionRequirement {
            name: row.tag,
            courses: row.courses,
            number_of_courses: row.number_of_courses,
        })
        .collect();

    Ok(OptionRequirements {
        option_name: option.to_string(),
        requirements,
    })
}

// =============================================================================
// TESTS
// =============================================================================
