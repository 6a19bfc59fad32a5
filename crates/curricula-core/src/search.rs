//! # Course Search Facade
//!
//! Free-text course search, optionally constrained to a tag's course pool,
//! with results annotated by the tag aggregator.
//!
//! The facade owns none of the matching arithmetic: similarity ranking is
//! the store's contract (`store::rank_entries`) and tag sets come from the
//! aggregator. What lives here is the orchestration — tag-pool resolution,
//! pagination pass-through, annotation, and min-level parsing.

use crate::aggregator::{TagIndex, TagIndexCache, TagSource, merge_tag_indexes, tag_index};
use crate::store::{CatalogStore, SearchPredicate};
use crate::tags::{self, TagInfo};
use crate::types::{Course, CourseCode, CurriculaError, MinLevel, TagCode};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Min-level annotation format: `{3A,"Level at least 3A"}`.
static MIN_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\{([^,]+),"([^"]+)"\}$"#).expect("min-level pattern is valid"));

// =============================================================================
// REQUEST & RESULT TYPES
// =============================================================================

/// A (plan id, catalog year) pair naming a degree or option snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRef {
    /// Degree or option identifier.
    pub id: String,
    /// Catalog year.
    pub year: u16,
}

impl PlanRef {
    /// Create a plan reference.
    #[must_use]
    pub fn new(id: impl Into<String>, year: u16) -> Self {
        Self {
            id: id.into(),
            year,
        }
    }
}

/// Parameters for one catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query; internal whitespace is ignored.
    pub text: String,
    /// Exact-tag filter: restrict candidates to the tag's course pool.
    pub tag: Option<TagCode>,
    /// Degree snapshot used for tag filtering and annotation.
    pub degree: Option<PlanRef>,
    /// Option snapshot used for tag filtering and annotation.
    pub option: Option<PlanRef>,
    /// Number of ranked results to skip.
    pub offset: usize,
    /// Maximum number of results to return.
    pub limit: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            tag: None,
            degree: None,
            option: None,
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A search result: the course, its tag annotations, and its min-level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseWithTags {
    /// The course row.
    #[serde(flatten)]
    pub course: Course,
    /// Tags the course can satisfy in the requested plans.
    pub tags: Vec<TagInfo>,
    /// Parsed minimum-level annotation (empty when absent or malformed).
    pub min_level: MinLevel,
}

// =============================================================================
// SEARCH
// =============================================================================

/// Parse a raw min-level annotation, recovering malformed input as empty.
#[must_use]
pub fn parse_min_level(raw: Option<&str>) -> MinLevel {
    let Some(raw) = raw else {
        return MinLevel::default();
    };
    match MIN_LEVEL.captures(raw) {
        Some(caps) => MinLevel {
            level: caps[1].to_string(),
            description: caps[2].to_string(),
        },
        None => MinLevel::default(),
    }
}

/// Resolve a tag filter to its course pool.
///
/// Degree rows are consulted first; option rows only when the degree yields
/// nothing. Both lookups match the requested year exactly — tag filtering
/// has no year fallback.
fn resolve_tag_pool(
    store: &impl CatalogStore,
    tag: &TagCode,
    request: &SearchRequest,
) -> Result<BTreeSet<CourseCode>, CurriculaError> {
    tags::tag_info(tag.as_str())?;

    let mut pool = BTreeSet::new();
    if let Some(plan) = &request.degree {
        for row in store.degree_rows(&plan.id, plan.year)? {
            if &row.tag == tag {
                pool.extend(row.courses);
            }
        }
    }
    if pool.is_empty() {
        if let Some(plan) = &request.option {
            for row in store.option_rows(&plan.id, plan.year)? {
                if &row.tag == tag {
                    pool.extend(row.courses);
                }
            }
        }
    }
    Ok(pool)
}

/// Run a catalog search and annotate every hit with its tag set.
///
/// Courses outside the annotation index carry the ELEC tag. An unrecognized
/// tag filter is `CurriculaError::UnknownTag`.
pub fn search_courses(
    store: &impl CatalogStore,
    cache: &TagIndexCache,
    request: &SearchRequest,
) -> Result<Vec<CourseWithTags>, CurriculaError> {
    let text: String = request.text.chars().filter(|c| !c.is_whitespace()).collect();

    let restrict_to = match &request.tag {
        Some(tag) => Some(resolve_tag_pool(store, tag, request)?),
        None => None,
    };

    let predicate = SearchPredicate { text, restrict_to };
    let entries = store.course_catalog(&predicate, request.offset, request.limit)?;

    let mut index = TagIndex::new();
    if let Some(plan) = &request.degree {
        index = tag_index(store, cache, TagSource::Degree, &plan.id, plan.year)?;
    }
    if let Some(plan) = &request.option {
        let option_index = tag_index(store, cache, TagSource::Option, &plan.id, plan.year)?;
        index = merge_tag_indexes(index, option_index);
    }

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut annotations: Vec<TagInfo> = Vec::new();
        match index.get(&entry.course.course_code) {
            Some(tag_codes) if !tag_codes.is_empty() => {
                for code in tag_codes {
                    annotations.push(*tags::tag_info(code.as_str())?);
                }
            }
            _ => annotations.push(*tags::tag_info("ELEC")?),
        }

        results.push(CourseWithTags {
            min_level: parse_min_level(entry.min_level_raw.as_deref()),
            course: entry.course,
            tags: annotations,
        });
    }

    Ok(results)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        CatalogSnapshot, CourseRecord, DegreeRowRecord, MemoryCatalog, OptionRowRecord,
    };

    fn course(code: &str, name: &str, min_level: Option<&str>) -> CourseRecord {
        CourseRecord {
            course_code: code.to_string(),
            course_name: name.to_string(),
            description: String::new(),
            min_level: min_level.map(str::to_string),
        }
    }

    fn sample_store() -> MemoryCatalog {
        MemoryCatalog::from_snapshot(CatalogSnapshot {
            degrees: vec![
                DegreeRowRecord {
                    name: "management_engineering".to_string(),
                    year: 2023,
                    term: "1A".to_string(),
                    course_codes: "CHE102, MSCI100".to_string(),
                    number_of_courses: 2,
                },
                DegreeRowRecord {
                    name: "management_engineering".to_string(),
                    year: 2023,
                    term: "TE".to_string(),
                    course_codes: "MSCI331, MSCI442".to_string(),
                    number_of_courses: 1,
                },
            ],
            options: vec![OptionRowRecord {
                name: "management_sciences_option".to_string(),
                year: 2023,
                list_name: "elective".to_string(),
                course_codes: "MSCI331, MSCI211".to_string(),
                number_of_courses: 1,
            }],
            courses: vec![
                course("CHE102", "Chemistry for Engineers", None),
                course("MSCI 100", "Management Engineering Concepts", None),
                course("MSCI 211", "Organizational Behaviour", Some("{2A,\"Level at least 2A\"}")),
                course("MSCI 331", "Operations Research", Some("not-an-annotation")),
                course("MSCI 442", "Impact of Information Systems", None),
                course("PSYCH101", "Introduction to Psychology", None),
            ],
        })
    }

    fn degree_request() -> SearchRequest {
        SearchRequest {
            degree: Some(PlanRef::new("management_engineering", 2023)),
            ..SearchRequest::default()
        }
    }

    #[test]
    fn results_are_annotated_from_degree_index() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            text: "MSCI100".to_string(),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        assert!(!results.is_empty());
        assert_eq!(results[0].course.course_code, CourseCode::new("MSCI100"));
        assert_eq!(results[0].tags[0].code, "1A");
    }

    #[test]
    fn unindexed_course_defaults_to_elec() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            text: "PSYCH101".to_string(),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        assert_eq!(results[0].course.course_code, CourseCode::new("PSYCH101"));
        assert_eq!(results[0].tags.len(), 1);
        assert_eq!(results[0].tags[0].code, "ELEC");
    }

    #[test]
    fn whitespace_in_query_is_ignored() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            text: "MSCI 211".to_string(),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        assert_eq!(results[0].course.course_code, CourseCode::new("MSCI211"));
    }

    #[test]
    fn tag_filter_constrains_to_pool() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            tag: Some(TagCode::new("TE")),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        let hit_codes: Vec<&str> = results
            .iter()
            .map(|r| r.course.course_code.as_str())
            .collect();
        assert_eq!(hit_codes, vec!["MSCI331", "MSCI442"]);
    }

    #[test]
    fn tag_filter_falls_through_to_option_rows() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            tag: Some(TagCode::new("elective")),
            option: Some(PlanRef::new("management_sciences_option", 2023)),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        let hit_codes: Vec<&str> = results
            .iter()
            .map(|r| r.course.course_code.as_str())
            .collect();
        assert_eq!(hit_codes, vec!["MSCI211", "MSCI331"]);
    }

    #[test]
    fn degree_and_option_annotations_union() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            text: "MSCI331".to_string(),
            option: Some(PlanRef::new("management_sciences_option", 2023)),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        let codes: Vec<&str> = results[0].tags.iter().map(|t| t.code).collect();
        assert_eq!(codes, vec!["TE", "elective"]);
    }

    #[test]
    fn min_level_parses_and_recovers() {
        assert_eq!(
            parse_min_level(Some("{2A,\"Level at least 2A\"}")),
            MinLevel {
                level: "2A".to_string(),
                description: "Level at least 2A".to_string(),
            }
        );
        assert_eq!(parse_min_level(Some("not-an-annotation")), MinLevel::default());
        assert_eq!(parse_min_level(None), MinLevel::default());
    }

    #[test]
    fn malformed_min_level_in_store_comes_back_empty() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            text: "MSCI331".to_string(),
            ..degree_request()
        };

        let results = search_courses(&store, &cache, &request).expect("search");
        assert_eq!(results[0].min_level, MinLevel::default());
    }

    #[test]
    fn unknown_tag_filter_is_a_hard_error() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let request = SearchRequest {
            tag: Some(TagCode::new("NOPE")),
            ..degree_request()
        };

        let err = search_courses(&store, &cache, &request).expect_err("must fail");
        assert!(matches!(err, CurriculaError::UnknownTag(code) if code == "NOPE"));
    }

    #[test]
    fn pagination_passes_through() {
        let store = sample_store();
        let cache = TagIndexCache::new();
        let all = search_courses(&store, &cache, &SearchRequest::default()).expect("search");
        assert_eq!(all.len(), 6);

        let page = search_courses(
            &store,
            &cache,
            &SearchRequest {
                offset: 2,
                limit: 2,
                ..SearchRequest::default()
            },
        )
        .expect("search");
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].course, all[2].course);
    }
}
