//! # Catalog Store
//!
//! The persistence seam between the engine and whatever holds the published
//! curriculum data.
//!
//! The engine never talks to a database; it consumes requirement rows and
//! course rows through the `CatalogStore` trait. `MemoryCatalog` is the
//! in-memory implementation, built from a serde-deserializable snapshot of
//! the three source tables (degree rows, option rows, course catalog).

use crate::similarity::{is_similar, similarity};
use crate::types::{Course, CourseCode, CurriculaError, RequirementRow, TagCode};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// SEARCH PREDICATE
// =============================================================================

/// Free-text search constraint handed to `CatalogStore::course_catalog`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPredicate {
    /// Query text, whitespace already stripped by the facade.
    pub text: String,
    /// When present, only these courses are candidates (tag filtering).
    pub restrict_to: Option<BTreeSet<CourseCode>>,
}

impl SearchPredicate {
    /// Predicate matching everything (empty query, no restriction).
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Check a course row against the predicate.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(pool) = &self.restrict_to {
            if !pool.contains(&course.course_code) {
                return false;
            }
        }
        if self.text.is_empty() {
            return true;
        }

        let needle = self.text.to_lowercase();
        course.course_code.as_str().to_lowercase().contains(&needle)
            || course.course_name.to_lowercase().contains(&needle)
            || is_similar(course.course_code.as_str(), &self.text)
            || is_similar(&course.course_name, &self.text)
    }
}

/// One course-catalog result row: the course plus its raw min-level
/// annotation (unparsed; the facade turns it into a `MinLevel`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The course row.
    pub course: Course,
    /// Raw min-level annotation, e.g. `{3A,"Level at least 3A"}`.
    pub min_level_raw: Option<String>,
}

/// Catalog search ranking: code similarity desc, code asc, name similarity
/// desc, name asc. Every `CatalogStore` implementation must honor it.
#[must_use]
pub fn rank_entries(query: &str, a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    let code_sim_a = similarity(a.course.course_code.as_str(), query);
    let code_sim_b = similarity(b.course.course_code.as_str(), query);

    code_sim_b
        .cmp(&code_sim_a)
        .then_with(|| a.course.course_code.cmp(&b.course.course_code))
        .then_with(|| {
            let name_sim_a = similarity(&a.course.course_name, query);
            let name_sim_b = similarity(&b.course.course_name, query);
            name_sim_b.cmp(&name_sim_a)
        })
        .then_with(|| a.course.course_name.cmp(&b.course.course_name))
}

// =============================================================================
// CATALOGSTORE TRAIT
// =============================================================================

/// External persistence collaborator supplying raw curriculum data.
///
/// All methods return `Result` so disk- or network-backed implementations
/// can surface storage failures uniformly; expected data gaps (unknown
/// name, absent year) are empty results, not errors.
pub trait CatalogStore {
    /// Requirement rows published for a degree program in a given year.
    fn degree_rows(&self, program: &str, year: u16) -> Result<Vec<RequirementRow>, CurriculaError>;

    /// Requirement rows published for an option in a given year.
    fn option_rows(&self, option: &str, year: u16) -> Result<Vec<RequirementRow>, CurriculaError>;

    /// Latest year with published rows for a degree program.
    fn max_degree_year(&self, program: &str) -> Result<Option<u16>, CurriculaError>;

    /// Latest year with published rows for an option.
    fn max_option_year(&self, option: &str) -> Result<Option<u16>, CurriculaError>;

    /// Distinct degree program identifiers, sorted.
    fn degree_names(&self) -> Result<Vec<String>, CurriculaError>;

    /// Ranked, paginated course-catalog query.
    ///
    /// Results are ordered per `rank_entries` before offset/limit apply.
    fn course_catalog(
        &self,
        predicate: &SearchPredicate,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>, CurriculaError>;
}

// =============================================================================
// SNAPSHOT RECORDS
// =============================================================================

/// One degree requirement row as published (comma-delimited course column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeRowRecord {
    /// Degree program identifier.
    pub name: String,
    /// Catalog year the row was published for.
    pub year: u16,
    /// Term or category tag ("1A", "TE", "MLSTN", ...).
    pub term: String,
    /// Comma-delimited course codes.
    pub course_codes: String,
    /// Number of courses required from the pool.
    pub number_of_courses: u32,
}

/// One option requirement row as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRowRecord {
    /// Option identifier.
    pub name: String,
    /// Catalog year the row was published for.
    pub year: u16,
    /// Requirement-list name ("elective", "eng_econ", ...).
    pub list_name: String,
    /// Comma-delimited course codes.
    pub course_codes: String,
    /// Number of courses required from the pool.
    pub number_of_courses: u32,
}

/// One course-catalog row as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course code (spacing tolerated; normalized on load).
    pub course_code: String,
    /// Display name.
    pub course_name: String,
    /// Calendar description.
    #[serde(default)]
    pub description: String,
    /// Raw min-level annotation, when one exists.
    #[serde(default)]
    pub min_level: Option<String>,
}

/// A full catalog snapshot: the three source tables in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogSnapshot {
    /// Degree requirement rows.
    #[serde(default)]
    pub degrees: Vec<DegreeRowRecord>,
    /// Option requirement rows.
    #[serde(default)]
    pub options: Vec<OptionRowRecord>,
    /// Course catalog rows.
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

/// Split a comma-delimited course column into normalized codes.
///
/// Blank segments (trailing commas, double commas) are dropped.
fn split_course_column(column: &str) -> Vec<CourseCode> {
    column
        .split(',')
        .map(CourseCode::new)
        .filter(|code| !code.is_empty())
        .collect()
}

// =============================================================================
// MEMORY CATALOG
// =============================================================================

/// In-memory `CatalogStore` backed by `BTreeMap`s.
///
/// Deterministic iteration order throughout; suitable for tests and for the
/// CLI's snapshot-file workflow.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    degree_rows: BTreeMap<(String, u16), Vec<RequirementRow>>,
    option_rows: BTreeMap<(String, u16), Vec<RequirementRow>>,
    courses: Vec<CatalogEntry>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a deserialized snapshot.
    ///
    /// Comma-delimited course columns are split and normalized here, so
    /// every `RequirementRow` the store hands out carries canonical codes.
    #[must_use]
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut catalog = Self::new();

        for record in snapshot.degrees {
            let row = RequirementRow::new(
                TagCode::new(record.term),
                split_course_column(&record.course_codes),
                record.number_of_courses,
            );
            catalog
                .degree_rows
                .entry((record.name, record.year))
                .or_default()
                .push(row);
        }

        for record in snapshot.options {
            let row = RequirementRow::new(
                TagCode::new(record.list_name),
                split_course_column(&record.course_codes),
                record.number_of_courses,
            );
            catalog
                .option_rows
                .entry((record.name, record.year))
                .or_default()
                .push(row);
        }

        for record in snapshot.courses {
            catalog.courses.push(CatalogEntry {
                course: Course {
                    course_code: CourseCode::new(record.course_code),
                    course_name: record.course_name,
                    description: record.description,
                },
                min_level_raw: record.min_level,
            });
        }

        catalog
    }

    fn rows_for<'a>(
        map: &'a BTreeMap<(String, u16), Vec<RequirementRow>>,
        name: &str,
        year: u16,
    ) -> Vec<RequirementRow> {
        map.get(&(name.to_string(), year)).cloned().unwrap_or_default()
    }

    fn max_year_for(map: &BTreeMap<(String, u16), Vec<RequirementRow>>, name: &str) -> Option<u16> {
        map.keys()
            .filter(|(n, _)| n == name)
            .map(|(_, year)| *year)
            .max()
    }
}

impl CatalogStore for MemoryCatalog {
    fn degree_rows(&self, program: &str, year: u16) -> Result<Vec<RequirementRow>, CurriculaError> {
        Ok(Self::rows_for(&self.degree_rows, program, year))
    }

    fn option_rows(&self, option: &str, year: u16) -> Result<Vec<RequirementRow>, CurriculaError> {
        Ok(Self::rows_for(&self.option_rows, option, year))
    }

    fn max_degree_year(&self, program: &str) -> Result<Option<u16>, CurriculaError> {
        Ok(Self::max_year_for(&self.degree_rows, program))
    }

    fn max_option_year(&self, option: &str) -> Result<Option<u16>, CurriculaError> {
        Ok(Self::max_year_for(&self.option_rows, option))
    }

    fn degree_names(&self) -> Result<Vec<String>, CurriculaError> {
        let names: BTreeSet<String> = self.degree_rows.keys().map(|(n, _)| n.clone()).collect();
        Ok(names.into_iter().collect())
    }

    fn course_catalog(
        &self,
        predicate: &SearchPredicate,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>, CurriculaError> {
        let mut hits: Vec<CatalogEntry> = self
            .courses
            .iter()
            .filter(|entry| predicate.matches(&entry.course))
            .cloned()
            .collect();

        hits.sort_by(|a, b| rank_entries(&predicate.text, a, b));

        Ok(hits.into_iter().skip(offset).take(limit).collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, name: &str) -> CourseRecord {
        CourseRecord {
            course_code: code.to_string(),
            course_name: name.to_string(),
            description: String::new(),
            min_level: None,
        }
    }

    fn sample_catalog() -> MemoryCatalog {
        MemoryCatalog::from_snapshot(CatalogSnapshot {
            degrees: vec![
                DegreeRowRecord {
                    name: "management_engineering".to_string(),
                    year: 2023,
                    term: "1A".to_string(),
                    course_codes: "CHE102, MSCI 100, MATH115".to_string(),
                    number_of_courses: 3,
                },
                DegreeRowRecord {
                    name: "management_engineering".to_string(),
                    year: 2021,
                    term: "1A".to_string(),
                    course_codes: "CHE102".to_string(),
                    number_of_courses: 1,
                },
            ],
            options: vec![OptionRowRecord {
                name: "management_sciences_option".to_string(),
                year: 2023,
                list_name: "elective".to_string(),
                course_codes: "MSCI211,MSCI311,".to_string(),
                number_of_courses: 2,
            }],
            courses: vec![
                course("MSCI 211", "Organizational Behaviour"),
                course("MSCI 311", "Organizational Design"),
                course("CHE102", "Chemistry for Engineers"),
            ],
        })
    }

    #[test]
    fn snapshot_rows_are_split_and_normalized() {
        let catalog = sample_catalog();
        let rows = catalog
            .degree_rows("management_engineering", 2023)
            .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].courses,
            vec![
                CourseCode::new("CHE102"),
                CourseCode::new("MSCI100"),
                CourseCode::new("MATH115"),
            ]
        );
    }

    #[test]
    fn trailing_commas_drop_blank_codes() {
        let catalog = sample_catalog();
        let rows = catalog
            .option_rows("management_sciences_option", 2023)
            .expect("rows");
        assert_eq!(rows[0].courses.len(), 2);
    }

    #[test]
    fn unknown_program_yields_empty_not_error() {
        let catalog = sample_catalog();
        assert!(catalog.degree_rows("underwater_basketry", 2023).expect("rows").is_empty());
        assert_eq!(catalog.max_degree_year("underwater_basketry").expect("year"), None);
    }

    #[test]
    fn max_year_spans_all_published_years() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.max_degree_year("management_engineering").expect("year"),
            Some(2023)
        );
    }

    #[test]
    fn degree_names_are_distinct_and_sorted() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.degree_names().expect("names"),
            vec!["management_engineering".to_string()]
        );
    }

    #[test]
    fn catalog_query_ranks_code_hits_first() {
        let catalog = sample_catalog();
        let predicate = SearchPredicate {
            text: "MSCI211".to_string(),
            restrict_to: None,
        };
        let hits = catalog.course_catalog(&predicate, 0, 20).expect("hits");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].course.course_code, CourseCode::new("MSCI211"));
    }

    #[test]
    fn catalog_query_paginates() {
        let catalog = sample_catalog();
        let all = catalog
            .course_catalog(&SearchPredicate::any(), 0, 20)
            .expect("hits");
        assert_eq!(all.len(), 3);

        let page = catalog
            .course_catalog(&SearchPredicate::any(), 1, 1)
            .expect("hits");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0], all[1]);
    }

    #[test]
    fn restriction_limits_candidates() {
        let catalog = sample_catalog();
        let predicate = SearchPredicate {
            text: String::new(),
            restrict_to: Some(BTreeSet::from([CourseCode::new("CHE102")])),
        };
        let hits = catalog.course_catalog(&predicate, 0, 20).expect("hits");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course.course_code, CourseCode::new("CHE102"));
    }
}
