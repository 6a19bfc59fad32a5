//! # Tag Catalog
//!
//! Static mapping from short requirement/tag codes to descriptive metadata.
//!
//! The catalog is compiled into the binary and immutable at runtime, like
//! every published-curriculum constant. Lookup of an unrecognized code is a
//! hard error — a default tag would silently mislabel a course.

use crate::types::{CurriculaError, TagCode};
use serde::Serialize;

// =============================================================================
// TAG METADATA
// =============================================================================

/// Role a tag plays within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TagCategory {
    /// Numbered academic term ("1A".."4B"); mandatory-schedule requirement.
    Term,
    /// Technical-elective pool.
    TechnicalElective,
    /// Complementary/science/option elective pool.
    Elective,
    /// Named non-elective requirement (ethics, practice, ...).
    CoreRequirement,
    /// Milestone or work-term bookkeeping; not an academic requirement.
    Milestone,
}

/// Descriptive metadata for one tag code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// The short code as it appears in requirement rows.
    pub code: &'static str,
    /// The tag's role within a program.
    pub category: TagCategory,
    /// Compact display name.
    pub short_name: &'static str,
    /// Full display name; additional-requirement reports are keyed by this.
    pub long_name: &'static str,
}

/// One catalog entry, kept terse so the table below stays readable.
const fn tag(
    code: &'static str,
    category: TagCategory,
    short_name: &'static str,
    long_name: &'static str,
) -> TagInfo {
    TagInfo {
        code,
        category,
        short_name,
        long_name,
    }
}

/// Every tag code a published requirement row may carry.
///
/// Sorted by `code` byte order; `tag_info` binary-searches it.
const TAG_CATALOG: [TagInfo; 27] = [
    tag("1A", TagCategory::Term, "1A", "1A"),
    tag("1B", TagCategory::Term, "1B", "1B"),
    tag("2A", TagCategory::Term, "2A", "2A"),
    tag("2B", TagCategory::Term, "2B", "2B"),
    tag("3A", TagCategory::Term, "3A", "3A"),
    tag("3B", TagCategory::Term, "3B", "3B"),
    tag("4A", TagCategory::Term, "4A", "4A"),
    tag("4B", TagCategory::Term, "4B", "4B"),
    tag("ATE", TagCategory::TechnicalElective, "ATE", "ATE"),
    tag(
        "CSE",
        TagCategory::Elective,
        "CSE",
        "Complementary Studies Elective",
    ),
    tag("ELEC", TagCategory::Elective, "ELEC", "Elective"),
    tag("ETHICS", TagCategory::CoreRequirement, "ETHICS", "Ethics"),
    tag("LE", TagCategory::Elective, "LE", "Linkage Electives"),
    tag("MLSTN", TagCategory::Milestone, "MLSTN", "Milestone"),
    tag(
        "NSE",
        TagCategory::Elective,
        "NSE",
        "Natural Science Elective",
    ),
    tag(
        "PD",
        TagCategory::Milestone,
        "PD",
        "Professional Development",
    ),
    tag(
        "PDENG",
        TagCategory::Milestone,
        "PDENG",
        "Professional Development",
    ),
    tag("PRACTICE", TagCategory::CoreRequirement, "PRACTICE", "Practice"),
    tag("SCE", TagCategory::Elective, "SCE", "Science Elective"),
    tag("TE", TagCategory::TechnicalElective, "TE", "Technical Elective"),
    tag("WKRPT", TagCategory::Milestone, "WKRPT", "Work Report"),
    tag("WKTRM", TagCategory::Milestone, "WKTRM", "Work Term"),
    tag(
        "WTREF",
        TagCategory::Milestone,
        "WTREF",
        "Work Term Reflection",
    ),
    tag("elective", TagCategory::Elective, "elective", "Option Elective"),
    tag(
        "eng_econ",
        TagCategory::CoreRequirement,
        "eng_econ",
        "Engineering Economics",
    ),
    tag(
        "opti_1",
        TagCategory::CoreRequirement,
        "opti_1",
        "Optimization",
    ),
    tag(
        "organizational_studies",
        TagCategory::CoreRequirement,
        "organizational_studies",
        "Organizational Studies",
    ),
];

// =============================================================================
// LOOKUP
// =============================================================================

/// Look up catalog metadata for a tag code.
///
/// Returns `CurriculaError::UnknownTag` for codes outside the catalog.
pub fn tag_info(code: &str) -> Result<&'static TagInfo, CurriculaError> {
    TAG_CATALOG
        .binary_search_by(|entry| entry.code.cmp(code))
        .map(|idx| &TAG_CATALOG[idx])
        .map_err(|_| CurriculaError::UnknownTag(code.to_string()))
}

/// Long display name for a tag; additional-requirement reports key on this.
pub fn long_name(tag: &TagCode) -> Result<&'static str, CurriculaError> {
    Ok(tag_info(tag.as_str())?.long_name)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_by_code() {
        for pair in TAG_CATALOG.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} >= {}", pair[0].code, pair[1].code);
        }
    }

    #[test]
    fn known_tag_resolves() {
        let info = tag_info("CSE").expect("CSE is catalogued");
        assert_eq!(info.long_name, "Complementary Studies Elective");
        assert_eq!(info.category, TagCategory::Elective);
    }

    #[test]
    fn term_tags_categorized_as_terms() {
        for code in ["1A", "1B", "2A", "2B", "3A", "3B", "4A", "4B"] {
            let info = tag_info(code).expect("term tag is catalogued");
            assert_eq!(info.category, TagCategory::Term);
            assert_eq!(info.long_name, code);
        }
    }

    #[test]
    fn unknown_tag_is_an_error_not_a_default() {
        let err = tag_info("NOPE").expect_err("unknown tag must fail");
        assert!(matches!(err, CurriculaError::UnknownTag(code) if code == "NOPE"));
    }

    #[test]
    fn option_list_names_are_catalogued() {
        for code in ["elective", "organizational_studies", "eng_econ", "opti_1"] {
            assert!(tag_info(code).is_ok(), "{code}");
        }
    }

    #[test]
    fn long_name_follows_catalog() {
        let name = long_name(&TagCode::new("TE")).expect("TE is catalogued");
        assert_eq!(name, "Technical Elective");
    }
}
