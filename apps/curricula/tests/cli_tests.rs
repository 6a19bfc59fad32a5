//! Integration tests for the Curricula CLI binary.
//!
//! Each test drives the compiled binary against a temporary catalog
//! snapshot and asserts on its output.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// A trimmed management-engineering snapshot with one option.
const SAMPLE_CATALOG: &str = r#"{
    "degrees": [
        {"name": "management_engineering", "year": 2023, "term": "1A",
         "course_codes": "CS137, MATH115", "number_of_courses": 2},
        {"name": "management_engineering", "year": 2023, "term": "2B",
         "course_codes": "MSCI211", "number_of_courses": 1},
        {"name": "management_engineering", "year": 2023, "term": "TE",
         "course_codes": "MSCI331, MSCI332", "number_of_courses": 1},
        {"name": "management_engineering", "year": 2023, "term": "MLSTN",
         "course_codes": "WKRPT200", "number_of_courses": 1}
    ],
    "options": [
        {"name": "management_sciences_option", "year": 2023, "list_name": "elective",
         "course_codes": "MSCI211, MSCI311, MSCI442", "number_of_courses": 2}
    ],
    "courses": [
        {"course_code": "CS137", "course_name": "Programming Principles"},
        {"course_code": "MATH115", "course_name": "Linear Algebra for Engineering"},
        {"course_code": "MSCI 211", "course_name": "Organizational Behaviour",
         "min_level": "{2A,\"Level at least 2A\"}"},
        {"course_code": "MSCI 331", "course_name": "Operations Research"}
    ]
}"#;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn catalog_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CATALOG.as_bytes()).unwrap();
    file
}

fn curricula(catalog: &tempfile::NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("curricula").unwrap();
    cmd.arg("--quiet").arg("--catalog").arg(catalog.path());
    cmd
}

// =============================================================================
// DEGREES & REQS
// =============================================================================

#[test]
fn degrees_lists_catalog_programs() {
    let catalog = catalog_file();
    curricula(&catalog)
        .arg("degrees")
        .assert()
        .success()
        .stdout(predicate::str::contains("management_engineering"));
}

#[test]
fn no_subcommand_defaults_to_degrees() {
    let catalog = catalog_file();
    curricula(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Degree programs"));
}

#[test]
fn reqs_partitions_mandatory_and_pools() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args(["reqs", "-d", "management_engineering", "-y", "2023"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MSCI211")
                .and(predicate::str::contains("TE: 1 of [MSCI331, MSCI332]"))
                // Milestone rows never surface.
                .and(predicate::str::contains("WKRPT200").not()),
        );
}

// =============================================================================
// MISSING REQUIREMENTS
// =============================================================================

#[test]
fn missing_reports_outstanding_pool_courses() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args([
            "missing",
            "-d",
            "management_engineering",
            "-y",
            "2023",
            "-t",
            "CS137",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(MATH115)").and(predicate::str::contains("MSCI211")),
        );
}

#[test]
fn missing_json_mode_emits_report_fields() {
    let catalog = catalog_file();
    curricula(&catalog)
        .arg("--json-mode")
        .args([
            "missing",
            "-d",
            "management_engineering",
            "-y",
            "2023",
            "-t",
            "CS137,MATH115,MSCI211",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"number_of_mandatory_courses\": 2")
                .and(predicate::str::contains("\"mandatory_courses\": []")),
        );
}

#[test]
fn missing_year_falls_back_to_latest_snapshot() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args([
            "missing",
            "-d",
            "management_engineering",
            "-y",
            "2031",
            "-t",
            "CS137",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(MATH115)"));
}

#[test]
fn option_missing_marks_satisfied_and_skips_exempted() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args([
            "option-missing",
            "-o",
            "management_sciences_option",
            "-y",
            "2023",
            "-t",
            "MSCI211,MSCI442",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[x] MSCI211")
                .and(predicate::str::contains("[x] MSCI442"))
                // MSCI311 is exempted by MSCI211: neither satisfied nor missing.
                .and(predicate::str::contains("MSCI311").not()),
        );
}

// =============================================================================
// TAGS & SEARCH
// =============================================================================

#[test]
fn tags_prints_course_tag_index() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args(["tags", "-d", "management_engineering", "-y", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MSCI331: TE"));
}

#[test]
fn search_annotates_hits_with_tags() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args([
            "search",
            "MSCI211",
            "--degree",
            "management_engineering",
            "--year",
            "2023",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Organizational Behaviour")
                .and(predicate::str::contains("[2B]"))
                .and(predicate::str::contains("min level 2A")),
        );
}

#[test]
fn search_tag_filter_constrains_results() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args([
            "search",
            "--tag",
            "TE",
            "--degree",
            "management_engineering",
            "--year",
            "2023",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MSCI331")
                .and(predicate::str::contains("CS137").not()),
        );
}

// =============================================================================
// FAILURE MODES
// =============================================================================

#[test]
fn malformed_catalog_fails_loudly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let mut cmd = Command::cargo_bin("curricula").unwrap();
    cmd.arg("--quiet")
        .arg("--catalog")
        .arg(file.path())
        .arg("degrees")
        .assert()
        .failure();
}

#[test]
fn unknown_degree_reports_empty_not_error() {
    let catalog = catalog_file();
    curricula(&catalog)
        .args(["missing", "-d", "underwater_basketry", "-y", "2023", "-t", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Term-coded requirement rows: 0"));
}
