//! # Catalog Snapshot Loading
//!
//! Reads a JSON catalog snapshot (degree rows, option rows, course catalog)
//! from disk and builds the in-memory store the engine consumes.

use curricula_core::{CatalogSnapshot, CurriculaError, MemoryCatalog};
use std::path::Path;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum catalog snapshot size (50 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
pub const MAX_CATALOG_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CurriculaError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CurriculaError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CurriculaError::MalformedCatalog(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// LOADING
// =============================================================================

/// Load a catalog snapshot file into a `MemoryCatalog`.
pub fn load_catalog(path: &Path) -> Result<MemoryCatalog, CurriculaError> {
    validate_file_size(path, MAX_CATALOG_FILE_SIZE)?;

    let raw = std::fs::read_to_string(path).map_err(|e| {
        CurriculaError::Io(format!("Cannot read catalog '{}': {}", path.display(), e))
    })?;

    let snapshot: CatalogSnapshot = serde_json::from_str(&raw).map_err(|e| {
        CurriculaError::MalformedCatalog(format!(
            "Cannot parse catalog '{}': {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(
        degree_rows = snapshot.degrees.len(),
        option_rows = snapshot.options.len(),
        courses = snapshot.courses.len(),
        "catalog snapshot loaded"
    );

    Ok(MemoryCatalog::from_snapshot(snapshot))
}

// =============================================================================
// TESTS
// =============================================================================
