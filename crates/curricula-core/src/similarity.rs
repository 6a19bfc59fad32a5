//! # Trigram Similarity
//!
//! Integer trigram similarity for course search ranking.
//!
//! The catalog search ranks matches by how similar the query is to a course
//! code or name. Scores are integer permille (0..=1000) — no floating-point,
//! per the CORE determinism constraints. The floor of 190 keeps the same
//! cut-off the production data store used for its similarity operator.

use std::collections::BTreeSet;

/// Full-scale similarity score (identical strings).
pub const SIMILARITY_SCALE: u32 = 1000;

/// Minimum score for a fuzzy match to count as a search hit.
pub const SIMILARITY_FLOOR: u32 = 190;

/// Collect the padded word trigrams of a string, case-folded.
///
/// Each alphanumeric word is padded with two leading and one trailing
/// blank before windowing, so short words still contribute trigrams and
/// word boundaries weigh into the score.
fn trigrams(text: &str) -> BTreeSet<[char; 3]> {
    let mut grams = BTreeSet::new();
    let lowered = text.to_lowercase();

    for word in lowered.split(|c: char| !c.is_ascii_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let padded: Vec<char> = [' ', ' ']
            .into_iter()
            .chain(word.chars())
            .chain([' '])
            .collect();
        for window in padded.windows(3) {
            grams.insert([window[0], window[1], window[2]]);
        }
    }

    grams
}

/// Trigram similarity of two strings, in permille (0..=1000).
///
/// Shared trigrams over the union of both trigram sets. Symmetric, and
/// `similarity(a, a) == SIMILARITY_SCALE` for any non-degenerate `a`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> u32 {
    let ta = trigrams(a);
    let tb = trigrams(b);

    if ta.is_empty() && tb.is_empty() {
        return SIMILARITY_SCALE;
    }
    if ta.is_empty() || tb.is_empty() {
        return 0;
    }

    let shared = ta.intersection(&tb).count() as u32;
    let union = (ta.len() + tb.len()) as u32 - shared;

    shared * SIMILARITY_SCALE / union
}

/// Check whether two strings clear the fuzzy-match floor.
#[must_use]
pub fn is_similar(a: &str, b: &str) -> bool {
    similarity(a, b) >= SIMILARITY_FLOOR
}

// =============================================================================
// TESTS
// =============================================================================
