//! Duplicate stylesheet marking by content hash.
//!
//! Performance characteristics:
//! - Parallel SHA-256 hashing via Rayon
//! - Sequential O(|S|) first-seen pass so the earliest copy is always kept

use std::collections::HashSet;

use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::artifacts::StylesheetRecord;

/// SHA-256 of a stylesheet's content as lowercase hex.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Flags every stylesheet whose content appeared earlier in `styles`.
///
/// Existing flags are never cleared. Returns the number of newly flagged sheets.
pub fn mark_duplicate_stylesheets(styles: &mut [StylesheetRecord]) -> usize {
    let hashes: Vec<String> = styles.par_iter().map(|s| content_hash(&s.content)).collect();

    let mut seen = HashSet::with_capacity(hashes.len());
    let mut marked = 0;
    for (sheet, hash) in styles.iter_mut().zip(hashes) {
        if !seen.insert(hash) && !sheet.is_duplicate {
            sheet.is_duplicate = true;
            marked += 1;
        }
    }

    tracing::debug!(stylesheets = styles.len(), marked, "marked duplicate stylesheets");
    marked
}
