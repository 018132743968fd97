//! Usage aggregation.
//!
//! Attributes every coverage entry to its stylesheet's used or unused list.
//! Entries for unknown or duplicate stylesheets are skipped.

use crate::artifacts::UsageEntry;
use crate::index::StylesheetIndex;

/// Walks `css_usage` once, filling the index, and returns the unused total.
pub fn count_unused_rules<'a>(
    css_usage: &'a [UsageEntry],
    index: &mut StylesheetIndex<'a>,
) -> usize {
    let mut unused = 0;
    let mut skipped = 0;

    for entry in css_usage {
        let info = match index.get_mut(&entry.stylesheet_id) {
            Some(info) if !info.is_duplicate() => info,
            _ => {
                tracing::trace!(stylesheet_id = %entry.stylesheet_id, "skipping usage entry");
                skipped += 1;
                continue;
            }
        };

        if entry.used {
            info.used.push(entry);
        } else {
            info.unused.push(entry);
            unused += 1;
        }
    }

    tracing::debug!(
        entries = css_usage.len(),
        unused,
        skipped,
        "aggregated rule usage"
    );
    unused
}
