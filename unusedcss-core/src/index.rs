//! Stylesheet indexing.
//!
//! Builds the per-stylesheet aggregation state and attaches the matching
//! network transfer record by URL.
//!
//! Performance characteristics:
//! - Transfer lookup: O(|N|) build, O(1) per stylesheet
//! - Index build: O(|S|)

use std::collections::HashMap;

use crate::artifacts::{NetworkTransferRecord, StylesheetRecord, UsageEntry};

/// Aggregation state for one stylesheet.
///
/// Only `used` and `unused` change after indexing, and only through
/// [`crate::usage::count_unused_rules`].
#[derive(Debug, Clone)]
pub struct IndexedStylesheetInfo<'a> {
    pub stylesheet: &'a StylesheetRecord,
    /// Transfer record whose URL matches the stylesheet's source URL
    pub network_record: Option<&'a NetworkTransferRecord>,
    pub used: Vec<&'a UsageEntry>,
    pub unused: Vec<&'a UsageEntry>,
}

impl<'a> IndexedStylesheetInfo<'a> {
    fn new(
        stylesheet: &'a StylesheetRecord,
        network_record: Option<&'a NetworkTransferRecord>,
    ) -> Self {
        Self {
            stylesheet,
            network_record,
            used: Vec::new(),
            unused: Vec::new(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.stylesheet.is_duplicate
    }

    /// Number of usage entries attributed to this sheet.
    pub fn rule_count(&self) -> usize {
        self.used.len() + self.unused.len()
    }
}

/// Stylesheets keyed by identity, iterated in first-seen order.
#[derive(Debug, Default)]
pub struct StylesheetIndex<'a> {
    sheets: Vec<IndexedStylesheetInfo<'a>>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> StylesheetIndex<'a> {
    /// Insert a sheet; an identity seen before is replaced in its first slot.
    fn insert(&mut self, info: IndexedStylesheetInfo<'a>) {
        let id = info.stylesheet.id.as_str();
        match self.by_id.get(id) {
            Some(&slot) => self.sheets[slot] = info,
            None => {
                self.by_id.insert(id, self.sheets.len());
                self.sheets.push(info);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&IndexedStylesheetInfo<'a>> {
        self.by_id.get(id).map(|&slot| &self.sheets[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut IndexedStylesheetInfo<'a>> {
        self.by_id.get(id).and_then(|&slot| self.sheets.get_mut(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedStylesheetInfo<'a>> {
        self.sheets.iter()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Maps stylesheet URLs to their transfer records.
///
/// Only stylesheet-typed records participate; a later record wins on URL collision.
pub fn index_network_records(
    network_records: &[NetworkTransferRecord],
) -> HashMap<&str, &NetworkTransferRecord> {
    network_records
        .iter()
        .filter(|record| record.is_stylesheet())
        .fold(HashMap::new(), |mut map, record| {
            map.insert(record.url.as_str(), record);
            map
        })
}

/// Builds the identity → stylesheet info index.
pub fn index_stylesheets<'a>(
    styles: &'a [StylesheetRecord],
    network_records: &'a [NetworkTransferRecord],
) -> StylesheetIndex<'a> {
    let by_url = index_network_records(network_records);

    let index = styles
        .iter()
        .fold(StylesheetIndex::default(), |mut index, sheet| {
            let network_record = sheet
                .source_url
                .as_deref()
                .and_then(|url| by_url.get(url).copied());
            index.insert(IndexedStylesheetInfo::new(sheet, network_record));
            index
        });

    tracing::debug!(
        stylesheets = index.len(),
        stylesheet_transfers = by_url.len(),
        "indexed stylesheets"
    );
    index
}
