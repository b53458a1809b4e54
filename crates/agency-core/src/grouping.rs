//! Partitioning of a fetched agency list by niche.
//!
//! The grouped view borrows from the source slice and is cheap to rebuild, so
//! callers recompute it on every render instead of caching it.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::agency::{AgencyRecord, RecordKey};

/// A record together with its fetch-order key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub key: RecordKey,
    pub record: &'a AgencyRecord,
}

impl Borrow<AgencyRecord> for Entry<'_> {
    fn borrow(&self) -> &AgencyRecord {
        self.record
    }
}

/// Records partitioned by niche.
///
/// Niches are kept in first-occurrence order and each group keeps the input
/// order of its members.
#[derive(Debug, Default)]
pub struct GroupedView<'a> {
    groups: Vec<(&'a str, Vec<Entry<'a>>)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> GroupedView<'a> {
    /// Niche keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|(niche, _)| *niche)
    }

    #[must_use]
    pub fn first_key(&self) -> Option<&'a str> {
        self.groups.first().map(|(niche, _)| *niche)
    }

    #[must_use]
    pub fn get(&self, niche: &str) -> Option<&[Entry<'a>]> {
        self.index
            .get(niche)
            .map(|&i| self.groups[i].1.as_slice())
    }

    #[must_use]
    pub fn contains(&self, niche: &str) -> bool {
        self.index.contains_key(niche)
    }

    /// Number of distinct niches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[Entry<'a>])> + '_ {
        self.groups
            .iter()
            .map(|(niche, entries)| (*niche, entries.as_slice()))
    }
}

/// Partitions `records` by their `niche` field.
///
/// Each record's [`RecordKey`] is its index in `records`.
#[must_use]
pub fn group_by_niche(records: &[AgencyRecord]) -> GroupedView<'_> {
    let mut view = GroupedView::default();
    for (i, record) in records.iter().enumerate() {
        let entry = Entry {
            key: RecordKey(i),
            record,
        };
        let niche = record.niche.as_str();
        if let Some(&slot) = view.index.get(niche) {
            view.groups[slot].1.push(entry);
        } else {
            view.index.insert(niche, view.groups.len());
            view.groups.push((niche, vec![entry]));
        }
    }
    view
}

#[cfg(test)]
#[path = "grouping_test.rs"]
mod tests;
