//! The persisted changelog document.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// A single accepted changelog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    #[serde(rename = "type")]
    pub category: Category,
    pub text: String,
}

impl ChangelogEntry {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// One release's worth of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogVersion {
    pub version: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub entries: Vec<ChangelogEntry>,
}

impl ChangelogVersion {
    /// Group entries by category.
    ///
    /// Feature, fix and performance come first in that order; the remaining
    /// categories follow in the order they first appear. Entries keep their
    /// insertion order within a group.
    pub fn entries_by_category(&self) -> Vec<(&Category, Vec<&ChangelogEntry>)> {
        let mut grouped: Vec<(&Category, Vec<&ChangelogEntry>)> = Vec::new();

        for entry in &self.entries {
            match grouped.iter_mut().find(|(cat, _)| **cat == entry.category) {
                Some((_, entries)) => entries.push(entry),
                None => grouped.push((&entry.category, vec![entry])),
            }
        }

        // Stable sort keeps first-seen order among the non-primary groups.
        grouped.sort_by_key(|(cat, _)| cat.primary_rank().unwrap_or(u8::MAX));
        grouped
    }

    /// Count entries per category for summary output.
    pub fn count_by_category(&self) -> Vec<(String, usize)> {
        self.entries_by_category()
            .into_iter()
            .map(|(cat, entries)| (cat.as_str().to_string(), entries.len()))
            .collect()
    }
}

/// Ordered list of versions, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangelogDocument {
    pub versions: Vec<ChangelogVersion>,
}

impl ChangelogDocument {
    pub fn new(versions: Vec<ChangelogVersion>) -> Self {
        Self { versions }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn get(&self, version: &str) -> Option<&ChangelogVersion> {
        self.versions.iter().find(|v| v.version == version)
    }
}
