//! Title-based duplicate resolution.
//!
//! An article published online ahead of print shows up in the export twice:
//! once as `Article; Early Access` and once as the final `Article`. Both share
//! the same title, so records are grouped by exact title and only the first
//! one encountered is kept.
//!
//! ## Usage
//!
//! ```rust
//! use pubprofiler::Record;
//! use pubprofiler::dedupe::TitleDeduplicator;
//!
//! let records = vec![
//!     Record {
//!         title: "Bar".to_string(),
//!         document_type: "Article".to_string(),
//!         ..Default::default()
//!     },
//!     Record {
//!         title: "Bar".to_string(),
//!         document_type: "Article; Early Access".to_string(),
//!         ..Default::default()
//!     },
//! ];
//!
//! let outcome = TitleDeduplicator::new().dedupe(records);
//! assert_eq!(outcome.unique.len(), 1);
//! assert_eq!(outcome.unique[0].document_type, "Article");
//! assert_eq!(outcome.duplicates[0].duplicates.len(), 1);
//! ```
//!
//! ## Empty titles
//!
//! Records without a title cannot be told apart by title. By default they are
//! all kept ([`EmptyTitlePolicy::Exempt`]); [`EmptyTitlePolicy::Collapse`]
//! instead treats them as one group and keeps only the first.

use crate::Record;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// How records with an empty title are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyTitlePolicy {
    /// Never treat untitled records as duplicates of each other
    #[default]
    Exempt,
    /// Treat all untitled records as one group
    Collapse,
}

/// Configuration options for the deduplicator.
#[derive(Debug, Default, Clone)]
pub struct DeduplicatorConfig {
    pub empty_titles: EmptyTitlePolicy,
}

/// A record kept by deduplication together with the records discarded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    /// The first record seen with this title
    pub unique: Record,
    /// Later records with the same title, in input order
    pub duplicates: Vec<Record>,
}

/// Result of a deduplication pass.
#[derive(Debug, Clone, Default)]
pub struct DedupeOutcome {
    /// One record per title, in input order
    pub unique: Vec<Record>,
    /// Every title that occurred more than once, in order of first occurrence
    pub duplicates: Vec<DuplicateGroup>,
}

impl DedupeOutcome {
    /// Number of records discarded.
    pub fn removed_count(&self) -> usize {
        self.duplicates.iter().map(|g| g.duplicates.len()).sum()
    }
}

/// Keeps the first record for each distinct title.
#[derive(Debug, Default, Clone)]
pub struct TitleDeduplicator {
    config: DeduplicatorConfig,
}

impl TitleDeduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: DeduplicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Drop every record whose title was already seen.
    ///
    /// Titles are compared exactly, without case folding or trimming.
    pub fn dedupe(&self, records: Vec<Record>) -> DedupeOutcome {
        let mut unique = Vec::with_capacity(records.len());
        // title -> (index into `unique`, discarded records)
        let mut seen: HashMap<String, (usize, Vec<Record>)> = HashMap::new();
        let mut first_seen_order = Vec::new();

        for record in records {
            if record.title.is_empty() && self.config.empty_titles == EmptyTitlePolicy::Exempt {
                unique.push(record);
                continue;
            }

            match seen.entry(record.title.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().1.push(record),
                Entry::Vacant(entry) => {
                    first_seen_order.push(record.title.clone());
                    entry.insert((unique.len(), Vec::new()));
                    unique.push(record);
                }
            }
        }

        let duplicates = first_seen_order
            .into_iter()
            .filter_map(|title| seen.remove(&title))
            .filter(|(_, dropped)| !dropped.is_empty())
            .map(|(index, dropped)| DuplicateGroup {
                unique: unique[index].clone(),
                duplicates: dropped,
            })
            .collect();

        DedupeOutcome { unique, duplicates }
    }
}
