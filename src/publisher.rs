//! Publisher name normalization.
//!
//! Web of Science exports publisher names exactly as each journal reports
//! them, so one publisher appears under many spellings ("ELSEVIER",
//! "ELSEVIER SCIENCE INC", "PERGAMON-ELSEVIER SCIENCE LTD", ...). A maintained
//! lookup table maps each exported name (`PU`) to a canonical display name
//! (`PU_cleaned`).
//!
//! The lookup table is a comma-separated file with a header row:
//!
//! ```text
//! PU,PU_cleaned
//! ELSEVIER SCIENCE INC,Elsevier
//! WILEY,Wiley
//! ```
//!
//! The join keeps every record. Records whose publisher is missing from the
//! table keep no canonical name; [`PublisherLookup::unmapped_codes`] lists
//! them so the table can be extended.

use crate::{ProfilerError, Record, Result};
use compact_str::CompactString;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One row of the lookup file.
#[derive(Debug, Deserialize)]
struct LookupRow {
    #[serde(rename = "PU")]
    code: CompactString,
    #[serde(rename = "PU_cleaned")]
    canonical: Option<CompactString>,
}

/// Immutable mapping from exported publisher name to canonical name.
#[derive(Debug, Clone, Default)]
pub struct PublisherLookup {
    entries: HashMap<CompactString, CompactString>,
}

impl PublisherLookup {
    /// Load the lookup table from a file.
    ///
    /// # Errors
    ///
    /// Returns `ProfilerError::LookupUnavailable` if the file cannot be opened,
    /// and `ProfilerError::InvalidFormat` if it is not a `PU,PU_cleaned` table.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ProfilerError::LookupUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let lookup = Self::from_reader(file)?;
        debug!(path = %path.display(), entries = lookup.len(), "Loaded publisher lookup");
        Ok(lookup)
    }

    /// Load the lookup table from any reader.
    ///
    /// Rows with an empty code or canonical name are skipped. If a code is
    /// listed twice, the first row wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in reader.deserialize() {
            let LookupRow { code, canonical } = row?;
            let Some(canonical) = canonical.filter(|c| !c.is_empty()) else {
                continue;
            };
            if code.is_empty() {
                continue;
            }
            match entries.entry(code) {
                Entry::Occupied(entry) if *entry.get() != canonical => {
                    warn!(
                        code = %entry.key(),
                        kept = %entry.get(),
                        ignored = %canonical,
                        "Conflicting publisher lookup rows"
                    );
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(canonical);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Parse a lookup table held in memory.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_reader(input.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical name for an exported publisher name.
    pub fn canonical(&self, code: &str) -> Option<&CompactString> {
        self.entries.get(code)
    }

    /// Attach the canonical publisher name to every record.
    ///
    /// Every record is returned, in order; unmatched publishers get `None`.
    pub fn normalize(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .map(|mut record| {
                record.canonical_publisher = self.canonical(&record.publisher_code).cloned();
                record
            })
            .collect()
    }

    /// Distinct publisher codes with no entry in the lookup table.
    pub fn unmapped_codes<'a>(&self, records: &'a [Record]) -> BTreeSet<&'a str> {
        records
            .iter()
            .map(|r| r.publisher_code.as_str())
            .filter(|code| self.canonical(code).is_none())
            .collect()
    }
}
