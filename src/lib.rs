//! Profile a campus' publishing output from a Web of Science export.
//!
//! `pubprofiler` reads a tab-delimited Web of Science export, keeps the
//! research articles and reviews, drops repeated "early access" titles, flags
//! records whose reprint address belongs to the local institution, and
//! attaches a canonical publisher name from a lookup table. The resulting
//! table is written to disk and summarised into count tables ready for
//! charting.
//!
//! # Pipeline
//!
//! Each stage is a plain function over an owned table, so every step can be
//! run and tested on its own:
//!
//! 1. [`wos::WosParser`] loads the export into a [`RecordTable`]
//! 2. [`doctype::partition`] splits kept articles/reviews from removed types
//! 3. [`dedupe::TitleDeduplicator`] keeps the first record for each title
//! 4. [`corresponding::CorrespondingAuthorMatcher`] flags local corresponding authors
//! 5. [`publisher::PublisherLookup`] joins in canonical publisher names
//! 6. [`aggregate::Report`] builds the count tables
//!
//! [`pipeline::Profiler`] runs all of them in order and writes the output file.
//!
//! # Basic Usage
//!
//! ```rust
//! use pubprofiler::{RecordParser, WosParser};
//! use pubprofiler::doctype::partition;
//!
//! let input = "DT\tRP\tTI\tPU\tJI\tSO\tDI\n\
//! Article\tIowa State Univ, Ames, IA\tFoo\tWILEY\tJ. Foo\tJOURNAL OF FOO\t10.1/ABC\n\
//! Book Review\t\tBar\tELSEVIER\tJ. Bar\tJOURNAL OF BAR\t\n";
//!
//! let table = WosParser::new().parse(input).unwrap();
//! assert_eq!(table.records[0].doi.as_deref(), Some("10.1/abc"));
//!
//! let split = partition(table.records);
//! assert_eq!(split.kept_count(), 1);
//! assert_eq!(split.removed_count(), 1);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`Result`], which wraps [`ProfilerError`].
//! Only unreadable or malformed input is an error; a publisher code missing
//! from the lookup table or an empty result set is not.

use compact_str::CompactString;
use std::path::PathBuf;
use thiserror::Error;

pub mod aggregate;
pub mod corresponding;
pub mod dedupe;
pub mod doctype;
pub mod pipeline;
pub mod publisher;
pub mod wos;

// Reexports
pub use corresponding::{CaFilter, CorrespondingAuthorMatcher};
pub use pipeline::{ProfileRun, Profiler, ProfilerConfig};
pub use publisher::PublisherLookup;
pub use wos::{WosConfig, WosParser, WosTag};

/// A specialized Result type for profiler operations.
pub type Result<T> = std::result::Result<T, ProfilerError>;

/// Errors raised while loading input or writing the output table.
#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed input: {message} at line {line}")]
    MalformedInput { message: String, line: usize },

    #[error("Publisher lookup table unavailable at {}: {source}", path.display())]
    LookupUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for ProfilerError {
    fn from(err: csv::Error) -> Self {
        ProfilerError::InvalidFormat(err.to_string())
    }
}

/// A single publication from the export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// DT: semicolon-separated document type, e.g. "Article; Early Access"
    pub document_type: String,
    /// RP: reprint (corresponding author) address
    pub reprint_address: Option<String>,
    /// TI: article title
    pub title: String,
    /// PU: publisher name as exported, used as the lookup key
    pub publisher_code: CompactString,
    /// JI: ISO journal abbreviation
    pub journal_abbrev: Option<String>,
    /// SO: full source title
    pub source_title: Option<String>,
    /// DI: DOI, lowercased
    pub doi: Option<String>,
    /// Whether the reprint address names the local institution
    pub is_local_corresponding_author: bool,
    /// Canonical publisher name, `None` until joined or when unmapped
    pub canonical_publisher: Option<CompactString>,
    /// Every cell of the original row, aligned with [`RecordTable::headers`]
    pub values: Vec<String>,
}

/// The header row of an export together with its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordTable {
    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the records, keeping the header row.
    #[must_use]
    pub fn with_records(self, records: Vec<Record>) -> Self {
        Self {
            headers: self.headers,
            records,
        }
    }
}

/// Trait for loaders that turn export text into a [`RecordTable`].
pub trait RecordParser {
    /// Parse a string containing a header row and zero or more records.
    ///
    /// # Errors
    ///
    /// Returns `ProfilerError` if the input is malformed or lacks a required column
    fn parse(&self, input: &str) -> Result<RecordTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiler_error_display() {
        let error = ProfilerError::MissingColumn("DT".to_string());
        assert_eq!(error.to_string(), "Missing required column: DT");

        let error = ProfilerError::MalformedInput {
            message: "bad quote".to_string(),
            line: 4,
        };
        assert_eq!(error.to_string(), "Malformed input: bad quote at line 4");
    }

    #[test]
    fn test_with_records_keeps_headers() {
        let table = RecordTable {
            headers: vec!["DT".to_string(), "TI".to_string()],
            records: vec![Record::default()],
        };
        let table = table.with_records(Vec::new());
        assert_eq!(table.headers.len(), 2);
        assert!(table.is_empty());
    }
}
