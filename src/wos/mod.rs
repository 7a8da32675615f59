//! Web of Science export loader.
//!
//! Reads the tab-delimited "full record" export into a [`RecordTable`]. Columns
//! are identified by their two-letter field tags, every original cell is kept
//! for the output file, and the DOI column is lowercased.
//!
//! # Example
//!
//! ```
//! use pubprofiler::{RecordParser, WosParser};
//!
//! let input = "PT\tDT\tRP\tTI\tPU\tJI\tSO\tDI\n\
//! J\tReview\t\tExample Title\tELSEVIER\tJ. Ex.\tJOURNAL OF EXAMPLES\t10.1016/J.EX.1\n";
//!
//! let table = WosParser::new().parse(input).unwrap();
//! assert_eq!(table.records[0].title, "Example Title");
//! assert_eq!(table.records[0].doi.as_deref(), Some("10.1016/j.ex.1"));
//! ```

mod structure;
mod tags;

pub use tags::WosTag;

use crate::{ProfilerError, RecordParser, RecordTable, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use structure::{ColumnMap, RawWosRecord};
use tracing::debug;

/// Configuration for reading an export.
///
/// # Examples
///
/// ```
/// use pubprofiler::{WosConfig, WosTag};
///
/// // The comma-separated variant of the export
/// let mut config = WosConfig::new();
/// config.set_delimiter(b',').set_quoting(true);
/// config.set_required_columns(vec![WosTag::DocumentType, WosTag::Title]);
/// ```
#[derive(Debug, Clone)]
pub struct WosConfig {
    /// Delimiter to use for parsing
    delimiter: u8,
    /// Whether double quotes delimit fields. WoS tab exports do not quote,
    /// and titles may contain bare quotes.
    quoting: bool,
    /// Whether rows may have a different number of cells than the header
    flexible: bool,
    /// Whether to trim whitespace around headers and cells
    trim: bool,
    /// Columns that must be present in the header row
    required: Vec<WosTag>,
}

impl Default for WosConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WosConfig {
    /// Creates a configuration for the tab-delimited export
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: b'\t',
            quoting: false,
            flexible: true,
            trim: true,
            required: WosTag::required(),
        }
    }

    /// Sets the delimiter character
    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether double quotes are treated as field delimiters
    pub fn set_quoting(&mut self, quoting: bool) -> &mut Self {
        self.quoting = quoting;
        self
    }

    /// Sets whether ragged rows are accepted
    pub fn set_flexible(&mut self, flexible: bool) -> &mut Self {
        self.flexible = flexible;
        self
    }

    /// Sets whether headers and cells are trimmed
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    /// Sets the columns the header row must contain
    pub fn set_required_columns(&mut self, required: Vec<WosTag>) -> &mut Self {
        self.required = required;
        self
    }
}

/// Loader for Web of Science tab-delimited exports.
#[derive(Debug, Clone, Default)]
pub struct WosParser {
    config: WosConfig,
}

impl WosParser {
    /// Creates a parser for the tab-delimited export.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new parser with custom configuration
    #[must_use]
    pub fn with_config(mut self, config: WosConfig) -> Self {
        self.config = config;
        self
    }

    /// Load an export file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ProfilerError::Io` if the file cannot be opened, and the errors
    /// of [`WosParser::parse_reader`] otherwise.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<RecordTable> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading export");
        self.parse_reader(File::open(path)?)
    }

    /// Load an export from any reader.
    ///
    /// # Errors
    ///
    /// Returns `ProfilerError::MissingColumn` when a required column is absent
    /// and `ProfilerError::MalformedInput` for rows the CSV reader rejects.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RecordTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quoting(self.config.quoting)
            .flexible(self.config.flexible)
            .trim(if self.config.trim { Trim::All } else { Trim::None })
            .has_headers(true)
            .from_reader(reader);

        let mut headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        // Exports end the header line with a delimiter, leaving a nameless column
        while headers.last().is_some_and(|h| h.is_empty()) {
            headers.pop();
        }
        if headers.is_empty() {
            return Err(ProfilerError::InvalidFormat(
                "input has no header row".to_string(),
            ));
        }

        let columns = ColumnMap::from_headers(&headers, &self.config.required)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ProfilerError::MalformedInput {
                line: e.position().map_or(0, |p| p.line() as usize),
                message: e.to_string(),
            })?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            records.push(RawWosRecord::from_record(&record, &columns).into_record(&columns));
        }

        debug!(
            columns = headers.len(),
            records = records.len(),
            "Loaded export"
        );
        Ok(RecordTable { headers, records })
    }
}

impl RecordParser for WosParser {
    fn parse(&self, input: &str) -> Result<RecordTable> {
        self.parse_reader(input.as_bytes())
    }
}
