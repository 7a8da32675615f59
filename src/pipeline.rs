//! Runs every stage in order and writes the normalized table.
//!
//! ```rust,no_run
//! use pubprofiler::{CaFilter, Profiler, ProfilerConfig};
//!
//! let run = Profiler::new(ProfilerConfig::default()).run()?;
//! println!("kept {} of {} records", run.kept().len(), run.loaded);
//!
//! // Flipping the corresponding-author toggle only re-runs aggregation
//! let corresponding = run.report(CaFilter::CorrespondingOnly);
//! let everything = run.report(CaFilter::All);
//! assert!(corresponding.records <= everything.records);
//! # Ok::<(), pubprofiler::ProfilerError>(())
//! ```

use crate::aggregate::{DocumentTypeCount, Report, ReportConfig, document_type_counts};
use crate::corresponding::{CaFilter, CorrespondingAuthorMatcher, DEFAULT_MARKERS};
use crate::dedupe::{DeduplicatorConfig, DuplicateGroup, TitleDeduplicator};
use crate::doctype::partition;
use crate::publisher::PublisherLookup;
use crate::wos::{WosConfig, WosParser};
use crate::{Record, RecordTable, Result};
use csv::Writer;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Export read when no other input is configured.
pub const DEFAULT_INPUT_PATH: &str = "WoS_2020_tabdelimited_full_record_1000records.txt";

/// Publisher lookup table, relative to the working directory.
pub const DEFAULT_LOOKUP_PATH: &str = "Publisher_list_converter.csv";

/// Where the normalized table is written.
pub const DEFAULT_OUTPUT_PATH: &str = "PU_cleaned_windowin.csv";

/// Output column holding the canonical publisher name.
pub const CANONICAL_PUBLISHER_COLUMN: &str = "PU_cleaned";

/// Output column holding the corresponding-author flag.
pub const CORRESPONDING_AUTHOR_COLUMN: &str = "ISU_CA";

/// Everything a run needs. `Default` gives the standard file locations.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    pub input_path: PathBuf,
    pub lookup_path: PathBuf,
    pub output_path: PathBuf,
    pub wos: WosConfig,
    pub dedupe: DeduplicatorConfig,
    /// Reprint address fragments marking a local corresponding author
    pub markers: Vec<String>,
    pub report: ReportConfig,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.into(),
            lookup_path: DEFAULT_LOOKUP_PATH.into(),
            output_path: DEFAULT_OUTPUT_PATH.into(),
            wos: WosConfig::default(),
            dedupe: DeduplicatorConfig::default(),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            report: ReportConfig::default(),
        }
    }
}

/// The outcome of one run, kept in memory for display.
#[derive(Debug, Clone)]
pub struct ProfileRun {
    /// Records read from the export
    pub loaded: usize,
    /// Document type distribution of the export as loaded
    pub loaded_document_types: Vec<DocumentTypeCount>,
    /// Records excluded by document type
    pub removed: Vec<Record>,
    /// How many of `removed` are book reviews
    pub book_reviews: usize,
    /// Titles that occurred more than once among the kept records
    pub duplicates: Vec<DuplicateGroup>,
    /// Kept, deduplicated, classified and normalized records
    pub table: RecordTable,
    report_config: ReportConfig,
    unmapped: Vec<String>,
}

impl ProfileRun {
    /// The working set: articles and reviews after deduplication.
    pub fn kept(&self) -> &[Record] {
        &self.table.records
    }

    pub fn removed(&self) -> &[Record] {
        &self.removed
    }

    /// Records dropped as repeated titles.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.iter().map(|g| g.duplicates.len()).sum()
    }

    /// Kept records with a local corresponding author.
    pub fn corresponding_count(&self) -> usize {
        self.kept()
            .iter()
            .filter(|r| r.is_local_corresponding_author)
            .count()
    }

    /// Publisher codes missing from the lookup table, sorted.
    pub fn unmapped_codes(&self) -> &[String] {
        &self.unmapped
    }

    /// Build the count tables for the selected records.
    pub fn report(&self, filter: CaFilter) -> Report {
        Report::build(&filter.apply(self.kept()), &self.report_config)
    }
}

/// Runs the profiling stages over an export.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    #[must_use]
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Load the lookup table and export, run every stage, and write the output file.
    ///
    /// # Errors
    ///
    /// Fails if the lookup table or export cannot be read, or the output
    /// cannot be written. Nothing is written when loading fails.
    pub fn run(&self) -> Result<ProfileRun> {
        let lookup = PublisherLookup::from_path(&self.config.lookup_path)?;
        let table = WosParser::new()
            .with_config(self.config.wos.clone())
            .parse_file(&self.config.input_path)?;
        info!(
            path = %self.config.input_path.display(),
            records = table.len(),
            "Loaded export"
        );

        let run = self.process(table, &lookup);
        write_table(&self.config.output_path, &run.table)?;
        info!(
            path = %self.config.output_path.display(),
            records = run.table.len(),
            "Wrote normalized table"
        );
        Ok(run)
    }

    /// Run the in-memory stages over an already loaded table.
    pub fn process(&self, table: RecordTable, lookup: &PublisherLookup) -> ProfileRun {
        let loaded = table.len();
        let loaded_document_types = document_type_counts(&table.records);
        let RecordTable { headers, records } = table;

        let split = partition(records);
        info!(
            kept = split.kept_count(),
            removed = split.removed_count(),
            book_reviews = split.book_reviews,
            "Filtered document types"
        );

        let deduped = TitleDeduplicator::new()
            .with_config(self.config.dedupe.clone())
            .dedupe(split.kept);
        info!(
            unique = deduped.unique.len(),
            duplicates = deduped.removed_count(),
            "Removed repeated titles"
        );

        let matcher = CorrespondingAuthorMatcher::with_markers(self.config.markers.iter().cloned());
        let classified = matcher.classify(deduped.unique);
        debug!(
            corresponding = classified
                .iter()
                .filter(|r| r.is_local_corresponding_author)
                .count(),
            "Classified corresponding authors"
        );

        let normalized = lookup.normalize(classified);
        let unmapped: Vec<String> = lookup
            .unmapped_codes(&normalized)
            .into_iter()
            .map(String::from)
            .collect();
        if !unmapped.is_empty() {
            warn!(
                count = unmapped.len(),
                codes = ?unmapped,
                "Publishers missing from lookup table"
            );
        }

        ProfileRun {
            loaded,
            loaded_document_types,
            removed: split.removed,
            book_reviews: split.book_reviews,
            duplicates: deduped.duplicates,
            table: RecordTable {
                headers,
                records: normalized,
            },
            report_config: self.config.report.clone(),
            unmapped,
        }
    }
}

/// Write the normalized table as comma-separated values.
///
/// Columns are the original export columns followed by
/// [`CANONICAL_PUBLISHER_COLUMN`] and [`CORRESPONDING_AUTHOR_COLUMN`]. The
/// table is written next to `path` first and then moved over it, so an
/// existing file is replaced whole.
pub fn write_table<P: AsRef<Path>>(path: P, table: &RecordTable) -> Result<()> {
    let path = path.as_ref();
    let mut staging = OsString::from(path.as_os_str());
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    let mut writer = Writer::from_path(&staging)?;
    writer.write_record(
        table
            .headers
            .iter()
            .map(String::as_str)
            .chain([CANONICAL_PUBLISHER_COLUMN, CORRESPONDING_AUTHOR_COLUMN]),
    )?;
    for record in &table.records {
        writer.write_record(
            record.values.iter().map(String::as_str).chain([
                record.canonical_publisher.as_deref().unwrap_or_default(),
                if record.is_local_corresponding_author {
                    "True"
                } else {
                    "False"
                },
            ]),
        )?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&staging, path)?;
    Ok(())
}
