//! Count tables for charting.
//!
//! Every table here is a flat list of counts over the records selected by the
//! corresponding-author toggle. Rows are sorted by descending count, ties
//! broken by name, so the output is stable across runs.
//!
//! Records without a canonical publisher name are left out of the
//! publisher-keyed tables. [`PublisherCounts::unlabeled`] reports how many
//! there were, since they point at gaps in the lookup table.

use crate::Record;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

/// Label that small publishers are folded into.
pub const OTHER_LABEL: &str = "Other";

/// Publishers with fewer records than this are folded into [`OTHER_LABEL`].
pub const DEFAULT_OTHER_THRESHOLD: usize = 3;

/// How many publishers the top-N table keeps.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherCount {
    pub publisher: String,
    pub count: usize,
}

/// Records per canonical publisher, small publishers merged into "Other".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublisherCounts {
    /// Publishers by descending count; the "Other" row, if any, comes last
    pub rows: Vec<PublisherCount>,
    /// Records with no canonical publisher name
    pub unlabeled: usize,
}

impl PublisherCounts {
    /// Number of records behind the publisher rows.
    pub fn labeled(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Canonical publishers seen for one journal.
///
/// A journal normally belongs to one publisher, so `unique` above 1 flags
/// either a lookup inconsistency or a journal that changed hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalPublishers {
    /// JI journal abbreviation
    pub journal: String,
    /// Records with a canonical publisher
    pub count: usize,
    /// Distinct canonical publishers
    pub unique: usize,
    /// Most frequent canonical publisher
    pub top: Option<String>,
    /// Records for `top`
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherDocumentTypeCount {
    pub publisher: String,
    pub document_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherJournalCount {
    pub publisher: String,
    pub journal: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTypeCount {
    pub document_type: String,
    pub count: usize,
}

/// Sort a count map by descending count, then ascending key.
fn sorted_by_count<K: Ord + Hash>(counts: HashMap<K, usize>) -> Vec<(K, usize)> {
    counts
        .into_iter()
        .sorted_by(|(a_key, a), (b_key, b)| (Reverse(a), a_key).cmp(&(Reverse(b), b_key)))
        .collect()
}

fn canonical_names<'a, I>(records: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| r.canonical_publisher.as_deref())
}

/// Count records per canonical publisher, folding publishers with fewer than
/// `other_threshold` records into a single "Other" row.
pub fn publisher_counts<'a, I>(records: I, other_threshold: usize) -> PublisherCounts
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut unlabeled = 0;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        match record.canonical_publisher.as_deref() {
            Some(name) => *counts.entry(name).or_default() += 1,
            None => unlabeled += 1,
        }
    }

    let mut other = 0;
    let mut rows = Vec::new();
    for (publisher, count) in sorted_by_count(counts) {
        if count < other_threshold || publisher == OTHER_LABEL {
            other += count;
        } else {
            rows.push(PublisherCount {
                publisher: publisher.to_string(),
                count,
            });
        }
    }
    if other > 0 {
        rows.push(PublisherCount {
            publisher: OTHER_LABEL.to_string(),
            count: other,
        });
    }

    PublisherCounts { rows, unlabeled }
}

/// The `n` highest-ranked publishers, without folding into "Other".
///
/// Publishers tied at the cut-off share a rank and are all kept, so the
/// result can hold more than `n` rows.
pub fn top_publishers<'a, I>(records: I, n: usize) -> Vec<PublisherCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let ranked = sorted_by_count(canonical_names(records).counts());

    let mut rows = Vec::new();
    let mut previous = None;
    let mut rank = 0;
    for (position, (publisher, count)) in ranked.into_iter().enumerate() {
        if previous != Some(count) {
            rank = position + 1;
            previous = Some(count);
        }
        if rank > n {
            break;
        }
        rows.push(PublisherCount {
            publisher: publisher.to_string(),
            count,
        });
    }
    rows
}

/// For each journal abbreviation, summarise the canonical publishers seen.
///
/// Journals are listed alphabetically. Records without a journal
/// abbreviation are skipped.
pub fn journal_publishers<'a, I>(records: I) -> Vec<JournalPublishers>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut journals: HashMap<&str, Vec<Option<&str>>> = HashMap::new();
    for record in records {
        if let Some(journal) = record.journal_abbrev.as_deref() {
            journals
                .entry(journal)
                .or_default()
                .push(record.canonical_publisher.as_deref());
        }
    }

    journals
        .into_iter()
        .sorted_by_key(|(journal, _)| *journal)
        .map(|(journal, publishers)| {
            let ranked = sorted_by_count(publishers.into_iter().flatten().counts());
            let count = ranked.iter().map(|(_, n)| n).sum();
            let (top, freq) = ranked
                .first()
                .map_or((None, 0), |(name, n)| (Some(name.to_string()), *n));
            JournalPublishers {
                journal: journal.to_string(),
                count,
                unique: ranked.len(),
                top,
                freq,
            }
        })
        .collect()
}

/// Count records per (canonical publisher, document type) pair.
pub fn publisher_document_types<'a, I>(records: I) -> Vec<PublisherDocumentTypeCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let counts = records
        .into_iter()
        .filter_map(|r| {
            r.canonical_publisher
                .as_deref()
                .map(|p| (p, r.document_type.as_str()))
        })
        .counts();

    sorted_by_count(counts)
        .into_iter()
        .map(|((publisher, document_type), count)| PublisherDocumentTypeCount {
            publisher: publisher.to_string(),
            document_type: document_type.to_string(),
            count,
        })
        .collect()
}

/// Count records per (canonical publisher, journal abbreviation) pair.
pub fn publisher_journals<'a, I>(records: I) -> Vec<PublisherJournalCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let counts = records
        .into_iter()
        .filter_map(|r| Some((r.canonical_publisher.as_deref()?, r.journal_abbrev.as_deref()?)))
        .counts();

    sorted_by_count(counts)
        .into_iter()
        .map(|((publisher, journal), count)| PublisherJournalCount {
            publisher: publisher.to_string(),
            journal: journal.to_string(),
            count,
        })
        .collect()
}

/// Distribution of document types. Records without a type are skipped.
pub fn document_type_counts<'a, I>(records: I) -> Vec<DocumentTypeCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let counts = records
        .into_iter()
        .map(|r| r.document_type.as_str())
        .filter(|dt| !dt.is_empty())
        .counts();

    sorted_by_count(counts)
        .into_iter()
        .map(|(document_type, count)| DocumentTypeCount {
            document_type: document_type.to_string(),
            count,
        })
        .collect()
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Minimum records for a publisher to get its own row in [`PublisherCounts`]
    pub other_threshold: usize,
    /// Rank cut-off for [`Report::top_publishers`]
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Every count table over one selection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Number of records the tables were built from
    pub records: usize,
    pub publishers: PublisherCounts,
    pub top_publishers: Vec<PublisherCount>,
    pub journals: Vec<JournalPublishers>,
    pub publisher_document_types: Vec<PublisherDocumentTypeCount>,
    pub publisher_journals: Vec<PublisherJournalCount>,
    pub document_types: Vec<DocumentTypeCount>,
}

impl Report {
    /// Build every table. Empty input yields empty tables.
    pub fn build(records: &[&Record], config: &ReportConfig) -> Self {
        let records = || records.iter().copied();
        Self {
            records: records().len(),
            publishers: publisher_counts(records(), config.other_threshold),
            top_publishers: top_publishers(records(), config.top_n),
            journals: journal_publishers(records()),
            publisher_document_types: publisher_document_types(records()),
            publisher_journals: publisher_journals(records()),
            document_types: document_type_counts(records()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(publisher: Option<&str>, journal: Option<&str>, document_type: &str) -> Record {
        Record {
            canonical_publisher: publisher.map(Into::into),
            journal_abbrev: journal.map(String::from),
            document_type: document_type.to_string(),
            ..Default::default()
        }
    }

    fn count(publisher: &str, count: usize) -> PublisherCount {
        PublisherCount {
            publisher: publisher.to_string(),
            count,
        }
    }

    fn sample() -> Vec<Record> {
        let mut records = Vec::new();
        for _ in 0..4 {
            records.push(record(Some("Elsevier"), Some("J. Foo"), "Article"));
        }
        for _ in 0..3 {
            records.push(record(Some("Wiley"), Some("Bar Lett."), "Article"));
        }
        records.push(record(Some("Wiley"), Some("Bar Lett."), "Review"));
        records.push(record(Some("IOP"), Some("Phys. X"), "Article"));
        records.push(record(Some("IOP"), Some("Phys. X"), "Article; Early Access"));
        records.push(record(Some("AIP"), Some("Phys. Y"), "Article"));
        records.push(record(None, Some("Phys. Y"), "Article"));
        records.push(record(None, None, "Review"));
        records
    }

    #[test]
    fn test_publisher_counts_fold_small_publishers() {
        let records = sample();
        let counts = publisher_counts(&records, 3);

        assert_eq!(
            counts.rows,
            vec![count("Elsevier", 4), count("Wiley", 4), count("Other", 3)]
        );
        assert_eq!(counts.unlabeled, 2);
        assert_eq!(counts.labeled() + counts.unlabeled, records.len());
    }

    #[test]
    fn test_publisher_counts_threshold_zero_keeps_all() {
        let records = sample();
        let counts = publisher_counts(&records, 0);
        assert_eq!(
            counts.rows,
            vec![
                count("Elsevier", 4),
                count("Wiley", 4),
                count("IOP", 2),
                count("AIP", 1)
            ]
        );
    }

    #[test]
    fn test_top_publishers_keeps_ties() {
        let records = sample();
        assert_eq!(
            top_publishers(&records, 1),
            vec![count("Elsevier", 4), count("Wiley", 4)]
        );
        assert_eq!(top_publishers(&records, 3).len(), 3);
        assert_eq!(top_publishers(&records, 10).len(), 4);
    }

    #[test]
    fn test_journal_publishers() {
        let mut records = sample();
        records.push(record(Some("Springer"), Some("J. Foo"), "Article"));

        let journals = journal_publishers(&records);

        assert_eq!(
            journals,
            vec![
                JournalPublishers {
                    journal: "Bar Lett.".to_string(),
                    count: 4,
                    unique: 1,
                    top: Some("Wiley".to_string()),
                    freq: 4,
                },
                JournalPublishers {
                    journal: "J. Foo".to_string(),
                    count: 5,
                    unique: 2,
                    top: Some("Elsevier".to_string()),
                    freq: 4,
                },
                JournalPublishers {
                    journal: "Phys. X".to_string(),
                    count: 2,
                    unique: 1,
                    top: Some("IOP".to_string()),
                    freq: 2,
                },
                JournalPublishers {
                    journal: "Phys. Y".to_string(),
                    count: 1,
                    unique: 1,
                    top: Some("AIP".to_string()),
                    freq: 1,
                },
            ]
        );
    }

    #[test]
    fn test_journal_without_any_publisher() {
        let records = vec![record(None, Some("Obscure J."), "Article")];
        let journals = journal_publishers(&records);
        assert_eq!(journals[0].count, 0);
        assert_eq!(journals[0].top, None);
    }

    #[test]
    fn test_publisher_document_types() {
        let records = sample();
        let rows = publisher_document_types(&records);

        let as_tuples: Vec<_> = rows
            .iter()
            .map(|r| (r.publisher.as_str(), r.document_type.as_str(), r.count))
            .collect();
        assert_eq!(
            as_tuples,
            vec![
                ("Elsevier", "Article", 4),
                ("Wiley", "Article", 3),
                ("AIP", "Article", 1),
                ("IOP", "Article", 1),
                ("IOP", "Article; Early Access", 1),
                ("Wiley", "Review", 1),
            ]
        );
    }

    #[test]
    fn test_publisher_journals_skip_missing_keys() {
        let records = sample();
        let rows = publisher_journals(&records);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 11);
        assert_eq!(rows[0].publisher, "Elsevier");
        assert_eq!(rows[0].journal, "J. Foo");
    }

    #[test]
    fn test_document_type_counts() {
        let records = sample();
        let rows = document_type_counts(&records);
        assert_eq!(rows[0].document_type, "Article");
        assert_eq!(rows[0].count, 10);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), records.len());
    }

    #[test]
    fn test_report_on_empty_input() {
        let report = Report::build(&[], &ReportConfig::default());
        assert_eq!(report, Report::default());
    }

    #[test]
    fn test_report_build() {
        let records = sample();
        let selected: Vec<&Record> = records.iter().collect();
        let report = Report::build(&selected, &ReportConfig::default());
        assert_eq!(report.records, records.len());
        assert_eq!(report.publishers.rows.last(), Some(&count("Other", 3)));
        assert_eq!(report.journals.len(), 4);
    }
}
