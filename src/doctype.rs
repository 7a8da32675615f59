//! Document type classification.
//!
//! Web of Science tags each record with a semicolon-separated document type
//! such as `Article`, `Article; Early Access`, `Review; Early Access` or
//! `Editorial Material`. Only research articles and reviews are profiled.
//!
//! Book reviews are excluded first because their type contains "Review".
//! Any other type containing "Article" or "Review" (case-insensitive) is
//! retained, and everything else is removed.
//!
//! # Example
//!
//! ```
//! use pubprofiler::doctype::{classify, DocumentClass};
//!
//! assert_eq!(classify("Article; Data Paper"), DocumentClass::Retained);
//! assert_eq!(classify("Book Review"), DocumentClass::BookReview);
//! assert_eq!(classify("Editorial Material"), DocumentClass::Other);
//! ```

use crate::Record;
use either::{Left, Right};
use itertools::Itertools;

/// Document types removed outright, matched exactly.
pub const BOOK_REVIEW_TYPES: &[&str] = &["Book Review", "Book Review; Early Access"];

/// Substrings that mark a document type as retained, matched case-insensitively.
pub const RETAINED_MARKERS: &[&str] = &["Article", "Review"];

/// Outcome of classifying a single document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentClass {
    /// An article or review, kept for profiling
    Retained,
    /// A book review, removed even though it mentions "Review"
    BookReview,
    /// Any other type (editorials, corrections, meeting abstracts, ...)
    Other,
}

/// Classify a document type string.
pub fn classify(document_type: &str) -> DocumentClass {
    if BOOK_REVIEW_TYPES.contains(&document_type) {
        return DocumentClass::BookReview;
    }

    let lowered = document_type.to_lowercase();
    if RETAINED_MARKERS
        .iter()
        .any(|marker| lowered.contains(&marker.to_lowercase()))
    {
        DocumentClass::Retained
    } else {
        DocumentClass::Other
    }
}

/// Records split by document type.
#[derive(Debug, Clone, Default)]
pub struct DocumentTypePartition {
    /// Articles and reviews, in input order
    pub kept: Vec<Record>,
    /// Removed records: other types first, then book reviews, each in input order
    pub removed: Vec<Record>,
    /// How many of the removed records are book reviews
    pub book_reviews: usize,
}

impl DocumentTypePartition {
    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Split records into kept articles/reviews and removed everything else.
///
/// The two partitions are disjoint and together hold every input record.
pub fn partition(records: Vec<Record>) -> DocumentTypePartition {
    let (kept, excluded): (Vec<_>, Vec<_>) =
        records
            .into_iter()
            .partition_map(|record| match classify(&record.document_type) {
                DocumentClass::Retained => Left(record),
                class => Right((class, record)),
            });

    let (mut removed, book_reviews): (Vec<_>, Vec<_>) =
        excluded.into_iter().partition_map(|(class, record)| {
            if class == DocumentClass::BookReview {
                Right(record)
            } else {
                Left(record)
            }
        });

    let book_review_count = book_reviews.len();
    removed.extend(book_reviews);

    DocumentTypePartition {
        kept,
        removed,
        book_reviews: book_review_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(document_type: &str, title: &str) -> Record {
        Record {
            document_type: document_type.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("Article", DocumentClass::Retained)]
    #[case("Article; Early Access", DocumentClass::Retained)]
    #[case("Article; Data Paper", DocumentClass::Retained)]
    #[case("Article; Proceedings Paper", DocumentClass::Retained)]
    #[case("Review", DocumentClass::Retained)]
    #[case("Review; Early Access", DocumentClass::Retained)]
    #[case("review", DocumentClass::Retained)]
    #[case("Book Review", DocumentClass::BookReview)]
    #[case("Book Review; Early Access", DocumentClass::BookReview)]
    #[case("Editorial Material", DocumentClass::Other)]
    #[case("Correction", DocumentClass::Other)]
    #[case("Meeting Abstract", DocumentClass::Other)]
    #[case("", DocumentClass::Other)]
    fn test_classify(#[case] document_type: &str, #[case] expected: DocumentClass) {
        assert_eq!(classify(document_type), expected);
    }

    #[test]
    fn test_book_review_match_is_exact() {
        // Not one of the listed variants, so it falls through to the substring rule
        assert_eq!(classify("book review"), DocumentClass::Retained);
    }

    #[test]
    fn test_partition() {
        let records = vec![
            record("Article", "a"),
            record("Book Review", "b"),
            record("Editorial Material", "c"),
            record("Review; Early Access", "d"),
            record("Book Review; Early Access", "e"),
            record("Letter", "f"),
        ];

        let split = partition(records);

        let titles = |v: &[Record]| v.iter().map(|r| r.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&split.kept), vec!["a", "d"]);
        assert_eq!(titles(&split.removed), vec!["c", "f", "b", "e"]);
        assert_eq!(split.book_reviews, 2);
        assert_eq!(split.kept_count() + split.removed_count(), 6);
    }

    #[test]
    fn test_partition_invariants() {
        let types = [
            "Article",
            "Book Review",
            "Proceedings Paper",
            "Review",
            "Article; Retracted Publication",
            "News Item",
            "",
        ];
        let records: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, dt)| record(dt, &i.to_string()))
            .collect();

        let split = partition(records.clone());

        assert_eq!(split.kept.len() + split.removed.len(), records.len());
        for r in &records {
            let in_kept = split.kept.contains(r);
            let in_removed = split.removed.contains(r);
            assert!(in_kept != in_removed);
        }
        for r in &split.kept {
            assert_ne!(r.document_type, "Book Review");
            let lowered = r.document_type.to_lowercase();
            assert!(lowered.contains("article") || lowered.contains("review"));
        }
    }

    #[test]
    fn test_partition_empty() {
        let split = partition(Vec::new());
        assert_eq!(split.kept_count(), 0);
        assert_eq!(split.removed_count(), 0);
    }
}
