//! Intermediate structures used while loading a Web of Science export.

use crate::wos::tags::WosTag;
use crate::{ProfilerError, Record};
use compact_str::CompactString;
use csv::StringRecord;
use std::collections::HashMap;

/// Column positions of the tags found in an export's header row.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    positions: HashMap<WosTag, usize>,
    width: usize,
}

impl ColumnMap {
    /// Index the header row and check that every required tag is present.
    ///
    /// When a tag appears twice the first column wins.
    pub(crate) fn from_headers(
        headers: &[String],
        required: &[WosTag],
    ) -> Result<Self, ProfilerError> {
        let mut positions = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            positions.entry(WosTag::from_tag(header)).or_insert(i);
        }

        if let Some(missing) = required.iter().find(|tag| !positions.contains_key(*tag)) {
            return Err(ProfilerError::MissingColumn(missing.as_tag().to_string()));
        }

        Ok(Self {
            positions,
            width: headers.len(),
        })
    }

    pub(crate) fn position(&self, tag: &WosTag) -> Option<usize> {
        self.positions.get(tag).copied()
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }
}

/// One export row with its cells aligned to the header.
#[derive(Debug, Clone)]
pub(crate) struct RawWosRecord {
    pub(crate) values: Vec<String>,
}

impl RawWosRecord {
    /// Align a CSV record to the header width.
    ///
    /// Trailing cells beyond the header (WoS rows end with a stray tab) are
    /// dropped, and short rows are padded with empty cells.
    pub(crate) fn from_record(record: &StringRecord, columns: &ColumnMap) -> Self {
        let mut values: Vec<String> = record
            .iter()
            .take(columns.width())
            .map(String::from)
            .collect();
        values.resize(columns.width(), String::new());

        // DOIs are stored lowercased
        if let Some(doi) = columns.position(&WosTag::Doi) {
            values[doi] = values[doi].to_lowercase();
        }

        Self { values }
    }

    fn get(&self, columns: &ColumnMap, tag: &WosTag) -> Option<&str> {
        columns
            .position(tag)
            .map(|i| self.values[i].as_str())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn into_record(self, columns: &ColumnMap) -> Record {
        let owned = |tag: WosTag| self.get(columns, &tag).map(String::from);

        Record {
            document_type: owned(WosTag::DocumentType).unwrap_or_default(),
            reprint_address: owned(WosTag::ReprintAddress),
            title: owned(WosTag::Title).unwrap_or_default(),
            publisher_code: self
                .get(columns, &WosTag::Publisher)
                .map(CompactString::from)
                .unwrap_or_default(),
            journal_abbrev: owned(WosTag::JournalAbbreviation),
            source_title: owned(WosTag::SourceTitle),
            doi: owned(WosTag::Doi),
            is_local_corresponding_author: false,
            canonical_publisher: None,
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_required_column() {
        let result = ColumnMap::from_headers(&headers(&["DT", "TI"]), &WosTag::required());
        assert!(matches!(result, Err(ProfilerError::MissingColumn(tag)) if tag == "RP"));
    }

    #[test]
    fn test_duplicate_header_keeps_first() {
        let columns = ColumnMap::from_headers(&headers(&["TI", "DT", "TI"]), &[]).unwrap();
        assert_eq!(columns.position(&WosTag::Title), Some(0));
    }

    #[test]
    fn test_row_aligned_to_header_width() {
        let columns = ColumnMap::from_headers(&headers(&["DT", "TI", "DI"]), &[]).unwrap();

        let long = RawWosRecord::from_record(
            &create_test_record(&["Article", "Foo", "10.1/X", ""]),
            &columns,
        );
        assert_eq!(long.values, vec!["Article", "Foo", "10.1/x"]);

        let short = RawWosRecord::from_record(&create_test_record(&["Review"]), &columns);
        assert_eq!(short.values, vec!["Review", "", ""]);
    }

    #[test]
    fn test_into_record() {
        let columns = ColumnMap::from_headers(
            &headers(&["PT", "DT", "RP", "TI", "PU", "JI", "SO", "DI"]),
            &WosTag::required(),
        )
        .unwrap();
        let raw = RawWosRecord::from_record(
            &create_test_record(&[
                "J",
                "Article; Early Access",
                "",
                "Foo",
                "WILEY",
                "J. Foo",
                "JOURNAL OF FOO",
                "10.1002/ABC.1",
            ]),
            &columns,
        );
        let record = raw.into_record(&columns);

        assert_eq!(record.document_type, "Article; Early Access");
        assert_eq!(record.reprint_address, None);
        assert_eq!(record.title, "Foo");
        assert_eq!(record.publisher_code, "WILEY");
        assert_eq!(record.journal_abbrev.as_deref(), Some("J. Foo"));
        assert_eq!(record.source_title.as_deref(), Some("JOURNAL OF FOO"));
        assert_eq!(record.doi.as_deref(), Some("10.1002/abc.1"));
        assert_eq!(record.values[7], "10.1002/abc.1");
        assert!(record.canonical_publisher.is_none());
    }
}
