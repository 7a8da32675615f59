//! Corresponding author detection.
//!
//! A record counts as locally corresponding-authored when its reprint address
//! (RP) mentions the local institution. The match is a case-insensitive
//! substring search against a fixed list of markers.
//!
//! # Example
//!
//! ```
//! use pubprofiler::CorrespondingAuthorMatcher;
//!
//! let matcher = CorrespondingAuthorMatcher::new();
//! assert!(matcher.is_local(Some("Smith, J (corresponding author), Iowa State Univ, Ames, IA 50011 USA.")));
//! assert!(!matcher.is_local(Some("Univ Iowa, Iowa City, IA 52242 USA.")));
//! assert!(!matcher.is_local(None));
//! ```

use crate::Record;

/// Address fragments identifying the local institution: the university, the
/// national laboratory on campus, the city, and the USDA research units there.
pub const DEFAULT_MARKERS: &[&str] = &["Iowa State Univ", "Ames Lab", "Ames, IA", "USDA"];

/// Case-insensitive matcher over a list of address markers.
#[derive(Debug, Clone)]
pub struct CorrespondingAuthorMatcher {
    markers: Vec<String>,
    /// Lowercased copies of `markers`, compared against the lowercased address
    folded: Vec<String>,
}

impl Default for CorrespondingAuthorMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrespondingAuthorMatcher {
    /// Creates a matcher using [`DEFAULT_MARKERS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_markers(DEFAULT_MARKERS.iter().copied())
    }

    /// Creates a matcher for a custom set of markers. Empty markers are ignored.
    #[must_use]
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers: Vec<String> = markers
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.is_empty())
            .collect();
        let folded = markers.iter().map(|m| m.to_lowercase()).collect();
        Self { markers, folded }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether the reprint address contains any marker.
    pub fn is_local(&self, reprint_address: Option<&str>) -> bool {
        let Some(address) = reprint_address else {
            return false;
        };
        let address = address.to_lowercase();
        self.folded.iter().any(|marker| address.contains(marker.as_str()))
    }

    /// Set `is_local_corresponding_author` on every record.
    pub fn classify(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .map(|mut record| {
                record.is_local_corresponding_author =
                    self.is_local(record.reprint_address.as_deref());
                record
            })
            .collect()
    }
}

/// Which records feed the aggregate tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaFilter {
    /// Only records with a local corresponding author
    #[default]
    CorrespondingOnly,
    /// Every record
    All,
}

impl CaFilter {
    /// Borrow the records selected by this filter, in order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records
            .iter()
            .filter(|r| match self {
                CaFilter::CorrespondingOnly => r.is_local_corresponding_author,
                CaFilter::All => true,
            })
            .collect()
    }
}
