//! Web of Science field tags.
//!
//! Tab-delimited Web of Science exports name their columns with the same
//! two-letter field tags used in the plain-text format.
//! See: https://images.webofknowledge.com/images/help/WOS/hs_wos_fieldtags.html

/// Web of Science field tags.
#[allow(unused)]
#[allow(clippy::upper_case_acronyms)]
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum WosTag {
    /// PT - Publication type (J=Journal; B=Book; S=Series; P=Patent)
    PublicationType,
    /// AU - Authors
    Authors,
    /// AF - Author full names
    AuthorFullNames,
    /// TI - Document title
    Title,
    /// SO - Publication name
    SourceTitle,
    /// LA - Language
    Language,
    /// DT - Document type
    DocumentType,
    /// DE - Author keywords
    AuthorKeywords,
    /// AB - Abstract
    Abstract,
    /// C1 - Author address
    AuthorAddress,
    /// RP - Reprint address
    ReprintAddress,
    /// EM - E-mail address
    Email,
    /// FU - Funding agency and grant number
    Funding,
    /// PU - Publisher
    Publisher,
    /// PI - Publisher city
    PublisherCity,
    /// PA - Publisher address
    PublisherAddress,
    /// SN - International Standard Serial Number (ISSN)
    Issn,
    /// EI - Electronic International Standard Serial Number (eISSN)
    EIssn,
    /// J9 - 29-character source abbreviation
    SourceAbbreviation,
    /// JI - ISO source abbreviation
    JournalAbbreviation,
    /// PD - Publication date
    PublicationDate,
    /// PY - Year published
    PublicationYear,
    /// VL - Volume
    Volume,
    /// IS - Issue
    Issue,
    /// BP - Beginning page
    BeginningPage,
    /// EP - Ending page
    EndingPage,
    /// DI - Digital Object Identifier (DOI)
    Doi,
    /// EA - Early access date
    EarlyAccessDate,
    /// WC - Web of Science categories
    Categories,
    /// OA - Open access indicator
    OpenAccess,
    /// UT - Accession number
    AccessionNumber,
    /// Unknown tag
    Unknown(String),
}

impl WosTag {
    /// Convert a column header to a WosTag.
    ///
    /// Matching ignores case, surrounding whitespace and a leading byte order mark,
    /// which Excel-produced exports often carry on the first header.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim_start_matches('\u{feff}').trim();
        match tag.to_ascii_uppercase().as_str() {
            "PT" => WosTag::PublicationType,
            "AU" => WosTag::Authors,
            "AF" => WosTag::AuthorFullNames,
            "TI" => WosTag::Title,
            "SO" => WosTag::SourceTitle,
            "LA" => WosTag::Language,
            "DT" => WosTag::DocumentType,
            "DE" => WosTag::AuthorKeywords,
            "AB" => WosTag::Abstract,
            "C1" => WosTag::AuthorAddress,
            "RP" => WosTag::ReprintAddress,
            "EM" => WosTag::Email,
            "FU" => WosTag::Funding,
            "PU" => WosTag::Publisher,
            "PI" => WosTag::PublisherCity,
            "PA" => WosTag::PublisherAddress,
            "SN" => WosTag::Issn,
            "EI" => WosTag::EIssn,
            "J9" => WosTag::SourceAbbreviation,
            "JI" => WosTag::JournalAbbreviation,
            "PD" => WosTag::PublicationDate,
            "PY" => WosTag::PublicationYear,
            "VL" => WosTag::Volume,
            "IS" => WosTag::Issue,
            "BP" => WosTag::BeginningPage,
            "EP" => WosTag::EndingPage,
            "DI" => WosTag::Doi,
            "EA" => WosTag::EarlyAccessDate,
            "WC" => WosTag::Categories,
            "OA" => WosTag::OpenAccess,
            "UT" => WosTag::AccessionNumber,
            _ => WosTag::Unknown(tag.to_string()),
        }
    }

    /// Convert a WosTag back to its string representation.
    pub fn as_tag(&self) -> &str {
        match self {
            WosTag::PublicationType => "PT",
            WosTag::Authors => "AU",
            WosTag::AuthorFullNames => "AF",
            WosTag::Title => "TI",
            WosTag::SourceTitle => "SO",
            WosTag::Language => "LA",
            WosTag::DocumentType => "DT",
            WosTag::AuthorKeywords => "DE",
            WosTag::Abstract => "AB",
            WosTag::AuthorAddress => "C1",
            WosTag::ReprintAddress => "RP",
            WosTag::Email => "EM",
            WosTag::Funding => "FU",
            WosTag::Publisher => "PU",
            WosTag::PublisherCity => "PI",
            WosTag::PublisherAddress => "PA",
            WosTag::Issn => "SN",
            WosTag::EIssn => "EI",
            WosTag::SourceAbbreviation => "J9",
            WosTag::JournalAbbreviation => "JI",
            WosTag::PublicationDate => "PD",
            WosTag::PublicationYear => "PY",
            WosTag::Volume => "VL",
            WosTag::Issue => "IS",
            WosTag::BeginningPage => "BP",
            WosTag::EndingPage => "EP",
            WosTag::Doi => "DI",
            WosTag::EarlyAccessDate => "EA",
            WosTag::Categories => "WC",
            WosTag::OpenAccess => "OA",
            WosTag::AccessionNumber => "UT",
            WosTag::Unknown(tag) => tag,
        }
    }

    /// Columns the profiler reads; an export without any of them cannot be processed.
    pub fn required() -> Vec<WosTag> {
        vec![
            WosTag::DocumentType,
            WosTag::ReprintAddress,
            WosTag::Title,
            WosTag::Publisher,
            WosTag::JournalAbbreviation,
            WosTag::SourceTitle,
            WosTag::Doi,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("DT", WosTag::DocumentType)]
    #[case("RP", WosTag::ReprintAddress)]
    #[case("pu", WosTag::Publisher)]
    #[case(" JI ", WosTag::JournalAbbreviation)]
    #[case("\u{feff}PT", WosTag::PublicationType)]
    #[case("ZZ", WosTag::Unknown("ZZ".to_string()))]
    fn test_from_tag(#[case] input: &str, #[case] expected: WosTag) {
        assert_eq!(WosTag::from_tag(input), expected);
    }

    #[rstest]
    #[case(WosTag::Doi, "DI")]
    #[case(WosTag::Title, "TI")]
    #[case(WosTag::Unknown("Z9".to_string()), "Z9")]
    fn test_as_tag(#[case] input: WosTag, #[case] expected: &str) {
        assert_eq!(input.as_tag(), expected);
    }

    #[test]
    fn test_required_tags_round_trip() {
        for tag in WosTag::required() {
            assert_eq!(WosTag::from_tag(tag.as_tag()), tag);
        }
    }
}
