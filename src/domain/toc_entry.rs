use serde::Serialize;

use super::section_number::SectionNumber;

/// Which table-of-contents line format produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TocPattern {
    /// `6.6.2 Title ........ 65`
    DotLeader,
    /// `6.6.2 Title  65`
    TrailingNumber,
    /// `7.4.35 INI_TIMEOUT_AP [241] ..... 206`
    BracketedField,
    /// Unanchored fallback for ragged layouts.
    Loose,
}

impl TocPattern {
    pub const ALL: [TocPattern; 4] = [
        TocPattern::DotLeader,
        TocPattern::TrailingNumber,
        TocPattern::BracketedField,
        TocPattern::Loose,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTocEntry {
    pub section_number: SectionNumber,
    pub section_title: String,
    pub page_number: u32,
    pub discovery_page: u32,
    pub level: usize,
    pub pattern: TocPattern,
}

impl RawTocEntry {
    pub fn new(
        section_number: SectionNumber,
        section_title: String,
        page_number: u32,
        discovery_page: u32,
        pattern: TocPattern,
    ) -> Self {
        let level = section_number.level();
        Self {
            section_number,
            section_title,
            page_number,
            discovery_page,
            level,
            pattern,
        }
    }
}
