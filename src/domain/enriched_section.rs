use serde::Serialize;

use super::section::SectionEntry;

/// Where the final `section_title` of a section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    Toc,
    Subsection,
    /// Read back from page text for an inferred ancestor.
    Recovered,
    /// Inferred ancestor whose title could not be recovered.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedSection {
    pub entry: SectionEntry,
    pub content: String,
    pub subtitle: Option<String>,
    pub title_source: TitleSource,
}
