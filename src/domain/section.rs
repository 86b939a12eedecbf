use std::ops::RangeInclusive;

use serde::Serialize;

use super::section_number::SectionNumber;
use super::toc_entry::{RawTocEntry, TocPattern};

/// Title given to ancestors synthesized from their children.
pub const INFERRED_TITLE: &str = "[Inferred]";

/// Inclusive range of document pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn page_count(&self) -> u32 {
        self.end
            .checked_sub(self.start)
            .map_or(0, |span| span.saturating_add(1))
    }

    pub fn contains(&self, page: u32) -> bool {
        self.start <= page && page <= self.end
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionOrigin {
    Toc {
        discovery_page: u32,
        pattern: TocPattern,
    },
    Inferred,
    RegexSubsection {
        parent: SectionNumber,
    },
}

impl SectionOrigin {
    pub fn tag(&self) -> OriginTag {
        match self {
            SectionOrigin::Toc { .. } => OriginTag::Toc,
            SectionOrigin::Inferred => OriginTag::Inferred,
            SectionOrigin::RegexSubsection { .. } => OriginTag::RegexSubsection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginTag {
    Toc,
    Inferred,
    RegexSubsection,
}

/// An entry that is known to exist but does not own a page range yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCandidate {
    pub section_number: SectionNumber,
    pub section_title: String,
    pub page_number: u32,
    pub level: usize,
    pub origin: SectionOrigin,
}

impl SectionCandidate {
    pub fn inferred(section_number: SectionNumber, page_number: u32) -> Self {
        let level = section_number.level();
        Self {
            section_number,
            section_title: INFERRED_TITLE.to_string(),
            page_number,
            level,
            origin: SectionOrigin::Inferred,
        }
    }

    pub fn into_entry(self, page_range: PageRange) -> SectionEntry {
        SectionEntry {
            page_count: page_range.page_count(),
            section_number: self.section_number,
            section_title: self.section_title,
            page_number: self.page_number,
            level: self.level,
            origin: self.origin,
            page_range,
            is_long: false,
        }
    }
}

impl From<RawTocEntry> for SectionCandidate {
    fn from(raw: RawTocEntry) -> Self {
        Self {
            section_number: raw.section_number,
            section_title: raw.section_title,
            page_number: raw.page_number,
            level: raw.level,
            origin: SectionOrigin::Toc {
                discovery_page: raw.discovery_page,
                pattern: raw.pattern,
            },
        }
    }
}

/// A section that owns an inclusive document page range. Covers TOC entries,
/// inferred ancestors and subsections found by bounded search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub section_number: SectionNumber,
    pub section_title: String,
    pub page_number: u32,
    pub level: usize,
    pub origin: SectionOrigin,
    pub page_range: PageRange,
    pub page_count: u32,
    pub is_long: bool,
}

impl SectionEntry {
    pub fn inferred(&self) -> bool {
        matches!(self.origin, SectionOrigin::Inferred)
    }

    pub fn has_placeholder_title(&self) -> bool {
        self.section_title == INFERRED_TITLE
    }
}
