use std::collections::BTreeMap;

use spec_chunker::domain::{
    EnrichedSection, PageRange, RawTocEntry, SectionCandidate, SectionEntry, SectionNumber,
    TitleSource, TocPattern,
};
use spec_chunker::infrastructure::text_processing::InMemoryPageReader;

pub fn raw_entry(number: &str, title: &str, page: u32) -> RawTocEntry {
    RawTocEntry::new(
        SectionNumber::new(number),
        title.to_string(),
        page,
        1,
        TocPattern::DotLeader,
    )
}

pub fn toc_section(number: &str, title: &str, start: u32, end: u32) -> SectionEntry {
    SectionCandidate::from(raw_entry(number, title, start)).into_entry(PageRange::new(start, end))
}

pub fn inferred_section(number: &str, start: u32, end: u32) -> SectionEntry {
    SectionCandidate::inferred(SectionNumber::new(number), start)
        .into_entry(PageRange::new(start, end))
}

pub fn enriched(entry: SectionEntry, content: &str, subtitle: Option<&str>) -> EnrichedSection {
    EnrichedSection {
        entry,
        content: content.to_string(),
        subtitle: subtitle.map(str::to_string),
        title_source: TitleSource::Toc,
    }
}

/// Only the listed pages have text; every other index up to `total` is blank.
pub fn sparse_reader(pages: &[(u32, &str)], total: u32) -> InMemoryPageReader {
    let pages: BTreeMap<u32, String> = pages
        .iter()
        .map(|(index, text)| (*index, text.to_string()))
        .collect();
    InMemoryPageReader::with_total_pages(pages, total)
}

pub fn paragraph(len: usize, fill: char) -> String {
    std::iter::repeat_n(fill, len).collect()
}

/// Six pages: contents, foreword, then chapters 6 and 7 whose top-level
/// headings are missing from the contents page.
pub const SPEC_PAGES: [&str; 6] = [
    "Contents\n6.1 General Overview ........ 3\n6.2 Bus Operation ........ 4\n6.2.1 Data Read Mode ........ 4\n7.1 Device Registers ........ 6",
    "Foreword\nThis document describes the behaviour of the example storage device family.",
    "6 General Description\n6.1 General Overview\nThe device family provides managed flash storage behind a simple host interface.",
    "6.2 Bus Operation\nThe host drives every transfer and the device answers on the shared data lines.\n6.2.1 Data Read Mode\nData is read in \"HS400\" mode when the host enables the faster timing option.",
    "6.2.1.1 Read Timing Rules\nRead timing depends on the selected bus speed and the configured drive strength.\n6.2.1.2 Read Error Handling\nRead errors are reported through the status register after each failed transfer.",
    "7 Device Register Map\n7.1 Device Registers\nEach register is accessed through dedicated commands issued by the host controller.",
];
