use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{RawTocEntry, SectionNumber, TocPattern};

// Numeric path with at least two components, or an appendix letter path.
const SECTION: &str = r"(\d+(?:\.\d+)+|[A-Z](?:\.\d+)+)\.?";

static DOT_LEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^\s*{SECTION}\s+([A-Z][^.\n]{{5,150}}?)\s*\.{{3,}}\s*(\d+)[ \t\r]*$"
    ))
    .unwrap()
});

static TRAILING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^\s*{SECTION}\s+([A-Z][^\n]{{5,150}}?)\s+(\d+)[ \t\r]*$"
    ))
    .unwrap()
});

static BRACKETED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^\s*{SECTION}\s+([A-Z][^\n]{{5,150}}?)\[\d+\]\s*\.*\s*(\d+)[ \t\r]*$"
    ))
    .unwrap()
});

static LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{SECTION}\s+([A-Z].*?)\s+\.{{2,}}\s*(\d+)")).unwrap()
});

static DOT_LEADER_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\.{2,}\s*").unwrap());

static REPEATED_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

fn pattern_regex(pattern: TocPattern) -> &'static Regex {
    match pattern {
        TocPattern::DotLeader => &*DOT_LEADER,
        TocPattern::TrailingNumber => &*TRAILING_NUMBER,
        TocPattern::BracketedField => &*BRACKETED_FIELD,
        TocPattern::Loose => &*LOOSE,
    }
}

pub fn normalize_toc_title(raw: &str) -> String {
    let without_leaders = DOT_LEADER_FRAGMENT.replace_all(raw.trim(), " ");
    REPEATED_WHITESPACE
        .replace_all(&without_leaders, " ")
        .trim()
        .to_string()
}

#[derive(Default)]
pub struct TocEntryExtractor;

impl TocEntryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses `(source page, text)` pairs into entries, deduplicated by
    /// section number. The first sighting in page order, then pattern order,
    /// wins; later duplicates (e.g. from an index) are discarded.
    pub fn extract(&self, toc_pages: &[(u32, String)]) -> Vec<RawTocEntry> {
        let candidates: Vec<RawTocEntry> = toc_pages
            .iter()
            .flat_map(|(page, text)| Self::extract_page(*page, text))
            .collect();
        let candidate_count = candidates.len();

        let mut seen = HashSet::new();
        let entries: Vec<RawTocEntry> = candidates
            .into_iter()
            .filter(|entry| seen.insert(entry.section_number.clone()))
            .collect();

        tracing::info!(
            candidates = candidate_count,
            unique = entries.len(),
            "TOC entries extracted"
        );
        for entry in entries.iter().take(5) {
            tracing::debug!(
                section = %entry.section_number,
                title = %entry.section_title,
                page = entry.page_number,
                "Sample TOC entry"
            );
        }

        entries
    }

    fn extract_page(page: u32, text: &str) -> Vec<RawTocEntry> {
        TocPattern::ALL
            .into_iter()
            .flat_map(|pattern| {
                pattern_regex(pattern)
                    .captures_iter(text)
                    .filter_map(move |caps| {
                        let number = SectionNumber::new(caps.get(1)?.as_str());
                        let title = normalize_toc_title(caps.get(2)?.as_str());
                        let page_number = caps.get(3)?.as_str().parse::<u32>().ok()?;
                        if title.is_empty() {
                            return None;
                        }
                        if number.is_malformed() {
                            tracing::warn!(section = %number, page, "Malformed section number");
                        }
                        Some(RawTocEntry::new(number, title, page_number, page, pattern))
                    })
            })
            .collect()
    }
}
