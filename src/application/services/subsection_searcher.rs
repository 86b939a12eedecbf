use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::PageReader;
use crate::domain::{
    NON_NUMERIC_SENTINEL, PageRange, SectionCandidate, SectionEntry, SectionNumber, SectionOrigin,
};

use super::entry_preprocessor::DEFAULT_LONG_SECTION_THRESHOLD;
use super::page_translator::PageTranslator;

pub const DEFAULT_MAX_SUBSECTION_LEVEL: usize = 3;

const MIN_TITLE_CHARS: usize = 3;

static TRAILING_PAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\.{2,}\s*\d+\s*$").unwrap());

static REPEATED_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Finds `parent.N` headings inside a parent's own page range. Covers sections
/// the printed table of contents does not list.
#[derive(Debug, Clone, Copy)]
pub struct BoundedSubsectionSearcher {
    translator: PageTranslator,
    max_search_level: usize,
    long_section_threshold: u32,
}

impl BoundedSubsectionSearcher {
    pub fn new(translator: PageTranslator) -> Self {
        Self {
            translator,
            max_search_level: DEFAULT_MAX_SUBSECTION_LEVEL,
            long_section_threshold: DEFAULT_LONG_SECTION_THRESHOLD,
        }
    }

    pub fn with_max_search_level(mut self, max_search_level: usize) -> Self {
        self.max_search_level = max_search_level;
        self
    }

    pub fn with_long_section_threshold(mut self, threshold: u32) -> Self {
        self.long_section_threshold = threshold;
        self
    }

    /// Only real TOC entries, shallow enough, with a usable range.
    pub fn is_eligible(&self, entry: &SectionEntry) -> bool {
        !entry.inferred() && entry.level <= self.max_search_level && entry.page_range.is_valid()
    }

    pub fn find_subsections(
        &self,
        parent: &SectionEntry,
        reader: &dyn PageReader,
    ) -> Vec<SectionEntry> {
        let pages = self.translator.read_range(reader, parent.page_range);
        if pages.is_empty() {
            return Vec::new();
        }

        let heading = match Regex::new(&format!(
            r"(?m)^{}\.(\d+)\s+([^\n]{{5,200}}?)[ \t\r]*$",
            regex::escape(parent.section_number.as_str())
        )) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(
                    parent = %parent.section_number,
                    error = %e,
                    "Subsection pattern rejected"
                );
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut found: Vec<SectionCandidate> = Vec::new();

        for (page, text) in &pages {
            for caps in heading.captures_iter(text) {
                let (Some(digit), Some(raw_title)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let Ok(index) = digit.as_str().parse::<u32>() else {
                    continue;
                };

                let title = clean_subsection_title(raw_title.as_str());
                if title.chars().count() < MIN_TITLE_CHARS {
                    continue;
                }

                let number = parent.section_number.child(index);
                if !seen.insert(number.clone()) {
                    continue;
                }

                tracing::debug!(section = %number, title = %title, page, "Subsection found");
                found.push(SectionCandidate {
                    level: parent.level + 1,
                    section_number: number,
                    section_title: title,
                    page_number: *page,
                    origin: SectionOrigin::RegexSubsection {
                        parent: parent.section_number.clone(),
                    },
                });
            }
        }

        found.sort_by_key(|c| c.section_number.last_component().unwrap_or(NON_NUMERIC_SENTINEL));
        log_gaps(&parent.section_number, &found);

        self.bound_to_parent(found, parent.page_range)
    }

    /// Searches every eligible entry and drops subsections whose number is
    /// already known.
    pub fn search_all(
        &self,
        entries: &[SectionEntry],
        reader: &dyn PageReader,
    ) -> Vec<SectionEntry> {
        let found = entries
            .iter()
            .filter(|entry| self.is_eligible(entry))
            .map(|entry| self.find_subsections(entry, reader))
            .collect();

        exclude_known(found, entries)
    }

    fn bound_to_parent(
        &self,
        found: Vec<SectionCandidate>,
        parent_range: PageRange,
    ) -> Vec<SectionEntry> {
        let next_starts: Vec<Option<u32>> = found
            .iter()
            .skip(1)
            .map(|c| Some(c.page_number))
            .chain(std::iter::once(None))
            .collect();

        found
            .into_iter()
            .zip(next_starts)
            .map(|(candidate, next_start)| {
                let start = candidate.page_number;
                let end = match next_start {
                    Some(next) => next.saturating_sub(1).max(start),
                    None => parent_range.end.max(start),
                };
                let mut entry = candidate.into_entry(PageRange::new(start, end));
                entry.is_long = entry.page_count > self.long_section_threshold;
                entry
            })
            .collect()
    }
}

/// Flattens per-parent results in order, skipping numbers present in `known`
/// or already emitted.
pub fn exclude_known(found: Vec<Vec<SectionEntry>>, known: &[SectionEntry]) -> Vec<SectionEntry> {
    let mut seen: HashSet<SectionNumber> = known.iter().map(|e| e.section_number.clone()).collect();
    let parents_with_hits = found.iter().filter(|subs| !subs.is_empty()).count();

    let subsections: Vec<SectionEntry> = found
        .into_iter()
        .flatten()
        .filter(|sub| seen.insert(sub.section_number.clone()))
        .collect();

    tracing::info!(
        parents_with_hits,
        total = subsections.len(),
        "Subsection search complete"
    );
    subsections
}

pub fn clean_subsection_title(raw: &str) -> String {
    let stripped = TRAILING_PAGE_REF.replace(raw.trim(), "");
    REPEATED_WHITESPACE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

fn log_gaps(parent: &SectionNumber, found: &[SectionCandidate]) {
    let indices: Vec<u32> = found
        .iter()
        .filter_map(|c| c.section_number.last_component())
        .collect();

    for pair in indices.windows(2) {
        if pair[1] != pair[0].saturating_add(1) {
            tracing::debug!(
                parent = %parent,
                from = pair[0],
                to = pair[1],
                "Gap in subsection numbering"
            );
        }
    }
}
