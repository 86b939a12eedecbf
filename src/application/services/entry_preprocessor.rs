use std::collections::HashSet;

use crate::domain::{PageRange, RawTocEntry, SectionCandidate, SectionEntry, SectionNumber};

pub const DEFAULT_LONG_SECTION_THRESHOLD: u32 = 10;

/// Stable sort by hierarchical section number.
pub fn sort_entries(mut entries: Vec<RawTocEntry>) -> Vec<RawTocEntry> {
    entries.sort_by(|a, b| a.section_number.cmp_hierarchical(&b.section_number));
    entries
}

/// Appends a synthesized entry for every missing strict prefix of an
/// existing section number. Its page is the earliest page of its children.
pub fn infer_missing_ancestors(entries: Vec<RawTocEntry>) -> Vec<SectionCandidate> {
    let mut known: HashSet<SectionNumber> =
        entries.iter().map(|e| e.section_number.clone()).collect();
    let mut synthesized = Vec::new();

    for entry in &entries {
        for ancestor in entry.section_number.ancestors() {
            if known.contains(&ancestor) {
                continue;
            }

            let first_child_page = entries
                .iter()
                .filter(|e| e.section_number.is_descendant_of(&ancestor))
                .map(|e| e.page_number)
                .min();

            if let Some(page) = first_child_page {
                tracing::debug!(section = %ancestor, page, "Inferred missing ancestor");
                known.insert(ancestor.clone());
                synthesized.push(SectionCandidate::inferred(ancestor, page));
            }
        }
    }

    tracing::info!(count = synthesized.len(), "Inferred missing ancestor sections");

    entries
        .into_iter()
        .map(SectionCandidate::from)
        .chain(synthesized)
        .collect()
}

/// Orders candidates by page (ties by section number) and gives each one the
/// pages up to the next candidate's start. The last one runs to
/// `total_document_pages`.
pub fn assign_page_ranges(
    mut candidates: Vec<SectionCandidate>,
    total_document_pages: u32,
) -> Vec<SectionEntry> {
    candidates.sort_by(|a, b| {
        a.page_number
            .cmp(&b.page_number)
            .then_with(|| a.section_number.cmp_hierarchical(&b.section_number))
    });

    let next_starts: Vec<Option<u32>> = candidates
        .iter()
        .skip(1)
        .map(|c| Some(c.page_number))
        .chain(std::iter::once(None))
        .collect();

    candidates
        .into_iter()
        .zip(next_starts)
        .map(|(candidate, next_start)| {
            let start = candidate.page_number;
            let end = match next_start {
                Some(next) => next.saturating_sub(1).max(start),
                None => {
                    if start > total_document_pages {
                        tracing::warn!(
                            section = %candidate.section_number,
                            start,
                            total_document_pages,
                            "Last section starts beyond the document end"
                        );
                    }
                    total_document_pages.max(start)
                }
            };
            candidate.into_entry(PageRange::new(start, end))
        })
        .collect()
}

pub fn flag_long_sections(entries: Vec<SectionEntry>, threshold: u32) -> Vec<SectionEntry> {
    let flagged: Vec<SectionEntry> = entries
        .into_iter()
        .map(|mut entry| {
            entry.page_count = entry.page_range.page_count();
            entry.is_long = entry.page_count > threshold;
            if entry.is_long {
                tracing::debug!(
                    section = %entry.section_number,
                    pages = entry.page_count,
                    "Long section"
                );
            }
            entry
        })
        .collect();

    tracing::info!(
        threshold,
        count = flagged.iter().filter(|e| e.is_long).count(),
        "Flagged long sections"
    );
    flagged
}

pub struct EntryPreprocessor {
    long_section_threshold: u32,
}

impl Default for EntryPreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_SECTION_THRESHOLD)
    }
}

impl EntryPreprocessor {
    pub fn new(long_section_threshold: u32) -> Self {
        Self {
            long_section_threshold,
        }
    }

    /// Sort, infer ancestors, assign page ranges, flag long sections.
    pub fn process(
        &self,
        entries: Vec<RawTocEntry>,
        total_document_pages: u32,
    ) -> Vec<SectionEntry> {
        let raw_count = entries.len();
        let sorted = sort_entries(entries);
        let candidates = infer_missing_ancestors(sorted);
        let ranged = assign_page_ranges(candidates, total_document_pages);
        let processed = flag_long_sections(ranged, self.long_section_threshold);

        tracing::info!(
            raw = raw_count,
            total = processed.len(),
            "Preprocessing complete"
        );
        processed
    }
}
