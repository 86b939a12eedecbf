use serde::Serialize;

use crate::domain::{Chunk, OriginTag, TitleSource};

use super::token_estimator::estimate_tokens;

const MIN_TITLE_CHARS: usize = 4;
const MAX_TITLE_WORDS: usize = 15;
const GENERIC_TITLES: &[&str] = &["Tables", "Figures", "Contents"];

/// Aggregate view of the per-section defects the pipeline tolerates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub total_chunks: usize,
    pub total_chars: usize,
    pub estimated_tokens: usize,
    pub split_sections: usize,
    pub with_subtitle: usize,
    pub without_subtitle: usize,
    pub empty_content: usize,
    pub placeholder_titles: usize,
    pub recovered_titles: usize,
    pub inferred_sections: usize,
    pub regex_subsections: usize,
    pub malformed_section_numbers: usize,
    pub oversized_units: usize,
    pub titles_needing_review: usize,
}

impl QualityReport {
    pub fn from_chunks(chunks: &[Chunk], estimate_divisor: usize) -> Self {
        let with_subtitle = count(chunks, |c| c.subtitle.is_some());

        Self {
            total_chunks: chunks.len(),
            total_chars: chunks.iter().map(|c| c.content.chars().count()).sum(),
            estimated_tokens: chunks
                .iter()
                .map(|c| estimate_tokens(&c.content, estimate_divisor))
                .sum(),
            split_sections: first_fragments(chunks, |c| c.is_split),
            with_subtitle,
            without_subtitle: chunks.len() - with_subtitle,
            empty_content: count(chunks, |c| c.content.trim().is_empty()),
            placeholder_titles: first_fragments(chunks, |c| {
                c.title_source == TitleSource::Placeholder
            }),
            recovered_titles: first_fragments(chunks, |c| {
                c.title_source == TitleSource::Recovered
            }),
            inferred_sections: first_fragments(chunks, |c| c.origin == OriginTag::Inferred),
            regex_subsections: first_fragments(chunks, |c| {
                c.origin == OriginTag::RegexSubsection
            }),
            malformed_section_numbers: first_fragments(chunks, |c| {
                c.section_number.is_malformed()
            }),
            oversized_units: count(chunks, |c| c.oversized),
            titles_needing_review: first_fragments(chunks, |c| {
                title_needs_review(&c.section_title)
            }),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.empty_content > 0
            || self.placeholder_titles > 0
            || self.titles_needing_review > 0
            || self.malformed_section_numbers > 0
    }

    pub fn log(&self, document: &str) {
        tracing::info!(
            document,
            chunks = self.total_chunks,
            chars = self.total_chars,
            estimated_tokens = self.estimated_tokens,
            split_sections = self.split_sections,
            with_subtitle = self.with_subtitle,
            "Chunking quality"
        );

        if self.needs_attention() {
            tracing::warn!(
                document,
                empty_content = self.empty_content,
                placeholder_titles = self.placeholder_titles,
                titles_needing_review = self.titles_needing_review,
                malformed_section_numbers = self.malformed_section_numbers,
                oversized_units = self.oversized_units,
                "Chunking produced sections that need review"
            );
        }
    }
}

fn count(chunks: &[Chunk], predicate: impl Fn(&Chunk) -> bool) -> usize {
    chunks.iter().filter(|c| predicate(c)).count()
}

/// Counts sections rather than fragments.
fn first_fragments(chunks: &[Chunk], predicate: impl Fn(&Chunk) -> bool) -> usize {
    chunks
        .iter()
        .filter(|c| c.chunk_index == 0 && predicate(c))
        .count()
}

pub fn title_needs_review(title: &str) -> bool {
    let title = title.trim();

    title.is_empty()
        || title.starts_with("Figure")
        || title.starts_with("Table")
        || GENERIC_TITLES.contains(&title)
        || title.chars().count() < MIN_TITLE_CHARS
        || !title.chars().any(char::is_alphabetic)
        || title.split_whitespace().count() > MAX_TITLE_WORDS
}
