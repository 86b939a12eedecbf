use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Chunk, DocumentId, EnrichedSection};

use super::token_estimator::{
    DEFAULT_TOKEN_ESTIMATE_DIVISOR, estimate_tokens, estimate_tokens_for_chars,
};

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const SEPARATOR_CHARS: usize = 2;

static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub max_tokens: usize,
    pub min_tokens: usize,
    pub overlap_tokens: usize,
    pub estimate_divisor: usize,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            min_tokens: 100,
            overlap_tokens: 50,
            estimate_divisor: DEFAULT_TOKEN_ESTIMATE_DIVISOR,
        }
    }
}

impl TokenBudget {
    pub fn fits_chars(&self, char_count: usize) -> bool {
        estimate_tokens_for_chars(char_count, self.estimate_divisor) <= self.max_tokens
    }

    pub fn overlap_chars(&self) -> usize {
        self.overlap_tokens.saturating_mul(self.estimate_divisor.max(1))
    }

    fn min_chars(&self) -> usize {
        self.min_tokens.saturating_mul(self.estimate_divisor.max(1))
    }

    fn max_chars(&self) -> usize {
        self.max_tokens
            .saturating_add(1)
            .saturating_mul(self.estimate_divisor.max(1))
            .saturating_sub(1)
    }
}

/// One piece of a split section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Characters at the head of `text` repeated from the previous fragment.
    pub seed_chars: usize,
    pub oversized: bool,
}

impl Fragment {
    fn fresh_text(&self) -> &str {
        if self.seed_chars == 0 {
            return &self.text;
        }
        let skip = self.seed_chars + SEPARATOR_CHARS;
        match self.text.char_indices().nth(skip) {
            Some((idx, _)) => &self.text[idx..],
            None => "",
        }
    }
}

#[derive(Default)]
struct FragmentBuilder {
    text: String,
    chars: usize,
    seed_chars: usize,
    has_fresh: bool,
}

impl FragmentBuilder {
    fn seeded(seed: &str) -> Self {
        let chars = seed.chars().count();
        Self {
            text: seed.to_string(),
            chars,
            seed_chars: chars,
            has_fresh: false,
        }
    }

    fn chars_with(&self, unit_chars: usize) -> usize {
        if self.chars == 0 {
            unit_chars
        } else {
            self.chars + SEPARATOR_CHARS + unit_chars
        }
    }

    fn push(&mut self, unit: &str, unit_chars: usize) {
        if self.chars > 0 {
            self.text.push_str(PARAGRAPH_SEPARATOR);
        }
        self.chars = self.chars_with(unit_chars);
        self.text.push_str(unit);
        self.has_fresh = true;
    }

    fn finish(self) -> Fragment {
        Fragment {
            text: self.text,
            seed_chars: self.seed_chars,
            oversized: false,
        }
    }
}

/// Splits sections whose content exceeds the token budget into overlapping,
/// budget-bounded fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelligentTruncator {
    budget: TokenBudget,
}

impl IntelligentTruncator {
    pub fn new(budget: TokenBudget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    pub fn truncate(&self, section: &EnrichedSection, document_id: DocumentId) -> Vec<Chunk> {
        let estimated = estimate_tokens(&section.content, self.budget.estimate_divisor);
        if estimated <= self.budget.max_tokens {
            return vec![Chunk::from_section(
                section,
                document_id,
                section.content.clone(),
                0,
                1,
                false,
            )];
        }

        let fragments = self.split_content(&section.content);
        let total = u32::try_from(fragments.len()).unwrap_or(u32::MAX);

        tracing::debug!(
            section = %section.entry.section_number,
            estimated_tokens = estimated,
            fragments = fragments.len(),
            "Section split"
        );

        fragments
            .into_iter()
            .zip(0u32..)
            .map(|(fragment, index)| {
                if fragment.oversized {
                    tracing::warn!(
                        section = %section.entry.section_number,
                        chunk_index = index,
                        chars = fragment.text.chars().count(),
                        "Indivisible unit exceeds token budget"
                    );
                }
                let mut chunk = Chunk::from_section(
                    section,
                    document_id,
                    fragment.text,
                    index,
                    total,
                    fragment.oversized,
                );
                chunk.is_split = true;
                chunk
            })
            .collect()
    }

    pub fn split_content(&self, content: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut current = FragmentBuilder::default();

        for unit in self.units(content) {
            let unit_chars = unit.chars().count();

            if !self.budget.fits_chars(unit_chars) {
                if current.has_fresh {
                    fragments.push(current.finish());
                }
                fragments.push(Fragment {
                    text: unit.to_string(),
                    seed_chars: 0,
                    oversized: true,
                });
                current = FragmentBuilder::seeded(char_suffix(unit, self.budget.overlap_chars()));
                continue;
            }

            if self.budget.fits_chars(current.chars_with(unit_chars)) {
                current.push(unit, unit_chars);
                continue;
            }

            if current.has_fresh {
                let closed = current.finish();
                current = FragmentBuilder::seeded(char_suffix(
                    &closed.text,
                    self.budget.overlap_chars(),
                ));
                fragments.push(closed);
            }

            if !self.budget.fits_chars(current.chars_with(unit_chars)) {
                current = FragmentBuilder::default();
            }
            current.push(unit, unit_chars);
        }

        if current.has_fresh {
            fragments.push(current.finish());
        }

        self.widen_short_tail(&mut fragments);
        fragments
    }

    /// Paragraphs, with paragraphs over budget broken into sentences.
    fn units<'a>(&self, content: &'a str) -> Vec<&'a str> {
        content
            .split(PARAGRAPH_SEPARATOR)
            .filter(|paragraph| !paragraph.trim().is_empty())
            .flat_map(|paragraph| {
                if self.budget.fits_chars(paragraph.chars().count()) {
                    vec![paragraph]
                } else {
                    split_sentences(paragraph)
                }
            })
            .collect()
    }

    fn widen_short_tail(&self, fragments: &mut [Fragment]) {
        let [.., previous, last] = fragments else {
            return;
        };
        if previous.oversized || last.oversized {
            return;
        }

        let last_chars = last.text.chars().count();
        let min_chars = self.budget.min_chars();
        if last_chars >= min_chars {
            return;
        }

        let fresh = last.fresh_text().to_string();
        let fresh_chars = fresh.chars().count();
        let room = self
            .budget
            .max_chars()
            .saturating_sub(fresh_chars + SEPARATOR_CHARS);
        let wanted = min_chars.saturating_sub(fresh_chars + SEPARATOR_CHARS);
        let seed_chars = wanted
            .max(last.seed_chars)
            .min(room)
            .min(previous.text.chars().count());

        if seed_chars <= last.seed_chars {
            return;
        }

        let seed = char_suffix(&previous.text, seed_chars);
        last.text = format!("{seed}{PARAGRAPH_SEPARATOR}{fresh}");
        last.seed_chars = seed_chars;
    }
}

/// Breaks after `.`, `!` or `?` followed by whitespace.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(paragraph) {
        let end = boundary.start() + 1;
        let sentence = paragraph[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = boundary.end();
    }

    let rest = paragraph[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

pub(crate) fn char_suffix(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    match text.char_indices().nth(total - max_chars) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
