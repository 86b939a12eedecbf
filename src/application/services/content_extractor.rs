use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::PageReader;
use crate::domain::{EnrichedSection, SectionEntry, SectionNumber, SectionOrigin, TitleSource};

use super::boilerplate::BoilerplateRules;
use super::page_translator::PageTranslator;

const SUBTITLE_WINDOW_CHARS: usize = 500;
const SUBTITLE_SCAN_LINES: usize = 10;
const TITLE_WINDOW_CHARS: usize = 2000;
const MAX_RECOVERED_TITLE_CHARS: usize = 80;
const CONTINUED_HEADING_MAX_CHARS: usize = 80;

static QUOTED_SUBTITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[^\n]{0,100}?["\u{201C}]([^"\u{201D}]{2,50})["\u{201D}]"#).unwrap()
});

static MODE_NAME_SUBTITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\n]{0,100}?\b([A-Z]{2,}[0-9]{2,})\b").unwrap());

static SUBTITLE_EXCLUSIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)Page \d+",
        r"(?i)^\d+\s*$",
        r"(?i)Copyright",
        r"(?i)All rights reserved",
        r"(?i)^Table \d+",
        r"(?i)^Figure \d+",
        r"(?i)^\d+\.\d+",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static PAGE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^Page \d+$").unwrap());

static CONTINUED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(cont['\u{2018}\u{2019}]?d\)").unwrap());

static REGISTER_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)+\s+[A-Z_]+(\s+\[[\d:]+\])?$").unwrap());

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static EXCESS_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static TRAILING_LINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,;:]\s*$").unwrap());

static CONTINUED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\(cont['\u{2018}\u{2019}]?d\)\s*$").unwrap());

static TABLE_ROW_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+:").unwrap());

/// Reads the text of each section's page range, detects a subtitle, cleans the
/// body and recovers real titles for inferred ancestors.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    translator: PageTranslator,
    rules: BoilerplateRules,
}

impl ContentExtractor {
    pub fn new(translator: PageTranslator, rules: BoilerplateRules) -> Self {
        Self { translator, rules }
    }

    pub fn extract(&self, entry: SectionEntry, reader: &dyn PageReader) -> EnrichedSection {
        let full_text = self
            .translator
            .read_range(reader, entry.page_range)
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n\n");

        if full_text.is_empty() {
            tracing::warn!(
                section = %entry.section_number,
                start = entry.page_range.start,
                end = entry.page_range.end,
                "No content extracted"
            );
        }

        let subtitle = self.detect_subtitle(&full_text, &entry.section_number);
        let content = self.clean_content(&full_text, &entry.section_number);
        let mut entry = entry;

        let title_source = match entry.origin {
            SectionOrigin::Toc { .. } => TitleSource::Toc,
            SectionOrigin::RegexSubsection { .. } => TitleSource::Subsection,
            SectionOrigin::Inferred => {
                let recovered = if entry.has_placeholder_title() {
                    recover_title(&full_text, &entry.section_number)
                } else {
                    None
                };

                match recovered {
                    Some(title) => {
                        tracing::debug!(
                            section = %entry.section_number,
                            title = %title,
                            "Recovered title"
                        );
                        entry.section_title = title;
                        TitleSource::Recovered
                    }
                    None => TitleSource::Placeholder,
                }
            }
        };

        tracing::debug!(
            section = %entry.section_number,
            chars = content.chars().count(),
            subtitle = ?subtitle,
            "Content extracted"
        );

        EnrichedSection {
            entry,
            content,
            subtitle,
            title_source,
        }
    }

    pub fn detect_subtitle(&self, text: &str, section_number: &SectionNumber) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let window = char_prefix(text, SUBTITLE_WINDOW_CHARS);

        if let Some(caps) = QUOTED_SUBTITLE.captures(window) {
            return caps.get(1).map(|m| m.as_str().trim().to_string());
        }

        if let Some(caps) = MODE_NAME_SUBTITLE.captures(window) {
            return caps.get(1).map(|m| m.as_str().trim().to_string());
        }

        window
            .lines()
            .take(SUBTITLE_SCAN_LINES)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.starts_with(section_number.as_str()))
            .filter(|line| !self.rules.is_header(line))
            .filter(|line| !SUBTITLE_EXCLUSIONS.iter().any(|re| re.is_match(line)))
            .find(|line| looks_like_subtitle(line))
            .map(str::to_string)
    }

    pub fn clean_content(&self, text: &str, section_number: &SectionNumber) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut in_leading_blank = true;

        for line in text.split('\n') {
            let trimmed = line.trim();

            if in_leading_blank && trimmed.is_empty() {
                continue;
            }
            if self.rules.is_header(trimmed)
                || PAGE_LINE.is_match(trimmed)
                || self.rules.is_footer(trimmed)
                || is_bare_number(trimmed, section_number)
                || is_continued_heading(trimmed)
                || REGISTER_HEADING.is_match(trimmed)
            {
                continue;
            }

            if !trimmed.is_empty() {
                in_leading_blank = false;
            }
            kept.push(line);
        }

        let without_prefix = kept
            .into_iter()
            .map(|line| strip_number_prefix(line, section_number))
            .collect::<Vec<_>>()
            .join("\n");

        let without_footers = self.rules.strip_inline_footers(&without_prefix);
        let collapsed = EXCESS_NEWLINES.replace_all(&without_footers, "\n\n");
        let collapsed = EXCESS_SPACES.replace_all(&collapsed, " ");
        let collapsed = TRAILING_LINE_SPACE.replace_all(&collapsed, "\n");

        collapsed.trim().to_string()
    }
}

/// Looks for `<number> <Title>` in the first part of `text`; only the first
/// sighting is considered.
pub fn recover_title(text: &str, section_number: &SectionNumber) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let window = char_prefix(text, TITLE_WINDOW_CHARS);

    let pattern = Regex::new(&format!(
        r"(?m)(?:^|\s){}\s+([A-Z][^\n]{{2,80}}?)(?:\n|$|\.\.\.)",
        regex::escape(section_number.as_str())
    ))
    .ok()?;

    let raw = pattern.captures(window)?.get(1)?.as_str().trim();
    let title = TRAILING_PUNCTUATION.replace(raw, "");
    let title = CONTINUED_SUFFIX.replace(&title, "").trim().to_string();

    let char_count = title.chars().count();
    let has_letter = title.chars().any(char::is_alphabetic);
    let all_upper = has_letter && !title.chars().any(char::is_lowercase);

    let rejected = char_count > MAX_RECOVERED_TITLE_CHARS
        || !has_letter
        || title.starts_with("Page ")
        || TABLE_ROW_PREFIX.is_match(&title)
        || title.matches(':').count() > 1
        || (char_count < 5 && !all_upper);

    (!rejected).then_some(title)
}

fn looks_like_subtitle(line: &str) -> bool {
    let len = line.chars().count();
    let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
    let spaces = line.matches(' ').count();

    (5..=50).contains(&len) && starts_upper && (!line.ends_with('.') || spaces <= 5)
}

fn is_bare_number(line: &str, section_number: &SectionNumber) -> bool {
    line.strip_prefix(section_number.as_str())
        .is_some_and(|rest| rest.trim_start_matches('.').trim().is_empty())
}

fn is_continued_heading(line: &str) -> bool {
    CONTINUED_MARKER.is_match(line)
        && line.chars().count() < CONTINUED_HEADING_MAX_CHARS
        && !line.ends_with('.')
}

fn strip_number_prefix<'a>(line: &'a str, section_number: &SectionNumber) -> &'a str {
    let leading = line.trim_start();
    match leading.strip_prefix(section_number.as_str()) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

pub(crate) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
