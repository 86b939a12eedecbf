use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Sort value for components that are not plain integers (appendix letters,
/// OCR noise). Keeps such entries after every numeric sibling.
pub const NON_NUMERIC_SENTINEL: u32 = u32::MAX;

const APPENDIX_PREFIX: &str = "Appendix ";

/// Dot-separated hierarchical heading number such as `6.6.34.1` or `A.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SectionNumber(String);

impl SectionNumber {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().trim_end_matches('.').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn level(&self) -> usize {
        self.components().count()
    }

    /// Integer path used for ordering; non-numeric components map to
    /// [`NON_NUMERIC_SENTINEL`].
    pub fn sort_key(&self) -> Vec<u32> {
        let stripped = self.0.strip_prefix(APPENDIX_PREFIX).unwrap_or(&self.0);

        stripped
            .trim_matches('.')
            .split('.')
            .map(|part| {
                if !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()) {
                    part.parse().unwrap_or(NON_NUMERIC_SENTINEL)
                } else {
                    NON_NUMERIC_SENTINEL
                }
            })
            .collect()
    }

    /// True when a component is neither an integer nor a leading appendix letter.
    pub fn is_malformed(&self) -> bool {
        let stripped = self.0.strip_prefix(APPENDIX_PREFIX).unwrap_or(&self.0);

        stripped.split('.').enumerate().any(|(idx, part)| {
            let numeric = !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
            let appendix_letter =
                idx == 0 && part.len() == 1 && part.chars().all(|c| c.is_ascii_uppercase());
            !numeric && !appendix_letter
        })
    }

    /// Strict prefixes, shortest first: `6.6.34` yields `6`, `6.6`.
    pub fn ancestors(&self) -> Vec<SectionNumber> {
        let parts: Vec<&str> = self.components().collect();
        (1..parts.len())
            .map(|len| SectionNumber(parts[..len].join(".")))
            .collect()
    }

    pub fn parent(&self) -> Option<SectionNumber> {
        self.0
            .rsplit_once('.')
            .map(|(head, _)| SectionNumber(head.to_string()))
    }

    pub fn child(&self, index: u32) -> SectionNumber {
        SectionNumber(format!("{}.{}", self.0, index))
    }

    pub fn is_descendant_of(&self, ancestor: &SectionNumber) -> bool {
        self.0
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
    }

    pub fn last_component(&self) -> Option<u32> {
        self.components().last().and_then(|part| part.parse().ok())
    }

    pub fn cmp_hierarchical(&self, other: &SectionNumber) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
