use std::collections::BTreeMap;

use crate::application::ports::PageReader;

pub const PAGE_BREAK: char = '\u{000C}';

/// Page texts held in memory, keyed by 1-based source index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageReader {
    pages: BTreeMap<u32, String>,
    total_pages: u32,
}

impl InMemoryPageReader {
    /// Page `n` of the result is `pages[n - 1]`.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: BTreeMap<u32, String> =
            (1u32..).zip(pages.into_iter().map(Into::into)).collect();
        let total_pages = pages.keys().next_back().copied().unwrap_or(0);
        Self { pages, total_pages }
    }

    /// Pages that are missing from `pages` read as unavailable.
    pub fn with_total_pages(pages: BTreeMap<u32, String>, total_pages: u32) -> Self {
        Self { pages, total_pages }
    }

    /// Splits on form feeds, the page separator of `pdftotext`-style dumps.
    pub fn from_form_feed_text(text: &str) -> Self {
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
        Self::from_pages(text.split(PAGE_BREAK))
    }

    pub fn map_pages(self, f: impl Fn(&str) -> String) -> Self {
        let pages = self
            .pages
            .into_iter()
            .map(|(index, text)| (index, f(&text)))
            .collect();
        Self {
            pages,
            total_pages: self.total_pages,
        }
    }

    pub fn non_blank_pages(&self) -> usize {
        self.pages.values().filter(|t| !t.trim().is_empty()).count()
    }
}

impl PageReader for InMemoryPageReader {
    fn read_page(&self, source_index: u32) -> Option<String> {
        self.pages
            .get(&source_index)
            .filter(|text| !text.trim().is_empty())
            .cloned()
    }

    fn total_pages(&self) -> u32 {
        self.total_pages
    }
}
