use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::PageReader;

pub const DEFAULT_MAX_SEARCH_PAGES: u32 = 30;

const PAGE_REF_THRESHOLD: usize = 10;
const HEADING_LINE_THRESHOLD: usize = 5;

static DOT_LEADER_PAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}\s*\d+").unwrap());

static NUMBERED_HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\d+(?:\.\d+)?\s+[A-Z]").unwrap());

/// Independent signals used to classify a front-matter page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocPageSignals {
    pub has_contents_header: bool,
    pub page_refs: usize,
    pub heading_lines: usize,
}

impl TocPageSignals {
    pub fn from_text(text: &str) -> Self {
        Self {
            has_contents_header: text.to_lowercase().contains("contents"),
            page_refs: DOT_LEADER_PAGE_REF.find_iter(text).count(),
            heading_lines: NUMBERED_HEADING_LINE.find_iter(text).count(),
        }
    }

    pub fn is_toc(&self) -> bool {
        self.has_contents_header
            || self.page_refs > PAGE_REF_THRESHOLD
            || self.heading_lines > HEADING_LINE_THRESHOLD
    }
}

pub struct TocLocator {
    max_search_pages: u32,
}

impl Default for TocLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEARCH_PAGES)
    }
}

impl TocLocator {
    pub fn new(max_search_pages: u32) -> Self {
        Self { max_search_pages }
    }

    /// Source page indices, in page order, that look like table-of-contents pages.
    pub fn locate(&self, reader: &dyn PageReader) -> Vec<u32> {
        let search_limit = self.max_search_pages.min(reader.total_pages());

        let toc_pages: Vec<u32> = (1..=search_limit)
            .filter(|page| {
                let Some(text) = reader.read_page(*page).filter(|t| !t.trim().is_empty()) else {
                    return false;
                };

                let signals = TocPageSignals::from_text(&text);
                if signals.is_toc() {
                    tracing::debug!(
                        page,
                        header = signals.has_contents_header,
                        page_refs = signals.page_refs,
                        heading_lines = signals.heading_lines,
                        "TOC candidate page"
                    );
                }
                signals.is_toc()
            })
            .collect();

        tracing::info!(count = toc_pages.len(), pages = ?toc_pages, "TOC pages located");
        toc_pages
    }
}
