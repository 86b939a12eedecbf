use crate::application::ports::PageReader;
use crate::domain::PageRange;

/// Maps printed document page numbers onto source page indices
/// (`source = document + page_offset`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTranslator {
    page_offset: i64,
}

impl PageTranslator {
    pub fn new(page_offset: i64) -> Self {
        Self { page_offset }
    }

    pub fn to_source(&self, document_page: u32) -> Option<u32> {
        let source = i64::from(document_page).saturating_add(self.page_offset);
        u32::try_from(source).ok().filter(|page| *page >= 1)
    }

    /// Number of document pages covered by a source with `source_total` pages.
    pub fn document_page_count(&self, source_total: u32) -> u32 {
        let count = i64::from(source_total).saturating_sub(self.page_offset);
        u32::try_from(count.max(0)).unwrap_or(u32::MAX)
    }

    pub fn read_document_page(
        &self,
        reader: &dyn PageReader,
        document_page: u32,
    ) -> Option<String> {
        self.to_source(document_page)
            .and_then(|source| reader.read_page(source))
            .filter(|text| !text.trim().is_empty())
    }

    /// Readable pages of `range`, keyed by document page number, in page order.
    pub fn read_range(&self, reader: &dyn PageReader, range: PageRange) -> Vec<(u32, String)> {
        range
            .pages()
            .filter_map(|page| {
                self.read_document_page(reader, page)
                    .map(|text| (page, text))
            })
            .collect()
    }
}
