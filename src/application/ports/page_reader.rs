/// Read access to the plain text of a source document, one page at a time.
///
/// Indices are 1-based in the source document's own numbering. Translation
/// from printed document page numbers happens in the chunking services.
pub trait PageReader: Send + Sync {
    /// Text of the page, or `None` when it is out of range, unreadable or blank.
    fn read_page(&self, source_index: u32) -> Option<String>;

    fn total_pages(&self) -> u32;
}
