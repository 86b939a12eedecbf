mod composite_document_loader;
mod in_memory_page_reader;
mod pdf_page_adapter;
mod plain_text_page_adapter;
mod text_sanitizer;

pub use composite_document_loader::CompositeDocumentLoader;
pub use in_memory_page_reader::{InMemoryPageReader, PAGE_BREAK};
pub use pdf_page_adapter::PdfPageAdapter;
pub use plain_text_page_adapter::PlainTextPageAdapter;
pub use text_sanitizer::sanitize_extracted_text;
