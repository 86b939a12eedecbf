mod document_loader;
mod page_reader;

pub use document_loader::{DocumentLoader, DocumentLoaderError};
pub use page_reader::PageReader;
