use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{DocumentLoader, DocumentLoaderError, PageReader};
use crate::domain::{ContentType, Document};

use super::in_memory_page_reader::InMemoryPageReader;
use super::text_sanitizer::sanitize_extracted_text;

/// UTF-8 text with pages separated by form feeds.
pub struct PlainTextPageAdapter;

#[async_trait]
impl DocumentLoader for PlainTextPageAdapter {
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Arc<dyn PageReader>, DocumentLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(DocumentLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = std::str::from_utf8(data)
            .map_err(|e| DocumentLoaderError::ExtractionFailed(e.to_string()))?;

        let reader =
            InMemoryPageReader::from_form_feed_text(text).map_pages(sanitize_extracted_text);
        if reader.non_blank_pages() == 0 {
            return Err(DocumentLoaderError::NoTextFound(document.filename.clone()));
        }

        tracing::debug!(pages = reader.total_pages(), "Plain text document split into pages");
        Ok(Arc::new(reader))
    }
}
