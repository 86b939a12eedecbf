use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentLoader, DocumentLoaderError, PageReader};
use crate::domain::{ContentType, Document};

use super::in_memory_page_reader::InMemoryPageReader;
use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfPageAdapter;

struct ExtractedPages {
    pages: BTreeMap<u32, String>,
    page_count: u32,
}

impl PdfPageAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &std::path::Path) -> Result<ExtractedPages, DocumentLoaderError> {
        let mut doc = PdfDocument::open(path).map_err(|e| {
            DocumentLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}"))
        })?;

        let page_count = doc.page_count().map_err(|e| {
            DocumentLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = BTreeMap::new();

        for page_index in 0..page_count {
            let page_number = u32::try_from(page_index + 1).unwrap_or(u32::MAX);
            match doc.extract_text(page_index) {
                Ok(text) => {
                    let text = sanitize_extracted_text(&text);
                    if !text.is_empty() {
                        pages.insert(page_number, text);
                    }
                }
                Err(e) => {
                    tracing::warn!(page = page_number, error = %e, "Page text extraction failed");
                }
            }
        }

        Ok(ExtractedPages {
            pages,
            page_count: u32::try_from(page_count).unwrap_or(u32::MAX),
        })
    }
}

#[async_trait]
impl DocumentLoader for PdfPageAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Arc<dyn PageReader>, DocumentLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(DocumentLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            DocumentLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            DocumentLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let filename = document.filename.clone();

        let extracted = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| DocumentLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| DocumentLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let readable = extracted.pages.len();
        tracing::info!(
            page_count = extracted.page_count,
            readable,
            "PDF text extraction complete"
        );

        if readable == 0 {
            return Err(DocumentLoaderError::NoTextFound(filename));
        }

        Ok(Arc::new(InMemoryPageReader::with_total_pages(
            extracted.pages,
            extracted.page_count,
        )))
    }
}
