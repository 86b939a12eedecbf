use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Document;

use super::PageReader;

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Arc<dyn PageReader>, DocumentLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
