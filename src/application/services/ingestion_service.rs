use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{DocumentLoader, DocumentLoaderError};
use crate::domain::{Chunk, Document, DocumentId};

use super::chunking_pipeline::{ChunkingError, ChunkingPipeline};
use super::quality_report::QualityReport;

pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub document_id: DocumentId,
    pub filename: String,
    pub total_pages: u32,
    pub toc_pages: Vec<u32>,
    /// Chunks produced before the minimum content filter.
    pub unfiltered_chunks: usize,
    /// Quality of every chunk the pipeline produced, before filtering.
    pub quality: QualityReport,
    pub chunks: Vec<Chunk>,
}

pub struct IngestionService<L: ?Sized>
where
    L: DocumentLoader,
{
    loader: Arc<L>,
    pipeline: ChunkingPipeline,
    min_content_length: usize,
}

impl<L: ?Sized> IngestionService<L>
where
    L: DocumentLoader,
{
    pub fn new(loader: Arc<L>, pipeline: ChunkingPipeline) -> Self {
        Self {
            loader,
            pipeline,
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
        }
    }

    pub fn with_min_content_length(mut self, min_content_length: usize) -> Self {
        self.min_content_length = min_content_length;
        self
    }

    #[tracing::instrument(
        skip(self, data, document),
        fields(document_id = %document.id.as_uuid(), filename = %document.filename)
    )]
    pub async fn ingest(
        &self,
        data: &[u8],
        document: Document,
    ) -> Result<IngestionReport, IngestionError> {
        let reader = self.loader.load(data, &document).await?;
        let total_pages = reader.total_pages();

        let outcome = self
            .pipeline
            .run(document.id, &document.filename, reader)
            .await?;

        let unfiltered_chunks = outcome.chunks.len();
        let chunks: Vec<Chunk> = outcome
            .chunks
            .into_iter()
            .filter(|chunk| chunk.content.chars().count() >= self.min_content_length)
            .collect();

        tracing::info!(
            kept = chunks.len(),
            dropped = unfiltered_chunks - chunks.len(),
            min_content_length = self.min_content_length,
            "Minimum content filter applied"
        );

        if chunks.is_empty() {
            return Err(IngestionError::NoChunksAfterFiltering {
                document: document.filename,
                min_content_length: self.min_content_length,
            });
        }

        Ok(IngestionReport {
            document_id: document.id,
            filename: document.filename,
            total_pages,
            toc_pages: outcome.toc_pages,
            unfiltered_chunks,
            quality: outcome.quality,
            chunks,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("loading: {0}")]
    Loading(#[from] DocumentLoaderError),
    #[error("chunking: {0}")]
    Chunking(#[from] ChunkingError),
    #[error("no chunks of {document} reached {min_content_length} characters")]
    NoChunksAfterFiltering {
        document: String,
        min_content_length: usize,
    },
}
