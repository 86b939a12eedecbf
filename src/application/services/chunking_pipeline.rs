use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::ports::PageReader;
use crate::domain::{Chunk, ChunkOrder, DocumentId, SectionEntry, sort_chunks};

use super::boilerplate::BoilerplateRules;
use super::content_extractor::ContentExtractor;
use super::entry_preprocessor::{DEFAULT_LONG_SECTION_THRESHOLD, EntryPreprocessor};
use super::page_translator::PageTranslator;
use super::quality_report::QualityReport;
use super::section_path::SectionPathBuilder;
use super::subsection_searcher::{
    BoundedSubsectionSearcher, DEFAULT_MAX_SUBSECTION_LEVEL, exclude_known,
};
use super::toc_extractor::TocEntryExtractor;
use super::toc_locator::{DEFAULT_MAX_SEARCH_PAGES, TocLocator};
use super::truncator::{IntelligentTruncator, TokenBudget};

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_PROCESSING_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub max_search_pages: u32,
    pub long_section_threshold: u32,
    pub page_offset: i64,
    /// Derived from the reader when unset.
    pub total_document_pages: Option<u32>,
    pub max_subsection_level: usize,
    pub token_budget: TokenBudget,
    pub chunk_order: ChunkOrder,
    pub concurrency: usize,
    pub processing_timeout: Duration,
    pub boilerplate: BoilerplateRules,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_search_pages: DEFAULT_MAX_SEARCH_PAGES,
            long_section_threshold: DEFAULT_LONG_SECTION_THRESHOLD,
            page_offset: 0,
            total_document_pages: None,
            max_subsection_level: DEFAULT_MAX_SUBSECTION_LEVEL,
            token_budget: TokenBudget::default(),
            chunk_order: ChunkOrder::default(),
            concurrency: DEFAULT_CONCURRENCY,
            processing_timeout: DEFAULT_PROCESSING_TIMEOUT,
            boilerplate: BoilerplateRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkingOutcome {
    pub chunks: Vec<Chunk>,
    pub quality: QualityReport,
    pub toc_pages: Vec<u32>,
    pub toc_entries: usize,
    pub inferred_entries: usize,
    pub subsections: usize,
    pub total_document_pages: u32,
}

struct FrontMatter {
    toc_pages: Vec<u32>,
    toc_entries: usize,
    entries: Vec<SectionEntry>,
    total_document_pages: u32,
}

pub struct ChunkingPipeline {
    config: ChunkingConfig,
}

impl ChunkingPipeline {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(
        skip(self, document_id, reader),
        fields(document_id = %document_id.as_uuid())
    )]
    pub async fn run(
        &self,
        document_id: DocumentId,
        document: &str,
        reader: Arc<dyn PageReader>,
    ) -> Result<ChunkingOutcome, ChunkingError> {
        let budget = self.config.processing_timeout;

        tokio::time::timeout(budget, self.run_stages(document_id, document, reader))
            .await
            .map_err(|_| ChunkingError::Timeout {
                document: document.to_string(),
                budget_secs: budget.as_secs(),
            })?
    }

    async fn run_stages(
        &self,
        document_id: DocumentId,
        document: &str,
        reader: Arc<dyn PageReader>,
    ) -> Result<ChunkingOutcome, ChunkingError> {
        let translator = PageTranslator::new(self.config.page_offset);
        let front = self.read_front_matter(document, translator, Arc::clone(&reader)).await?;
        let inferred_entries = front.entries.iter().filter(|e| e.inferred()).count();

        let searcher = BoundedSubsectionSearcher::new(translator)
            .with_max_search_level(self.config.max_subsection_level)
            .with_long_section_threshold(self.config.long_section_threshold);
        let parents: Vec<SectionEntry> = front
            .entries
            .iter()
            .filter(|entry| searcher.is_eligible(entry))
            .cloned()
            .collect();
        let search_reader = Arc::clone(&reader);
        let found = fan_out(parents, self.config.concurrency, move |parent| {
            searcher.find_subsections(&parent, search_reader.as_ref())
        })
        .await?;
        let subsections = exclude_known(found, &front.entries);
        let subsection_count = subsections.len();

        let extractor = ContentExtractor::new(translator, self.config.boilerplate.clone());
        let sections: Vec<SectionEntry> = front.entries.into_iter().chain(subsections).collect();
        let extract_reader = Arc::clone(&reader);
        let enriched = fan_out(sections, self.config.concurrency, move |entry| {
            extractor.extract(entry, extract_reader.as_ref())
        })
        .await?;
        tracing::info!(sections = enriched.len(), "Content extraction complete");

        let paths = SectionPathBuilder::from_sections(&enriched);
        let truncator = IntelligentTruncator::new(self.config.token_budget);
        let fragments = fan_out(enriched, self.config.concurrency, move |section| {
            truncator.truncate(&section, document_id)
        })
        .await?;

        let mut chunks: Vec<Chunk> = fragments
            .into_iter()
            .flatten()
            .map(|chunk| paths.apply(chunk))
            .collect();
        sort_chunks(&mut chunks, self.config.chunk_order);

        let quality =
            QualityReport::from_chunks(&chunks, self.config.token_budget.estimate_divisor);
        quality.log(document);

        Ok(ChunkingOutcome {
            chunks,
            quality,
            toc_pages: front.toc_pages,
            toc_entries: front.toc_entries,
            inferred_entries,
            subsections: subsection_count,
            total_document_pages: front.total_document_pages,
        })
    }

    /// Locate, extract and preprocess. Fails the document when no table of
    /// contents or no entries are found.
    async fn read_front_matter(
        &self,
        document: &str,
        translator: PageTranslator,
        reader: Arc<dyn PageReader>,
    ) -> Result<FrontMatter, ChunkingError> {
        let locator = TocLocator::new(self.config.max_search_pages);
        let preprocessor = EntryPreprocessor::new(self.config.long_section_threshold);
        let total_override = self.config.total_document_pages;
        let document = document.to_string();

        tokio::task::spawn_blocking(move || {
            let toc_pages = locator.locate(reader.as_ref());
            if toc_pages.is_empty() {
                return Err(ChunkingError::TocNotFound { document });
            }

            let toc_text: Vec<(u32, String)> = toc_pages
                .iter()
                .filter_map(|page| reader.read_page(*page).map(|text| (*page, text)))
                .collect();
            let raw_entries = TocEntryExtractor::new().extract(&toc_text);
            if raw_entries.is_empty() {
                return Err(ChunkingError::NoEntriesExtracted {
                    document,
                    toc_pages,
                });
            }

            let total_document_pages = total_override
                .unwrap_or_else(|| translator.document_page_count(reader.total_pages()));
            let toc_entries = raw_entries.len();
            let entries = preprocessor.process(raw_entries, total_document_pages);

            Ok(FrontMatter {
                toc_pages,
                toc_entries,
                entries,
                total_document_pages,
            })
        })
        .await
        .map_err(|e| ChunkingError::TaskFailed(e.to_string()))?
    }
}

/// Runs `work` on the blocking pool for every item, at most `concurrency` at
/// a time. Results keep the order of `items`.
async fn fan_out<T, R, F>(
    items: Vec<T>,
    concurrency: usize,
    work: F,
) -> Result<Vec<R>, ChunkingError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let work = Arc::new(work);

    stream::iter(items.into_iter().map(|item| {
        let work = Arc::clone(&work);
        tokio::task::spawn_blocking(move || work(item))
    }))
    .buffered(concurrency.max(1))
    .map_err(|e| ChunkingError::TaskFailed(e.to_string()))
    .try_collect()
    .await
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("no table of contents found in {document}")]
    TocNotFound { document: String },
    #[error("no entries extracted from table of contents of {document} (pages {toc_pages:?})")]
    NoEntriesExtracted { document: String, toc_pages: Vec<u32> },
    #[error("chunking {document} exceeded {budget_secs}s")]
    Timeout { document: String, budget_secs: u64 },
    #[error("worker task failed: {0}")]
    TaskFailed(String),
}
