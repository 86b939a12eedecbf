mod boilerplate;
mod chunking_pipeline;
mod content_extractor;
mod entry_preprocessor;
mod ingestion_service;
mod page_translator;
mod quality_report;
mod section_path;
mod subsection_searcher;
mod toc_extractor;
mod toc_locator;
mod token_estimator;
mod truncator;

pub use boilerplate::{
    BoilerplatePatternError, BoilerplateRules, DEFAULT_FOOTER_PATTERNS, DEFAULT_HEADER_PATTERNS,
};
pub use chunking_pipeline::{
    ChunkingConfig, ChunkingError, ChunkingOutcome, ChunkingPipeline, DEFAULT_CONCURRENCY,
    DEFAULT_PROCESSING_TIMEOUT,
};
pub use content_extractor::{ContentExtractor, recover_title};
pub use entry_preprocessor::{
    DEFAULT_LONG_SECTION_THRESHOLD, EntryPreprocessor, assign_page_ranges, flag_long_sections,
    infer_missing_ancestors, sort_entries,
};
pub use ingestion_service::{
    DEFAULT_MIN_CONTENT_LENGTH, IngestionError, IngestionReport, IngestionService,
};
pub use page_translator::PageTranslator;
pub use quality_report::{QualityReport, title_needs_review};
pub use section_path::{PATH_SEPARATOR, SectionPathBuilder};
pub use subsection_searcher::{
    BoundedSubsectionSearcher, DEFAULT_MAX_SUBSECTION_LEVEL, clean_subsection_title,
    exclude_known,
};
pub use toc_extractor::{TocEntryExtractor, normalize_toc_title};
pub use toc_locator::{DEFAULT_MAX_SEARCH_PAGES, TocLocator, TocPageSignals};
pub use token_estimator::{
    DEFAULT_TOKEN_ESTIMATE_DIVISOR, estimate_tokens, estimate_tokens_for_chars,
};
pub use truncator::{Fragment, IntelligentTruncator, TokenBudget, split_sentences};
