use std::sync::Arc;
use std::time::Duration;

use spec_chunker::application::ports::PageReader;
use spec_chunker::application::services::{ChunkingConfig, ChunkingError, ChunkingPipeline};
use spec_chunker::domain::{ChunkOrder, DocumentId, OriginTag, PageRange, TitleSource};
use spec_chunker::infrastructure::text_processing::InMemoryPageReader;

use crate::helpers::SPEC_PAGES;

struct SlowPageReader;

impl PageReader for SlowPageReader {
    fn read_page(&self, _source_index: u32) -> Option<String> {
        std::thread::sleep(Duration::from_millis(200));
        Some("Contents".to_string())
    }

    fn total_pages(&self) -> u32 {
        2
    }
}

fn spec_reader() -> Arc<dyn PageReader> {
    Arc::new(InMemoryPageReader::from_pages(SPEC_PAGES))
}

#[tokio::test]
async fn given_spec_document_when_running_then_emits_every_section_in_page_order() {
    let pipeline = ChunkingPipeline::new(ChunkingConfig::default());

    let outcome = pipeline
        .run(DocumentId::new(), "spec.pdf", spec_reader())
        .await
        .unwrap();

    let numbers: Vec<&str> = outcome
        .chunks
        .iter()
        .map(|c| c.section_number.as_str())
        .collect();
    assert_eq!(
        numbers,
        vec!["6", "6.1", "6.2", "6.2.1", "6.2.1.1", "6.2.1.2", "7", "7.1"]
    );
    assert_eq!(outcome.toc_pages, vec![1]);
    assert_eq!(outcome.toc_entries, 4);
    assert_eq!(outcome.inferred_entries, 2);
    assert_eq!(outcome.subsections, 2);
    assert_eq!(outcome.total_document_pages, 6);
}

#[tokio::test]
async fn given_spec_document_when_running_then_assigns_ranges_and_recovers_titles() {
    let pipeline = ChunkingPipeline::new(ChunkingConfig::default());

    let outcome = pipeline
        .run(DocumentId::new(), "spec.pdf", spec_reader())
        .await
        .unwrap();
    let chunk = |number: &str| {
        outcome
            .chunks
            .iter()
            .find(|c| c.section_number.as_str() == number)
            .unwrap()
    };

    assert_eq!(chunk("6").section_title, "General Description");
    assert_eq!(chunk("6").title_source, TitleSource::Recovered);
    assert_eq!(chunk("7").section_title, "Device Register Map");
    assert_eq!(chunk("6.2.1").page_range, PageRange::new(4, 5));
    assert_eq!(chunk("6.2.1").subtitle.as_deref(), Some("HS400"));
    assert_eq!(chunk("6.2.1.1").page_range, PageRange::new(5, 5));
    assert_eq!(chunk("6.2.1.1").origin, OriginTag::RegexSubsection);
    assert_eq!(chunk("6.2.1.1").level, 4);
    assert_eq!(
        chunk("6.2.1.1").section_path,
        "6 General Description → 6.2 Bus Operation → 6.2.1 Data Read Mode → 6.2.1.1 Read Timing Rules"
    );
    assert_eq!(outcome.quality.recovered_titles, 2);
    assert_eq!(outcome.quality.placeholder_titles, 0);
    assert_eq!(outcome.quality.regex_subsections, 2);
}

#[tokio::test]
async fn given_section_number_order_when_running_then_sorts_hierarchically() {
    let config = ChunkingConfig {
        chunk_order: ChunkOrder::SectionNumber,
        concurrency: 2,
        ..ChunkingConfig::default()
    };

    let outcome = ChunkingPipeline::new(config)
        .run(DocumentId::new(), "spec.pdf", spec_reader())
        .await
        .unwrap();

    let first = outcome.chunks.first().unwrap();
    let last = outcome.chunks.last().unwrap();
    assert_eq!(first.section_number.as_str(), "6");
    assert_eq!(last.section_number.as_str(), "7.1");
}

#[tokio::test]
async fn given_document_without_contents_page_when_running_then_fails_with_toc_not_found() {
    let reader: Arc<dyn PageReader> = Arc::new(InMemoryPageReader::from_pages([
        "Foreword\nNo listing of sections appears anywhere in this text.",
        "6.1 General Overview\nBody text.",
    ]));

    let result = ChunkingPipeline::new(ChunkingConfig::default())
        .run(DocumentId::new(), "bare.pdf", reader)
        .await;

    assert!(matches!(result, Err(ChunkingError::TocNotFound { .. })));
}

#[tokio::test]
async fn given_contents_page_without_entries_when_running_then_fails_with_no_entries() {
    let reader: Arc<dyn PageReader> = Arc::new(InMemoryPageReader::from_pages([
        "Contents\nForeword and scope of this document",
        "Body text without numbered headings.",
    ]));

    let result = ChunkingPipeline::new(ChunkingConfig::default())
        .run(DocumentId::new(), "empty-toc.pdf", reader)
        .await;

    match result {
        Err(ChunkingError::NoEntriesExtracted { toc_pages, .. }) => assert_eq!(toc_pages, vec![1]),
        other => panic!("expected NoEntriesExtracted, got {other:?}"),
    }
}

#[tokio::test]
async fn given_reader_slower_than_budget_when_running_then_fails_with_timeout() {
    let config = ChunkingConfig {
        processing_timeout: Duration::from_millis(50),
        ..ChunkingConfig::default()
    };

    let result = ChunkingPipeline::new(config)
        .run(DocumentId::new(), "slow.pdf", Arc::new(SlowPageReader))
        .await;

    assert!(matches!(result, Err(ChunkingError::Timeout { .. })));
}
