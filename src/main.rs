use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use spec_chunker::application::ports::DocumentLoader;
use spec_chunker::application::services::{ChunkingPipeline, IngestionService};
use spec_chunker::domain::{ContentType, Document};
use spec_chunker::infrastructure::observability::{TracingConfig, init_tracing};
use spec_chunker::infrastructure::text_processing::{
    CompositeDocumentLoader, PdfPageAdapter, PlainTextPageAdapter,
};
use spec_chunker::presentation::{Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::default()
            .with_environment(environment.as_str())
            .with_json_format(settings.logging.enable_json)
            .with_default_filter(settings.logging.level.clone()),
    );

    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DOCUMENT_PATH").ok())
        .map(PathBuf::from)
        .context("usage: spec-chunker <document.pdf|document.txt>")?;

    let content_type = ContentType::from_path(&path)
        .with_context(|| format!("unsupported file type: {}", path.display()))?;
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let document = Document::new(filename, content_type, data.len() as u64);

    let loader = Arc::new(CompositeDocumentLoader::new(vec![
        (
            ContentType::Pdf,
            Arc::new(PdfPageAdapter::new()) as Arc<dyn DocumentLoader>,
        ),
        (
            ContentType::Text,
            Arc::new(PlainTextPageAdapter) as Arc<dyn DocumentLoader>,
        ),
    ]));

    let pipeline = ChunkingPipeline::new(settings.chunking_config()?);
    let service = IngestionService::new(loader, pipeline)
        .with_min_content_length(settings.ingestion.min_content_length);

    let report = service.ingest(&data, document).await?;
    tracing::info!(
        chunks = report.chunks.len(),
        dropped = report.unfiltered_chunks - report.chunks.len(),
        "Document chunked"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
