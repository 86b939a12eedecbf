use spec_chunker::application::ports::{DocumentLoader, DocumentLoaderError};
use spec_chunker::domain::{ContentType, Document};
use spec_chunker::infrastructure::text_processing::PlainTextPageAdapter;

fn text_document(data: &[u8]) -> Document {
    Document::new("spec.txt".to_string(), ContentType::Text, data.len() as u64)
}

#[tokio::test]
async fn given_form_feed_pages_when_loading_then_returns_sanitized_pages() {
    let data = "Contents\u{000C}  6.1   General   Overview \u{000C}".as_bytes();

    let reader = PlainTextPageAdapter.load(data, &text_document(data)).await.unwrap();

    assert_eq!(reader.total_pages(), 2);
    assert_eq!(reader.read_page(1).as_deref(), Some("Contents"));
    assert_eq!(reader.read_page(2).as_deref(), Some("6.1 General Overview"));
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_loading_then_returns_extraction_failed() {
    let data: &[u8] = &[0xFF, 0xFE, 0xFD];

    let result = PlainTextPageAdapter.load(data, &text_document(data)).await;

    assert!(matches!(result, Err(DocumentLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_only_blank_pages_when_loading_then_returns_no_text_found() {
    let data = " \u{000C}\n\n\u{000C} ".as_bytes();

    let result = PlainTextPageAdapter.load(data, &text_document(data)).await;

    assert!(matches!(result, Err(DocumentLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_non_text_content_type_when_loading_then_returns_unsupported() {
    let data = b"some data";
    let document = Document::new("file.pdf".to_string(), ContentType::Pdf, data.len() as u64);

    let result = PlainTextPageAdapter.load(data, &document).await;

    assert!(matches!(
        result,
        Err(DocumentLoaderError::UnsupportedContentType(_))
    ));
}
