use std::path::Path;

use spec_chunker::domain::{ContentType, Document};

#[test]
fn given_pdf_mime_when_parsing_then_returns_pdf_content_type() {
    assert_eq!(
        ContentType::from_mime("application/pdf"),
        Some(ContentType::Pdf)
    );
}

#[test]
fn given_unknown_mime_when_parsing_then_returns_none() {
    assert_eq!(ContentType::from_mime("audio/mpeg"), None);
}

#[test]
fn given_file_extension_when_detecting_content_type_then_is_case_insensitive() {
    assert_eq!(
        ContentType::from_path(Path::new("JESD84-B51.PDF")),
        Some(ContentType::Pdf)
    );
    assert_eq!(
        ContentType::from_path(Path::new("dump.txt")),
        Some(ContentType::Text)
    );
    assert_eq!(ContentType::from_path(Path::new("notes")), None);
}

#[test]
fn given_new_documents_when_created_then_ids_are_unique() {
    let a = Document::new("a.pdf".to_string(), ContentType::Pdf, 10);
    let b = Document::new("a.pdf".to_string(), ContentType::Pdf, 10);
    assert_ne!(a.id, b.id);
    assert_eq!(a.content_type.as_mime(), "application/pdf");
}
