use std::collections::BTreeMap;

use spec_chunker::application::ports::PageReader;
use spec_chunker::infrastructure::text_processing::InMemoryPageReader;

#[test]
fn given_pages_when_reading_then_indices_start_at_one() {
    let reader = InMemoryPageReader::from_pages(["first", "second"]);

    assert_eq!(reader.total_pages(), 2);
    assert_eq!(reader.read_page(1).as_deref(), Some("first"));
    assert_eq!(reader.read_page(2).as_deref(), Some("second"));
    assert_eq!(reader.read_page(0), None);
    assert_eq!(reader.read_page(3), None);
}

#[test]
fn given_blank_page_when_reading_then_is_unavailable() {
    let reader = InMemoryPageReader::from_pages(["first", "  \n ", "third"]);

    assert_eq!(reader.read_page(2), None);
    assert_eq!(reader.non_blank_pages(), 2);
}

#[test]
fn given_form_feed_text_when_splitting_then_yields_one_page_per_segment() {
    let reader = InMemoryPageReader::from_form_feed_text("one\u{000C}two\u{000C}three\u{000C}");

    assert_eq!(reader.total_pages(), 3);
    assert_eq!(reader.read_page(3).as_deref(), Some("three"));
}

#[test]
fn given_sparse_pages_when_total_is_given_then_reports_that_total() {
    let pages = BTreeMap::from([(4, "fourth".to_string())]);
    let reader = InMemoryPageReader::with_total_pages(pages, 10);

    assert_eq!(reader.total_pages(), 10);
    assert_eq!(reader.read_page(4).as_deref(), Some("fourth"));
    assert_eq!(reader.read_page(5), None);
}

#[test]
fn given_mapping_when_applied_then_transforms_every_page() {
    let reader = InMemoryPageReader::from_pages(["a", "b"]).map_pages(|text| text.to_uppercase());

    assert_eq!(reader.read_page(2).as_deref(), Some("B"));
    assert_eq!(reader.total_pages(), 2);
}
