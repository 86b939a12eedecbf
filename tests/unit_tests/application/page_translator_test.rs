use spec_chunker::application::services::PageTranslator;
use spec_chunker::domain::PageRange;

use crate::helpers::sparse_reader;

#[test]
fn given_positive_offset_when_translating_then_adds_offset() {
    let translator = PageTranslator::new(20);
    assert_eq!(translator.to_source(46), Some(66));
    assert_eq!(translator.document_page_count(372), 352);
}

#[test]
fn given_negative_offset_when_translating_below_first_page_then_is_unreadable() {
    let translator = PageTranslator::new(-5);
    assert_eq!(translator.to_source(3), None);
    assert_eq!(translator.to_source(6), Some(1));
}

#[test]
fn given_offset_larger_than_source_when_counting_pages_then_is_zero() {
    assert_eq!(PageTranslator::new(50).document_page_count(10), 0);
}

#[test]
fn given_range_with_blank_pages_when_reading_then_skips_them() {
    let reader = sparse_reader(&[(3, "first"), (4, "   "), (5, "third")], 10);

    let pages = PageTranslator::default().read_range(&reader, PageRange::new(2, 6));

    assert_eq!(
        pages,
        vec![(3, "first".to_string()), (5, "third".to_string())]
    );
}
