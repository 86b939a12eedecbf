use spec_chunker::application::services::{TocEntryExtractor, normalize_toc_title};
use spec_chunker::domain::{SectionNumber, TocPattern};

fn extract(pages: &[(u32, &str)]) -> Vec<spec_chunker::domain::RawTocEntry> {
    let pages: Vec<(u32, String)> = pages
        .iter()
        .map(|(page, text)| (*page, text.to_string()))
        .collect();
    TocEntryExtractor::new().extract(&pages)
}

#[test]
fn given_dot_leader_line_when_extracting_then_parses_number_title_and_page() {
    let entries = extract(&[(5, "Contents\n6.6.2 HS400 Bus Timing ........ 65\n")]);

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.section_number, SectionNumber::new("6.6.2"));
    assert_eq!(entry.section_title, "HS400 Bus Timing");
    assert_eq!(entry.page_number, 65);
    assert_eq!(entry.discovery_page, 5);
    assert_eq!(entry.level, 3);
    assert_eq!(entry.pattern, TocPattern::DotLeader);
}

#[test]
fn given_line_without_leaders_when_extracting_then_uses_trailing_number() {
    let entries = extract(&[(2, "7.4.35 Sleep Notification Timeout 206")]);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].section_title, "Sleep Notification Timeout");
    assert_eq!(entries[0].page_number, 206);
    assert_eq!(entries[0].pattern, TocPattern::TrailingNumber);
}

#[test]
fn given_bracketed_field_line_when_extracting_then_keeps_page_number() {
    let entries = extract(&[(2, "7.4.35 INI_TIMEOUT_AP [241] ........ 206")]);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].section_number.as_str(), "7.4.35");
    assert_eq!(entries[0].page_number, 206);
}

#[test]
fn given_appendix_line_when_extracting_then_accepts_letter_prefix() {
    let entries = extract(&[(3, "A.1 Application Notes ........ 300")]);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].section_number.as_str(), "A.1");
    assert_eq!(entries[0].level, 2);
}

#[test]
fn given_duplicate_section_number_when_extracting_then_first_sighting_wins() {
    let entries = extract(&[
        (1, "6.1 General Overview ........ 3"),
        (2, "6.1 General Overview ........ 99"),
    ]);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].page_number, 3);
    assert_eq!(entries[0].discovery_page, 1);
}

#[test]
fn given_many_entries_when_extracting_then_level_matches_component_count() {
    let entries = extract(&[(
        1,
        "6.1 General Overview ........ 3\n6.2.1 Data Read Mode ........ 4\n6.2.1.4 Read Timing Rules ........ 5",
    )]);

    assert_eq!(entries.len(), 3);
    for entry in &entries {
        assert_eq!(entry.level, entry.section_number.as_str().split('.').count());
    }
}

#[test]
fn given_prose_page_when_extracting_then_returns_nothing() {
    let entries = extract(&[(1, "Contents\nThis page intentionally left blank.")]);
    assert!(entries.is_empty());
}

#[test]
fn given_title_with_leader_fragments_when_normalizing_then_collapses_them() {
    assert_eq!(normalize_toc_title("Bus  Timing .... "), "Bus Timing");
    assert_eq!(normalize_toc_title("Bus .. Timing"), "Bus Timing");
}
