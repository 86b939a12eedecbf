use spec_chunker::application::services::{
    IntelligentTruncator, TokenBudget, estimate_tokens, split_sentences,
};
use spec_chunker::domain::DocumentId;

use crate::helpers::{enriched, paragraph, toc_section};

fn twelve_paragraphs() -> String {
    ('a'..='l')
        .map(|fill| paragraph(400, fill))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[test]
fn given_content_within_budget_when_truncating_then_passes_through_unsplit() {
    let section = enriched(toc_section("6.1", "General", 3, 3), "Short body.", Some("HS400"));

    let chunks = IntelligentTruncator::default().truncate(&section, DocumentId::new());

    assert_eq!(chunks.len(), 1);
    let chunk = &chunks[0];
    assert_eq!(chunk.content, "Short body.");
    assert!(!chunk.is_split);
    assert_eq!(chunk.chunk_index, 0);
    assert_eq!(chunk.total_chunks, 1);
    assert_eq!(chunk.subtitle.as_deref(), Some("HS400"));
}

#[test]
fn given_content_over_budget_when_truncating_then_splits_with_overlap() {
    let content = twelve_paragraphs();
    assert!(estimate_tokens(&content, 4) > 800);
    let section = enriched(toc_section("6.6.35", "Sleep Mode", 131, 140), &content, None);

    let chunks = IntelligentTruncator::default().truncate(&section, DocumentId::new());

    assert!(chunks.len() >= 2);
    for (index, chunk) in chunks.iter().enumerate() {
        assert!(estimate_tokens(&chunk.content, 4) <= 800);
        assert_eq!(chunk.chunk_index as usize, index);
        assert_eq!(chunk.total_chunks as usize, chunks.len());
        assert!(chunk.is_split);
        assert!(!chunk.oversized);
        assert_eq!(chunk.section_number.as_str(), "6.6.35");
    }
    for pair in chunks.windows(2) {
        let previous = &pair[0].content;
        let tail: String = previous.chars().skip(previous.chars().count() - 200).collect();
        assert!(pair[1].content.starts_with(&tail));
    }
}

#[test]
fn given_split_section_when_truncating_then_every_paragraph_survives() {
    let content = twelve_paragraphs();
    let section = enriched(toc_section("6.6.35", "Sleep Mode", 131, 140), &content, None);

    let chunks = IntelligentTruncator::default().truncate(&section, DocumentId::new());

    for fill in 'a'..='l' {
        let para = paragraph(400, fill);
        assert!(chunks.iter().any(|c| c.content.contains(&para)));
    }
}

#[test]
fn given_long_paragraph_of_sentences_when_truncating_then_splits_on_sentence_boundaries() {
    let sentence = format!("{}.", paragraph(399, 's'));
    let content = vec![sentence.as_str(); 10].join(" ");
    let section = enriched(toc_section("7.4", "Registers", 9, 9), &content, None);

    let chunks = IntelligentTruncator::default().truncate(&section, DocumentId::new());

    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(estimate_tokens(&chunk.content, 4) <= 800);
        assert!(!chunk.oversized);
    }
}

#[test]
fn given_indivisible_unit_over_budget_when_truncating_then_keeps_it_whole_and_flags_it() {
    let content = paragraph(4000, 'x');
    let section = enriched(toc_section("7.4", "Registers", 9, 9), &content, None);

    let chunks = IntelligentTruncator::default().truncate(&section, DocumentId::new());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, content);
    assert!(chunks[0].oversized);
    assert!(chunks[0].is_split);
}

#[test]
fn given_short_final_fragment_when_splitting_then_widens_its_overlap_to_min_tokens() {
    let truncator = IntelligentTruncator::new(TokenBudget {
        max_tokens: 100,
        min_tokens: 50,
        overlap_tokens: 5,
        estimate_divisor: 4,
    });
    let content = format!("{}\n\n{}", paragraph(390, 'a'), paragraph(30, 'b'));

    let fragments = truncator.split_content(&content);

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, paragraph(390, 'a'));
    let expected = format!("{}\n\n{}", paragraph(168, 'a'), paragraph(30, 'b'));
    assert_eq!(fragments[1].text, expected);
    assert_eq!(fragments[1].seed_chars, 168);
    assert!(estimate_tokens(&fragments[1].text, 4) <= 100);
}

#[test]
fn given_zero_overlap_when_splitting_then_fragments_do_not_repeat_text() {
    let truncator = IntelligentTruncator::new(TokenBudget {
        max_tokens: 100,
        min_tokens: 0,
        overlap_tokens: 0,
        estimate_divisor: 4,
    });
    let content = format!("{}\n\n{}", paragraph(300, 'a'), paragraph(300, 'b'));

    let fragments = truncator.split_content(&content);

    let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec![paragraph(300, 'a'), paragraph(300, 'b')]);
}

#[test]
fn given_mixed_punctuation_when_splitting_sentences_then_breaks_after_each_mark() {
    assert_eq!(
        split_sentences("One. Two! Three? Four"),
        vec!["One.", "Two!", "Three?", "Four"]
    );
    assert_eq!(split_sentences("Version 1.2 applies."), vec!["Version 1.2 applies."]);
}
