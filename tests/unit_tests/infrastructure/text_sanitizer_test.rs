use spec_chunker::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_text_with_fi_ligature_when_sanitizing_then_decomposes_to_fi() {
    assert_eq!(sanitize_extracted_text("ﬁnding the ﬁle"), "finding the file");
}

#[test]
fn given_text_with_excessive_newlines_when_sanitizing_then_collapses_to_paragraph_breaks() {
    let input = "paragraph one\n\n\n\n\nparagraph two";
    assert_eq!(sanitize_extracted_text(input), "paragraph one\n\nparagraph two");
}

#[test]
fn given_text_with_redundant_spaces_when_sanitizing_then_collapses_to_single_space() {
    assert_eq!(sanitize_extracted_text("hello    world\t\ttest"), "hello world test");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text("   \n\n  "), "");
}

#[test]
fn given_indented_heading_lines_when_sanitizing_then_keeps_one_line_each() {
    let input = "  6.2 Bus Operation  \n   6.2.1 Data Read Mode\n";
    assert_eq!(
        sanitize_extracted_text(input),
        "6.2 Bus Operation\n6.2.1 Data Read Mode"
    );
}

#[test]
fn given_text_with_hyphenated_line_break_when_sanitizing_then_merges_word() {
    let input = "This is a process-\ning step";
    assert_eq!(sanitize_extracted_text(input), "This is a processing step");
}

#[test]
fn given_hyphen_before_capital_when_sanitizing_then_keeps_line_break() {
    assert_eq!(sanitize_extracted_text("A-\nB"), "A-\nB");
}

#[test]
fn given_control_characters_when_sanitizing_then_drops_them() {
    assert_eq!(sanitize_extracted_text("Status\u{0007} register"), "Status register");
}

#[test]
fn given_text_with_list_marker_hyphen_when_sanitizing_then_preserves_list() {
    let input = "Items:\n- first item\n- second item";
    assert_eq!(sanitize_extracted_text(input), input);
}
