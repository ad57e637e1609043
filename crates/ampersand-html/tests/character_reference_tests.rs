//! Integration tests for the character reference tokenizer states.

use ampersand_html::{
    CharRefTokenizer, Context, Decoded, ParseIssue, ParseIssueKind, decode_attribute_value,
    decode_text,
};
use ampersand_trie::Automaton;

fn automaton() -> &'static Automaton {
    ampersand_trie::whatwg().expect("embedded table builds")
}

/// Helper to decode text content
fn text(input: &str) -> Decoded {
    decode_text(automaton(), input)
}

/// Helper to decode an attribute value
fn attr(input: &str) -> Decoded {
    decode_attribute_value(automaton(), input)
}

fn issue(kind: ParseIssueKind, offset: usize) -> ParseIssue {
    ParseIssue { kind, offset }
}

#[test]
fn test_plain_text_passes_through() {
    let decoded = text("Hello, world");
    assert_eq!(decoded.text, "Hello, world");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_terminated_references() {
    assert_eq!(text("&amp;").text, "&");
    assert_eq!(text("&lt;&gt;").text, "<>");
    assert_eq!(text("a &copy; b").text, "a \u{00A9} b");
    assert!(text("&lt;&gt;").issues.is_empty());
}

#[test]
fn test_two_character_replacement() {
    let decoded = text("&NotEqualTilde;");
    assert_eq!(decoded.text, "\u{2242}\u{0338}");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_legacy_reference_in_text() {
    // "not" is the longest legacy match; "it;" is ordinary text
    let decoded = text("&notit;");
    assert_eq!(decoded.text, "\u{00AC}it;");
    assert_eq!(
        decoded.issues,
        vec![issue(ParseIssueKind::MissingSemicolonAfterCharacterReference, 0)]
    );
}

#[test]
fn test_legacy_reference_followed_by_alphanumeric_in_text() {
    let decoded = text("&ampx");
    assert_eq!(decoded.text, "&x");
    assert_eq!(decoded.issues.len(), 1);
}

#[test]
fn test_terminated_match_preferred_over_legacy() {
    let decoded = text("&notin;");
    assert_eq!(decoded.text, "\u{2209}");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_attribute_ambiguous_ampersand_equals() {
    let decoded = attr("&amp=x");
    assert_eq!(decoded.text, "&amp=x");
    assert_eq!(
        decoded.issues,
        vec![issue(ParseIssueKind::AmbiguousAmpersand, 0)]
    );
}

#[test]
fn test_attribute_ambiguous_ampersand_alphanumeric() {
    let decoded = attr("?a=1&copy2=3");
    assert_eq!(decoded.text, "?a=1&copy2=3");
    assert_eq!(
        decoded.issues,
        vec![issue(ParseIssueKind::AmbiguousAmpersand, 4)]
    );
}

#[test]
fn test_attribute_terminated_reference_decodes() {
    let decoded = attr("a&amp;b");
    assert_eq!(decoded.text, "a&b");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_attribute_legacy_reference_at_end() {
    let decoded = attr("x&lt");
    assert_eq!(decoded.text, "x<");
    assert_eq!(
        decoded.issues,
        vec![issue(ParseIssueKind::MissingSemicolonAfterCharacterReference, 1)]
    );
}

#[test]
fn test_attribute_legacy_reference_before_space() {
    let decoded = attr("&lt b");
    assert_eq!(decoded.text, "< b");
    assert_eq!(decoded.issues.len(), 1);
}

#[test]
fn test_unknown_reference_with_semicolon() {
    let decoded = text("&zzzz;");
    assert_eq!(decoded.text, "&zzzz;");
    assert_eq!(
        decoded.issues,
        vec![issue(ParseIssueKind::UnknownNamedCharacterReference, 0)]
    );
}

#[test]
fn test_unknown_reference_without_semicolon() {
    let decoded = text("&zz x");
    assert_eq!(decoded.text, "&zz x");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_numeric_reference_left_as_text() {
    let decoded = text("&#38; &#x26;");
    assert_eq!(decoded.text, "&#38; &#x26;");
    assert!(decoded.issues.is_empty());
}

#[test]
fn test_bare_ampersands() {
    assert_eq!(text("&").text, "&");
    assert_eq!(text("a &").text, "a &");
    assert_eq!(text("& b").text, "& b");
    assert_eq!(text("&&amp;").text, "&&");
    assert!(text("&&").issues.is_empty());
}

#[test]
fn test_case_sensitive_names() {
    assert_eq!(text("&AMP;").text, "&");
    assert_eq!(text("&Amp;").text, "&Amp;");
}

#[test]
fn test_multibyte_text_and_offsets() {
    let decoded = text("café &eacute; ü&lt");
    assert_eq!(decoded.text, "café é ü<");
    // 'é' and 'ü' take two bytes each
    assert_eq!(
        decoded.issues,
        vec![issue(
            ParseIssueKind::MissingSemicolonAfterCharacterReference,
            17
        )]
    );
}

#[test]
fn test_issue_offsets_in_input_order() {
    let decoded = text("&lt x &zz; &gt");
    assert_eq!(decoded.text, "< x &zz; >");
    let offsets: Vec<usize> = decoded.issues.iter().map(|i| i.offset).collect();
    assert_eq!(offsets, vec![0, 6, 11]);
}

#[test]
fn test_tokenizer_direct() {
    let mut tokenizer = CharRefTokenizer::new(automaton(), "&amp=1", Context::AttributeValue);
    tokenizer.run();
    assert_eq!(tokenizer.issues().len(), 1);
    let (output, issues) = tokenizer.into_output();
    assert_eq!(output, "&amp=1");
    assert_eq!(issues[0].kind, ParseIssueKind::AmbiguousAmpersand);
}

#[test]
fn test_issue_kind_display() {
    assert_eq!(
        ParseIssueKind::MissingSemicolonAfterCharacterReference.to_string(),
        "missing-semicolon-after-character-reference"
    );
    assert_eq!(
        ParseIssueKind::UnknownNamedCharacterReference.to_string(),
        "unknown-named-character-reference"
    );
}
