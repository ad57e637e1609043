//! Integration tests for parse error logging.
//!
//! Kept in its own test binary: the warning set is process-wide.

use ampersand_common::warning::{clear_warnings, warning_count};
use ampersand_html::{ParseIssueKind, decode_text};

#[test]
fn test_repeated_issues_log_one_warning() {
    let automaton = ampersand_trie::whatwg().expect("embedded table builds");
    clear_warnings();

    let input = "&lt ".repeat(20_000);
    let decoded = decode_text(automaton, &input);

    // Every issue is recorded with its own offset...
    assert_eq!(decoded.issues.len(), 20_000);
    assert!(
        decoded
            .issues
            .iter()
            .all(|issue| issue.kind == ParseIssueKind::MissingSemicolonAfterCharacterReference)
    );
    assert_eq!(decoded.issues[1].offset, 4);
    // ...but the log only grows by one entry for the kind.
    assert_eq!(warning_count(), 1);

    let _ = decode_text(automaton, "&zz; &zz;");
    assert_eq!(warning_count(), 2);
}
