//! Parse issues recorded while decoding character references.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "Parse errors are only errors with the content"; the tokenizer records
//! them and carries on.

use ampersand_trie::ParseErrorKind;
use strum_macros::Display;

/// The kinds of parse error the character reference states can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseIssueKind {
    /// [§ 13.2.2](https://html.spec.whatwg.org/multipage/parsing.html#parse-error-missing-semicolon-after-character-reference)
    /// "This error occurs if the parser encounters a character reference that
    /// is not terminated by a U+003B (;) code point."
    MissingSemicolonAfterCharacterReference,
    /// [§ 13.2.2](https://html.spec.whatwg.org/multipage/parsing.html#parse-error-unknown-named-character-reference)
    /// "This error occurs if the parser encounters an ambiguous ampersand."
    UnknownNamedCharacterReference,
    /// A legacy reference in an attribute value was left undecoded because
    /// '=' or an ASCII alphanumeric followed it.
    AmbiguousAmpersand,
}

impl From<ParseErrorKind> for ParseIssueKind {
    fn from(kind: ParseErrorKind) -> Self {
        match kind {
            ParseErrorKind::UnknownReference => Self::UnknownNamedCharacterReference,
            ParseErrorKind::AmbiguousAmpersand => Self::AmbiguousAmpersand,
        }
    }
}

/// A parse error and where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIssue {
    /// What went wrong.
    pub kind: ParseIssueKind,
    /// Byte offset of the '&' that started the reference.
    pub offset: usize,
}
