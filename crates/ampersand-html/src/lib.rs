//! Character reference decoding for HTML text and attribute values.
//!
//! # Scope
//!
//! This crate implements the tokenizer states of
//! [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! that handle named character references:
//!   - Character reference, named character reference, and ambiguous
//!     ampersand states
//!   - The missing-semicolon and unknown-reference parse errors
//!
//! Name matching is delegated to an [`ampersand_trie::Automaton`].
//!
//! # Not Implemented
//!
//! - Numeric character references (`&#38;` is left as text)
//! - Tag, comment, DOCTYPE, and script states

/// Character reference tokenizer.
pub mod tokenizer;

use ampersand_trie::Automaton;

pub use tokenizer::{CharRefTokenizer, Context, ParseIssue, ParseIssueKind, TokenizerState};

/// Text with its character references replaced, plus the parse errors met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text.
    pub text: String,
    /// Parse errors, in input order.
    pub issues: Vec<ParseIssue>,
}

/// Decode the named character references in a run of text content.
#[must_use]
pub fn decode_text(automaton: &Automaton, input: &str) -> Decoded {
    decode(automaton, input, Context::Text)
}

/// Decode the named character references in an attribute value (without
/// its quotes), applying the ambiguous-ampersand rule.
#[must_use]
pub fn decode_attribute_value(automaton: &Automaton, input: &str) -> Decoded {
    decode(automaton, input, Context::AttributeValue)
}

/// Decode `input` in the given context.
#[must_use]
pub fn decode(automaton: &Automaton, input: &str, context: Context) -> Decoded {
    let mut tokenizer = CharRefTokenizer::new(automaton, input, context);
    tokenizer.run();
    let (text, issues) = tokenizer.into_output();
    Decoded { text, issues }
}
