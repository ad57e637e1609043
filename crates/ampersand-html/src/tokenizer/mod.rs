//! Character reference tokenizer module.
//!
//! Implements the character reference states of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! over text content and attribute values.

/// Character reference helpers per § 13.2.5.72.
pub mod character_reference;
/// Helper methods for state transitions and input handling.
pub mod helpers;
/// Parse issues recorded while decoding.
pub mod issue;
/// The tokenizer state machine.
pub mod machine;

pub use issue::{ParseIssue, ParseIssueKind};
pub use machine::{CharRefTokenizer, Context, TokenizerState};
