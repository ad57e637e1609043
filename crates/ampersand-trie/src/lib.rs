//! Named character reference automaton for the ampersand HTML crates.
//!
//! # Scope
//!
//! This crate implements:
//! - **Reference dictionary** ([WHATWG § 13.5](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references))
//!   loaded from the canonical `entities.json` table, a copy of which is embedded
//! - **Automaton construction**: a prefix automaton over a 63-symbol alphabet,
//!   validated and frozen, with JSON persistence
//! - **Longest-match decoding** ([WHATWG § 13.2.5.73](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state))
//!   including the ambiguous-ampersand exception for attribute values
//!
//! # Not Implemented
//!
//! - Numeric character references (`&#38;`, `&#x26;`)
//! - The rest of the tokenizer state machine (see `ampersand-html`)

/// The 63-symbol reference name alphabet.
pub mod alphabet;
/// The frozen automaton and its nodes.
pub mod automaton;
/// Dictionary → automaton construction.
pub mod builder;
/// JSON persistence of built automata.
pub mod codec;
/// Longest-match consumption at a tokenizer cursor.
pub mod decoder;
/// The reference dictionary and its `entities.json` source format.
pub mod dictionary;
/// Build and artifact errors.
pub mod error;
/// One- or two-scalar replacement text.
pub mod replacement;

use std::sync::LazyLock;

pub use automaton::{Automaton, AutomatonStats, NodeId, TrieNode};
pub use builder::{TrieBuilder, build};
pub use decoder::{CharCursor, MatchState, Outcome, ParseErrorKind, StrCursor, consume};
pub use dictionary::{EntityRecord, ReferenceDictionary};
pub use error::{BuildError, CodecError};
pub use replacement::Replacement;

/// The automaton for the embedded WHATWG table, built on first use.
static WHATWG: LazyLock<Result<Automaton, BuildError>> =
    LazyLock::new(|| ReferenceDictionary::whatwg().and_then(|dictionary| build(&dictionary)));

/// The shared automaton for the full WHATWG table.
///
/// Built once per process; every later call returns the same reference.
///
/// # Errors
///
/// Fails only if the embedded `entities.json` is corrupt.
pub fn whatwg() -> Result<&'static Automaton, BuildError> {
    WHATWG.as_ref().map_err(Clone::clone)
}
