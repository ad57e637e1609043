//! Build-time and artifact errors.
//!
//! Both classes are fatal: they mean the dictionary or the persisted
//! automaton is corrupt or incompatible. Soft parse errors met while decoding
//! live in [`crate::decoder::ParseErrorKind`] instead.

use thiserror::Error;

/// Failure to build or validate an [`Automaton`](crate::Automaton).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The dictionary source could not be parsed.
    #[error("malformed dictionary: {0}")]
    MalformedDictionary(String),

    /// A reference name does not start with '&'.
    #[error("reference name {name:?} does not start with '&'")]
    MissingAmpersand {
        /// The offending name.
        name: String,
    },

    /// A reference name has nothing after the leading '&'.
    #[error("reference name {name:?} is empty")]
    EmptyName {
        /// The offending name.
        name: String,
    },

    /// A name contains a scalar outside `[0-9A-Za-z;]`.
    #[error("reference name {name:?} contains {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending name.
        name: String,
        /// The scalar that has no alphabet index.
        symbol: char,
        /// Scalar position within the name, counting the leading '&'.
        position: usize,
    },

    /// A replacement is not one or two scalars long.
    #[error("replacement for {name:?} has {len} scalars, expected 1 or 2")]
    ReplacementLength {
        /// The reference the replacement belongs to.
        name: String,
        /// Number of scalars supplied.
        len: usize,
    },

    /// A code point in a replacement is not a Unicode scalar value.
    #[error("replacement for {name:?} contains invalid code point {codepoint:#x}")]
    InvalidCodepoint {
        /// The reference the replacement belongs to.
        name: String,
        /// The rejected code point.
        codepoint: u32,
    },

    /// The `characters` field of a dictionary record disagrees with `codepoints`.
    #[error("characters of {name:?} disagree with its code points")]
    InconsistentReplacement {
        /// The reference whose record is inconsistent.
        name: String,
    },

    /// The same name is bound to two different replacements.
    #[error("reference name {name:?} is bound to two different replacements")]
    ConflictingReplacement {
        /// The duplicated name.
        name: String,
    },

    /// The automaton needs more nodes than a node id can address.
    #[error("automaton exceeds {limit} nodes")]
    TooManyNodes {
        /// Maximum number of nodes.
        limit: usize,
    },

    /// A node that never gained a child does not end in ';'.
    #[error("leaf node {node} ({suffix:?}) does not end with ';'")]
    UnterminatedLeaf {
        /// Id of the offending node.
        node: usize,
        /// The name prefix the node matches.
        suffix: String,
    },

    /// A node list has no root.
    #[error("automaton has no nodes")]
    Empty,

    /// The root node carries a replacement.
    #[error("root node carries a replacement")]
    RootReplacement,

    /// A child id points outside the node list or back at the root.
    #[error("node {node} has a child edge to invalid node {child}")]
    DanglingChild {
        /// Id of the parent node.
        node: usize,
        /// The invalid child id.
        child: usize,
    },

    /// A node's `matched_suffix` is not the path that reaches it.
    #[error("node {node} records suffix {found:?} but is reached by {expected:?}")]
    SuffixMismatch {
        /// Id of the offending node.
        node: usize,
        /// The suffix spelled by the edges from the root.
        expected: String,
        /// The suffix stored in the node.
        found: String,
    },

    /// A node's `is_leaf` flag disagrees with its child table.
    #[error("node {node} has is_leaf = {is_leaf} but {children} children")]
    LeafMismatch {
        /// Id of the offending node.
        node: usize,
        /// The stored flag.
        is_leaf: bool,
        /// Number of populated child slots.
        children: usize,
    },
}

/// Failure to persist or restore an [`Automaton`](crate::Automaton).
#[derive(Debug, Error)]
pub enum CodecError {
    /// Reading or writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for the expected shape.
    #[error("failed to parse automaton JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact envelope names another format or version.
    #[error("unsupported artifact format {format:?} version {version}")]
    UnsupportedFormat {
        /// Format tag found in the artifact.
        format: String,
        /// Version found in the artifact.
        version: u32,
    },

    /// The artifact decoded but its nodes violate an automaton invariant.
    #[error("invalid automaton: {0}")]
    Invalid(#[from] BuildError),
}
