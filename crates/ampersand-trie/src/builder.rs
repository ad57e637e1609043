//! Offline construction of the automaton from a reference dictionary.
//!
//! The builder is the only mutable form of the node list. Calling
//! [`TrieBuilder::finish`] validates and freezes it into an [`Automaton`].

use crate::alphabet;
use crate::automaton::{Automaton, NodeId, TrieNode};
use crate::dictionary::ReferenceDictionary;
use crate::error::BuildError;
use crate::replacement::Replacement;

/// Build the automaton for every name in `dictionary`.
///
/// # Errors
///
/// Returns the first [`BuildError`] raised by [`TrieBuilder::insert`] or
/// [`TrieBuilder::finish`]. A single bad name aborts the whole build.
pub fn build(dictionary: &ReferenceDictionary) -> Result<Automaton, BuildError> {
    let mut builder = TrieBuilder::new();
    // Dictionary iteration is sorted by name, which makes node id
    // allocation reproducible across builds.
    for (name, replacement) in dictionary.iter() {
        builder.insert(name, replacement)?;
    }
    builder.finish()
}

/// Mutable node list under construction.
#[derive(Debug, Clone)]
pub struct TrieBuilder {
    nodes: Vec<TrieNode>,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    /// A builder holding only the root: a leaf with no replacement.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(String::new())],
        }
    }

    /// Number of nodes allocated so far, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated up front.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one reference. `name` includes the leading '&'.
    ///
    /// The whole name is checked before any node is allocated, so a rejected
    /// name leaves the builder unchanged.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingAmpersand`] / [`BuildError::EmptyName`] for a
    ///   name that is not '&' followed by at least one scalar.
    /// - [`BuildError::InvalidSymbol`] if a scalar after '&' is outside
    ///   `[0-9A-Za-z;]`.
    /// - [`BuildError::ConflictingReplacement`] if the name was already added
    ///   with a different replacement.
    /// - [`BuildError::TooManyNodes`] if node ids are exhausted.
    pub fn insert(&mut self, name: &str, replacement: Replacement) -> Result<(), BuildError> {
        let symbols = name
            .strip_prefix('&')
            .ok_or_else(|| BuildError::MissingAmpersand {
                name: name.to_string(),
            })?;
        if symbols.is_empty() {
            return Err(BuildError::EmptyName {
                name: name.to_string(),
            });
        }

        let path = symbols
            .chars()
            .enumerate()
            .map(|(offset, c)| {
                alphabet::index(c)
                    .map(|index| (index, c))
                    .ok_or_else(|| BuildError::InvalidSymbol {
                        name: name.to_string(),
                        symbol: c,
                        // Counting the leading '&'.
                        position: offset + 1,
                    })
            })
            .collect::<Result<Vec<(u8, char)>, BuildError>>()?;

        if self
            .lookup(&path)
            .is_some_and(|existing| existing != replacement)
        {
            return Err(BuildError::ConflictingReplacement {
                name: name.to_string(),
            });
        }

        let mut current = NodeId::ROOT;
        for (index, c) in path {
            current = match self.nodes[current.index()].child(index) {
                Some(child) => child,
                None => self.add_child(current, index, c)?,
            };
        }

        // Leave the leaf flag and children alone: a longer name may already
        // extend this node, or may extend it later.
        self.nodes[current.index()].replacement = Some(replacement);
        Ok(())
    }

    /// Validate and freeze.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnterminatedLeaf`] if a name without ';' is not
    /// extended by any longer name, or any other invariant violation found by
    /// [`Automaton::from_nodes`].
    pub fn finish(self) -> Result<Automaton, BuildError> {
        Automaton::from_nodes(self.nodes)
    }

    fn lookup(&self, path: &[(u8, char)]) -> Option<Replacement> {
        let mut current = NodeId::ROOT;
        for &(index, _) in path {
            current = self.nodes[current.index()].child(index)?;
        }
        self.nodes[current.index()].replacement()
    }

    fn add_child(&mut self, parent: NodeId, index: u8, c: char) -> Result<NodeId, BuildError> {
        let id = NodeId::new(self.nodes.len()).ok_or(BuildError::TooManyNodes {
            limit: NodeId::LIMIT,
        })?;

        let parent_node = &mut self.nodes[parent.index()];
        let mut suffix = parent_node.matched_suffix.clone();
        suffix.push(c);
        parent_node.children[usize::from(index)] = Some(id);
        parent_node.is_leaf = false;

        self.nodes.push(TrieNode::new(suffix));
        Ok(id)
    }
}
