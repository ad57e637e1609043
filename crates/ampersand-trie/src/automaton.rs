//! The compiled prefix automaton.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! "Consume the maximum number of characters possible, where the consumed
//! characters are one of the identifiers in the first column of the named
//! character references table."
//!
//! # Design
//!
//! Nodes live in a single boxed slice and refer to each other by [`NodeId`]
//! index, with one child slot per alphabet symbol. An [`Automaton`] is only
//! produced by [`TrieBuilder`](crate::TrieBuilder) or by
//! [`Automaton::from_nodes`], both of which validate the node list, and it
//! exposes no way to mutate it afterwards.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::alphabet::{self, ALPHABET_SIZE};
use crate::error::BuildError;
use crate::replacement::Replacement;

/// A type-safe index into an automaton's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u16);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);

    /// Largest number of nodes an automaton can hold.
    pub const LIMIT: usize = u16::MAX as usize + 1;

    /// Convert a node-list position into an id, if it fits.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Self)
    }

    /// Position of this node in the node list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One state of the automaton.
///
/// The path from the root to a node spells `matched_suffix`. A node with a
/// `replacement` is an accepting state; it may still have children when a
/// longer name extends it (e.g. "not" and "notin;").
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    pub(crate) matched_suffix: String,
    #[serde_as(as = "[_; ALPHABET_SIZE]")]
    pub(crate) children: [Option<NodeId>; ALPHABET_SIZE],
    pub(crate) replacement: Option<Replacement>,
    pub(crate) is_leaf: bool,
}

impl TrieNode {
    /// A node with no children and no replacement.
    pub(crate) const fn new(matched_suffix: String) -> Self {
        Self {
            matched_suffix,
            children: [None; ALPHABET_SIZE],
            replacement: None,
            is_leaf: true,
        }
    }

    /// The name (without '&') spelled by the path to this node. Diagnostic only.
    #[must_use]
    pub fn matched_suffix(&self) -> &str {
        &self.matched_suffix
    }

    /// The transition taken on alphabet index `index`, if any.
    #[must_use]
    pub fn child(&self, index: u8) -> Option<NodeId> {
        self.children.get(usize::from(index)).copied().flatten()
    }

    /// All 63 child slots, in alphabet order.
    #[must_use]
    pub const fn children(&self) -> &[Option<NodeId>; ALPHABET_SIZE] {
        &self.children
    }

    /// The replacement if `matched_suffix` is itself a reference name.
    #[must_use]
    pub const fn replacement(&self) -> Option<Replacement> {
        self.replacement
    }

    /// True if the node never acquired a child.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// True if the name ending here is terminated by ';'.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.matched_suffix.ends_with(';')
    }

    fn child_count(&self) -> usize {
        self.children.iter().flatten().count()
    }
}

/// Summary counts over an automaton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutomatonStats {
    /// Total number of nodes, including the root.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Nodes carrying a replacement (one per dictionary name).
    pub references: usize,
    /// References whose name does not end in ';'.
    pub legacy_references: usize,
    /// Length in scalars of the longest name, excluding '&'.
    pub longest_name: usize,
}

/// The frozen, validated automaton. Shared read-only by every decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    nodes: Box<[TrieNode]>,
}

impl Automaton {
    /// Freeze a node list after checking every structural invariant.
    ///
    /// # Errors
    ///
    /// - [`BuildError::Empty`] if there is no root.
    /// - [`BuildError::RootReplacement`] if the root carries a replacement.
    /// - [`BuildError::DanglingChild`] if a child id is out of range or does
    ///   not come after its parent (which would allow cycles).
    /// - [`BuildError::SuffixMismatch`] if a node's `matched_suffix` is not
    ///   the path of edges that reaches it.
    /// - [`BuildError::UnterminatedLeaf`] / [`BuildError::LeafMismatch`] if a
    ///   node's leaf flag is wrong or a leaf does not end in ';'.
    pub fn from_nodes(nodes: Vec<TrieNode>) -> Result<Self, BuildError> {
        validate(&nodes)?;
        Ok(Self {
            nodes: nodes.into_boxed_slice(),
        })
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &TrieNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// The node with the given id, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id.index())
    }

    /// All nodes, root first.
    #[must_use]
    pub fn nodes(&self) -> &[TrieNode] {
        &self.nodes
    }

    /// Number of nodes (at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow the edge for `c` out of `from`.
    #[must_use]
    pub fn step(&self, from: NodeId, c: char) -> Option<NodeId> {
        let index = alphabet::index(c)?;
        self.node(from)?.child(index)
    }

    /// Follow `name` (without '&') from the root.
    #[must_use]
    pub fn walk(&self, name: &str) -> Option<NodeId> {
        name.chars()
            .try_fold(NodeId::ROOT, |node, c| self.step(node, c))
    }

    /// Look up a complete name, without the leading '&'.
    ///
    /// # Example
    /// ```ignore
    /// automaton.lookup("amp;")  // Some("&")
    /// automaton.lookup("amp")   // Some("&") - legacy form
    /// automaton.lookup("xyz;")  // None
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Replacement> {
        self.walk(name)
            .and_then(|id| self.node(id))
            .and_then(TrieNode::replacement)
    }

    /// Whether any name (without '&') starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Every `(name, replacement)` pair reachable from the root, in alphabet
    /// order. Names include the leading '&'.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Replacement)> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if let Some(replacement) = node.replacement {
                out.push((format!("&{}", node.matched_suffix), replacement));
            }
            // Push in reverse so the lowest alphabet index is visited first.
            stack.extend(node.children.iter().rev().flatten());
        }
        out
    }

    /// Count nodes, leaves and references.
    #[must_use]
    pub fn stats(&self) -> AutomatonStats {
        let mut stats = AutomatonStats {
            nodes: self.nodes.len(),
            ..AutomatonStats::default()
        };
        for node in &self.nodes {
            if node.is_leaf {
                stats.leaves += 1;
            }
            if node.replacement.is_some() {
                stats.references += 1;
                if !node.is_terminated() {
                    stats.legacy_references += 1;
                }
                stats.longest_name = stats.longest_name.max(node.matched_suffix.chars().count());
            }
        }
        stats
    }
}

fn validate(nodes: &[TrieNode]) -> Result<(), BuildError> {
    if nodes.len() > NodeId::LIMIT {
        return Err(BuildError::TooManyNodes {
            limit: NodeId::LIMIT,
        });
    }
    let root = nodes.first().ok_or(BuildError::Empty)?;

    // No reference has an empty name.
    if root.replacement.is_some() {
        return Err(BuildError::RootReplacement);
    }

    if !root.matched_suffix.is_empty() {
        return Err(BuildError::SuffixMismatch {
            node: NodeId::ROOT.index(),
            expected: String::new(),
            found: root.matched_suffix.clone(),
        });
    }

    for (id, node) in nodes.iter().enumerate() {
        for (slot, child) in node.children.iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            // Children are always allocated after their parent.
            let Some(child_node) = nodes.get(child.index()).filter(|_| child.index() > id) else {
                return Err(BuildError::DanglingChild {
                    node: id,
                    child: child.index(),
                });
            };

            // The suffix decides strict versus legacy matches, so it must be
            // exactly the path to the node.
            let mut expected = node.matched_suffix.clone();
            expected.extend(u8::try_from(slot).ok().and_then(alphabet::symbol));
            if child_node.matched_suffix != expected {
                return Err(BuildError::SuffixMismatch {
                    node: child.index(),
                    expected,
                    found: child_node.matched_suffix.clone(),
                });
            }
        }

        let children = node.child_count();
        if node.is_leaf != (children == 0) {
            return Err(BuildError::LeafMismatch {
                node: id,
                is_leaf: node.is_leaf,
                children,
            });
        }

        // The root of an empty automaton is exempt: it spells no name at all.
        if node.is_leaf && id != NodeId::ROOT.index() && !node.is_terminated() {
            return Err(BuildError::UnterminatedLeaf {
                node: id,
                suffix: node.matched_suffix.clone(),
            });
        }
    }
    Ok(())
}
