//! Code tree construction.
//!
//! The tree is built bottom-up with a min-priority queue: the two lightest
//! candidates are merged until one remains. Ties on weight are broken by the
//! smallest symbol each candidate subtree contains. Leaves are unique, so no
//! two candidates ever share that key, and the resulting tree is the same on
//! every run.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::trace;

use crate::bits::BitString;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::table::{CodeTable, MAX_CODE_LEN};
use crate::Symbol;

/// Code tree node.
///
/// Children are indexed by bit: `children[0]` is the left subtree (bit `0`),
/// `children[1]` the right subtree (bit `1`). Trees built from frequencies
/// have both children on every internal node, except for the root of a
/// single-symbol tree, whose right child is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A terminal node carrying one symbol.
    Leaf {
        /// The symbol decoded at this leaf.
        symbol: S,
        /// Frequency of the symbol.
        weight: u64,
    },
    /// A merge point.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Left and right subtrees.
        children: [Option<Box<Node<S>>>; 2],
    },
}

impl<S> Node<S> {
    fn internal(weight: u64, left: Option<Node<S>>, right: Option<Node<S>>) -> Self {
        Node::Internal {
            weight,
            children: [left.map(Box::new), right.map(Box::new)],
        }
    }

    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Child reached by `bit`, or `None` for leaves and absent children.
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { children, .. } => children[bit as usize].as_deref(),
        }
    }

    /// The symbol of a leaf.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => {
                1 + children
                    .iter()
                    .flatten()
                    .map(|c| c.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => {
                children.iter().flatten().map(|c| c.leaf_count()).sum()
            }
        }
    }
}

/// Merge candidate, ordered by `(weight, key)` where `key` is the smallest
/// symbol in the subtree.
struct Candidate<S> {
    weight: u64,
    key: S,
    node: Node<S>,
}

impl<S: Symbol> Candidate<S> {
    fn leaf(symbol: &S, weight: u64) -> Self {
        Self {
            weight,
            key: symbol.clone(),
            node: Node::Leaf {
                symbol: symbol.clone(),
                weight,
            },
        }
    }

    /// `left` must be the lighter of the two.
    fn merge(left: Self, right: Self) -> Self {
        // Disjoint subtrees: the sum never exceeds the table total.
        let weight = left.weight + right.weight;
        let key = std::cmp::min(left.key, right.key);
        Self {
            weight,
            key,
            node: Node::internal(weight, Some(left.node), Some(right.node)),
        }
    }
}

impl<S: Ord> Ord for Candidate<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl<S: Ord> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Ord> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Ord> Eq for Candidate<S> {}

/// A prefix code tree.
///
/// An empty tree has no root; it encodes and decodes only empty sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree<S> {
    root: Option<Node<S>>,
}

impl<S: Symbol> CodeTree<S> {
    /// A tree over the empty alphabet.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Build a minimum-redundancy tree from symbol frequencies.
    ///
    /// # Errors
    /// Returns `Error::EmptyAlphabet` if the table has no symbols.
    pub fn from_frequencies(freqs: &FrequencyTable<S>) -> Result<Self> {
        let mut pq: BinaryHeap<Reverse<Candidate<S>>> = freqs
            .iter()
            .map(|(symbol, count)| Reverse(Candidate::leaf(symbol, count)))
            .collect();

        let root = loop {
            let Reverse(left) = pq.pop().ok_or(Error::EmptyAlphabet)?;
            let Some(Reverse(right)) = pq.pop() else {
                break left;
            };
            trace!(
                "merge {:?}({}) + {:?}({})",
                left.key,
                left.weight,
                right.key,
                right.weight
            );
            pq.push(Reverse(Candidate::merge(left, right)));
        };

        // A lone leaf gets a synthetic parent so its code is "0", never empty.
        let root = match root.node {
            leaf @ Node::Leaf { .. } => Node::internal(leaf.weight(), Some(leaf), None),
            internal => internal,
        };

        Ok(Self { root: Some(root) })
    }

    /// Rebuild a decoding trie from a code table.
    ///
    /// Node weights are not recoverable from a table and are left at zero.
    /// Paths the table assigns no code to are absent children.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if a code is empty, longer than
    /// [`MAX_CODE_LEN`], duplicated, or a prefix of another code.
    pub fn from_table(table: &CodeTable<S>) -> Result<Self> {
        if table.is_empty() {
            return Ok(Self::empty());
        }
        let mut root = Node::internal(0, None, None);
        for (symbol, code) in table.iter() {
            insert(&mut root, symbol, code)?;
        }
        Ok(Self { root: Some(root) })
    }

    /// The root node, if the alphabet is non-empty.
    pub fn root(&self) -> Option<&Node<S>> {
        self.root.as_ref()
    }

    /// True for the empty-alphabet tree.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root weight; the input length for trees built from frequencies.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, Node::weight)
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Number of symbols in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }
}

fn insert<S: Symbol>(root: &mut Node<S>, symbol: &S, code: &BitString) -> Result<()> {
    if code.is_empty() {
        return Err(Error::malformed(
            None,
            format!("empty code for symbol {:?}", symbol),
        ));
    }
    if code.len() > MAX_CODE_LEN {
        return Err(Error::malformed(
            None,
            format!("code for symbol {:?} exceeds {} bits", symbol, MAX_CODE_LEN),
        ));
    }

    let mut cursor = root;
    for (depth, bit) in code.iter().enumerate() {
        let children = match cursor {
            Node::Internal { children, .. } => children,
            Node::Leaf { symbol: other, .. } => {
                return Err(Error::malformed(
                    None,
                    format!("code for {:?} is a prefix of the code for {:?}", other, symbol),
                ));
            }
        };
        let slot = &mut children[bit as usize];

        if depth + 1 == code.len() {
            if slot.is_some() {
                return Err(Error::malformed(
                    None,
                    format!("code {} for {:?} collides with another code", code, symbol),
                ));
            }
            *slot = Some(Box::new(Node::Leaf {
                symbol: symbol.clone(),
                weight: 0,
            }));
            return Ok(());
        }

        cursor = slot
            .get_or_insert_with(|| Box::new(Node::internal(0, None, None)))
            .as_mut();
    }
    Ok(())
}
