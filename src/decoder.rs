//! Tree-walking decoder.

use log::debug;

use crate::bits::BitString;
use crate::error::{Error, Result};
use crate::table::CodeTable;
use crate::tree::{CodeTree, Node};
use crate::Symbol;

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct Decoder<S> {
    tree: CodeTree<S>,
}

impl<S: Symbol> Decoder<S> {
    /// Create a decoder over a code tree.
    pub fn new(tree: CodeTree<S>) -> Self {
        Self { tree }
    }

    /// Create a decoder from a code table by rebuilding its trie.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if the table is not a valid prefix code.
    pub fn from_table(table: &CodeTable<S>) -> Result<Self> {
        Ok(Self::new(CodeTree::from_table(table)?))
    }

    /// The code tree in use.
    pub fn tree(&self) -> &CodeTree<S> {
        &self.tree
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the stream ends inside a code.
    /// - `Error::MalformedTree` if a bit leads off the tree, or the alphabet is
    ///   empty but bits remain.
    pub fn decode(&self, bits: &BitString) -> Result<Vec<S>> {
        decode_tree(&self.tree, bits)
    }
}

/// Walk `tree` once per bit, emitting a symbol at each leaf.
pub(crate) fn decode_tree<S: Symbol>(tree: &CodeTree<S>, bits: &BitString) -> Result<Vec<S>> {
    let root = match tree.root() {
        Some(root) => root,
        None if bits.is_empty() => return Ok(Vec::new()),
        None => return Err(Error::malformed(Some(0), "no symbols in code")),
    };

    let mut out = Vec::new();
    let mut curr = root;
    let mut pending = 0usize;

    for (pos, bit) in bits.iter().enumerate() {
        // The root is always internal, and the cursor leaves a leaf as soon
        // as it reaches one.
        curr = match curr {
            Node::Internal { children, .. } => children[bit as usize].as_deref().ok_or_else(|| {
                Error::malformed(
                    Some(pos),
                    format!("no code continues with bit {}", bit as u8),
                )
            })?,
            Node::Leaf { .. } => {
                return Err(Error::malformed(Some(pos), "cursor rests on a leaf"));
            }
        };
        pending += 1;

        if let Node::Leaf { symbol, .. } = curr {
            out.push(symbol.clone());
            curr = root;
            pending = 0;
        }
    }

    if pending > 0 {
        return Err(Error::TruncatedStream {
            bit_position: bits.len(),
            pending,
        });
    }
    debug!("decoded {} bits into {} symbols", bits.len(), out.len());
    Ok(out)
}
