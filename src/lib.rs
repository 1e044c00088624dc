//! # Minimum-Redundancy Prefix Codes
//!
//! *Shorter codes for frequent symbols, with no delimiters between them.*
//!
//! ## Intuition First
//!
//! Morse code already gives `E` a single dot and `Q` four marks. A prefix code
//! goes one step further: no codeword is the start of another, so a decoder
//! reading bits left to right always knows when a symbol ends. Drawing the
//! codes as paths in a binary tree (left = `0`, right = `1`) makes this
//! obvious: symbols live only at the leaves, so no path passes through one.
//!
//! ## The Problem
//!
//! Given how often each symbol occurs, choose the tree that makes the
//! encoded message as short as possible.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy bounds the average code length
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up merging: provably optimal prefix codes
//! 1964  Schwartz    Canonical codes, tables as code lengths only
//! 1993  Katz        DEFLATE (PKZIP 2) pairs LZ77 with Huffman coding
//! 1996  Deutsch     RFC 1951 specifies DEFLATE
//! ```
//!
//! ## Mathematical Formulation
//!
//! For symbol frequencies $f_s$ and code lengths $\ell_s$, minimize the
//! weighted path length
//!
//! ```text
//! L = Σ_s f_s · ℓ_s
//! ```
//!
//! subject to the Kraft inequality $\sum_s 2^{-\ell_s} \le 1$. Huffman's
//! algorithm reaches the minimum by repeatedly merging the two lightest
//! subtrees, and $H \le L / \sum_s f_s < H + 1$ where $H$ is the entropy.
//!
//! ## Complexity Analysis
//!
//! - **Construction**: $O(N \log N)$ for $N$ distinct symbols.
//! - **Encoding / decoding**: $O(1)$ per bit.
//!
//! ## Failure Modes
//!
//! 1. **Skewed distributions**: codes can grow to $N - 1$ bits.
//! 2. **Detached tables**: the stream carries no code metadata, so the table
//!    or tree used to encode must travel with it.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`FrequencyTable`]: symbol counts and entropy.
//! - [`CodeTree`]: deterministic priority-queue construction.
//! - [`CodeTable`]: symbol to code, derived from the tree.
//! - [`Encoder`] / [`Decoder`]: bit-level encoding and tree-walking decoding.
//!
//! Bits are kept unpacked in a [`BitString`].
//!
//! ```
//! let input: Vec<char> = "aaabbc".chars().collect();
//! let (bits, table) = huffcode::encode(&input)?;
//! assert_eq!(bits.len(), 9);
//! assert_eq!(huffcode::decode(&bits, &table)?, input);
//! # Ok::<(), huffcode::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt::Debug;

use log::debug;

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod table;
pub mod tree;

pub use bits::BitString;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use table::{CodeTable, MAX_CODE_LEN};
pub use tree::{CodeTree, Node};

/// A unit of the input alphabet.
///
/// `Ord` breaks weight ties during construction; `Debug` names symbols in
/// error messages.
pub trait Symbol: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Symbol for T {}

fn encode_parts<S: Symbol>(input: &[S]) -> Result<(BitString, CodeTree<S>, CodeTable<S>)> {
    let freqs = FrequencyTable::from_symbols(input.iter().cloned());
    debug!(
        "{} symbols, alphabet of {}, entropy {:.3} bits/symbol",
        freqs.total(),
        freqs.len(),
        freqs.entropy()
    );

    let tree = match CodeTree::from_frequencies(&freqs) {
        Ok(tree) => tree,
        Err(Error::EmptyAlphabet) => {
            return Ok((BitString::new(), CodeTree::empty(), CodeTable::empty()))
        }
        Err(e) => return Err(e),
    };
    let encoder = Encoder::new(CodeTable::from_tree(&tree)?);
    debug!("longest code {} bits", encoder.table().max_code_len());

    let bits = encoder.encode(input)?;
    Ok((bits, tree, encoder.into_table()))
}

/// Build a code for `input` and encode it, returning the code table.
///
/// Empty input yields an empty bit string and an empty table.
pub fn encode<S: Symbol>(input: &[S]) -> Result<(BitString, CodeTable<S>)> {
    let (bits, _, table) = encode_parts(input)?;
    Ok((bits, table))
}

/// Build a code for `input` and encode it, returning the code tree.
///
/// Empty input yields an empty bit string and an empty tree.
pub fn encode_with_tree<S: Symbol>(input: &[S]) -> Result<(BitString, CodeTree<S>)> {
    let (bits, tree, _) = encode_parts(input)?;
    Ok((bits, tree))
}

/// Decode `bits` with the table they were encoded with.
pub fn decode<S: Symbol>(bits: &BitString, table: &CodeTable<S>) -> Result<Vec<S>> {
    Decoder::from_table(table)?.decode(bits)
}

/// Decode `bits` with the tree they were encoded with.
pub fn decode_with_tree<S: Symbol>(bits: &BitString, tree: &CodeTree<S>) -> Result<Vec<S>> {
    decoder::decode_tree(tree, bits)
}
