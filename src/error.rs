//! Error types for prefix-code construction, encoding and decoding.

use thiserror::Error;

/// Error variants for Huffman coding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contained no symbols, so there is no alphabet to build a code over.
    ///
    /// The top-level [`encode`](crate::encode) treats this as an empty result,
    /// not as a failure.
    #[error("empty alphabet: no symbols to build a code from")]
    EmptyAlphabet,

    /// The encoder met a symbol that has no code in the table.
    #[error("unknown symbol {symbol} at input position {position}")]
    UnknownSymbol {
        /// Debug rendering of the offending symbol.
        symbol: String,
        /// Index of the symbol in the input sequence.
        position: usize,
    },

    /// The bit stream ended in the middle of a code.
    #[error("truncated stream: input ended at bit {bit_position} with {pending} bit(s) of an unfinished code")]
    TruncatedStream {
        /// Length of the bit stream.
        bit_position: usize,
        /// Bits consumed into the incomplete code.
        pending: usize,
    },

    /// The code tree violates its structural invariants, or a bit path leads
    /// to no node.
    #[error("malformed code tree{}: {reason}", fmt_position(.bit_position))]
    MalformedTree {
        /// Bit index at which the problem was detected, if decoding.
        bit_position: Option<usize>,
        /// What was wrong.
        reason: String,
    },

    /// Symbol counts summed past `u64::MAX`.
    #[error("weight overflow: counts for {symbol} push the total past u64::MAX")]
    WeightOverflow {
        /// Debug rendering of the symbol whose count overflowed.
        symbol: String,
    },

    /// A textual bit string contained something other than `0` or `1`.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit {
        /// The offending character.
        found: char,
        /// Character index in the text.
        position: usize,
    },
}

impl Error {
    pub(crate) fn malformed(bit_position: Option<usize>, reason: impl Into<String>) -> Self {
        Error::MalformedTree {
            bit_position,
            reason: reason.into(),
        }
    }
}

fn fmt_position(bit_position: &Option<usize>) -> String {
    match bit_position {
        Some(pos) => format!(" at bit {pos}"),
        None => String::new(),
    }
}

/// A specialized Result type for Huffman coding operations.
pub type Result<T> = std::result::Result<T, Error>;
