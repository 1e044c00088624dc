//! Table-driven encoding.

use log::debug;

use crate::bits::BitString;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use crate::tree::CodeTree;
use crate::Symbol;

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct Encoder<S> {
    table: CodeTable<S>,
}

impl<S: Symbol> Encoder<S> {
    /// Create an encoder over an existing code table.
    pub fn new(table: CodeTable<S>) -> Self {
        Self { table }
    }

    /// Create an encoder from symbol frequencies.
    ///
    /// # Errors
    /// Returns `Error::EmptyAlphabet` if `freqs` is empty.
    pub fn from_frequencies(freqs: &FrequencyTable<S>) -> Result<Self> {
        let tree = CodeTree::from_frequencies(freqs)?;
        Ok(Self::new(CodeTable::from_tree(&tree)?))
    }

    /// The code table in use.
    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Give back the code table.
    pub fn into_table(self) -> CodeTable<S> {
        self.table
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for the first symbol with no code.
    pub fn encode(&self, data: &[S]) -> Result<BitString> {
        let mut bits = BitString::with_capacity(data.len());
        for (position, symbol) in data.iter().enumerate() {
            let code = self.table.get(symbol).ok_or_else(|| Error::UnknownSymbol {
                symbol: format!("{:?}", symbol),
                position,
            })?;
            bits.extend_from(code);
        }
        debug!("encoded {} symbols into {} bits", data.len(), bits.len());
        Ok(bits)
    }
}
