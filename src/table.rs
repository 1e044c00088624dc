//! Symbol-to-code tables.

use std::collections::BTreeMap;

use crate::bits::BitString;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{CodeTree, Node};
use crate::Symbol;

/// Longest code accepted from callers.
///
/// Trees are walked recursively, so their depth must stay small. A tree built
/// from `u64` weights is at most 92 levels deep (a Fibonacci-weighted
/// alphabet), well inside this limit.
pub const MAX_CODE_LEN: usize = 128;

/// Mapping from each symbol to its bit-string code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, BitString>,
}

impl<S: Symbol> CodeTable<S> {
    /// A table with no symbols.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Derive the table from a tree: left edges append `0`, right edges `1`.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if a leaf sits at the root, which would
    /// give its symbol an empty code.
    pub fn from_tree(tree: &CodeTree<S>) -> Result<Self> {
        let mut codes = BTreeMap::new();
        if let Some(root) = tree.root() {
            build_codes(root, &mut BitString::new(), &mut codes)?;
        }
        Ok(Self { codes })
    }

    /// Build a table from caller-supplied codes.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if a symbol is repeated, a code is empty
    /// or longer than [`MAX_CODE_LEN`], or one code is a prefix of another.
    pub fn from_codes<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, BitString)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(Error::malformed(
                    None,
                    format!("empty code for symbol {:?}", symbol),
                ));
            }
            if code.len() > MAX_CODE_LEN {
                return Err(Error::malformed(
                    None,
                    format!(
                        "code for symbol {:?} is {} bits, limit is {}",
                        symbol,
                        code.len(),
                        MAX_CODE_LEN
                    ),
                ));
            }
            if codes.contains_key(&symbol) {
                return Err(Error::malformed(
                    None,
                    format!("symbol {:?} assigned more than one code", symbol),
                ));
            }
            codes.insert(symbol, code);
        }
        let table = Self { codes };
        if !table.is_prefix_free() {
            return Err(Error::malformed(None, "codes are not prefix-free"));
        }
        Ok(table)
    }

    #[cfg(test)]
    pub(crate) fn from_codes_unchecked<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, BitString)>,
    {
        Self {
            codes: pairs.into_iter().collect(),
        }
    }

    /// Code for a symbol.
    pub fn get(&self, symbol: &S) -> Option<&BitString> {
        self.codes.get(symbol)
    }

    /// True if the symbol has a code.
    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitString)> + '_ {
        self.codes.iter()
    }

    /// True if no code is a prefix of another (and no two codes are equal).
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order, a code that prefixes any other code also
        // prefixes its immediate successor.
        let mut sorted: Vec<&BitString> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }

    /// Total encoded length in bits: the sum of count times code length.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn weighted_length(&self, freqs: &FrequencyTable<S>) -> u64 {
        freqs
            .iter()
            .filter_map(|(s, count)| self.get(s).map(|code| count * code.len() as u64))
            .sum()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }
}

fn build_codes<S: Symbol>(
    node: &Node<S>,
    prefix: &mut BitString,
    codes: &mut BTreeMap<S, BitString>,
) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            if prefix.is_empty() {
                return Err(Error::malformed(
                    None,
                    format!("leaf for {:?} at the root has no code", symbol),
                ));
            }
            codes.insert(symbol.clone(), prefix.clone());
        }
        Node::Internal { children, .. } => {
            for (bit, child) in [false, true].into_iter().zip(children) {
                if let Some(child) = child {
                    prefix.push(bit);
                    build_codes(child, prefix, codes)?;
                    prefix.pop();
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(input: &str) -> CodeTable<char> {
        let freqs = FrequencyTable::from_symbols(input.chars());
        CodeTable::from_tree(&CodeTree::from_frequencies(&freqs).unwrap()).unwrap()
    }

    fn code(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_known_distribution() {
        let table = table_of("aaabbc");
        assert_eq!(table.get(&'a'), Some(&code("0")));
        assert_eq!(table.get(&'c'), Some(&code("10")));
        assert_eq!(table.get(&'b'), Some(&code("11")));

        let freqs = FrequencyTable::from_symbols("aaabbc".chars());
        assert_eq!(table.weighted_length(&freqs), 9);
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn test_single_symbol_code_is_zero() {
        let table = table_of("aaaa");
        assert_eq!(table.len(), 1);
        assert!(table.contains(&'a'));
        assert!(!table.contains(&'b'));
        assert_eq!(table.get(&'a'), Some(&code("0")));
    }

    #[test]
    fn test_empty_tree_gives_empty_table() {
        let table = CodeTable::from_tree(&CodeTree::<char>::empty()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_code_len(), 0);
    }

    #[test]
    fn test_prefix_free_derived() {
        let table = table_of("abracadabra alakazam");
        assert!(table.is_prefix_free());
        assert!(table.iter().all(|(_, c)| !c.is_empty()));
    }

    #[test]
    fn test_from_codes_validation() {
        let ok = CodeTable::from_codes(vec![('a', code("0")), ('b', code("10")), ('c', code("11"))]);
        assert!(ok.is_ok());

        let prefixed = CodeTable::from_codes(vec![('a', code("1")), ('b', code("10"))]);
        assert!(matches!(prefixed, Err(Error::MalformedTree { .. })));

        let duplicate = CodeTable::from_codes(vec![('a', code("0")), ('b', code("0"))]);
        assert!(matches!(duplicate, Err(Error::MalformedTree { .. })));

        let empty_code = CodeTable::from_codes(vec![('a', BitString::new())]);
        assert!(matches!(empty_code, Err(Error::MalformedTree { .. })));

        let repeated = CodeTable::from_codes(vec![('a', code("0")), ('a', code("1"))]);
        assert!(matches!(repeated, Err(Error::MalformedTree { .. })));
    }

    #[test]
    fn test_from_codes_rejects_overlong_code() {
        let mut long = BitString::from(vec![true; 30_000]);
        long.push(false);
        let err = CodeTable::from_codes(vec![('a', code("0")), ('b', long)]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));

        let mut limit = BitString::from(vec![true; MAX_CODE_LEN - 1]);
        limit.push(false);
        let mut too_long = limit.clone();
        too_long.push(false);
        let err = CodeTable::from_codes(vec![('a', code("0")), ('b', too_long)]).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));

        let table = CodeTable::from_codes(vec![('a', code("0")), ('b', limit.clone())]).unwrap();
        assert_eq!(table.max_code_len(), MAX_CODE_LEN);
        let mut stream = code("0");
        stream.extend_from(&limit);
        assert_eq!(crate::decode(&stream, &table).unwrap(), vec!['a', 'b']);
    }

    #[test]
    fn test_leaf_at_root_rejected() {
        let mut codes = BTreeMap::new();
        let leaf = Node::Leaf {
            symbol: 'x',
            weight: 1,
        };
        let err = build_codes(&leaf, &mut BitString::new(), &mut codes).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));
    }
}
