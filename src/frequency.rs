//! Frequency analysis for symbol streams.
//!
//! Counts the occurrences of each distinct symbol in an input sequence and
//! computes the Shannon entropy of the resulting distribution.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::Symbol;

/// Occurrence counts for every distinct symbol in an input.
///
/// Symbols with a zero count are never stored, so `len()` is the alphabet
/// size and `total()` is the input length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, u64>,
    total: u64,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count symbol frequencies in the input.
    pub fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for symbol in symbols {
            *counts.entry(symbol).or_insert(0u64) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Counts for repeated symbols are summed; zero counts are dropped.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if the total exceeds `u64::MAX`.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in pairs {
            if count == 0 {
                continue;
            }
            // Every per-symbol count is bounded by the total.
            total = match total.checked_add(count) {
                Some(total) => total,
                None => {
                    return Err(Error::WeightOverflow {
                        symbol: format!("{:?}", symbol),
                    })
                }
            };
            *counts.entry(symbol).or_insert(0u64) += count;
        }
        Ok(Self { counts, total })
    }

    /// Get the count for a symbol (zero if absent).
    pub fn get(&self, symbol: &S) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if the input was empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate over `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.counts.iter().map(|(s, &c)| (s, c))
    }

    /// Compute the Shannon entropy of the distribution (in bits per symbol).
    ///
    /// Returns 0.0 if the table is empty.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .values()
            .map(|&c| {
                let prob = c as f64 / total;
                -prob * prob.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::<u8>::from_symbols(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_symbols("aaabbc".chars());
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(table.get(&'a'), 3);
        assert_eq!(table.get(&'b'), 2);
        assert_eq!(table.get(&'c'), 1);
        assert_eq!(table.get(&'z'), 0);

        let pairs: Vec<_> = table.iter().map(|(&s, c)| (s, c)).collect();
        assert_eq!(pairs, vec![('a', 3), ('b', 2), ('c', 1)]);
    }

    #[test]
    fn test_from_counts_merges_and_drops_zero() {
        let table = FrequencyTable::from_counts(vec![(b'x', 2), (b'y', 0), (b'x', 3)]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&b'x'), 5);
        assert_eq!(table.get(&b'y'), 0);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_from_counts_rejects_overflow() {
        let half = u64::MAX / 2 + 1;
        let err = FrequencyTable::from_counts(vec![(0u8, half), (1u8, half)]).unwrap_err();
        assert_eq!(
            err,
            Error::WeightOverflow {
                symbol: "1".to_string()
            }
        );

        let err = FrequencyTable::from_counts(vec![(7u8, u64::MAX), (7u8, 1)]).unwrap_err();
        assert!(matches!(err, Error::WeightOverflow { .. }));

        let table = FrequencyTable::from_counts(vec![(0u8, u64::MAX - 1), (1u8, 1)]).unwrap();
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_single_symbol_has_zero_entropy() {
        let table = FrequencyTable::from_symbols(b"aaaa".iter().copied());
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_uniform_distribution() {
        let input: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_symbols(input);
        assert_eq!(table.len(), 256);
        let entropy = table.entropy();
        assert!((entropy - 8.0).abs() < 1e-9, "entropy was {}", entropy);
    }
}
