//! Tools to count frequencies of symbols.

use std::borrow::Borrow;
use std::io;

use binout::{AsIs, Serializer, VByte};
use dyn_size_of::GetSize;
use fsum::FSum;

/// Numbers of occurrences of byte symbols.
///
/// Only symbols that occur at least once are considered to be in the table.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    #[inline] fn default() -> Self { Self { counts: [0; 256] } }
}

impl GetSize for FrequencyTable {}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FrequencyTable {
    /// Constructs `FrequencyTable` that counts occurrences of all symbols exposed by `iter`.
    pub fn with_occurrences_of<Iter>(iter: Iter) -> Self
        where Iter: IntoIterator, Iter::Item: Borrow<u8>
    {
        let mut result = Self::default();
        result.count_all(iter);
        result
    }

    /// Constructs `FrequencyTable` for the given `(symbol, count)` pairs.
    /// Counts of repeated symbols are summed up, saturating at `u64::MAX`.
    pub fn from_counts<Iter: IntoIterator<Item = (u8, u64)>>(counts: Iter) -> Self {
        let mut result = Self::default();
        for (symbol, count) in counts {
            let c = &mut result.counts[symbol as usize];
            *c = c.saturating_add(count);
        }
        result
    }

    /// Adds one to the stored number of `symbol` occurrences.
    #[inline] pub fn count(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Calls `count` for all symbols exposed by `iter`.
    pub fn count_all<Iter>(&mut self, iter: Iter) where Iter: IntoIterator, Iter::Item: Borrow<u8> {
        for s in iter { self.count(*s.borrow()); }
    }

    /// Returns number of occurrences of `symbol` (`0` if it is not in the table).
    #[inline] pub fn get(&self, symbol: u8) -> u64 { self.counts[symbol as usize] }

    /// Returns whether `symbol` occurs at least once.
    #[inline] pub fn contains(&self, symbol: u8) -> bool { self.get(symbol) != 0 }

    /// Returns iterator over `(symbol, count)` pairs of all occurring symbols, in increasing symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX).map(|s| (s, self.counts[s as usize])).filter(|(_, c)| *c != 0)
    }

    /// Returns number of distinct symbols that occur.
    pub fn number_of_symbols(&self) -> usize {
        self.counts.iter().filter(|c| **c != 0).count()
    }

    /// Returns whether no symbol occurs.
    #[inline] pub fn is_empty(&self) -> bool { self.counts.iter().all(|c| *c == 0) }

    /// Returns total number of occurrences of all symbols, i.e. the length of the counted input,
    /// or `None` if it does not fit in `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |total, c| total.checked_add(*c))
    }

    /// Returns total number of occurrences of all symbols, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |total, c| total.saturating_add(*c))
    }

    /// Returns the Shannon entropy (in bits per symbol) of the symbols counted so far.
    pub fn entropy(&self) -> f64 {
        let sum = self.total() as f64;
        if sum == 0.0 { return 0.0; }
        - FSum::with_all(self.iter()
            .map(|(_, c)| { let p = c as f64 / sum; p * p.log2() })).value()
    }

    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        VByte::size(self.number_of_symbols() as u64) +
            self.iter().map(|(s, c)| AsIs::size(s) + VByte::size(c)).sum::<usize>()
    }

    /// Writes `self` to `output` as: number of symbols (VByte), then,
    /// in increasing symbol order, each symbol (as is) followed by its count (VByte).
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        VByte::write(output, self.number_of_symbols() as u64)?;
        self.iter().try_for_each(|(s, c)| {
            AsIs::write(output, s)?;
            VByte::write(output, c)
        })
    }

    /// Reads `FrequencyTable` written by `write`.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if the symbols are not strictly increasing,
    /// some count is zero, or the total count does not fit in `u64`.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        let symbols: u64 = VByte::read(input)?;
        if symbols > 256 {
            return Err(invalid_data(format!("frequency table with {symbols} symbols")));
        }
        let mut result = Self::default();
        let mut previous: Option<u8> = None;
        let mut total = 0u64;
        for _ in 0..symbols {
            let symbol: u8 = AsIs::read(input)?;
            let count: u64 = VByte::read(input)?;
            if previous.is_some_and(|p| p >= symbol) {
                return Err(invalid_data(format!("symbol {symbol} out of order in frequency table")));
            }
            if count == 0 {
                return Err(invalid_data(format!("zero count of symbol {symbol} in frequency table")));
            }
            total = total.checked_add(count)
                .ok_or_else(|| invalid_data("total count in frequency table overflows".to_owned()))?;
            result.counts[symbol as usize] = count;
            previous = Some(symbol);
        }
        Ok(result)
    }
}

#[inline] pub(crate) fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use std::collections::BTreeMap;

    #[test]
    fn counts_aaabbc() {
        let f = FrequencyTable::with_occurrences_of(b"aaabbc");
        assert_eq!(f.iter().collect::<BTreeMap<_, _>>(), btreemap!(b'a' => 3, b'b' => 2, b'c' => 1));
        assert_eq!(f.number_of_symbols(), 3);
        assert_eq!(f.total(), 6);
        assert!(f.contains(b'c'));
        assert!(!f.contains(b'd'));
        assert_eq!(f.get(b'd'), 0);
    }

    #[test]
    fn empty() {
        let f = FrequencyTable::with_occurrences_of(b"");
        assert!(f.is_empty());
        assert_eq!(f.number_of_symbols(), 0);
        assert_eq!(f.total(), 0);
        assert_eq!(f.iter().count(), 0);
        assert_eq!(f.entropy(), 0.0);
    }

    #[test]
    fn entropy() {
        assert_eq!(FrequencyTable::with_occurrences_of(b"aaaa").entropy(), 0.0);
        assert!((FrequencyTable::with_occurrences_of(b"abab").entropy() - 1.0).abs() < 1e-12);
        assert!((FrequencyTable::with_occurrences_of(b"abcd").entropy() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn from_counts_sums_repeats() {
        let f = FrequencyTable::from_counts([(7, 2), (200, 5), (7, 1)]);
        assert_eq!(f.iter().collect::<Vec<_>>(), [(7, 3), (200, 5)]);
    }

    #[test]
    fn totals_do_not_overflow() {
        let f = FrequencyTable::from_counts([(1, u64::MAX - 1), (1, 5), (2, 3)]);
        assert_eq!(f.get(1), u64::MAX);
        assert_eq!(f.total(), u64::MAX);
        assert_eq!(f.checked_total(), None);
        assert_eq!(FrequencyTable::with_occurrences_of(b"abc").checked_total(), Some(3));
    }

    #[test]
    fn read_write() {
        let f = FrequencyTable::from_counts([(0, 1), (b'x', 300), (255, 1 << 40)]);
        let mut buff = Vec::new();
        f.write(&mut buff).unwrap();
        assert_eq!(buff.len(), f.write_bytes());
        assert_eq!(FrequencyTable::read(&mut &buff[..]).unwrap(), f);
    }

    #[test]
    fn read_rejects_unsorted_and_zero() {
        assert_eq!(FrequencyTable::read(&mut &[2u8, 5, 1, 4, 1][..]).unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert_eq!(FrequencyTable::read(&mut &[1u8, 5, 0][..]).unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert_eq!(FrequencyTable::read(&mut &[2u8, 5, 1][..]).unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
