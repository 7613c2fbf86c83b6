//! Packed sequence of bits with exactly known length.

use bitm::{BitAccess, BitVec, ceiling_div};
use dyn_size_of::GetSize;

use crate::MalformedStream;

/// Sequence of `len` bits stored in 64-bit words.
///
/// The `i`-th bit is stored at the `i % 64` bit of the `i / 64` word,
/// so when words are serialized in little-endian order,
/// it becomes the `i % 8` bit of the `i / 8` byte.
/// Bits past `len` (padding) are always zeroed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PackedBits {
    content: Box<[u64]>,
    len: usize,
}

impl GetSize for PackedBits {
    fn size_bytes_dyn(&self) -> usize { self.content.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl PackedBits {
    /// Returns `len` zeroed bits.
    pub fn with_zeroed_bits(len: usize) -> Self {
        Self { content: Box::<[u64]>::with_zeroed_bits(len), len }
    }

    /// Returns number of bits (excluding padding).
    #[inline] pub fn len(&self) -> usize { self.len }

    /// Returns whether `self` contains no bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the `index`-th bit. Panics if `index` is out of bounds.
    #[inline] pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range for {} bits", self.len);
        self.content.get_bit(index)
    }

    /// Sets the `index`-th bit to `1`. Panics if `index` is out of bounds.
    #[inline] pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range for {} bits", self.len);
        self.content.set_bit(index)
    }

    /// Returns iterator over all `len` bits, padding excluded.
    pub fn iter(&self) -> impl Iterator<Item = bool> + ExactSizeIterator + '_ {
        (0..self.len).map(|i| self.content.get_bit(i))
    }

    /// Returns the 64-bit words that store the bits.
    #[inline] pub fn words(&self) -> &[u64] { &self.content }

    /// Returns number of bytes needed to store `self`, i.e. `len` divided by 8 and rounded up.
    #[inline] pub fn bytes_len(&self) -> usize { ceiling_div(self.len, 8) }

    /// Returns the bits packed into `self.bytes_len()` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result: Vec<u8> = self.content.iter().flat_map(|w| w.to_le_bytes()).collect();
        result.truncate(self.bytes_len());
        result
    }

    /// Constructs `PackedBits` of `len` bits stored in `bytes`.
    ///
    /// Fails with [`MalformedStream::Truncated`] if `bytes` contains less than `len` bits.
    /// Bytes past `len` bits as well as padding bits of the last byte are ignored.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self, MalformedStream> {
        let bytes_len = len.div_ceil(8);
        if bytes.len() < bytes_len { return Err(MalformedStream::Truncated { bit_len: len }); }
        let mut result = Self::with_zeroed_bits(len);
        for (word, chunk) in result.content.iter_mut().zip(bytes[..bytes_len].chunks(8)) {
            let mut le = [0u8; 8];
            le[..chunk.len()].copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        if len % 64 != 0 {
            if let Some(last) = result.content.last_mut() {
                *last &= (1u64 << (len % 64)) - 1;
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_bytes() {
        let mut bits = PackedBits::with_zeroed_bits(9);
        assert_eq!(bits.len(), 9);
        assert_eq!(bits.bytes_len(), 2);
        bits.set(0);
        bits.set(3);
        bits.set(8);
        assert!(bits.get(3));
        assert!(!bits.get(4));
        assert_eq!(bits.iter().collect::<Vec<_>>(),
                   [true, false, false, true, false, false, false, false, true]);
        assert_eq!(bits.to_bytes(), [0b1001, 0b1]);
        assert_eq!(PackedBits::from_bytes(&[0b1001, 0b1], 9), Ok(bits));
    }

    #[test]
    fn from_bytes_ignores_padding() {
        let bits = PackedBits::from_bytes(&[0xFF, 0xFF, 0xAA], 12).unwrap();
        assert_eq!(bits.len(), 12);
        assert_eq!(bits.to_bytes(), [0xFF, 0x0F]);
        assert_eq!(bits.words(), [0x0FFF]);
    }

    #[test]
    fn from_bytes_truncated() {
        assert_eq!(PackedBits::from_bytes(&[0xFF], 9), Err(MalformedStream::Truncated { bit_len: 9 }));
    }

    #[test]
    fn from_bytes_huge_len() {
        assert_eq!(PackedBits::from_bytes(&[0xFF], usize::MAX), Err(MalformedStream::Truncated { bit_len: usize::MAX }));
    }

    #[test]
    fn multi_word() {
        let bytes: Vec<u8> = (0..20u8).collect();
        let bits = PackedBits::from_bytes(&bytes, 160).unwrap();
        assert_eq!(bits.words().len(), 3);
        assert_eq!(bits.to_bytes(), bytes);
        assert_eq!(bits.iter().len(), 160);
    }

    #[test]
    fn empty() {
        let bits = PackedBits::from_bytes(&[], 0).unwrap();
        assert!(bits.is_empty());
        assert!(bits.to_bytes().is_empty());
        assert_eq!(bits, PackedBits::default());
    }

    #[test]
    #[should_panic]
    fn out_of_range() {
        PackedBits::with_zeroed_bits(3).get(3);
    }
}
