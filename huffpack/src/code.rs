//! Codewords and the table that assigns them to symbols.

use std::fmt;

use dyn_size_of::GetSize;

use crate::{FrequencyTable, HuffmanError, HuffmanTree, Node};

/// `Code` represents a binary codeword, i.e. a path from the root of the Huffman tree to a leaf.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Code {
    /// Bits of the codeword. The lowest `len` bits are used, the first bit of the codeword is the most significant of them.
    pub content: u128,
    /// Number of bits in the codeword.
    pub len: u32,
}

impl Code {
    /// Appends `bit` to the end of `self`.
    #[inline] pub fn push(&mut self, bit: bool) {
        self.content = self.content << 1 | bit as u128;
        self.len += 1;
    }

    /// Returns `self` extended by `bit`.
    #[inline] pub fn with(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }

    /// Gets `index`-th bit (counting from the first one, nearest to the root).
    /// Panics if `index` is out of bounds.
    #[inline] pub fn get(&self, index: u32) -> bool {
        assert!(index < self.len, "bit index {index} out of range for {} bits", self.len);
        self.content >> (self.len - 1 - index) & 1 != 0
    }

    /// Returns iterator over bits of `self`, from the first to the last.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }

    /// Returns whether `self` consists of zero bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns whether `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len &&
            other.content.checked_shr(other.len - self.len).unwrap_or(0) == self.content
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bits().try_for_each(|b| f.write_str(if b { "1" } else { "0" }))
    }
}

/// Map from symbols to their codewords.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl GetSize for CodeTable {}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(s, c)| (s, c.to_string()))).finish()
    }
}

impl CodeTable {
    /// Constructs the table of codewords of all leaves of `tree`.
    ///
    /// Left edges contribute bit `0` and right edges bit `1` to codewords.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [None; 256];
        let mut stack = vec![(tree.root(), Code::default())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(code),
                Node::Internal { left, right, .. } => {
                    debug_assert!(code.len < u128::BITS, "codeword longer than 127 bits");
                    stack.push((left, code.with(false)));
                    if let Some(right) = right { stack.push((right, code.with(true))); }
                }
            }
        }
        Self { codes }
    }

    /// Returns the codeword of `symbol` or `None` if `symbol` has no codeword.
    #[inline] pub fn get(&self, symbol: u8) -> Option<&Code> { self.codes[symbol as usize].as_ref() }

    /// Returns iterator over `(symbol, codeword)` pairs, in increasing symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0..=u8::MAX).filter_map(|s| self.get(s).map(|c| (s, c)))
    }

    /// Returns number of symbols that have codewords.
    pub fn number_of_codes(&self) -> usize { self.codes.iter().flatten().count() }

    /// Returns the total length (in bits) of codewords of a text with given `frequencies`,
    /// i.e. the bit length of the packed text.
    ///
    /// Fails with [`HuffmanError::UnknownSymbol`] if some symbol of `frequencies` has no codeword,
    /// and with [`HuffmanError::Overflow`] if the length does not fit in `u64`.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> Result<u64, HuffmanError> {
        frequencies.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
            (code.len as u64).checked_mul(count)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or(HuffmanError::Overflow)
        })
    }
}

impl From<&HuffmanTree> for CodeTable {
    #[inline] fn from(tree: &HuffmanTree) -> Self { Self::from_tree(tree) }
}
