use crate::{HuffmanError, HuffmanTree, MalformedStream, Node, NodeId, PackedBits};

/// Result of bit decoding returned by [`Decoder::consume`].
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum DecodingResult<T> {
    /// Completed value that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete,
    /// The codeword is invalid (the bit leads to an absent child).
    Invalid
}

/// Decoder that decodes symbols by walking down the Huffman tree, consuming one bit at a time.
///
/// Time complexity of decoding a symbol is proportional to the length of its codeword.
/// Memory complexity: *O(1)*.
pub struct Decoder<'tree> {
    tree: &'tree HuffmanTree,
    /// Current position in the tree.
    current: NodeId,
    /// Number of bits of the current codeword consumed so far.
    consumed: u32,
}

impl<'tree> Decoder<'tree> {
    /// Constructs decoder for given `tree`.
    pub fn new(tree: &'tree HuffmanTree) -> Self {
        Self { tree, current: tree.root(), consumed: 0 }
    }

    /// Resets `self` to the root, making it ready to decode next symbol.
    #[inline] pub fn reset(&mut self) {
        self.current = self.tree.root();
        self.consumed = 0;
    }

    /// Returns the number of bits of the current, not yet completed, codeword.
    #[inline(always)] pub fn consumed_bits(&self) -> u32 { self.consumed }

    /// Returns whether `self` is between codewords.
    #[inline(always)] pub fn is_at_root(&self) -> bool { self.consumed == 0 }

    /// Consumes a `bit` of the codeword and returns:
    /// - the symbol if the given `bit` finishes the codeword (then `self` is [reset](Self::reset));
    /// - [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed;
    /// - [`DecodingResult::Invalid`] if the `bit` leads to an absent child (`self` is left unchanged).
    pub fn consume(&mut self, bit: bool) -> DecodingResult<u8> {
        let Some(child) = self.tree.node(self.current).child(bit) else {
            return DecodingResult::Invalid;
        };
        match *self.tree.node(child) {
            Node::Leaf { symbol, .. } => {
                self.reset();
                DecodingResult::Value(symbol)
            }
            Node::Internal { .. } => {
                self.current = child;
                self.consumed += 1;
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single symbol from the `bits` iterator,
    /// consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the symbol was decoded
    /// ([`Self::consumed_bits`] enables checking if the iterator yielded any bit of the codeword before exhausting).
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<u8> {
        for bit in bits {
            match self.consume(bit) {
                DecodingResult::Incomplete => {},
                result => return result
            }
        }
        DecodingResult::Incomplete
    }
}

/// Decodes all `bits` with the given `tree`.
///
/// Fails with [`MalformedStream::AbsentChild`] if some bit leads to a child that does not exist,
/// and with [`MalformedStream::Truncated`] if `bits` end in the middle of a codeword.
pub fn decode_with(bits: &PackedBits, tree: &HuffmanTree) -> Result<Vec<u8>, HuffmanError> {
    let capacity = (tree.weight() as usize).min(bits.len());
    let mut result = Vec::with_capacity(capacity);
    let mut decoder = Decoder::new(tree);
    for (bit_index, bit) in bits.iter().enumerate() {
        match decoder.consume(bit) {
            DecodingResult::Value(symbol) => result.push(symbol),
            DecodingResult::Incomplete => {},
            DecodingResult::Invalid => return Err(MalformedStream::AbsentChild { bit_index }.into()),
        }
    }
    if !decoder.is_at_root() {
        return Err(MalformedStream::Truncated { bit_len: bits.len() }.into());
    }
    Ok(result)
}
