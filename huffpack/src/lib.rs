#![doc = include_str!("../README.md")]

mod error;
pub use error::{HuffmanError, MalformedStream};
mod frequencies;
pub use frequencies::FrequencyTable;
mod tree;
pub use tree::{HuffmanTree, Node, NodeId};
mod code;
pub use code::{Code, CodeTable};
mod bits;
pub use bits::PackedBits;
mod encoder;
pub use encoder::encode_with;
mod decoder;
pub use decoder::{Decoder, DecodingResult, decode_with};
mod container;
pub use container::{Compressed, MAGIC};

/// Compresses `bytes`.
///
/// Counts occurrences of the bytes, builds the Huffman tree and the table of codewords for them,
/// and encodes `bytes` with this table.
/// For empty `bytes`, returns empty frequency table and zero bits without building any tree.
pub fn encode(bytes: &[u8]) -> Result<Compressed, HuffmanError> {
    let frequencies = FrequencyTable::with_occurrences_of(bytes);
    if frequencies.is_empty() {
        return Ok(Compressed::new(frequencies, PackedBits::default()));
    }
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let bits = encode_with(bytes, &CodeTable::from_tree(&tree))?;
    Ok(Compressed::new(frequencies, bits))
}

/// Decompresses `bits` encoded with the Huffman tree built for `frequencies`.
///
/// Empty `frequencies` and `bits` give empty result, without building any tree.
/// Fails with [`HuffmanError::MalformedStream`] if `bits` cannot be decoded.
pub fn decode(bits: &PackedBits, frequencies: &FrequencyTable) -> Result<Vec<u8>, HuffmanError> {
    if frequencies.is_empty() {
        return if bits.is_empty() {
            Ok(Vec::new())
        } else {
            Err(MalformedStream::MissingTree { bit_len: bits.len() }.into())
        };
    }
    decode_with(bits, &HuffmanTree::from_frequencies(frequencies)?)
}
