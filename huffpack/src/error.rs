//! Errors reported by the coding pipeline.

use std::io;

use thiserror::Error;

/// Describes why a packed bit stream could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedStream {
    /// The bit at index `bit_index` leads to a child that does not exist
    /// (possible only for the tree of a single symbol, whose right child is absent).
    #[error("bit {bit_index} leads to an absent child")]
    AbsentChild { bit_index: usize },
    /// The stream of `bit_len` bits ends in the middle of a codeword.
    #[error("stream of {bit_len} bits ends in the middle of a codeword")]
    Truncated { bit_len: usize },
    /// The stream is not empty, but there is no tree to decode it with.
    #[error("stream of {bit_len} bits has no coding tree")]
    MissingTree { bit_len: usize },
    /// The stored bit length differs from the one implied by the stored frequencies.
    #[error("stored bit length {found} differs from expected {expected}")]
    LengthMismatch { expected: u64, found: u64 },
}

/// Errors returned by [`crate::encode`], [`crate::decode`] and the components they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// Huffman tree was requested for no symbols.
    #[error("cannot build Huffman tree without symbols")]
    EmptyInput,
    /// Encoded byte has no codeword in the code table.
    #[error("symbol {0:#04x} has no codeword")]
    UnknownSymbol(u8),
    /// Total weight of the symbols or total length of their codewords does not fit in `u64`.
    #[error("total weight or bit length of symbols overflows u64")]
    Overflow,
    /// Packed bits are corrupted or truncated.
    #[error("malformed stream: {0}")]
    MalformedStream(#[from] MalformedStream),
}

impl From<HuffmanError> for io::Error {
    fn from(err: HuffmanError) -> Self {
        let kind = match err {
            HuffmanError::MalformedStream(_) | HuffmanError::Overflow => io::ErrorKind::InvalidData,
            HuffmanError::EmptyInput | HuffmanError::UnknownSymbol(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(HuffmanError::UnknownSymbol(b'a').to_string(), "symbol 0x61 has no codeword");
        assert_eq!(HuffmanError::from(MalformedStream::Truncated { bit_len: 9 }).to_string(),
                   "malformed stream: stream of 9 bits ends in the middle of a codeword");
    }

    #[test]
    fn into_io_error() {
        let e: io::Error = HuffmanError::MalformedStream(MalformedStream::AbsentChild { bit_index: 3 }).into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        let e: io::Error = HuffmanError::Overflow.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        let e: io::Error = HuffmanError::EmptyInput.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidInput);
    }
}
