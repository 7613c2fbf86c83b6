//! Persistent form of compressed data.

use std::io::{self, Read};

use binout::{Serializer, VByte};
use dyn_size_of::GetSize;

use crate::frequencies::invalid_data;
use crate::{CodeTable, FrequencyTable, HuffmanError, HuffmanTree, MalformedStream, PackedBits};

/// Bytes that begin each written [`Compressed`].
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Result of [`crate::encode`]: packed bits with their exact length
/// and the frequency table from which the decoder rebuilds the Huffman tree.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Compressed {
    frequencies: FrequencyTable,
    bits: PackedBits,
}

impl GetSize for Compressed {
    fn size_bytes_dyn(&self) -> usize { self.frequencies.size_bytes_dyn() + self.bits.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl Compressed {
    /// Constructs `Compressed` from its parts.
    #[inline] pub fn new(frequencies: FrequencyTable, bits: PackedBits) -> Self {
        Self { frequencies, bits }
    }

    /// Returns the frequencies of the symbols of the original text (the tree descriptor).
    #[inline] pub fn frequencies(&self) -> &FrequencyTable { &self.frequencies }

    /// Returns the packed bits.
    #[inline] pub fn bits(&self) -> &PackedBits { &self.bits }

    /// Returns the exact number of packed bits, padding excluded.
    #[inline] pub fn bit_len(&self) -> usize { self.bits.len() }

    /// Returns `self` split into the frequency table and the packed bits.
    #[inline] pub fn into_parts(self) -> (FrequencyTable, PackedBits) { (self.frequencies, self.bits) }

    /// Decodes the original text.
    #[inline] pub fn decode(&self) -> Result<Vec<u8>, HuffmanError> {
        crate::decode(&self.bits, &self.frequencies)
    }

    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        MAGIC.len() + VByte::size(self.bits.len() as u64) + self.frequencies.write_bytes() + self.bits.bytes_len()
    }

    /// Writes `self` to the `output` as:
    /// [`MAGIC`], the bit length (VByte), the frequency table and the packed bits rounded up to whole bytes.
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        output.write_all(&MAGIC)?;
        VByte::write(output, self.bits.len() as u64)?;
        self.frequencies.write(output)?;
        output.write_all(&self.bits.to_bytes())
    }

    /// Returns `self` written to a vector.
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut result = Vec::with_capacity(self.write_bytes());
        self.write(&mut result)?;
        Ok(result)
    }

    /// Reads `Compressed` written by `write` from the `input`.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if the data are corrupted,
    /// in particular if the bit length differs from the one implied by the frequency table.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        let mut magic = [0u8; MAGIC.len()];
        input.read_exact(&mut magic)?;
        if magic != MAGIC { return Err(invalid_data(format!("unknown format {magic:02x?}"))); }
        let bit_len: u64 = VByte::read(input)?;
        let frequencies = FrequencyTable::read(input)?;
        let expected = if frequencies.is_empty() { 0 } else {
            let tree = HuffmanTree::from_frequencies(&frequencies)?;
            CodeTable::from_tree(&tree).encoded_len(&frequencies)?
        };
        if bit_len != expected {
            return Err(HuffmanError::from(MalformedStream::LengthMismatch { expected, found: bit_len }).into());
        }
        let (Ok(bit_len), Ok(bytes_len)) = (usize::try_from(bit_len), usize::try_from(bit_len.div_ceil(8))) else {
            return Err(invalid_data(format!("{bit_len} bits do not fit in memory")));
        };
        let mut bytes = Vec::new();
        input.take(bytes_len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != bytes_len {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof,
                format!("{} bytes of packed bits instead of {bytes_len}", bytes.len())));
        }
        let bits = PackedBits::from_bytes(&bytes, bit_len).map_err(HuffmanError::from)?;
        Ok(Self { frequencies, bits })
    }

    /// Reads `Compressed` from `bytes` that must contain nothing else.
    pub fn from_slice(mut bytes: &[u8]) -> io::Result<Self> {
        let result = Self::read(&mut bytes)?;
        if !bytes.is_empty() {
            return Err(invalid_data(format!("{} unexpected bytes after packed bits", bytes.len())));
        }
        Ok(result)
    }
}
