use crate::{CodeTable, HuffmanError, PackedBits};

/// Encodes `bytes` with codewords from `table`, concatenating them in the order of `bytes`.
///
/// Fails with [`HuffmanError::UnknownSymbol`] (before writing any bit) if some byte has no codeword in `table`.
/// The algorithm runs in *O(N + total number of bits)* time.
pub fn encode_with(bytes: &[u8], table: &CodeTable) -> Result<PackedBits, HuffmanError> {
    let mut total_bits = 0usize;
    for &symbol in bytes {
        total_bits += table.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?.len as usize;
    }
    let mut result = PackedBits::with_zeroed_bits(total_bits);
    let mut bit_index = 0usize;
    for &symbol in bytes {
        let Some(code) = table.get(symbol) else { return Err(HuffmanError::UnknownSymbol(symbol)) };
        for bit in code.bits() {
            if bit { result.set(bit_index); }
            bit_index += 1;
        }
    }
    debug_assert_eq!(bit_index, total_bits);
    Ok(result)
}
