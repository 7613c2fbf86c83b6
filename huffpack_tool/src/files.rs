use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use huffpack::Compressed;

/// Compresses the content of `input` file into `output` file.
pub fn compress(input: &Path, output: &Path) -> io::Result<()> {
    let text = std::fs::read(input)?;
    tracing::debug!("read {} bytes from {}", text.len(), input.display());
    let compressed = huffpack::encode(&text)?;
    let frequencies = compressed.frequencies();
    let mut writer = BufWriter::new(File::create(output)?);
    compressed.write(&mut writer)?;
    writer.flush()?;
    tracing::info!("compressed {} into {}", input.display(), output.display());
    println!("Original size [bytes]: {}", text.len());
    println!("Compressed size [bytes]: {}", compressed.write_bytes());
    println!("Distinct symbols: {}", frequencies.number_of_symbols());
    if !text.is_empty() {
        println!("Entropy [bits/symbol]: {:.3}", frequencies.entropy());
        println!("Huffman code [bits/symbol]: {:.3}", compressed.bit_len() as f64 / text.len() as f64);
    }
    Ok(())
}

/// Decompresses the content of `input` file (written by [`compress`]) into `output` file.
pub fn decompress(input: &Path, output: &Path) -> io::Result<()> {
    let mut reader = BufReader::new(File::open(input)?);
    let compressed = Compressed::read(&mut reader)?;
    tracing::debug!("read {} packed bits from {}", compressed.bit_len(), input.display());
    let text = compressed.decode()?;
    std::fs::write(output, &text)?;
    tracing::info!("decompressed {} into {} ({} bytes)", input.display(), output.display(), text.len());
    Ok(())
}
