use std::hint::black_box;
use std::io;
use std::time::{Duration, Instant};

use dyn_size_of::GetSize;
use huffpack::{CodeTable, FrequencyTable, HuffmanTree, decode_with, encode_with};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use crate::BenchConf;

impl BenchConf {
    /// Returns pseudo-random text for testing.
    fn text(&self) -> io::Result<Box<[u8]>> {
        if self.len <= self.symbols as usize { return Ok((0..self.len).map(|v| v as u8).collect()); }

        let spread = 1.0 + self.spread as f64*0.001;
        let weights: Vec<_> = (1..=self.symbols as i32).map(|v| spread.powi(v)).collect();
        let dist = WeightedIndex::new(weights)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let rng = Pcg64Mcg::seed_from_u64(self.seed);

        // each symbol occurs at least once
        Ok((0..self.symbols).map(|v| v as u8).chain(
            dist.sample_iter(rng).map(|v| v as u8).take(self.len - self.symbols as usize)
        ).collect())
    }

    /// Calls `f` for `self.time` seconds (at least once) to warm up the CPU cache,
    /// then calls it again the same number of times and returns the average time of a call in seconds.
    fn measure<R>(&self, mut f: impl FnMut() -> R) -> f64 {
        let warm_up = Duration::from_secs(self.time.into());
        let warm_up_start = Instant::now();
        let mut calls = 0u64;
        while calls == 0 || warm_up_start.elapsed() < warm_up {
            black_box(f());
            calls += 1;
        }
        let start = Instant::now();
        for _ in 0..calls { black_box(f()); }
        let average = start.elapsed().as_secs_f64() / calls as f64;
        tracing::debug!(calls, average, "measured");
        average
    }

    fn print_speed(&self, label: &str, sec: f64) {
        let mb = self.len as f64 / (1024 * 1024) as f64;
        println!("{}: {:.0} mb/sec", label, mb / sec);
    }

    fn print_time(&self, label: &str, sec: f64) {
        println!("{} [ns]: {:.0}", label, sec * 1_000_000_000.0);
    }
}

/// Returns the description of the first difference between `original` and `decoded` texts.
fn compare_texts(original: &[u8], decoded: &[u8]) -> Option<String> {
    if original.len() != decoded.len() {
        return Some(format!("decoded text has length {} different from original {}", decoded.len(), original.len()));
    }
    original.iter().zip(decoded).position(|(e, g)| e != g).map(|i|
        format!("decoded text at index {} has {}, while the original has {}", i, decoded[i], original[i])
    )
}

pub fn benchmark(conf: &BenchConf) -> io::Result<()> {
    let text = conf.text()?;
    if text.is_empty() {
        println!("Nothing to benchmark for empty text");
        return Ok(());
    }
    tracing::info!(len = text.len(), symbols = conf.symbols, seed = conf.seed, "benchmarking");

    conf.print_speed("Counting symbol occurrences", conf.measure(||
        FrequencyTable::with_occurrences_of(text.iter())
    ));
    let frequencies = FrequencyTable::with_occurrences_of(text.iter());
    println!("Entropy [bits/symbol]: {:.3}", frequencies.entropy());

    conf.print_time("Tree construction", conf.measure(|| HuffmanTree::from_frequencies(&frequencies)));
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    conf.print_time("Code table derivation", conf.measure(|| CodeTable::from_tree(&tree)));
    let table = CodeTable::from_tree(&tree);
    println!("Tree size [bytes]: {}", tree.size_bytes());
    println!("Code table size [bytes]: {}", table.size_bytes());
    println!("Longest codeword [bits]: {}", tree.height());

    conf.print_speed("Encoding", conf.measure(|| encode_with(&text, &table)));
    let bits = encode_with(&text, &table)?;
    println!("Huffman code [bits/symbol]: {:.3}", bits.len() as f64 / text.len().max(1) as f64);
    println!("Packed bits size [bytes]: {}", bits.size_bytes());

    conf.print_speed("Decoding", conf.measure(|| decode_with(&bits, &tree)));

    if conf.verify {
        print!("Verification... ");
        let decoded = decode_with(&bits, &tree)?;
        match compare_texts(&text, &decoded) {
            None => println!("DONE"),
            Some(difference) => {
                println!("FAIL");
                return Err(io::Error::new(io::ErrorKind::InvalidData, difference));
            }
        }
    }
    Ok(())
}
