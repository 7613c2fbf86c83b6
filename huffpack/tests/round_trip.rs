//! End-to-end tests of compression, persistence and decompression.

use huffpack::{decode, encode, CodeTable, Compressed, FrequencyTable, HuffmanTree, Node};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

/// Returns pseudo-random text of `len` bytes over `symbols` symbols,
/// each successive symbol being `spread` times more frequent than the previous one.
fn text(len: usize, symbols: u16, spread: f64, seed: u64) -> Vec<u8> {
    let weights: Vec<_> = (1..=symbols as i32).map(|v| spread.powi(v)).collect();
    let dist = WeightedIndex::new(weights).unwrap();
    dist.sample_iter(Pcg64Mcg::seed_from_u64(seed)).map(|v| v as u8).take(len).collect()
}

fn round_trip(text: &[u8]) {
    let compressed = encode(text).unwrap();
    let buff = compressed.to_vec().unwrap();
    assert_eq!(buff.len(), compressed.write_bytes());
    let read = Compressed::from_slice(&buff).unwrap();
    assert_eq!(read, compressed);
    let (frequencies, bits) = read.into_parts();
    assert_eq!(decode(&bits, &frequencies).unwrap(), text);
}

#[test]
fn random_texts() {
    for (seed, (symbols, spread)) in [(1, 1.0), (2, 1.01), (16, 1.3), (200, 1.05), (256, 1.1)].into_iter().enumerate() {
        round_trip(&text(10_000, symbols, spread, seed as u64));
    }
}

#[test]
fn short_texts() {
    round_trip(b"");
    round_trip(b"a");
    round_trip(b"ab");
    round_trip(b"aaaa");
    round_trip(b"aaabbc");
    round_trip(&[0, 255, 0, 255, 128]);
}

#[test]
fn all_byte_values() {
    let text: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).chain([7; 100]).collect();
    round_trip(&text);
}

#[test]
fn weights_and_optimality() {
    let text = text(50_000, 64, 1.08, 7);
    let frequencies = FrequencyTable::with_occurrences_of(&text);
    let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
    assert_eq!(tree.weight(), text.len() as u64);
    for node in tree.nodes() {
        if let Node::Internal { weight, left, right } = *node {
            assert_eq!(weight, tree.node(left).weight() + right.map_or(0, |r| tree.node(r).weight()));
        }
    }
    let bits = CodeTable::from_tree(&tree).encoded_len(&frequencies).unwrap();
    let entropy_bits = frequencies.entropy() * text.len() as f64;
    // Huffman coding costs less than one extra bit per symbol above the entropy
    assert!(bits as f64 >= entropy_bits - 1e-6);
    assert!((bits as f64) < entropy_bits + text.len() as f64);
    assert!(bits <= 8 * text.len() as u64);
}

#[test]
fn independent_runs_in_parallel() {
    let texts: Vec<Vec<u8>> = (0..4).map(|seed| text(5_000, 32, 1.1, seed)).collect();
    std::thread::scope(|s| {
        for t in &texts {
            s.spawn(move || round_trip(t));
        }
    });
}
