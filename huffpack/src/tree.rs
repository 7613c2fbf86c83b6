//! Huffman tree construction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use dyn_size_of::GetSize;

use crate::{FrequencyTable, HuffmanError};

/// Handle of a node in the arena of [`HuffmanTree`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns index of the node in [`HuffmanTree::nodes`].
    #[inline(always)] pub fn index(self) -> usize { self.0 as usize }
}

/// Node of the Huffman tree.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Node {
    /// Leaf that represents `symbol` occurring `weight` times.
    Leaf { symbol: u8, weight: u64 },
    /// Internal node whose `weight` is the sum of weights of its children.
    /// `right` is absent only in the tree of a single symbol.
    Internal { weight: u64, left: NodeId, right: Option<NodeId> },
}

impl GetSize for Node {}

impl Node {
    /// Returns weight of the node, i.e. total number of occurrences of the symbols in its subtree.
    #[inline] pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight
        }
    }

    /// Returns the child pointed by the given `bit` (`false` for left, `true` for right),
    /// or `None` if `self` is a leaf or has no such child.
    #[inline] pub fn child(&self, bit: bool) -> Option<NodeId> {
        match *self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => if bit { right } else { Some(left) }
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Node::Leaf { .. }) }
}

/// Binary Huffman tree, whose nodes are stored in an arena.
///
/// The tree is constructed by the classical greedy algorithm:
/// two lightest nodes are repeatedly merged under a new internal node,
/// the first extracted becomes its left (`0`) and the second its right (`1`) child.
///
/// Ties between nodes of equal weights are broken deterministically, by the order of:
/// leaves (ordered by their symbols) first and then internal nodes (ordered by creation).
/// Thus the same frequencies always give the same tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HuffmanTree {
    /// Leaves (in increasing symbol order) followed by internal nodes (in creation order).
    nodes: Box<[Node]>,
    root: NodeId,
}

impl GetSize for HuffmanTree {
    fn size_bytes_dyn(&self) -> usize { self.nodes.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl HuffmanTree {
    /// Constructs the Huffman tree for the given `frequencies`.
    ///
    /// If there is only one symbol, its leaf becomes the left child of the root
    /// (that has no right child), so the symbol gets the one bit codeword `0`.
    ///
    /// Fails with [`HuffmanError::EmptyInput`] if `frequencies` is empty,
    /// and with [`HuffmanError::Overflow`] if the total weight does not fit in `u64`.
    /// The algorithm runs in *O(S log S)* time, where *S* is the number of symbols.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self, HuffmanError> {
        let symbols = frequencies.number_of_symbols();
        let mut nodes = Vec::with_capacity(2 * symbols);
        // (weight, order, node); order of leaf is its symbol, of internal node 256+creation index
        let mut heap = BinaryHeap::with_capacity(symbols);
        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse((weight, symbol as u32, NodeId(nodes.len() as u32))));
            nodes.push(Node::Leaf { symbol, weight });
        }
        if symbols == 1 {
            nodes.push(Node::Internal { weight: nodes[0].weight(), left: NodeId(0), right: None });
            return Ok(Self { nodes: nodes.into_boxed_slice(), root: NodeId(1) });
        }
        let mut order = 256u32;
        let root = loop {
            let Some(Reverse((left_weight, _, left))) = heap.pop() else {
                return Err(HuffmanError::EmptyInput);
            };
            let Some(Reverse((right_weight, _, right))) = heap.pop() else { break left };
            let weight = left_weight.checked_add(right_weight).ok_or(HuffmanError::Overflow)?;
            let id = NodeId(nodes.len() as u32);
            nodes.push(Node::Internal { weight, left, right: Some(right) });
            heap.push(Reverse((weight, order, id)));
            order += 1;
        };
        Ok(Self { nodes: nodes.into_boxed_slice(), root })
    }

    /// Counts occurrences of all `bytes` and constructs the Huffman tree for obtained frequencies.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HuffmanError> {
        Self::from_frequencies(&FrequencyTable::with_occurrences_of(bytes))
    }

    /// Returns the root of `self`.
    #[inline] pub fn root(&self) -> NodeId { self.root }

    /// Returns the node with given `id`.
    #[inline] pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id.index()] }

    /// Returns all nodes: leaves (in increasing symbol order) followed by internal nodes.
    #[inline] pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns weight of the root, i.e. the length of the input the tree was built for.
    #[inline] pub fn weight(&self) -> u64 { self.node(self.root).weight() }

    /// Returns number of leaves, i.e. number of different symbols.
    pub fn number_of_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of edges on the longest root-to-leaf path, i.e. the length of the longest codeword.
    pub fn height(&self) -> u32 {
        let mut result = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { .. } => result = result.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right { stack.push((right, depth + 1)); }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_weights(tree: &HuffmanTree) {
        for node in tree.nodes() {
            if let Node::Internal { weight, left, right } = *node {
                assert_eq!(weight, tree.node(left).weight() + right.map_or(0, |r| tree.node(r).weight()));
            }
        }
    }

    #[test]
    fn tree_aaabbc() {
        //    / \
        //   a  / \
        //     c   b
        let tree = HuffmanTree::from_bytes(b"aaabbc").unwrap();
        assert_weights(&tree);
        assert_eq!(tree.weight(), 6);
        assert_eq!(tree.number_of_leaves(), 3);
        assert_eq!(tree.height(), 2);
        let root = tree.node(tree.root());
        let a = tree.node(root.child(false).unwrap());
        assert_eq!(*a, Node::Leaf { symbol: b'a', weight: 3 });
        let cb = tree.node(root.child(true).unwrap());
        assert_eq!(cb.weight(), 3);
        assert_eq!(*tree.node(cb.child(false).unwrap()), Node::Leaf { symbol: b'c', weight: 1 });
        assert_eq!(*tree.node(cb.child(true).unwrap()), Node::Leaf { symbol: b'b', weight: 2 });
    }

    #[test]
    fn single_symbol() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        assert_weights(&tree);
        assert_eq!(tree.weight(), 4);
        assert_eq!(tree.height(), 1);
        let root = tree.node(tree.root());
        assert!(!root.is_leaf());
        assert_eq!(*tree.node(root.child(false).unwrap()), Node::Leaf { symbol: b'a', weight: 4 });
        assert_eq!(root.child(true), None);
    }

    #[test]
    fn empty() {
        assert_eq!(HuffmanTree::from_bytes(b""), Err(HuffmanError::EmptyInput));
    }

    #[test]
    fn total_weight_overflow() {
        let frequencies = FrequencyTable::from_counts([(0, u64::MAX), (1, 1)]);
        assert_eq!(HuffmanTree::from_frequencies(&frequencies), Err(HuffmanError::Overflow));
        let frequencies = FrequencyTable::from_counts([(0, u64::MAX - 1), (1, 1)]);
        assert_eq!(HuffmanTree::from_frequencies(&frequencies).unwrap().weight(), u64::MAX);
    }

    #[test]
    fn deterministic_ties() {
        let text = b"abcdefgh";
        let tree = HuffmanTree::from_bytes(text).unwrap();
        assert_eq!(tree, HuffmanTree::from_bytes(b"hgfedcba").unwrap());
        assert_weights(&tree);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.nodes().len(), 15);
    }

    #[test]
    fn all_symbols_skewed() {
        let frequencies = FrequencyTable::from_counts((0..=255u8).map(|s| (s, s as u64 * s as u64 + 1)));
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        assert_weights(&tree);
        assert_eq!(tree.weight(), frequencies.total());
        assert_eq!(tree.number_of_leaves(), 256);
        assert_eq!(tree.nodes().len(), 511);
    }

    #[test]
    fn fibonacci_depth() {
        let (mut a, mut b) = (1u64, 1u64);
        let frequencies = FrequencyTable::from_counts((0..20u8).map(|s| {
            let r = (s, a);
            (a, b) = (b, a + b);
            r
        }));
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        assert_weights(&tree);
        assert_eq!(tree.height(), 19);
    }
}
