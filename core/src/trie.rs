/// Prefix trie mapping scalar sequences to value sets.
use ahash::{AHashMap, AHashSet};
use std::hash::Hash;

/// A single trie node.
///
/// Children are stored twice: `edges` for O(1) descent and `children` to
/// remember the order in which edges were first created. All enumeration
/// walks `children`, so results are reproducible across runs.
#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: Vec<usize>,
    edges: AHashMap<char, usize>,
    values: Vec<V>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            edges: AHashMap::new(),
            values: Vec::new(),
        }
    }
}

/// Ordered key to value-set map with exact and prefix-subtree lookup.
///
/// Keys are walked one Unicode scalar per edge. Nodes live in a flat arena
/// (index 0 is the root) so deep keys never recurse.
///
/// # Example
/// ```
/// use cedict_core::trie::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// trie.insert("中", 1);
/// trie.insert("中国", 2);
/// trie.insert("中文", 3);
///
/// assert_eq!(trie.get("中国"), &[2]);
/// assert!(trie.get("国").is_empty());
///
/// // Node values first, then children in insertion order.
/// let all: Vec<i32> = trie.get_with_prefix("中").into_iter().copied().collect();
/// assert_eq!(all, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixTrie<V> {
    nodes: Vec<TrieNode<V>>,
}

impl<V: Eq + Hash> PrefixTrie<V> {
    /// Create a trie holding only an empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
        }
    }

    /// Attach `value` at the node reached by `key`, creating nodes as needed.
    ///
    /// Returns `false` when the value was already present at that node.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        let mut idx = 0;
        for ch in key.chars() {
            let existing = self.nodes[idx].edges.get(&ch).copied();
            idx = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    let node = &mut self.nodes[idx];
                    node.edges.insert(ch, child);
                    node.children.push(child);
                    child
                }
            };
        }

        let values = &mut self.nodes[idx].values;
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    fn find(&self, key: &str) -> Option<usize> {
        let mut idx = 0;
        for ch in key.chars() {
            idx = *self.nodes[idx].edges.get(&ch)?;
        }
        Some(idx)
    }

    /// Values stored exactly at `key`, or an empty slice.
    pub fn get(&self, key: &str) -> &[V] {
        self.find(key)
            .map(|idx| self.nodes[idx].values.as_slice())
            .unwrap_or(&[])
    }

    /// True if at least one value is stored exactly at `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    /// All values whose key equals or extends `key`.
    ///
    /// Traversal is pre-order: a node's own values come before its
    /// subtree, and sibling subtrees follow edge creation order. A value
    /// reachable under several keys is reported once, at its first position.
    pub fn get_with_prefix(&self, key: &str) -> Vec<&V> {
        let mut out = Vec::new();
        let Some(start) = self.find(key) else {
            return out;
        };

        let mut seen: AHashSet<&V> = AHashSet::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            for value in &node.values {
                if seen.insert(value) {
                    out.push(value);
                }
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True if no value has been inserted under any key.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.values.is_empty())
    }
}

impl<V: Eq + Hash> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}
