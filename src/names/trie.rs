//! Character trie accumulating word ids along every prefix path.

use rustc_hash::FxHashMap;

/// Identifier of a normalized word inside the owning name index.
pub(crate) type WordId = u32;

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, TrieNode>,
    /// Every word whose path passes through this node, in insertion order.
    words: Vec<WordId>,
}

/// Prefix trie. The root accumulates every inserted word, so the empty
/// prefix matches all of them.
#[derive(Debug, Default)]
pub(crate) struct Trie {
    root: TrieNode,
    nodes: usize,
}

impl Trie {
    /// Insert `word` under `id`. Callers insert each distinct word once.
    pub fn insert(&mut self, word: &str, id: WordId) {
        let mut created = 0;
        let mut node = &mut self.root;
        node.words.push(id);
        for c in word.chars() {
            node = node.children.entry(c).or_insert_with(|| {
                created += 1;
                TrieNode::default()
            });
            node.words.push(id);
        }
        self.nodes += created;
    }

    /// Words accumulated at the end of `prefix`, or `None` if no inserted
    /// word starts with it.
    pub fn find(&self, prefix: &str) -> Option<&[WordId]> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.children.get(&c)?;
        }
        Some(&node.words)
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.nodes
    }
}
