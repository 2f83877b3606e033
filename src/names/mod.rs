//! Place-name index: exact lookup, prefix autocomplete and name → nodes.
//!
//! Names are compared in a normalized form: only ASCII Latin letters and
//! spaces are kept, letters are lowercased, and runs of spaces collapse into
//! one. The original spelling is what queries return.
//!
//! ```rust
//! use wayfinder::names::NameIndex;
//!
//! let mut index = NameIndex::new();
//! index.register("Soda Hall", 1);
//! index.register("Sod Farm", 2);
//!
//! assert_eq!(index.lookup_exact("soda   hall!!"), Some("Soda Hall"));
//! assert_eq!(index.autocomplete("SOD"), vec!["Soda Hall", "Sod Farm"]);
//! assert_eq!(index.nodes_for_name("Soda Hall"), &[1]);
//! ```

mod trie;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use trie::{Trie, WordId};
use wayfinder_types::node::NodeId;

/// Normalize a name for comparison.
///
/// Characters other than ASCII letters and spaces are removed, letters are
/// lowercased, runs of spaces collapse into a single space and leading or
/// trailing spaces are dropped. The function is idempotent.
///
/// ```rust
/// use wayfinder::names::normalize;
///
/// assert_eq!(normalize("  Soda   Hall!! "), "soda hall");
/// assert_eq!(normalize("Café 24/7"), "caf");
/// assert_eq!(normalize(&normalize("Cory-Hall")), normalize("Cory-Hall"));
/// ```
pub fn normalize(name: &str) -> String {
    let mut normalized = normalize_prefix(name);
    if normalized.ends_with(' ') {
        normalized.pop();
    }
    normalized
}

/// Normalization for partial input: like [`normalize`] but a single trailing
/// space is kept, so `"soda "` matches "Soda Hall" and not "Sodas".
fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if c.is_ascii_alphabetic() {
            normalized.push(c.to_ascii_lowercase());
        } else if c == ' ' && !normalized.is_empty() && !normalized.ends_with(' ') {
            normalized.push(' ');
        }
    }
    normalized
}

/// Index of place names registered during ingestion.
#[derive(Debug, Default)]
pub struct NameIndex {
    trie: Trie,
    /// Original spelling per normalized form, indexed by `WordId`.
    originals: Vec<String>,
    words: FxHashMap<String, WordId>,
    nodes: FxHashMap<String, SmallVec<[NodeId; 2]>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `node` with `name`.
    ///
    /// A node is recorded once per name. The first original spelling
    /// registered for a normalized form is the one returned by lookups;
    /// later spellings that normalize identically only gain node associations.
    /// Names without any letters normalize to the empty string. They sit at
    /// the trie root, so only the empty prefix (or an exact lookup of a
    /// letterless query) finds them.
    pub fn register(&mut self, name: &str, node: NodeId) {
        let nodes = self.nodes.entry(name.to_string()).or_default();
        if !nodes.contains(&node) {
            nodes.push(node);
        }

        let normalized = normalize(name);
        if normalized.is_empty() {
            log::debug!("Name {:?} has no letters, indexing at the root", name);
        }
        if self.words.contains_key(&normalized) {
            return;
        }

        let Ok(id) = WordId::try_from(self.originals.len()) else {
            log::warn!("Name index is full, not indexing {:?}", name);
            return;
        };
        self.trie.insert(&normalized, id);
        self.words.insert(normalized, id);
        self.originals.push(name.to_string());
    }

    /// The original spelling registered for `name`'s normalized form.
    pub fn lookup_exact(&self, name: &str) -> Option<&str> {
        self.words
            .get(&normalize(name))
            .map(|&id| self.originals[id as usize].as_str())
    }

    /// Original spellings of every name starting with `prefix`, in
    /// registration order. The empty prefix returns every registered name.
    pub fn autocomplete(&self, prefix: &str) -> Vec<&str> {
        match self.trie.find(&normalize_prefix(prefix)) {
            Some(ids) => ids
                .iter()
                .map(|&id| self.originals[id as usize].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nodes registered under exactly this original spelling.
    pub fn nodes_for_name(&self, name: &str) -> &[NodeId] {
        self.nodes
            .get(name)
            .map(|nodes| nodes.as_slice())
            .unwrap_or_default()
    }

    /// Number of distinct normalized names.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Number of distinct original spellings.
    pub fn spelling_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn trie_nodes(&self) -> usize {
        self.trie.node_count()
    }
}
