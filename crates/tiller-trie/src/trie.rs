//! The immutable trie and its read-only operations.
//!
//! Nodes are reference-counted, so a sub-view or a union shares structure
//! with the tries it came from instead of copying them. Each node caches the
//! number of words beneath it; the cache is established whenever a node is
//! built and never changes afterwards, which makes `len` and `is_empty` O(1).

use std::collections::BTreeMap;
use std::sync::Arc;

/// A single trie node, keyed from its parent by one character.
///
/// A node "is a word" iff `value` is present. Invariant: `word_count` equals
/// 1-if-word plus the sum of the children's counts.
#[derive(Debug)]
pub(crate) struct Node<V> {
    pub(crate) value: Option<V>,
    pub(crate) children: BTreeMap<char, Arc<Node<V>>>,
    pub(crate) word_count: usize,
}

impl<V> Node<V> {
    /// Find a child for `ch`, trying the exact character first, then its
    /// ASCII lower- and upper-case forms. Returns the stored key alongside
    /// the node so callers can accumulate the stored spelling.
    fn child(&self, ch: char) -> Option<(char, &Arc<Node<V>>)> {
        for key in [ch, ch.to_ascii_lowercase(), ch.to_ascii_uppercase()] {
            if let Some(node) = self.children.get(&key) {
                return Some((key, node));
            }
        }
        None
    }
}

/// Immutable prefix tree mapping words to typed values.
///
/// A `Trie` may be a view into a larger trie: `prefix` records the characters
/// consumed to reach `root`, so word materialization and
/// `longest_common_prefix` always report full words rather than suffixes.
#[derive(Debug)]
pub struct Trie<V> {
    pub(crate) root: Arc<Node<V>>,
    pub(crate) prefix: String,
}

impl<V> Clone for Trie<V> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            prefix: self.prefix.clone(),
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> Trie<V> {
    /// The explicitly-empty trie.
    pub fn empty() -> Self {
        Self {
            root: Arc::new(Node {
                value: None,
                children: BTreeMap::new(),
                word_count: 0,
            }),
            prefix: String::new(),
        }
    }

    /// Number of words in the trie. O(1) via the cached word count.
    pub fn len(&self) -> usize {
        self.root.word_count
    }

    /// Whether the trie holds no words. O(1).
    pub fn is_empty(&self) -> bool {
        self.root.word_count == 0
    }

    /// The prefix consumed to reach this view (empty for a root trie).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Exact-word query, case-insensitive per character.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Look up the value stored for `word`, case-insensitive per character.
    pub fn lookup(&self, word: &str) -> Option<&V> {
        let mut node = &self.root;
        for ch in word.chars() {
            let (_, next) = node.child(ch)?;
            node = next;
        }
        node.value.as_ref()
    }

    /// Restrict the trie to words beginning with `prefix`.
    ///
    /// The returned trie shares this trie's node graph and extends the
    /// consumed-prefix string by the stored spelling of the matched
    /// characters. A prefix matching nothing yields an explicitly-empty
    /// view that still carries the requested prefix, never an error, so
    /// unions over sibling views keep a common coordinate space.
    pub fn sub_trie(&self, prefix: &str) -> Trie<V> {
        let mut node = &self.root;
        let mut consumed = self.prefix.clone();
        let mut chars = prefix.chars();
        while let Some(ch) = chars.next() {
            match node.child(ch) {
                Some((stored, next)) => {
                    consumed.push(stored);
                    node = next;
                },
                None => {
                    consumed.push(ch);
                    consumed.extend(chars);
                    return Trie {
                        root: Arc::new(Node {
                            value: None,
                            children: BTreeMap::new(),
                            word_count: 0,
                        }),
                        prefix: consumed,
                    };
                },
            }
        }
        Trie {
            root: Arc::clone(node),
            prefix: consumed,
        }
    }

    /// The longest prefix shared by every word in the trie, including this
    /// view's consumed prefix.
    ///
    /// Descends while a node has exactly one child and is not itself a word.
    /// An empty root trie (or one whose root is already branching or
    /// terminal) yields the consumed prefix unchanged -- the empty string
    /// for a root trie.
    pub fn longest_common_prefix(&self) -> String {
        if self.is_empty() {
            return self.prefix.clone();
        }
        let mut acc = self.prefix.clone();
        let mut node = &self.root;
        while node.value.is_none() && node.children.len() == 1 {
            let Some((ch, next)) = node.children.iter().next() else {
                break;
            };
            acc.push(*ch);
            node = next;
        }
        acc
    }

    /// All words in the trie, in sorted order.
    pub fn words(&self) -> Vec<String> {
        self.entries().into_iter().map(|(word, _)| word).collect()
    }

    /// All values in the trie, in word-sorted order.
    pub fn values(&self) -> Vec<&V> {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }

    /// The full word-to-value mapping, materialized by one depth-first
    /// traversal, in sorted order.
    pub fn entries(&self) -> Vec<(String, &V)> {
        let mut out = Vec::with_capacity(self.len());
        let mut word = self.prefix.clone();
        collect(&self.root, &mut word, &mut out);
        out
    }

    /// Transform every word's value through `f`.
    ///
    /// A word disappears from the result when `f` returns `None` for it; a
    /// node disappears entirely when neither it nor any descendant survives.
    /// Word counts are recomputed bottom-up for the rebuilt nodes.
    pub fn map<U>(&self, f: impl Fn(&V) -> Option<U>) -> Trie<U> {
        let root = match map_node(&self.root, &f) {
            Some(root) => root,
            None => Arc::new(Node {
                value: None,
                children: BTreeMap::new(),
                word_count: 0,
            }),
        };
        Trie {
            root,
            prefix: self.prefix.clone(),
        }
    }

    /// Keep only the words whose value satisfies `pred`.
    pub fn filter(&self, pred: impl Fn(&V) -> bool) -> Trie<V>
    where
        V: Clone,
    {
        self.map(|v| if pred(v) { Some(v.clone()) } else { None })
    }

    /// Merge two tries into one.
    ///
    /// For a word present in both, the resulting value is taken from either
    /// side with no defined preference -- union exists for suggestion-set
    /// composition, not authoritative lookup, and callers must not rely on
    /// which side wins. Both operands are expected to share the same
    /// consumed prefix; the result carries this trie's. Children are merged
    /// by stored character.
    pub fn union(&self, other: &Trie<V>) -> Trie<V>
    where
        V: Clone,
    {
        Trie {
            root: union_nodes(&self.root, &other.root),
            prefix: self.prefix.clone(),
        }
    }
}

fn collect<'a, V>(node: &'a Node<V>, word: &mut String, out: &mut Vec<(String, &'a V)>) {
    if let Some(value) = &node.value {
        out.push((word.clone(), value));
    }
    for (ch, child) in &node.children {
        word.push(*ch);
        collect(child, word, out);
        word.pop();
    }
}

fn map_node<V, U>(node: &Node<V>, f: &impl Fn(&V) -> Option<U>) -> Option<Arc<Node<U>>> {
    let value = node.value.as_ref().and_then(f);
    let mut children = BTreeMap::new();
    let mut count = usize::from(value.is_some());
    for (ch, child) in &node.children {
        if let Some(mapped) = map_node(child, f) {
            count += mapped.word_count;
            children.insert(*ch, mapped);
        }
    }
    if value.is_none() && children.is_empty() {
        return None;
    }
    Some(Arc::new(Node {
        value,
        children,
        word_count: count,
    }))
}

fn union_nodes<V: Clone>(a: &Node<V>, b: &Node<V>) -> Arc<Node<V>> {
    let value = a.value.clone().or_else(|| b.value.clone());
    let mut children: BTreeMap<char, Arc<Node<V>>> = BTreeMap::new();
    for (ch, child) in &a.children {
        let merged = match b.children.get(ch) {
            Some(other) => union_nodes(child, other),
            None => Arc::clone(child),
        };
        children.insert(*ch, merged);
    }
    for (ch, child) in &b.children {
        if !children.contains_key(ch) {
            children.insert(*ch, Arc::clone(child));
        }
    }
    let word_count =
        usize::from(value.is_some()) + children.values().map(|c| c.word_count).sum::<usize>();
    Arc::new(Node {
        value,
        children,
        word_count,
    })
}
