//! One-time trie construction.
//!
//! A `TrieBuilder` is the only mutable form a trie ever takes. `build()`
//! freezes it into the immutable `Trie`, computing each node's cached word
//! count bottom-up on the way.

use std::collections::BTreeMap;
use std::sync::Arc;

use tiller_types::{Result, ShellError};

use crate::trie::{Node, Trie};

#[derive(Debug)]
struct BuilderNode<V> {
    value: Option<V>,
    children: BTreeMap<char, BuilderNode<V>>,
}

impl<V> BuilderNode<V> {
    fn new() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

/// One-time construction phase for a `Trie`.
///
/// Duplicate words (compared case-insensitively) and empty words are
/// rejected at insertion rather than silently overwritten.
#[derive(Debug)]
pub struct TrieBuilder<V> {
    root: BuilderNode<V>,
}

impl<V> Default for TrieBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TrieBuilder<V> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            root: BuilderNode::new(),
        }
    }

    /// Insert a word. Fails if `word` is empty or already present.
    pub fn insert(&mut self, word: &str, value: V) -> Result<()> {
        if word.is_empty() {
            return Err(ShellError::Registration(
                "cannot insert an empty word".into(),
            ));
        }
        let mut node = &mut self.root;
        for ch in word.chars() {
            // Reuse an existing child under either case before creating one.
            let key = [ch, ch.to_ascii_lowercase(), ch.to_ascii_uppercase()]
                .into_iter()
                .find(|k| node.children.contains_key(k))
                .unwrap_or(ch);
            node = node.children.entry(key).or_insert_with(BuilderNode::new);
        }
        if node.value.is_some() {
            return Err(ShellError::Registration(format!("duplicate word '{word}'")));
        }
        node.value = Some(value);
        Ok(())
    }

    /// Freeze into an immutable `Trie`.
    pub fn build(self) -> Trie<V> {
        Trie {
            root: freeze(self.root),
            prefix: String::new(),
        }
    }
}

fn freeze<V>(node: BuilderNode<V>) -> Arc<Node<V>> {
    let mut children = BTreeMap::new();
    let mut word_count = usize::from(node.value.is_some());
    for (ch, child) in node.children {
        let frozen = freeze(child);
        word_count += frozen.word_count;
        children.insert(ch, frozen);
    }
    Arc::new(Node {
        value: node.value,
        children,
        word_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_is_rejected() {
        let mut builder = TrieBuilder::new();
        assert!(builder.insert("", 1).is_err());
    }

    #[test]
    fn duplicate_word_is_rejected() {
        let mut builder = TrieBuilder::new();
        builder.insert("stop", 1).unwrap();
        let err = builder.insert("stop", 2).unwrap_err();
        assert!(matches!(err, ShellError::Registration(_)));
    }

    #[test]
    fn duplicate_under_different_case_is_rejected() {
        let mut builder = TrieBuilder::new();
        builder.insert("Stop", 1).unwrap();
        assert!(builder.insert("stop", 2).is_err());
    }

    #[test]
    fn prefix_of_existing_word_is_fine() {
        let mut builder = TrieBuilder::new();
        builder.insert("start", 1).unwrap();
        builder.insert("star", 2).unwrap();
        let trie = builder.build();
        assert_eq!(trie.lookup("star"), Some(&2));
        assert_eq!(trie.lookup("start"), Some(&1));
    }

    #[test]
    fn build_computes_word_counts() {
        let mut builder = TrieBuilder::new();
        builder.insert("a", ()).unwrap();
        builder.insert("ab", ()).unwrap();
        builder.insert("b", ()).unwrap();
        let trie = builder.build();
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.sub_trie("a").len(), 2);
    }

    #[test]
    fn empty_builder_builds_empty_trie() {
        let trie: Trie<u8> = TrieBuilder::new().build();
        assert!(trie.is_empty());
    }
}
