//! Immutable prefix trie for Tiller.
//!
//! The trie maps words (case-insensitive per character) to typed values and
//! backs every name lookup, prefix search, and suggestion set in the engine.
//! A `Trie` is frozen at construction: all transformations (`sub_trie`,
//! `map`, `filter`, `union`) return new tries that share the original node
//! graph and never mutate it. Construction goes through `TrieBuilder`, which
//! rejects empty and duplicate words loudly.

mod builder;
mod trie;

/// One-time construction phase for a `Trie`.
pub use builder::TrieBuilder;
/// Immutable prefix tree mapping words to typed values.
pub use trie::Trie;
