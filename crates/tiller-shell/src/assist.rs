//! Assist (auto-completion) result types.

use tiller_trie::Trie;

/// What a suggestion names, so a caller can render each kind differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// A child directory of the directory being completed.
    Directory,
    /// A command (local or global).
    Command,
    /// A `-name` parameter name.
    ParamName,
    /// A value for the parameter currently being completed.
    ParamValue,
}

/// One already-bound parameter, rendered for "so far" display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParam {
    /// Parameter name.
    pub name: String,
    /// Display form of the bound value.
    pub value: String,
}

/// The result of an assist call.
///
/// `prefix` is the trailing substring of the command line being completed;
/// every word in `suggestions` is a candidate replacement for it, and
/// `suggestions.longest_common_prefix()` is the furthest unambiguous
/// extension.
#[derive(Debug, Clone)]
pub struct AssistInfo {
    /// The partial word the suggestions complete.
    pub prefix: String,
    /// Prefix-matching candidates, tagged by kind.
    pub suggestions: Trie<SuggestionKind>,
    /// Snapshot of the values bound before the partial word, in declaration
    /// order.
    pub bound: Vec<BoundParam>,
}

impl AssistInfo {
    /// The furthest unambiguous extension of the typed prefix, or the
    /// prefix itself when the suggestions immediately diverge.
    pub fn completion(&self) -> String {
        self.suggestions.longest_common_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiller_trie::TrieBuilder;

    #[test]
    fn completion_extends_to_common_prefix() {
        let mut builder = TrieBuilder::new();
        builder.insert("green", SuggestionKind::ParamValue).unwrap();
        builder.insert("grey", SuggestionKind::ParamValue).unwrap();
        let info = AssistInfo {
            prefix: "gr".into(),
            suggestions: builder.build().sub_trie("gr"),
            bound: Vec::new(),
        };
        assert_eq!(info.completion(), "gre");
    }

    #[test]
    fn completion_of_empty_suggestions_does_not_extend() {
        let mut builder = TrieBuilder::new();
        builder.insert("green", SuggestionKind::ParamValue).unwrap();
        let info = AssistInfo {
            prefix: "xy".into(),
            suggestions: builder.build().sub_trie("xy"),
            bound: Vec::new(),
        };
        assert_eq!(info.completion(), "xy");
    }
}
