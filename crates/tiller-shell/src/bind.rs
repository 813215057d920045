//! The parameter-binding state machine.
//!
//! A `BindContext` is created per invocation, walks the argument tokens
//! left to right against one command's ordered parameter list, and is then
//! consumed by `finalize` (execution path) or `assist` (completion path).
//! The machine has two states: awaiting-token (no pending named parameter)
//! and awaiting-named-value (`pending` holds the parameter a `-name` token
//! just selected).
//!
//! Exactly one local recovery exists: when a named parameter's value fails
//! to parse, the machine tries the parameter's `no_value()` and, if that
//! succeeds, re-submits the offending token as positional data. Every other
//! failure aborts the call.

use std::collections::VecDeque;

use tiller_types::{Result, ShellError};
use tiller_trie::TrieBuilder;

use crate::assist::{AssistInfo, BoundParam, SuggestionKind};
use crate::command::{Command, CommandArgs};
use crate::hierarchy::CommandTree;
use crate::param::{ParamDef, ParamValue};

/// The named-parameter prefix character.
pub const NAMED_PARAM_PREFIX: char = '-';

/// Whether a token names a parameter rather than carrying a value.
///
/// A token is a value token unless it starts with the prefix character and
/// is not immediately followed by a digit -- a leading `-digit` is a
/// negative number. The lone prefix character counts as a (bad, empty) name.
fn is_name_token(token: &str) -> bool {
    match token.strip_prefix(NAMED_PARAM_PREFIX) {
        Some(rest) => !rest.chars().next().is_some_and(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Split a `name=value` fused token. The name part must be non-empty; the
/// value part may be empty (`color=` completes all allowed values).
fn split_fused(token: &str) -> Option<(&str, &str)> {
    let (name, value) = token.split_once('=')?;
    if name.is_empty() { None } else { Some((name, value)) }
}

/// Single-use binding context for one command invocation.
pub struct BindContext<'a> {
    tree: &'a CommandTree,
    params: &'a [ParamDef],
    bound: Vec<Option<ParamValue>>,
    unbound: VecDeque<usize>,
    pending: Option<usize>,
    command: &'a Command,
}

impl<'a> BindContext<'a> {
    /// Start a fresh context: all parameters unbound, no pending name.
    pub fn new(command: &'a Command, tree: &'a CommandTree) -> Self {
        let params = command.params();
        Self {
            tree,
            params,
            bound: params.iter().map(|_| None).collect(),
            unbound: (0..params.len()).collect(),
            pending: None,
            command,
        }
    }

    /// Process a full token stream left to right.
    pub fn process_tokens(&mut self, tokens: &[&str]) -> Result<()> {
        for token in tokens {
            self.process_token(token)?;
        }
        Ok(())
    }

    /// Process one token according to the current state.
    fn process_token(&mut self, token: &str) -> Result<()> {
        if let Some(pending) = self.pending {
            if is_name_token(token) {
                // The pending parameter received no value; resolve it, then
                // handle the new name token normally.
                let value = self.params[pending].no_value()?;
                self.pending = None;
                self.bind(pending, value)?;
                return self.take_name_token(token);
            }
            return match self.params[pending].parse(token, self.tree) {
                Ok(value) => {
                    self.pending = None;
                    self.bind(pending, value)
                },
                // Fallback: maybe the pending parameter is a flag and this
                // token belongs to the next positional parameter. If the
                // flag interpretation also fails, the original parse error
                // stands.
                Err(parse_err) => match self.params[pending].no_value() {
                    Ok(value) => {
                        self.pending = None;
                        self.bind(pending, value)?;
                        self.process_token(token)
                    },
                    Err(_) => Err(parse_err),
                },
            };
        }
        if is_name_token(token) {
            return self.take_name_token(token);
        }
        if let Some((name, value)) = split_fused(token)
            && let Some(found) = self.lookup_param(name)
        {
            let position = found?;
            let parsed = self.params[position].parse(value, self.tree)?;
            return self.bind(position, parsed);
        }
        // Positional bind to the head of the unbound queue.
        match self.unbound.front().copied() {
            Some(position) => {
                let value = self.params[position].parse(token, self.tree)?;
                self.bind(position, value)
            },
            None => Err(ShellError::NoMoreParams(format!("excess value '{token}'"))),
        }
    }

    /// Handle a `-name` token in the awaiting-token state.
    fn take_name_token(&mut self, token: &str) -> Result<()> {
        let name = &token[NAMED_PARAM_PREFIX.len_utf8()..];
        if name.is_empty() {
            return Err(ShellError::InvalidParam("empty parameter name".into()));
        }
        match self.lookup_param(name) {
            Some(position) => {
                self.pending = Some(position?);
                Ok(())
            },
            None => Err(ShellError::InvalidParam(format!("unknown parameter '{name}'"))),
        }
    }

    /// Look up a parameter by name. Returns `None` for an unknown name and
    /// an error for a known-but-already-bound one, so re-naming a bound
    /// parameter reads as user error rather than tripping the internal
    /// already-bound invariant.
    fn lookup_param(&self, name: &str) -> Option<Result<usize>> {
        let position = *self.command.param_index().lookup(name)?;
        if self.bound[position].is_some() {
            return Some(Err(ShellError::InvalidParam(format!(
                "parameter '{name}' is already bound"
            ))));
        }
        Some(Ok(position))
    }

    /// Record a value and retire the parameter from the positional queue.
    fn bind(&mut self, position: usize, value: ParamValue) -> Result<()> {
        if self.bound[position].is_some() {
            // Unreachable through token processing; reaching it means the
            // context was fed twice.
            return Err(ShellError::ParamAlreadyBound(
                self.params[position].name().to_string(),
            ));
        }
        self.unbound.retain(|&i| i != position);
        self.bound[position] = Some(value);
        Ok(())
    }

    /// Finalize into a complete argument set.
    ///
    /// A still-pending named parameter is resolved via `no_value()`; every
    /// remaining unbound parameter supplies its default in declaration
    /// order, and a mandatory one surfaces `ParamNotBound`.
    pub fn finalize(mut self) -> Result<CommandArgs> {
        if let Some(pending) = self.pending.take() {
            let value = self.params[pending].no_value()?;
            self.bind(pending, value)?;
        }
        let mut values = Vec::with_capacity(self.params.len());
        for (position, param) in self.params.iter().enumerate() {
            let value = match self.bound[position].take() {
                Some(value) => value,
                None => param.unbound()?,
            };
            values.push((param.name().to_string(), value));
        }
        Ok(CommandArgs::new(values))
    }

    /// Finalize into completion suggestions for the last (possibly partial)
    /// token.
    pub fn assist(self, last: &str) -> Result<AssistInfo> {
        let bound = self.snapshot();
        if let Some(pending) = self.pending {
            let (prefix, suggestions) = self.params[pending].auto_complete(last, self.tree)?;
            return Ok(AssistInfo {
                prefix,
                suggestions,
                bound,
            });
        }
        if is_name_token(last) {
            // Offer `-name` completions over the still-unbound parameters.
            let mut builder = TrieBuilder::new();
            for &position in &self.unbound {
                let dashed = format!("{NAMED_PARAM_PREFIX}{}", self.params[position].name());
                builder.insert(&dashed, SuggestionKind::ParamName)?;
            }
            return Ok(AssistInfo {
                prefix: last.to_string(),
                suggestions: builder.build().sub_trie(last),
                bound,
            });
        }
        if let Some((name, partial)) = split_fused(last)
            && let Some(found) = self.lookup_param(name)
        {
            let (prefix, suggestions) = self.params[found?].auto_complete(partial, self.tree)?;
            return Ok(AssistInfo {
                prefix,
                suggestions,
                bound,
            });
        }
        match self.unbound.front().copied() {
            Some(position) => {
                let (prefix, suggestions) =
                    self.params[position].auto_complete(last, self.tree)?;
                Ok(AssistInfo {
                    prefix,
                    suggestions,
                    bound,
                })
            },
            None => Err(ShellError::NoMoreParams(format!("excess value '{last}'"))),
        }
    }

    /// Render the already-bound values in declaration order.
    fn snapshot(&self) -> Vec<BoundParam> {
        self.params
            .iter()
            .enumerate()
            .filter_map(|(position, param)| {
                self.bound[position].as_ref().map(|value| BoundParam {
                    name: param.name().to_string(),
                    value: value.render(self.tree),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Screen;
    use crate::hierarchy::CommandTreeBuilder;

    fn noop(_tree: &CommandTree, _args: &CommandArgs, _screen: &mut dyn Screen) -> Result<()> {
        Ok(())
    }

    fn tree() -> CommandTree {
        CommandTreeBuilder::new().build().unwrap()
    }

    /// `[a: int (mandatory), b: bool (optional, default=false)]`
    fn int_flag_command() -> Command {
        Command::new(
            "demo",
            "Demo",
            vec![
                ParamDef::int("a", "A number"),
                ParamDef::boolean("b", "A flag").with_default(ParamValue::Bool(false)),
            ],
            noop,
        )
        .unwrap()
    }

    fn run(command: &Command, tree: &CommandTree, tokens: &[&str]) -> Result<CommandArgs> {
        let mut ctx = BindContext::new(command, tree);
        ctx.process_tokens(tokens)?;
        ctx.finalize()
    }

    // -- Token classification tests --

    #[test]
    fn classification_of_tokens() {
        assert!(is_name_token("-verbose"));
        assert!(is_name_token("-"));
        assert!(!is_name_token("-5"));
        assert!(!is_name_token("-5abc"));
        assert!(!is_name_token("plain"));
    }

    // -- Positional binding tests --

    #[test]
    fn positional_binds_in_declaration_order() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["5"]).unwrap();
        assert_eq!(args.int("a").unwrap(), 5);
        assert!(!args.boolean("b").unwrap());
    }

    #[test]
    fn excess_positional_value_fails() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            run(&cmd, &tree, &["5", "true", "extra"]),
            Err(ShellError::NoMoreParams(_))
        ));
    }

    #[test]
    fn negative_number_is_a_value_token() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["-12"]).unwrap();
        assert_eq!(args.int("a").unwrap(), -12);
    }

    // -- Named binding tests --

    #[test]
    fn named_flag_without_value_toggles_default() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["-b", "5"]).unwrap();
        assert_eq!(args.int("a").unwrap(), 5);
        assert!(args.boolean("b").unwrap());
    }

    #[test]
    fn named_flag_with_explicit_value() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["-b", "true", "5"]).unwrap();
        assert_eq!(args.int("a").unwrap(), 5);
        assert!(args.boolean("b").unwrap());
    }

    #[test]
    fn lone_flag_leaves_mandatory_unbound() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            run(&cmd, &tree, &["-b"]),
            Err(ShellError::ParamNotBound(_))
        ));
    }

    #[test]
    fn unknown_name_fails() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            run(&cmd, &tree, &["-bogus", "5"]),
            Err(ShellError::InvalidParam(_))
        ));
    }

    #[test]
    fn empty_name_fails() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            run(&cmd, &tree, &["-", "5"]),
            Err(ShellError::InvalidParam(_))
        ));
    }

    #[test]
    fn renaming_bound_param_is_user_error_not_invariant() {
        let tree = tree();
        let cmd = int_flag_command();
        let err = run(&cmd, &tree, &["-b", "true", "-b", "false", "5"]).unwrap_err();
        assert!(matches!(err, ShellError::InvalidParam(_)));
    }

    #[test]
    fn named_param_followed_by_name_token_resolves_pending_as_flag() {
        let tree = tree();
        let cmd = Command::new(
            "demo",
            "Demo",
            vec![
                ParamDef::boolean("x", "X").with_default(ParamValue::Bool(false)),
                ParamDef::boolean("y", "Y").with_default(ParamValue::Bool(false)),
            ],
            noop,
        )
        .unwrap();
        let args = run(&cmd, &tree, &["-x", "-y"]).unwrap();
        assert!(args.boolean("x").unwrap());
        assert!(args.boolean("y").unwrap());
    }

    // The surprising-but-preserved recovery: a token that fails to parse as
    // a named flag's value is re-submitted as positional data.
    #[test]
    fn named_value_parse_failure_falls_back_to_positional() {
        let tree = tree();
        let cmd = int_flag_command();
        // "5" is not a boolean, so -b resolves as a flag and "5" re-binds
        // positionally to a.
        let args = run(&cmd, &tree, &["-b", "5"]).unwrap();
        assert_eq!(args.int("a").unwrap(), 5);
        assert!(args.boolean("b").unwrap());
    }

    #[test]
    fn fallback_failure_surfaces_original_parse_error() {
        let tree = tree();
        let cmd = Command::new(
            "demo",
            "Demo",
            vec![ParamDef::int("n", "A number")],
            noop,
        )
        .unwrap();
        // -n is mandatory (no no_value answer), so the bad value's parse
        // error must surface, not the fallback's.
        let err = run(&cmd, &tree, &["-n", "notanumber"]).unwrap_err();
        assert!(matches!(err, ShellError::InvalidParamValue(_)));
    }

    // -- Fused spelling tests --

    #[test]
    fn fused_spelling_binds_like_named() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["b=true", "5"]).unwrap();
        assert!(args.boolean("b").unwrap());
        assert_eq!(args.int("a").unwrap(), 5);
    }

    #[test]
    fn fused_with_unknown_name_is_positional() {
        let tree = tree();
        let cmd = Command::new(
            "demo",
            "Demo",
            vec![ParamDef::string("expr", "An expression")],
            noop,
        )
        .unwrap();
        let args = run(&cmd, &tree, &["x=y"]).unwrap();
        assert_eq!(args.str("expr").unwrap(), "x=y");
    }

    #[test]
    fn fused_rebinding_is_user_error() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            run(&cmd, &tree, &["b=true", "b=false", "5"]),
            Err(ShellError::InvalidParam(_))
        ));
    }

    // -- Finalization tests --

    #[test]
    fn argument_order_follows_declaration_not_tokens() {
        let tree = tree();
        let cmd = int_flag_command();
        let args = run(&cmd, &tree, &["-b", "true", "7"]).unwrap();
        let names: Vec<&str> = args.values().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn resolving_same_tokens_twice_is_idempotent() {
        let tree = tree();
        let cmd = int_flag_command();
        let first = run(&cmd, &tree, &["-b", "5"]).unwrap();
        let second = run(&cmd, &tree, &["-b", "5"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nullable_param_binds_explicit_null() {
        let tree = tree();
        let cmd = Command::new(
            "demo",
            "Demo",
            vec![ParamDef::string("target", "A target").nullable()],
            noop,
        )
        .unwrap();
        let args = run(&cmd, &tree, &["null"]).unwrap();
        assert!(args.is_null("target"));
    }

    // -- Assist tests --

    fn assist(command: &Command, tree: &CommandTree, tokens: &[&str], last: &str) -> Result<AssistInfo> {
        let mut ctx = BindContext::new(command, tree);
        ctx.process_tokens(tokens)?;
        ctx.assist(last)
    }

    fn color_command() -> Command {
        Command::new(
            "paint",
            "Paint something",
            vec![
                ParamDef::constrained_string(
                    "color",
                    "A color",
                    vec!["red".into(), "green".into(), "blue".into()],
                ),
                ParamDef::boolean("bright", "Brightness").with_default(ParamValue::Bool(false)),
            ],
            noop,
        )
        .unwrap()
    }

    #[test]
    fn assist_completes_positional_value() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &[], "gr").unwrap();
        assert_eq!(info.prefix, "gr");
        assert_eq!(info.suggestions.words(), vec!["green"]);
        assert_eq!(
            info.suggestions.lookup("green"),
            Some(&SuggestionKind::ParamValue)
        );
    }

    #[test]
    fn assist_with_no_match_is_empty_set() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &[], "x").unwrap();
        assert!(info.suggestions.is_empty());
    }

    #[test]
    fn assist_on_sole_numeric_candidate_fails() {
        let tree = tree();
        let cmd = int_flag_command();
        assert!(matches!(
            assist(&cmd, &tree, &[], "1"),
            Err(ShellError::CannotComplete(_))
        ));
    }

    #[test]
    fn assist_completes_pending_named_value() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &["-color"], "b").unwrap();
        assert_eq!(info.suggestions.words(), vec!["blue"]);
    }

    #[test]
    fn assist_completes_parameter_names() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &[], "-").unwrap();
        assert_eq!(info.suggestions.words(), vec!["-bright", "-color"]);
        assert_eq!(
            info.suggestions.lookup("-bright"),
            Some(&SuggestionKind::ParamName)
        );
    }

    #[test]
    fn assist_excludes_bound_names() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &["red"], "-").unwrap();
        assert_eq!(info.suggestions.words(), vec!["-bright"]);
    }

    #[test]
    fn assist_snapshot_reports_bound_values() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &["red"], "-").unwrap();
        assert_eq!(info.bound.len(), 1);
        assert_eq!(info.bound[0].name, "color");
        assert_eq!(info.bound[0].value, "red");
    }

    #[test]
    fn assist_completes_fused_value_part() {
        let tree = tree();
        let cmd = color_command();
        let info = assist(&cmd, &tree, &[], "color=gr").unwrap();
        assert_eq!(info.prefix, "gr");
        assert_eq!(info.suggestions.words(), vec!["green"]);
    }

    #[test]
    fn assist_past_last_param_fails() {
        let tree = tree();
        let cmd = Command::new("demo", "Demo", Vec::new(), noop).unwrap();
        assert!(matches!(
            assist(&cmd, &tree, &[], "x"),
            Err(ShellError::NoMoreParams(_))
        ));
    }
}
