//! The top-level dispatcher tying path resolution and parameter binding
//! together.
//!
//! A `Shell` owns the frozen `CommandTree` and processes one command line
//! at a time to completion: `resolve` produces a ready-to-invoke argument
//! set, `assist` produces completion suggestions for the last (possibly
//! partial) token, and `execute` resolves then runs the executor.

use tiller_types::{Result, ShellError};

use crate::assist::AssistInfo;
use crate::bind::BindContext;
use crate::command::{CommandArgs, Screen};
use crate::hierarchy::{CommandId, CommandTree};
use crate::tokenize::tokenize_line;

/// A fully resolved command line: the target command and its bound,
/// declaration-ordered argument set.
#[derive(Debug)]
pub struct BoundCommand {
    /// The resolved target.
    pub command: CommandId,
    /// The finalized argument set.
    pub args: CommandArgs,
}

/// The embeddable interpretation engine.
pub struct Shell {
    tree: CommandTree,
}

impl Shell {
    /// Wrap a frozen command tree.
    pub fn new(tree: CommandTree) -> Self {
        Self { tree }
    }

    /// The underlying hierarchy (path resolution, navigation, listings).
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Resolve a command line into a bound, ready-to-invoke argument set.
    pub fn resolve(&self, line: &str) -> Result<BoundCommand> {
        let (tokens, _) = tokenize_line(line)?;
        let Some((path, args)) = tokens.split_first() else {
            return Err(ShellError::EmptyPath);
        };
        let command = self.tree.parse_path_to_command(path)?;
        log::debug!(
            "resolved '{path}' to command '{}'",
            self.tree.command(command).name()
        );
        let mut context = BindContext::new(self.tree.command(command), &self.tree);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        context.process_tokens(&arg_refs)?;
        Ok(BoundCommand {
            command,
            args: context.finalize()?,
        })
    }

    /// Produce completion suggestions for the last token of `line`.
    ///
    /// A line ending in whitespace completes a fresh empty token. With only
    /// the command path typed, suggestions come from the hierarchy;
    /// afterwards, from the target command's parameters.
    pub fn assist(&self, line: &str) -> Result<AssistInfo> {
        let (mut tokens, trailing) = tokenize_line(line)?;
        if !trailing {
            tokens.push(String::new());
        }
        // Tokens are non-empty from here: an empty line gained the fresh
        // empty token above.
        let Some((last, rest)) = tokens.split_last() else {
            return Err(ShellError::EmptyPath);
        };
        if rest.is_empty() {
            let (prefix, suggestions) = self.tree.auto_complete_path(last)?;
            log::debug!("assist on path '{last}': {} suggestions", suggestions.len());
            return Ok(AssistInfo {
                prefix,
                suggestions,
                bound: Vec::new(),
            });
        }
        let command = self.tree.parse_path_to_command(&rest[0])?;
        let mut context = BindContext::new(self.tree.command(command), &self.tree);
        let arg_refs: Vec<&str> = rest[1..].iter().map(String::as_str).collect();
        context.process_tokens(&arg_refs)?;
        context.assist(last)
    }

    /// Resolve and immediately run the command's executor.
    pub fn execute(&self, line: &str, screen: &mut dyn Screen) -> Result<()> {
        let bound = self.resolve(line)?;
        self.tree
            .command(bound.command)
            .execute(&self.tree, &bound.args, screen)
    }
}
