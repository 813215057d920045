//! Commands, executors, and bound argument sets.

use std::fmt;

use tiller_types::{Identifier, Result, ShellError};
use tiller_trie::{Trie, TrieBuilder};

use crate::hierarchy::{CommandId, CommandTree, DirId};
use crate::param::{ParamDef, ParamValue};

/// The display surface a command writes to. The engine only consumes this
/// trait; hosts provide the implementation.
pub trait Screen {
    /// Print an output line.
    fn print_line(&mut self, line: &str);

    /// Print an error line.
    fn print_error(&mut self, line: &str);

    /// Show the current working directory path (after navigation).
    fn show_path(&mut self, path: &str);
}

/// The host-owned implementation behind a command.
///
/// Executors receive the tree they live in, so command- and
/// directory-reference arguments can be resolved and `cd`-style commands
/// can move the current-directory pointer.
pub trait CommandExecutor {
    /// Run the command with its bound arguments.
    fn execute(&self, tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen)
    -> Result<()>;
}

impl<F> CommandExecutor for F
where
    F: Fn(&CommandTree, &CommandArgs, &mut dyn Screen) -> Result<()>,
{
    fn execute(
        &self,
        tree: &CommandTree,
        args: &CommandArgs,
        screen: &mut dyn Screen,
    ) -> Result<()> {
        self(tree, args, screen)
    }
}

/// A named command: identifier, ordered parameter list, and executor.
///
/// Parameter order is significant -- it defines positional binding order.
pub struct Command {
    ident: Identifier,
    params: Vec<ParamDef>,
    param_index: Trie<usize>,
    executor: Box<dyn CommandExecutor>,
}

impl Command {
    /// Create a command. Fails on an empty or path-breaking name, or on
    /// duplicate parameter names.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Vec<ParamDef>,
        executor: impl CommandExecutor + 'static,
    ) -> Result<Self> {
        let name = name.into();
        validate_entry_name(&name, "command")?;
        let mut index = TrieBuilder::new();
        for (position, param) in params.iter().enumerate() {
            index.insert(param.name(), position).map_err(|_| {
                ShellError::Registration(format!(
                    "duplicate parameter '{}' in command '{name}'",
                    param.name()
                ))
            })?;
        }
        Ok(Self {
            ident: Identifier::new(name, description),
            params,
            param_index: index.build(),
            executor: Box::new(executor),
        })
    }

    /// Command name.
    pub fn name(&self) -> &str {
        self.ident.name()
    }

    /// Command description.
    pub fn description(&self) -> &str {
        self.ident.description()
    }

    /// The ordered parameter list.
    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Parameter positions keyed by name.
    pub fn param_index(&self) -> &Trie<usize> {
        &self.param_index
    }

    /// Invoke the executor with a finalized argument set.
    pub fn execute(
        &self,
        tree: &CommandTree,
        args: &CommandArgs,
        screen: &mut dyn Screen,
    ) -> Result<()> {
        self.executor.execute(tree, args, screen)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.ident.name())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Validate a name used as a path segment (commands and directories).
pub(crate) fn validate_entry_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ShellError::Registration(format!("empty {what} name")));
    }
    if name == "." || name == ".." {
        return Err(ShellError::Registration(format!(
            "{what} name '{name}' collides with path navigation"
        )));
    }
    if name.contains('/') || name.chars().any(char::is_whitespace) {
        return Err(ShellError::Registration(format!(
            "{what} name '{name}' contains a delimiter or whitespace"
        )));
    }
    if name.starts_with('-') {
        return Err(ShellError::Registration(format!(
            "{what} name '{name}' starts with the named-parameter prefix"
        )));
    }
    Ok(())
}

/// The finalized argument set handed to an executor.
///
/// Values are stored in the command's declared parameter order, independent
/// of the order tokens arrived in.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandArgs {
    values: Vec<(String, ParamValue)>,
}

impl CommandArgs {
    pub(crate) fn new(values: Vec<(String, ParamValue)>) -> Self {
        Self { values }
    }

    /// All bound values in declaration order.
    pub fn values(&self) -> &[(String, ParamValue)] {
        &self.values
    }

    /// The value bound to `name`, if that parameter exists.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether `name` was bound to an explicit null.
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.get(name), Some(ParamValue::Null))
    }

    /// Typed accessor for a string or enum value.
    pub fn str(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(ParamValue::Str(s)) => Ok(s),
            Some(other) => Err(type_mismatch(name, "string", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }

    /// Typed accessor for a boolean value.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            Some(ParamValue::Bool(b)) => Ok(*b),
            Some(other) => Err(type_mismatch(name, "boolean", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }

    /// Typed accessor for an integer value.
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.get(name) {
            Some(ParamValue::Int(i)) => Ok(*i),
            Some(other) => Err(type_mismatch(name, "integer", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }

    /// Typed accessor for a float value.
    pub fn float(&self, name: &str) -> Result<f64> {
        match self.get(name) {
            Some(ParamValue::Float(x)) => Ok(*x),
            Some(other) => Err(type_mismatch(name, "number", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }

    /// Typed accessor for a command reference.
    pub fn command(&self, name: &str) -> Result<CommandId> {
        match self.get(name) {
            Some(ParamValue::Command(id)) => Ok(*id),
            Some(other) => Err(type_mismatch(name, "command", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }

    /// Typed accessor for a directory reference.
    pub fn directory(&self, name: &str) -> Result<DirId> {
        match self.get(name) {
            Some(ParamValue::Directory(id)) => Ok(*id),
            Some(other) => Err(type_mismatch(name, "directory", other)),
            None => Err(ShellError::ParamNotBound(name.to_string())),
        }
    }
}

fn type_mismatch(name: &str, expected: &str, got: &ParamValue) -> ShellError {
    ShellError::InvalidParamValue(format!(
        "parameter '{name}' is not a {expected} (got {got:?})"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_tree: &CommandTree, _args: &CommandArgs, _screen: &mut dyn Screen) -> Result<()> {
        Ok(())
    }

    #[test]
    fn command_rejects_duplicate_param_names() {
        let err = Command::new(
            "demo",
            "Demo",
            vec![ParamDef::int("x", "X"), ParamDef::boolean("x", "X again")],
            noop,
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::Registration(_)));
    }

    #[test]
    fn command_rejects_bad_names() {
        assert!(Command::new("", "Empty", Vec::new(), noop).is_err());
        assert!(Command::new("a/b", "Slash", Vec::new(), noop).is_err());
        assert!(Command::new("-flag", "Dash", Vec::new(), noop).is_err());
        assert!(Command::new("..", "Dots", Vec::new(), noop).is_err());
        assert!(Command::new("two words", "Space", Vec::new(), noop).is_err());
    }

    #[test]
    fn param_index_maps_names_to_positions() {
        let cmd = Command::new(
            "demo",
            "Demo",
            vec![ParamDef::int("first", "1st"), ParamDef::int("second", "2nd")],
            noop,
        )
        .unwrap();
        assert_eq!(cmd.param_index().lookup("second"), Some(&1));
    }

    #[test]
    fn args_typed_accessors() {
        let args = CommandArgs::new(vec![
            ("count".into(), ParamValue::Int(3)),
            ("name".into(), ParamValue::Str("tiller".into())),
            ("on".into(), ParamValue::Bool(true)),
            ("ratio".into(), ParamValue::Float(0.5)),
        ]);
        assert_eq!(args.int("count").unwrap(), 3);
        assert_eq!(args.str("name").unwrap(), "tiller");
        assert!(args.boolean("on").unwrap());
        assert_eq!(args.float("ratio").unwrap(), 0.5);
    }

    #[test]
    fn args_type_mismatch_is_an_error() {
        let args = CommandArgs::new(vec![("count".into(), ParamValue::Int(3))]);
        assert!(matches!(
            args.str("count"),
            Err(ShellError::InvalidParamValue(_))
        ));
    }

    #[test]
    fn args_unknown_name_is_not_bound() {
        let args = CommandArgs::new(Vec::new());
        assert!(matches!(
            args.int("missing"),
            Err(ShellError::ParamNotBound(_))
        ));
    }

    #[test]
    fn args_null_detection() {
        let args = CommandArgs::new(vec![("maybe".into(), ParamValue::Null)]);
        assert!(args.is_null("maybe"));
        assert!(!args.is_null("other"));
    }
}
