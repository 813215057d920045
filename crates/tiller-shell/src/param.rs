//! Parameter definitions -- the closed set of parameter kinds and their
//! behavior.
//!
//! Every operation is pattern-matched over `ParamKind`, so adding a kind is
//! a compile-checked change: `parse` turns a raw token into a value,
//! `unbound` supplies the default for a parameter no token reached,
//! `no_value` supplies the value for a parameter that was named without a
//! following token (only flags answer), and `auto_complete` offers the
//! parameter's own value space.

use std::fmt;

use tiller_types::{Identifier, Result, ShellError};
use tiller_trie::{Trie, TrieBuilder};

use crate::assist::SuggestionKind;
use crate::hierarchy::{CommandId, CommandTree, DirId};

/// A value source: either a constant (cached at declaration) or a callback
/// recomputed on every query.
pub enum Supplier<T> {
    /// Fixed value, cloned out on each use.
    Const(T),
    /// Recomputed on each use.
    Dynamic(Box<dyn Fn() -> T>),
}

impl<T: Clone> Supplier<T> {
    /// Produce the current value.
    pub fn get(&self) -> T {
        match self {
            Supplier::Const(value) => value.clone(),
            Supplier::Dynamic(f) => f(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Supplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Supplier::Const(value) => f.debug_tuple("Const").field(value).finish(),
            Supplier::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String or enum constant.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// A resolved command reference.
    Command(CommandId),
    /// A resolved directory reference.
    Directory(DirId),
    /// Explicit null, only bindable when the parameter is nullable.
    Null,
}

impl ParamValue {
    /// Display form, resolving command/directory ids against the tree.
    pub fn render(&self, tree: &CommandTree) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(x) => x.to_string(),
            ParamValue::Command(id) => tree.command(*id).name().to_string(),
            ParamValue::Directory(id) => tree.path_of(*id),
            ParamValue::Null => "null".to_string(),
        }
    }
}

/// The closed set of parameter kinds.
#[derive(Debug)]
pub enum ParamKind {
    /// Free-form string, optionally restricted to an allow-list. An empty
    /// list means unconstrained.
    Str {
        /// Allowed values; may be recomputed per query.
        allowed: Supplier<Vec<String>>,
    },
    /// `true` / `false`.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Exactly one of a declared set of constant names.
    Enum {
        /// The declared constant names.
        variants: Vec<String>,
    },
    /// A path resolving to a command in the hierarchy.
    Command,
    /// A path resolving to a directory in the hierarchy.
    Directory,
}

/// A single parameter declaration: identifier, kind, optionality, and the
/// orthogonal nullable flag.
///
/// A parameter is optional iff it carries a default-value supplier.
#[derive(Debug)]
pub struct ParamDef {
    ident: Identifier,
    kind: ParamKind,
    default: Option<Supplier<ParamValue>>,
    nullable: bool,
}

impl ParamDef {
    fn new(name: impl Into<String>, description: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            ident: Identifier::new(name, description),
            kind,
            default: None,
            nullable: false,
        }
    }

    /// An unconstrained string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            ParamKind::Str {
                allowed: Supplier::Const(Vec::new()),
            },
        )
    }

    /// A string parameter restricted to a fixed allow-list.
    pub fn constrained_string(
        name: impl Into<String>,
        description: impl Into<String>,
        allowed: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            ParamKind::Str {
                allowed: Supplier::Const(allowed),
            },
        )
    }

    /// A string parameter whose allow-list is recomputed on every query.
    pub fn dynamic_string(
        name: impl Into<String>,
        description: impl Into<String>,
        allowed: impl Fn() -> Vec<String> + 'static,
    ) -> Self {
        Self::new(
            name,
            description,
            ParamKind::Str {
                allowed: Supplier::Dynamic(Box::new(allowed)),
            },
        )
    }

    /// A boolean parameter.
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Bool)
    }

    /// An integer parameter.
    pub fn int(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Int)
    }

    /// A floating-point parameter.
    pub fn float(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Float)
    }

    /// A parameter accepting exactly one of the given constant names.
    pub fn enumeration(
        name: impl Into<String>,
        description: impl Into<String>,
        variants: Vec<String>,
    ) -> Self {
        Self::new(name, description, ParamKind::Enum { variants })
    }

    /// A parameter naming a command in the hierarchy.
    pub fn command_ref(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Command)
    }

    /// A parameter naming a directory in the hierarchy.
    pub fn directory_ref(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Directory)
    }

    /// Make the parameter optional with a fixed default.
    pub fn with_default(mut self, value: ParamValue) -> Self {
        self.default = Some(Supplier::Const(value));
        self
    }

    /// Make the parameter optional with a default recomputed when needed.
    pub fn with_dynamic_default(mut self, f: impl Fn() -> ParamValue + 'static) -> Self {
        self.default = Some(Supplier::Dynamic(Box::new(f)));
        self
    }

    /// Allow an explicit `null` bind even when the parameter is mandatory.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        self.ident.name()
    }

    /// Parameter description.
    pub fn description(&self) -> &str {
        self.ident.description()
    }

    /// The full identifier.
    pub fn ident(&self) -> &Identifier {
        &self.ident
    }

    /// Whether the parameter may be left unbound.
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Whether an explicit `null` bind is accepted.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Parse a raw token into a value of this parameter's kind.
    pub fn parse(&self, raw: &str, tree: &CommandTree) -> Result<ParamValue> {
        if self.nullable && raw.eq_ignore_ascii_case("null") {
            return Ok(ParamValue::Null);
        }
        match &self.kind {
            ParamKind::Str { allowed } => {
                let list = allowed.get();
                if list.is_empty() || list.iter().any(|v| v == raw) {
                    Ok(ParamValue::Str(raw.to_string()))
                } else {
                    Err(ShellError::InvalidParamValue(format!(
                        "'{raw}' is not an allowed value for '{}'",
                        self.name()
                    )))
                }
            },
            ParamKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(ParamValue::Bool(true)),
                "false" => Ok(ParamValue::Bool(false)),
                _ => Err(ShellError::InvalidParamValue(format!(
                    "'{raw}' is not a boolean for '{}'",
                    self.name()
                ))),
            },
            ParamKind::Int => raw.parse::<i64>().map(ParamValue::Int).map_err(|_| {
                ShellError::InvalidParamValue(format!(
                    "'{raw}' is not an integer for '{}'",
                    self.name()
                ))
            }),
            ParamKind::Float => raw.parse::<f64>().map(ParamValue::Float).map_err(|_| {
                ShellError::InvalidParamValue(format!(
                    "'{raw}' is not a number for '{}'",
                    self.name()
                ))
            }),
            ParamKind::Enum { variants } => {
                if variants.iter().any(|v| v == raw) {
                    Ok(ParamValue::Str(raw.to_string()))
                } else {
                    Err(ShellError::InvalidParamValue(format!(
                        "'{raw}' is not one of {variants:?} for '{}'",
                        self.name()
                    )))
                }
            },
            ParamKind::Command => tree.parse_path_to_command(raw).map(ParamValue::Command),
            ParamKind::Directory => tree.parse_path_to_directory(raw).map(ParamValue::Directory),
        }
    }

    /// The value for a parameter no token reached: the default if optional,
    /// else `ParamNotBound`.
    pub fn unbound(&self) -> Result<ParamValue> {
        match &self.default {
            Some(supplier) => Ok(supplier.get()),
            None => Err(ShellError::ParamNotBound(self.name().to_string())),
        }
    }

    /// The value for a parameter that was named but given no value token.
    ///
    /// Only an optional boolean answers: the logical inverse of its default,
    /// which is what turns `-verbose` into a flag.
    pub fn no_value(&self) -> Result<ParamValue> {
        if let (ParamKind::Bool, Some(supplier)) = (&self.kind, &self.default) {
            return match supplier.get() {
                ParamValue::Bool(default) => Ok(ParamValue::Bool(!default)),
                other => Err(ShellError::InvalidParamValue(format!(
                    "flag '{}' has a non-boolean default {other:?}",
                    self.name()
                ))),
            };
        }
        Err(ShellError::ParamNotBound(format!(
            "'{}' was named but given no value",
            self.name()
        )))
    }

    /// Suggestions for this parameter's value space, restricted to `prefix`.
    ///
    /// Returns the effective completion prefix (the last path segment for
    /// command/directory references, `prefix` itself otherwise) alongside
    /// the suggestion trie.
    pub fn auto_complete(
        &self,
        prefix: &str,
        tree: &CommandTree,
    ) -> Result<(String, Trie<SuggestionKind>)> {
        match &self.kind {
            ParamKind::Str { allowed } => {
                let list = allowed.get();
                let mut builder = TrieBuilder::new();
                for value in &list {
                    builder.insert(value, SuggestionKind::ParamValue)?;
                }
                Ok((prefix.to_string(), builder.build().sub_trie(prefix)))
            },
            ParamKind::Bool => {
                let mut builder = TrieBuilder::new();
                builder.insert("true", SuggestionKind::ParamValue)?;
                builder.insert("false", SuggestionKind::ParamValue)?;
                if self.nullable {
                    builder.insert("null", SuggestionKind::ParamValue)?;
                }
                Ok((prefix.to_string(), builder.build().sub_trie(prefix)))
            },
            ParamKind::Int | ParamKind::Float => Err(ShellError::CannotComplete(format!(
                "numeric parameter '{}'",
                self.name()
            ))),
            ParamKind::Enum { variants } => {
                let mut builder = TrieBuilder::new();
                for variant in variants {
                    builder.insert(variant, SuggestionKind::ParamValue)?;
                }
                Ok((prefix.to_string(), builder.build().sub_trie(prefix)))
            },
            ParamKind::Command => tree.auto_complete_path(prefix),
            ParamKind::Directory => tree.auto_complete_path_to_directory(prefix),
        }
    }
}
