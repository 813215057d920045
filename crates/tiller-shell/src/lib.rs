//! Tiller command interpretation engine.
//!
//! Given a line of text, the engine resolves it against a hierarchy of named
//! commands with typed parameters and produces either a ready-to-invoke
//! argument set or context-sensitive completion suggestions. The host
//! application owns the command implementations and the display surface;
//! this crate owns resolution, binding, and assist.

mod assist;
mod bind;
mod command;
mod hierarchy;
mod param;
mod shell;
mod tokenize;

/// Completion result: prefix, tagged suggestions, bound-value snapshot.
pub use assist::AssistInfo;
/// One already-bound parameter rendered for display.
pub use assist::BoundParam;
/// What a suggestion names (directory, command, parameter name or value).
pub use assist::SuggestionKind;
/// Single-use parameter-binding context for one invocation.
pub use bind::BindContext;
/// The named-parameter prefix character (`-`).
pub use bind::NAMED_PARAM_PREFIX;
/// A named command with ordered, typed parameters and an executor.
pub use command::Command;
/// The finalized argument set handed to an executor.
pub use command::CommandArgs;
/// The host-owned implementation behind a command.
pub use command::CommandExecutor;
/// The display surface the engine and executors write to.
pub use command::Screen;
/// Handle to a command in the tree.
pub use hierarchy::CommandId;
/// The command hierarchy: directories, globals, current-directory pointer.
pub use hierarchy::CommandTree;
/// Two-phase builder for the command hierarchy.
pub use hierarchy::CommandTreeBuilder;
/// Declaration of one directory and its contents.
pub use hierarchy::DirSpec;
/// Handle to a directory in the tree.
pub use hierarchy::DirId;
/// The path segment delimiter (`/`).
pub use hierarchy::PATH_DELIMITER;
/// A single parameter declaration.
pub use param::ParamDef;
/// The closed set of parameter kinds.
pub use param::ParamKind;
/// A bound parameter value.
pub use param::ParamValue;
/// A constant or recomputed value source.
pub use param::Supplier;
/// A fully resolved command line.
pub use shell::BoundCommand;
/// The embeddable interpretation engine.
pub use shell::Shell;
/// Tokenize a command line respecting quotes and escapes.
pub use tokenize::tokenize;
/// Tokenize and report whether the line ends mid-token.
pub use tokenize::tokenize_line;
