//! The command hierarchy -- a virtual filesystem of commands.
//!
//! Directories and commands live in flat arenas addressed by copyable ids;
//! each directory keeps tries of its children for name lookup and prefix
//! search, and a separate flat trie holds the global commands reachable from
//! any directory. The tree is frozen by its builder; the only mutation
//! afterwards is the current-directory pointer, kept behind a single
//! accessor pair so every navigation is an explicit state transition.

use std::cell::Cell;

use tiller_types::{Identifier, Result, ShellError};
use tiller_trie::{Trie, TrieBuilder};

use crate::assist::SuggestionKind;
use crate::command::{Command, validate_entry_name};

/// The path segment delimiter.
pub const PATH_DELIMITER: char = '/';

/// Handle to a directory in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(usize);

/// Handle to a command in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(usize);

struct DirNode {
    ident: Identifier,
    parent: Option<DirId>,
    child_dirs: Trie<DirId>,
    child_commands: Trie<CommandId>,
}

/// A tree of directories holding commands, plus a flat global namespace and
/// the mutable current-directory pointer.
pub struct CommandTree {
    dirs: Vec<DirNode>,
    commands: Vec<Command>,
    globals: Trie<CommandId>,
    current: Cell<DirId>,
}

impl CommandTree {
    /// The root directory.
    pub fn root(&self) -> DirId {
        DirId(0)
    }

    /// The current working directory.
    pub fn current_dir(&self) -> DirId {
        self.current.get()
    }

    /// Move the current working directory. The only mutation the tree
    /// permits after construction.
    pub fn set_current_dir(&self, dir: DirId) {
        self.current.set(dir);
    }

    /// The command behind a handle.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    /// A directory's name (`/` for the root).
    pub fn dir_name(&self, id: DirId) -> &str {
        self.dirs[id.0].ident.name()
    }

    /// A directory's description.
    pub fn dir_description(&self, id: DirId) -> &str {
        self.dirs[id.0].ident.description()
    }

    /// Absolute path of a directory, e.g. `/net/wifi`.
    pub fn path_of(&self, id: DirId) -> String {
        let mut segments = Vec::new();
        let mut cursor = id;
        while let Some(parent) = self.dirs[cursor.0].parent {
            segments.push(self.dirs[cursor.0].ident.name());
            cursor = parent;
        }
        if segments.is_empty() {
            return PATH_DELIMITER.to_string();
        }
        segments.reverse();
        let mut path = String::new();
        for segment in segments {
            path.push(PATH_DELIMITER);
            path.push_str(segment);
        }
        path
    }

    /// Child directories of `dir` as (name, description) pairs.
    pub fn child_dirs(&self, dir: DirId) -> Vec<(String, String)> {
        self.dirs[dir.0]
            .child_dirs
            .entries()
            .into_iter()
            .map(|(name, id)| (name, self.dirs[id.0].ident.description().to_string()))
            .collect()
    }

    /// Commands local to `dir` as (name, description) pairs.
    pub fn child_commands(&self, dir: DirId) -> Vec<(String, String)> {
        self.dirs[dir.0]
            .child_commands
            .entries()
            .into_iter()
            .map(|(name, id)| (name, self.commands[id.0].description().to_string()))
            .collect()
    }

    /// Global commands as (name, description) pairs.
    pub fn global_commands(&self) -> Vec<(String, String)> {
        self.globals
            .entries()
            .into_iter()
            .map(|(name, id)| (name, self.commands[id.0].description().to_string()))
            .collect()
    }

    /// Resolve a slash-delimited path to a directory.
    ///
    /// An empty path fails; a lone delimiter is the root. Otherwise one
    /// leading delimiter selects the walk origin (root vs. the current
    /// directory) and one trailing delimiter is tolerated. `.` is a no-op
    /// and `..` moves to the parent.
    pub fn parse_path_to_directory(&self, path: &str) -> Result<DirId> {
        if path.is_empty() {
            return Err(ShellError::EmptyPath);
        }
        let (origin, rest) = match path.strip_prefix(PATH_DELIMITER) {
            Some(rest) => (self.root(), rest),
            None => (self.current_dir(), path),
        };
        if rest.is_empty() {
            // The path was a lone delimiter.
            return Ok(self.root());
        }
        let trimmed = rest.strip_suffix(PATH_DELIMITER).unwrap_or(rest);
        if trimmed.is_empty() {
            return Err(ShellError::InvalidEntry(format!(
                "empty path segment in '{path}'"
            )));
        }
        let mut position = origin;
        for segment in trimmed.split(PATH_DELIMITER) {
            position = self.step(position, segment, path)?;
        }
        Ok(position)
    }

    /// Resolve one path segment from `position`.
    fn step(&self, position: DirId, segment: &str, full_path: &str) -> Result<DirId> {
        match segment {
            "" => Err(ShellError::InvalidEntry(format!(
                "empty path segment in '{full_path}'"
            ))),
            "." => Ok(position),
            ".." => self.dirs[position.0]
                .parent
                .ok_or_else(|| ShellError::NoParent(self.path_of(position))),
            name => {
                let node = &self.dirs[position.0];
                if let Some(id) = node.child_dirs.lookup(name) {
                    return Ok(*id);
                }
                if node.child_commands.contains(name) {
                    return Err(ShellError::InvalidDirectory(format!(
                        "'{name}' in '{}' is a command, not a directory",
                        self.path_of(position)
                    )));
                }
                Err(ShellError::InvalidEntry(format!(
                    "no directory '{name}' in '{}'",
                    self.path_of(position)
                )))
            },
        }
    }

    /// Resolve a path to a command.
    ///
    /// Without a delimiter the global namespace is tried first, then the
    /// current directory's local commands. With a delimiter, everything up
    /// to the last one must resolve to a directory holding the final
    /// segment as a command.
    pub fn parse_path_to_command(&self, path: &str) -> Result<CommandId> {
        if path.is_empty() {
            return Err(ShellError::EmptyPath);
        }
        let Some(split_at) = path.rfind(PATH_DELIMITER) else {
            if let Some(id) = self.globals.lookup(path) {
                return Ok(*id);
            }
            if let Some(id) = self.dirs[self.current_dir().0].child_commands.lookup(path) {
                return Ok(*id);
            }
            return Err(ShellError::InvalidCommand(format!("no command '{path}'")));
        };
        let name = &path[split_at + 1..];
        if name.is_empty() {
            return Err(ShellError::PathDoesNotPointToCommand(path.to_string()));
        }
        let dir = self.resolve_dir_part(&path[..split_at], path)?;
        self.dirs[dir.0]
            .child_commands
            .lookup(name)
            .copied()
            .ok_or_else(|| {
                ShellError::InvalidCommand(format!(
                    "no command '{name}' in '{}'",
                    self.path_of(dir)
                ))
            })
    }

    /// Resolve the directory part of a command path (everything before the
    /// final delimiter).
    fn resolve_dir_part(&self, dir_part: &str, full_path: &str) -> Result<DirId> {
        if dir_part.is_empty() {
            // The path started with the delimiter: walk from root.
            return Ok(self.root());
        }
        if dir_part.ends_with(PATH_DELIMITER) {
            // The full path held two consecutive delimiters.
            return Err(ShellError::InvalidEntry(format!(
                "empty path segment in '{full_path}'"
            )));
        }
        self.parse_path_to_directory(dir_part)
    }

    /// Suggestions for a partial command path.
    ///
    /// Returns the partial final segment alongside the suggestion trie.
    /// Without a delimiter the set is local entries (directories and
    /// commands) unioned with the global commands; with one, it is the
    /// resolved directory's entries only.
    pub fn auto_complete_path(&self, path: &str) -> Result<(String, Trie<SuggestionKind>)> {
        let (dir, partial, include_globals) = self.split_for_completion(path)?;
        let node = &self.dirs[dir.0];
        let mut suggestions = node
            .child_dirs
            .sub_trie(partial)
            .map(|_| Some(SuggestionKind::Directory))
            .union(
                &node
                    .child_commands
                    .sub_trie(partial)
                    .map(|_| Some(SuggestionKind::Command)),
            );
        if include_globals {
            suggestions = suggestions.union(
                &self
                    .globals
                    .sub_trie(partial)
                    .map(|_| Some(SuggestionKind::Command)),
            );
        }
        Ok((partial.to_string(), suggestions))
    }

    /// Suggestions for a partial directory path: child directories only.
    pub fn auto_complete_path_to_directory(
        &self,
        path: &str,
    ) -> Result<(String, Trie<SuggestionKind>)> {
        let (dir, partial, _) = self.split_for_completion(path)?;
        let suggestions = self.dirs[dir.0]
            .child_dirs
            .sub_trie(partial)
            .map(|_| Some(SuggestionKind::Directory));
        Ok((partial.to_string(), suggestions))
    }

    /// Split a partial path into (directory to complete in, partial final
    /// segment, whether globals participate).
    fn split_for_completion<'p>(&self, path: &'p str) -> Result<(DirId, &'p str, bool)> {
        match path.rfind(PATH_DELIMITER) {
            None => Ok((self.current_dir(), path, true)),
            Some(split_at) => {
                let dir = self.resolve_dir_part(&path[..split_at], path)?;
                Ok((dir, &path[split_at + 1..], false))
            },
        }
    }
}

/// Declaration of one directory and its contents, nested under a builder.
#[derive(Debug)]
pub struct DirSpec {
    ident: Identifier,
    dirs: Vec<DirSpec>,
    commands: Vec<Command>,
}

impl DirSpec {
    /// Declare a directory.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            ident: Identifier::new(name, description),
            dirs: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Nest a child directory.
    pub fn dir(mut self, child: DirSpec) -> Self {
        self.dirs.push(child);
        self
    }

    /// Add a command to this directory.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Two-phase construction of a `CommandTree`: declare everything, then
/// `build()` freezes the arena and rejects duplicate or invalid names.
#[derive(Debug)]
pub struct CommandTreeBuilder {
    root: DirSpec,
    globals: Vec<Command>,
}

impl Default for CommandTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTreeBuilder {
    /// Start an empty tree.
    pub fn new() -> Self {
        Self {
            root: DirSpec::new("/", "Root directory"),
            globals: Vec::new(),
        }
    }

    /// Add a top-level directory under the root.
    pub fn dir(mut self, child: DirSpec) -> Self {
        self.root.dirs.push(child);
        self
    }

    /// Add a command to the root directory.
    pub fn command(mut self, command: Command) -> Self {
        self.root.commands.push(command);
        self
    }

    /// Add a command reachable from any directory without a path prefix.
    pub fn global_command(mut self, command: Command) -> Self {
        self.globals.push(command);
        self
    }

    /// Freeze into an immutable tree rooted at `/`, with the current
    /// directory starting at the root.
    pub fn build(self) -> Result<CommandTree> {
        let mut dirs = Vec::new();
        let mut commands = Vec::new();
        add_dir(self.root, None, &mut dirs, &mut commands)?;
        let mut globals = TrieBuilder::new();
        for command in self.globals {
            let id = CommandId(commands.len());
            globals.insert(command.name(), id).map_err(|_| {
                ShellError::Registration(format!("duplicate global command '{}'", command.name()))
            })?;
            commands.push(command);
        }
        Ok(CommandTree {
            dirs,
            commands,
            globals: globals.build(),
            current: Cell::new(DirId(0)),
        })
    }
}

fn add_dir(
    spec: DirSpec,
    parent: Option<DirId>,
    dirs: &mut Vec<DirNode>,
    commands: &mut Vec<Command>,
) -> Result<DirId> {
    if parent.is_some() {
        validate_entry_name(spec.ident.name(), "directory")?;
    }
    let id = DirId(dirs.len());
    let dir_name = spec.ident.name().to_string();
    dirs.push(DirNode {
        ident: spec.ident,
        parent,
        child_dirs: Trie::empty(),
        child_commands: Trie::empty(),
    });
    let mut child_dirs = TrieBuilder::new();
    for child in spec.dirs {
        let child_name = child.ident.name().to_string();
        let child_id = add_dir(child, Some(id), dirs, commands)?;
        child_dirs.insert(&child_name, child_id).map_err(|_| {
            ShellError::Registration(format!(
                "duplicate directory '{child_name}' in '{dir_name}'"
            ))
        })?;
    }
    let mut child_commands = TrieBuilder::new();
    for command in spec.commands {
        let command_id = CommandId(commands.len());
        child_commands.insert(command.name(), command_id).map_err(|_| {
            ShellError::Registration(format!(
                "duplicate command '{}' in '{dir_name}'",
                command.name()
            ))
        })?;
        commands.push(command);
    }
    dirs[id.0].child_dirs = child_dirs.build();
    dirs[id.0].child_commands = child_commands.build();
    Ok(id)
}
