//! The console session: a shell wired to history and configuration.

use tiller_shell::{Screen, Shell};
use tiller_types::Result;

use crate::config::ConsoleConfig;
use crate::history::History;

/// The result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The input line, extended to the furthest unambiguous point.
    pub line: String,
    /// Candidate words for the partial token, for display when the
    /// extension is ambiguous.
    pub suggestions: Vec<String>,
}

/// A shell plus the session state a host console needs: history and
/// configuration.
pub struct Console {
    shell: Shell,
    history: History,
    config: ConsoleConfig,
}

impl Console {
    /// Wrap a shell with default configuration.
    pub fn new(shell: Shell) -> Self {
        Self::with_config(shell, ConsoleConfig::default())
    }

    /// Wrap a shell with explicit configuration.
    pub fn with_config(shell: Shell, config: ConsoleConfig) -> Self {
        Self {
            shell,
            history: History::new(config.history_capacity),
            config,
        }
    }

    /// The wrapped shell.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The command history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable history access, for recall navigation.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// The active configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The rendered prompt for the current directory.
    pub fn prompt(&self) -> String {
        let tree = self.shell.tree();
        let path = tree.path_of(tree.current_dir());
        self.config.prompt.replace("{path}", &path)
    }

    /// Print the welcome banner, if one is configured.
    pub fn print_welcome(&self, screen: &mut dyn Screen) {
        for line in &self.config.welcome {
            screen.print_line(line);
        }
    }

    /// Record a line in history and execute it.
    ///
    /// Blank lines are a no-op. Failures are returned to the caller; the
    /// line stays in history either way, so a mistyped command can be
    /// recalled and fixed.
    pub fn submit(&mut self, line: &str, screen: &mut dyn Screen) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        self.history.push(line);
        log::debug!("submit: {line}");
        self.shell.execute(line, screen)
    }

    /// Run assist for `line` and apply the furthest unambiguous extension.
    pub fn complete(&self, line: &str) -> Result<Completion> {
        let info = self.shell.assist(line)?;
        let extension = info.completion();
        let completed = if extension.len() > info.prefix.len() {
            let stem = &line[..line.len() - info.prefix.len()];
            format!("{stem}{extension}")
        } else {
            line.to_string()
        };
        Ok(Completion {
            line: completed,
            suggestions: info.suggestions.words(),
        })
    }
}
