//! Console configuration, loaded from TOML.

use serde::Deserialize;

use tiller_types::Result;

/// Console configuration.
///
/// Every field has a default, so a partial (or empty) TOML document is
/// valid.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Prompt template; `{path}` expands to the current directory.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Maximum number of history entries to retain.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Banner printed when the console starts, one line per entry.
    #[serde(default)]
    pub welcome: Vec<String>,
}

fn default_prompt() -> String {
    "{path}> ".to_string()
}

fn default_history_capacity() -> usize {
    100
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_capacity: default_history_capacity(),
            welcome: Vec::new(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
