//! Error types for Tiller.
//!
//! Every failure the engine produces is a value from this enum. Each variant
//! carries a human-readable message; the variant itself is the failure kind a
//! caller can match on. Nothing here is fatal -- every error is recoverable by
//! correcting the input, except `ParamAlreadyBound`, which signals an
//! implementation bug rather than bad input.

/// Errors produced by the Tiller engine.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A path string was empty where a path was required.
    #[error("empty path")]
    EmptyPath,

    /// A path segment did not name a child of the directory being walked.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// A path did not resolve to a directory.
    #[error("invalid directory: {0}")]
    InvalidDirectory(String),

    /// A path did not resolve to a command.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// `..` was applied to the root directory.
    #[error("no parent directory: {0}")]
    NoParent(String),

    /// The path ended in a delimiter, so it can only name a directory.
    #[error("path does not point to a command: {0}")]
    PathDoesNotPointToCommand(String),

    /// A mandatory parameter was never given a value.
    #[error("parameter not bound: {0}")]
    ParamNotBound(String),

    /// A name token referenced a parameter the command does not declare.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A raw token could not be parsed as the parameter's value type.
    #[error("invalid parameter value: {0}")]
    InvalidParamValue(String),

    /// A value token arrived after every positional parameter was bound.
    #[error("no more parameters: {0}")]
    NoMoreParams(String),

    /// A parameter was bound twice. The binding state machine guarantees this
    /// cannot happen through normal token processing, so seeing it means a
    /// caller bug (e.g. feeding one context two argument lists), not bad
    /// user input.
    #[error("parameter already bound: {0}")]
    ParamAlreadyBound(String),

    /// The completion delegate has no meaningful suggestions to offer.
    #[error("cannot complete: {0}")]
    CannotComplete(String),

    /// A builder rejected an entry (duplicate or empty name).
    #[error("registration error: {0}")]
    Registration(String),

    /// A command line could not be tokenized (unterminated quote).
    #[error("tokenize error: {0}")]
    Tokenize(String),

    /// A console configuration file failed to parse.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_display() {
        let e = ShellError::EmptyPath;
        assert_eq!(format!("{e}"), "empty path");
    }

    #[test]
    fn invalid_entry_display() {
        let e = ShellError::InvalidEntry("no directory 'x' in '/a'".into());
        assert_eq!(format!("{e}"), "invalid entry: no directory 'x' in '/a'");
    }

    #[test]
    fn param_not_bound_display() {
        let e = ShellError::ParamNotBound("count".into());
        assert_eq!(format!("{e}"), "parameter not bound: count");
    }

    #[test]
    fn no_more_params_display() {
        let e = ShellError::NoMoreParams("excess value 'extra'".into());
        assert_eq!(format!("{e}"), "no more parameters: excess value 'extra'");
    }

    #[test]
    fn config_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not toml").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("config error"));
    }

    #[test]
    fn error_is_debug() {
        let e = ShellError::InvalidCommand("frobnicate".into());
        assert!(format!("{e:?}").contains("InvalidCommand"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<u8> = Ok(7);
        assert_eq!(r.unwrap(), 7);
    }
}
