//! Command-line tokenizer: handles single quotes, double quotes, and
//! backslash escapes.

use tiller_types::{Result, ShellError};

/// Tokenize a command line respecting quotes and backslash escapes.
///
/// - Single-quoted strings preserve all characters literally.
/// - Double-quoted strings allow backslash-escaped `"` and `\`.
/// - Backslash escapes the next character outside of quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    tokenize_line(input).map(|(tokens, _)| tokens)
}

/// Tokenize and also report whether the line ends mid-token.
///
/// Assist needs the distinction: `net/pi` ends inside a partial token to
/// extend, while `net/ping ` ends cleanly and completion starts a fresh
/// empty token.
pub fn tokenize_line(input: &str) -> Result<(Vec<String>, bool)> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            if ch == '"' {
                in_double = false;
            } else if ch == '\\'
                && let Some(&next) = chars.peek()
                && (next == '"' || next == '\\')
            {
                current.push(next);
                chars.next();
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                },
                c => current.push(c),
            }
        }
    }

    if in_single || in_double {
        return Err(ShellError::Tokenize("unterminated quote".into()));
    }

    let trailing = !current.is_empty();
    if trailing {
        tokens.push(current);
    }
    Ok((tokens, trailing))
}
