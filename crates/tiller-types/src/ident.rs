//! Identifiers -- the (name, description) pair attached to every command,
//! directory, and parameter.

/// An immutable (name, description) pair.
///
/// The name is the unique key used in lookup tries and path segments.
/// Uniqueness is enforced by whichever builder owns the containing
/// collection; duplicate insertion is rejected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    name: String,
    description: String,
}

impl Identifier {
    /// Create an identifier from a name and a one-line description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line description (shown in help and assist output).
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let id = Identifier::new("ls", "List directory contents");
        assert_eq!(id.name(), "ls");
        assert_eq!(id.description(), "List directory contents");
    }

    #[test]
    fn clone_equality() {
        let id = Identifier::new("cd", "Change directory");
        assert_eq!(id, id.clone());
    }
}
