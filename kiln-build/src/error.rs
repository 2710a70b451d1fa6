use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading definitions and generating code.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed entity, member, relation or index input.
    #[error("invalid definition of '{entity}': {message}")]
    Definition { entity: String, message: String },

    /// A relation or type names an entity that is not part of the definition set.
    #[error("'{entity}.{member}' refers to unknown entity '{target}'")]
    Reference {
        entity: String,
        member: String,
        target: String,
    },

    /// A hook point could not be bound or a hook function failed.
    #[error("hook '{hook}' failed for '{entity}': {message}")]
    Hook {
        entity: String,
        hook: String,
        message: String,
    },

    /// Internal inconsistency discovered while emitting code.
    #[error("cannot generate '{entity}': {message}")]
    Generation { entity: String, message: String },

    /// Configuration file could not be understood.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Reading a definition or writing output failed.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn definition(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Definition {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn hook(entity: impl Into<String>, hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            entity: entity.into(),
            hook: hook.into(),
            message: message.into(),
        }
    }

    pub fn generation(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Prefix the message with the operation that was running when the error surfaced.
    ///
    /// Reference and io errors already carry their location and are returned unchanged.
    pub fn during(self, operation: &str) -> Self {
        match self {
            Self::Definition { entity, message } => Self::Definition {
                entity,
                message: format!("{operation}: {message}"),
            },
            Self::Hook { entity, hook, message } => Self::Hook {
                entity,
                hook,
                message: format!("{operation}: {message}"),
            },
            Self::Generation { entity, message } => Self::Generation {
                entity,
                message: format!("{operation}: {message}"),
            },
            Self::Config { message } => Self::Config {
                message: format!("{operation}: {message}"),
            },
            other => other,
        }
    }

    /// Attribute an error raised below the entity level to `entity`.
    ///
    /// Errors that already name an entity, and io errors, are returned unchanged.
    pub fn in_entity(self, entity: &str) -> Self {
        match self {
            Self::Config { message } => Self::generation(entity, message),
            other => other,
        }
    }

    /// Report any failure inside a hook function as a hook error of `entity` at `hook`.
    pub fn in_hook(self, entity: &str, hook: &str) -> Self {
        match self {
            err @ Self::Hook { .. } => err,
            Self::Definition { message, .. } | Self::Generation { message, .. } | Self::Config { message } => {
                Self::hook(entity, hook, message)
            }
            other => Self::hook(entity, hook, other.to_string()),
        }
    }

    /// True for errors that stop the whole run before any code is emitted.
    pub fn is_definition_error(&self) -> bool {
        matches!(self, Self::Definition { .. } | Self::Reference { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_during_prefixes_message() {
        let err = Error::generation("user", "unknown member 'nope'").during("find_by");
        assert_eq!(err.to_string(), "cannot generate 'user': find_by: unknown member 'nope'");
    }

    #[test]
    fn test_in_hook_keeps_existing_hook_error() {
        let err = Error::hook("user", "before-create", "boom").in_hook("group", "create");
        assert_eq!(err.to_string(), "hook 'before-create' failed for 'user': boom");
        let err = Error::generation("user", "no primary key").in_hook("user", "update");
        assert_eq!(err.to_string(), "hook 'update' failed for 'user': no primary key");
    }

    #[test]
    fn test_reference_is_definition_error() {
        let err = Error::Reference {
            entity: "user".into(),
            member: "skill".into(),
            target: "skill".into(),
        };
        assert!(err.is_definition_error());
        assert!(!Error::hook("user", "before-create", "boom").is_definition_error());
    }
}
