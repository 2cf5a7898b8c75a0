//! Error type for generation runs.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal conditions that abort a generation run.
///
/// Recoverable conditions (unclassifiable field shapes) never surface here;
/// they are downgraded to warnings on the [`Diagnostics`](crate::Diagnostics)
/// sink and the run continues.
#[derive(Debug)]
pub enum GenerateError {
    /// The root entity or a referenced entity could not be resolved.
    /// There is no partial-schema mode, so this aborts the whole run.
    TypeNotFound {
        type_name: String,
        referenced_by: Option<String>,
    },
    /// Invalid or unsupported generation configuration.
    Config(String),
    /// Filesystem failure while materializing an artifact. Previously
    /// emitted files are left on disk; there is no rollback.
    Emit { path: PathBuf, source: io::Error },
}

impl GenerateError {
    /// Attach the referencing entity to a `TypeNotFound` raised while
    /// expanding its fields.
    pub(crate) fn referenced_by(self, entity: &str) -> Self {
        match self {
            GenerateError::TypeNotFound { type_name, .. } => GenerateError::TypeNotFound {
                type_name,
                referenced_by: Some(entity.to_string()),
            },
            other => other,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::TypeNotFound {
                type_name,
                referenced_by: Some(parent),
            } => {
                write!(
                    f,
                    "Entity type '{}' (referenced by '{}') could not be resolved",
                    type_name, parent
                )
            }
            GenerateError::TypeNotFound {
                type_name,
                referenced_by: None,
            } => {
                write!(f, "Entity type '{}' could not be resolved", type_name)
            }
            GenerateError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            GenerateError::Emit { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Emit { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_found_display() {
        let err = GenerateError::TypeNotFound {
            type_name: "Order".to_string(),
            referenced_by: None,
        };
        assert_eq!(err.to_string(), "Entity type 'Order' could not be resolved");

        let err = err.referenced_by("Invoice");
        assert_eq!(
            err.to_string(),
            "Entity type 'Order' (referenced by 'Invoice') could not be resolved"
        );
    }

    #[test]
    fn test_config_display() {
        let err = GenerateError::Config("root_entity cannot be empty".to_string());
        assert!(err.to_string().contains("root_entity"));
    }
}
