use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve or load a cask definition.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No source can provide the cask.
    #[error("Cask '{token}' is unavailable: {reason}")]
    Unavailable { token: String, reason: String },

    #[error("Cask definition {} is invalid", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read cask definition {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoadError {
    pub fn unavailable(token: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Unavailable {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LoadError::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message() {
        let err = LoadError::unavailable("alpha", "no tap provides it");
        assert!(err.is_unavailable());
        assert_eq!(
            err.to_string(),
            "Cask 'alpha' is unavailable: no tap provides it"
        );
    }

    #[test]
    fn test_other_is_not_unavailable() {
        let err: LoadError = anyhow::anyhow!("disk on fire").into();
        assert!(!err.is_unavailable());
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_io_keeps_source() {
        let err = LoadError::Io {
            path: PathBuf::from("/x/alpha.json"),
            source: anyhow::anyhow!("permission denied").into(),
        };
        assert_eq!(err.to_string(), "Failed to read cask definition /x/alpha.json");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "permission denied");
    }
}
