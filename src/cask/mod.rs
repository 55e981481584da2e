//! Cask definitions and the errors raised while loading them.

mod error;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use error::LoadError;

/// A cask definition as stored in tap files, metadata snapshots and the API index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CaskDefinition {
    pub token: String,
    #[serde(default)]
    pub name: Vec<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Options handed through to whichever loader resolves a cask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaskConfig {
    /// Target directory for app artifacts
    pub appdir: Option<PathBuf>,
    /// Preferred languages, most preferred first
    pub languages: Vec<String>,
}

/// Where a loaded cask definition came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaskOrigin {
    /// A definition file inside a registered tap
    Tap(PathBuf),
    /// The snapshot saved in the Caskroom at install time
    Installed(PathBuf),
    /// The cached API index
    Api,
}

impl fmt::Display for CaskOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaskOrigin::Tap(path) => write!(f, "tap:{}", path.display()),
            CaskOrigin::Installed(path) => write!(f, "installed:{}", path.display()),
            CaskOrigin::Api => write!(f, "api"),
        }
    }
}

/// A fully loaded cask.
#[derive(Debug, Clone, PartialEq)]
pub struct Cask {
    pub definition: CaskDefinition,
    pub origin: CaskOrigin,
    pub config: Option<CaskConfig>,
}

impl Cask {
    pub fn new(definition: CaskDefinition, origin: CaskOrigin, config: Option<&CaskConfig>) -> Self {
        Self {
            definition,
            origin,
            config: config.cloned(),
        }
    }

    /// Parse a JSON definition read from `path`.
    pub fn from_json(
        content: &str,
        path: &Path,
        origin: CaskOrigin,
        config: Option<&CaskConfig>,
    ) -> Result<Self, LoadError> {
        let definition: CaskDefinition =
            serde_json::from_str(content).map_err(|source| LoadError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(definition, origin, config))
    }

    pub fn token(&self) -> &str {
        &self.definition.token
    }

    pub fn version(&self) -> &str {
        &self.definition.version
    }
}
