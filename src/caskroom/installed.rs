use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::cask::{Cask, CaskConfig, LoadError};
use crate::config::Config;
use crate::loader::Resolver;
use crate::runtime::Runtime;

/// How a single installed token gets resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Load from the tap that provides the token.
    TapPath(PathBuf),
    /// Load from the snapshot saved in the Caskroom at install time.
    InstalledMetadata(PathBuf),
    /// Resolve through the default lookup.
    Default,
}

/// Lists the casks installed in the Caskroom.
pub struct InstalledCasks<'a, R: Runtime, L: Resolver> {
    runtime: &'a R,
    config: &'a Config,
    resolver: &'a L,
}

impl<'a, R: Runtime, L: Resolver> InstalledCasks<'a, R, L> {
    pub fn new(runtime: &'a R, config: &'a Config, resolver: &'a L) -> Self {
        Self {
            runtime,
            config,
            resolver,
        }
    }

    /// Installed cask tokens in ascending order.
    ///
    /// Only directories count. Names that are not valid UTF-8 are skipped.
    pub fn tokens(&self) -> Result<Vec<String>, LoadError> {
        let root = &self.config.caskroom;
        if !self.runtime.exists(root) {
            return Ok(vec![]);
        }

        let mut tokens = Vec::new();
        for entry in self.runtime.read_dir(root)? {
            if !self.runtime.is_dir(&entry) {
                continue;
            }
            match entry.file_name().and_then(|n| n.to_str()) {
                Some(name) => tokens.push(name.to_string()),
                None => warn!("Skipping Caskroom entry with invalid name: {:?}", entry),
            }
        }
        tokens.sort();
        Ok(tokens)
    }

    /// Load every installed cask, in token order.
    ///
    /// A token whose cask is unavailable is left out. Any other failure
    /// aborts the listing.
    #[tracing::instrument(skip(self, config))]
    pub fn list(&self, config: Option<&CaskConfig>) -> Result<Vec<Cask>, LoadError> {
        let tokens = self.tokens()?;
        debug!("Found {} installed token(s)", tokens.len());

        let mut casks = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.resolve(&token, config) {
                Ok(cask) => {
                    debug!("Loaded {} {} from {}", cask.token(), cask.version(), cask.origin);
                    casks.push(cask);
                }
                Err(e) if e.is_unavailable() => {
                    debug!("Skipping unavailable cask {}: {}", token, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(casks)
    }

    /// Choose how `token` should be resolved.
    ///
    /// A tap wins outright. The install-time snapshot is used unless the API is
    /// preferred and currently provides the token. Everything else goes
    /// through the default lookup.
    pub fn strategy(&self, token: &str) -> Result<Strategy, LoadError> {
        if let Some(path) = self.resolver.tap_paths(token)?.into_iter().next() {
            return Ok(Strategy::TapPath(path));
        }

        if let Some(snapshot) = self.metadata_snapshot(token)?
            && (!self.config.install_from_api || !self.resolver.api_available(token)?)
        {
            return Ok(Strategy::InstalledMetadata(snapshot));
        }

        Ok(Strategy::Default)
    }

    fn resolve(&self, token: &str, config: Option<&CaskConfig>) -> Result<Cask, LoadError> {
        let strategy = self.strategy(token)?;
        debug!("Resolving {} via {:?}", token, strategy);

        match strategy {
            Strategy::TapPath(path) | Strategy::InstalledMetadata(path) => {
                self.resolver.load_from_path(&path, config)
            }
            Strategy::Default => self.resolver.load(token, config),
        }
    }

    /// First `<root>/<token>/.metadata/*/*/*/*.json` in sorted order.
    fn metadata_snapshot(&self, token: &str) -> Result<Option<PathBuf>, LoadError> {
        let pattern = snapshot_pattern(&self.config.caskroom.join(token));
        Ok(self.runtime.glob(&pattern)?.into_iter().next())
    }
}

fn snapshot_pattern(cask_dir: &Path) -> String {
    format!(
        "{}/.metadata/*/*/*/*.json",
        glob::Pattern::escape(&cask_dir.to_string_lossy())
    )
}
