//! Cask resolution: turning a token or a definition file into a [`Cask`].
//!
//! [`Resolver`] is the seam the Caskroom enumeration depends on.
//! [`CaskLoader`] implements it against taps on disk and the cached API index.

mod api;
mod tap;

use log::debug;
use std::path::{Path, PathBuf};

use crate::cask::{Cask, CaskConfig, CaskOrigin, LoadError};
use crate::config::Config;
use crate::runtime::Runtime;

pub use api::ApiSource;
pub use tap::find_tap_paths;

/// Source of cask definitions.
///
/// Every operation may fail with [`LoadError::Unavailable`] when the cask
/// cannot be provided; other variants indicate a broken source.
pub trait Resolver {
    /// Definition files in registered taps that provide `token`, best first.
    fn tap_paths(&self, token: &str) -> Result<Vec<PathBuf>, LoadError>;

    /// Load the definition stored at `path`.
    fn load_from_path(&self, path: &Path, config: Option<&CaskConfig>) -> Result<Cask, LoadError>;

    /// Resolve `token` through the default lookup order.
    fn load(&self, token: &str, config: Option<&CaskConfig>) -> Result<Cask, LoadError>;

    /// Whether the API source currently provides `token`.
    fn api_available(&self, token: &str) -> Result<bool, LoadError>;
}

pub struct CaskLoader<'a, R: Runtime> {
    runtime: &'a R,
    config: &'a Config,
    api: ApiSource<'a, R>,
}

impl<'a, R: Runtime> CaskLoader<'a, R> {
    pub fn new(runtime: &'a R, config: &'a Config) -> Self {
        Self {
            runtime,
            config,
            api: ApiSource::new(runtime, config.api_index()),
        }
    }

    fn origin_for(&self, path: &Path) -> CaskOrigin {
        if self.config.is_in_caskroom(path) {
            CaskOrigin::Installed(path.to_path_buf())
        } else {
            CaskOrigin::Tap(path.to_path_buf())
        }
    }
}

impl<R: Runtime> Resolver for CaskLoader<'_, R> {
    fn tap_paths(&self, token: &str) -> Result<Vec<PathBuf>, LoadError> {
        find_tap_paths(self.runtime, &self.config.taps_dir, token)
    }

    #[tracing::instrument(skip(self, config))]
    fn load_from_path(&self, path: &Path, config: Option<&CaskConfig>) -> Result<Cask, LoadError> {
        if !self.runtime.exists(path) {
            let token = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(LoadError::unavailable(
                token,
                format!("{} does not exist", path.display()),
            ));
        }

        let content = self
            .runtime
            .read_to_string(path)
            .map_err(|e| LoadError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        Cask::from_json(&content, path, self.origin_for(path), config)
    }

    #[tracing::instrument(skip(self, config))]
    fn load(&self, token: &str, config: Option<&CaskConfig>) -> Result<Cask, LoadError> {
        if let Some(path) = self.tap_paths(token)?.first() {
            debug!("Loading {} from tap {:?}", token, path);
            return self.load_from_path(path, config);
        }

        if self.config.install_from_api && self.api.available(token)? {
            debug!("Loading {} from the API index", token);
            let definition = self.api.definition(token)?;
            return Ok(Cask::new(definition, CaskOrigin::Api, config));
        }

        Err(LoadError::unavailable(token, "no tap or API source provides it"))
    }

    fn api_available(&self, token: &str) -> Result<bool, LoadError> {
        self.api.available(token)
    }
}
