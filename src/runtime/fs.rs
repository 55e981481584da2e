//! File system queries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?
            .map(|entry| Ok(entry?.path()))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context("Failed to read file to string")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_writable_impl(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            use nix::unistd::{AccessFlags, access};
            access(path, AccessFlags::W_OK).is_ok()
        }
        #[cfg(not(unix))]
        {
            fs::metadata(path)
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false)
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn glob_impl(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut paths = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to expand glob pattern")?;
        paths.sort();
        Ok(paths)
    }
}
