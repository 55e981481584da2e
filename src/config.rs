//! Process configuration, built once at startup.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

pub const PREFIX_ENV: &str = "CASKROOM_PREFIX";
pub const INSTALL_FROM_API_ENV: &str = "CASKROOM_INSTALL_FROM_API";
pub const API_CACHE_ENV: &str = "CASKROOM_API_CACHE";
pub const ADMIN_GROUP_ENV: &str = "CASKROOM_ADMIN_GROUP";
pub const SUDO_ASKPASS_ENV: &str = "SUDO_ASKPASS";

const DEFAULT_ADMIN_GROUP: &str = "admin";

/// Resolved locations and flags shared by every component.
///
/// The Caskroom path is derived here once and never recomputed, so every
/// consumer sees the same root for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `<prefix>/Caskroom`
    pub caskroom: PathBuf,
    /// `<prefix>/Library/Taps`
    pub taps_dir: PathBuf,
    /// Directory holding the cached cask API index
    pub api_cache: PathBuf,
    /// Prefer API-backed definitions over local snapshots
    pub install_from_api: bool,
    /// Group that owns the Caskroom
    pub admin_group: String,
    /// A sudo askpass helper is configured
    pub sudo_askpass: bool,
}

impl Config {
    /// Build a configuration from the environment.
    ///
    /// `prefix` and `install_from_api` come from the command line and take
    /// precedence over their environment variables.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(
        runtime: &R,
        prefix: Option<PathBuf>,
        install_from_api: Option<bool>,
    ) -> Result<Self> {
        let prefix = match prefix {
            Some(path) => path,
            None => runtime
                .env_var(PREFIX_ENV)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_prefix),
        };

        let install_from_api = match install_from_api {
            Some(flag) => flag,
            None => runtime
                .env_var(INSTALL_FROM_API_ENV)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        };

        let api_cache = match runtime.env_var(API_CACHE_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => runtime
                .cache_dir()
                .context("Could not find cache directory")?
                .join("caskroom")
                .join("api"),
        };

        let admin_group = runtime
            .env_var(ADMIN_GROUP_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_GROUP.to_string());

        let sudo_askpass = runtime.env_var(SUDO_ASKPASS_ENV).is_ok();

        let config = Self {
            caskroom: prefix.join("Caskroom"),
            taps_dir: prefix.join("Library").join("Taps"),
            api_cache,
            install_from_api,
            admin_group,
            sudo_askpass,
        };
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Configuration rooted at `prefix` with every other setting at its default.
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        let prefix = prefix.into();
        Self {
            caskroom: prefix.join("Caskroom"),
            taps_dir: prefix.join("Library").join("Taps"),
            api_cache: prefix.join("var").join("cache").join("api"),
            install_from_api: false,
            admin_group: DEFAULT_ADMIN_GROUP.to_string(),
            sudo_askpass: false,
        }
    }

    /// Path of the cached cask API index.
    pub fn api_index(&self) -> PathBuf {
        self.api_cache.join("cask.json")
    }

    /// Whether `path` lives inside the Caskroom.
    pub fn is_in_caskroom(&self, path: &Path) -> bool {
        path.starts_with(&self.caskroom)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(all(target_os = "macos", target_arch = "aarch64"))]
pub fn default_prefix() -> PathBuf {
    PathBuf::from("/opt/homebrew")
}

#[cfg(all(target_os = "macos", not(target_arch = "aarch64")))]
pub fn default_prefix() -> PathBuf {
    PathBuf::from("/usr/local")
}

#[cfg(not(target_os = "macos"))]
pub fn default_prefix() -> PathBuf {
    PathBuf::from("/home/linuxbrew/.linuxbrew")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn env_absent(runtime: &mut MockRuntime, key: &'static str) {
        runtime
            .expect_env_var()
            .with(eq(key))
            .returning(|_| Err(std::env::VarError::NotPresent));
    }

    fn env_set(runtime: &mut MockRuntime, key: &'static str, value: &'static str) {
        runtime
            .expect_env_var()
            .with(eq(key))
            .returning(move |_| Ok(value.to_string()));
    }

    #[test]
    fn test_load_defaults() {
        let mut runtime = MockRuntime::new();
        env_absent(&mut runtime, PREFIX_ENV);
        env_absent(&mut runtime, INSTALL_FROM_API_ENV);
        env_absent(&mut runtime, API_CACHE_ENV);
        env_absent(&mut runtime, ADMIN_GROUP_ENV);
        env_absent(&mut runtime, SUDO_ASKPASS_ENV);
        runtime
            .expect_cache_dir()
            .returning(|| Some(PathBuf::from("/home/user/.cache")));

        let config = Config::load(&runtime, None, None).unwrap();

        assert_eq!(config.caskroom, default_prefix().join("Caskroom"));
        assert_eq!(config.taps_dir, default_prefix().join("Library/Taps"));
        assert_eq!(
            config.api_cache,
            PathBuf::from("/home/user/.cache/caskroom/api")
        );
        assert!(!config.install_from_api);
        assert_eq!(config.admin_group, "admin");
        assert!(!config.sudo_askpass);
    }

    #[test]
    fn test_load_from_environment() {
        let mut runtime = MockRuntime::new();
        env_set(&mut runtime, PREFIX_ENV, "/custom");
        env_set(&mut runtime, INSTALL_FROM_API_ENV, "Yes");
        env_set(&mut runtime, API_CACHE_ENV, "/tmp/api");
        env_set(&mut runtime, ADMIN_GROUP_ENV, "staff");
        env_set(&mut runtime, SUDO_ASKPASS_ENV, "/usr/libexec/askpass");

        let config = Config::load(&runtime, None, None).unwrap();

        assert_eq!(config.caskroom, PathBuf::from("/custom/Caskroom"));
        assert_eq!(config.api_index(), PathBuf::from("/tmp/api/cask.json"));
        assert!(config.install_from_api);
        assert_eq!(config.admin_group, "staff");
        assert!(config.sudo_askpass);
    }

    #[test]
    fn test_command_line_overrides_environment() {
        let mut runtime = MockRuntime::new();
        env_set(&mut runtime, PREFIX_ENV, "/from-env");
        env_set(&mut runtime, INSTALL_FROM_API_ENV, "1");
        env_set(&mut runtime, API_CACHE_ENV, "/tmp/api");
        env_absent(&mut runtime, ADMIN_GROUP_ENV);
        env_absent(&mut runtime, SUDO_ASKPASS_ENV);

        let config =
            Config::load(&runtime, Some(PathBuf::from("/from-cli")), Some(false)).unwrap();

        assert_eq!(config.caskroom, PathBuf::from("/from-cli/Caskroom"));
        assert!(!config.install_from_api);
    }

    #[test]
    fn test_load_without_cache_dir_fails() {
        let mut runtime = MockRuntime::new();
        env_absent(&mut runtime, PREFIX_ENV);
        env_absent(&mut runtime, INSTALL_FROM_API_ENV);
        env_absent(&mut runtime, API_CACHE_ENV);
        runtime.expect_cache_dir().returning(|| None);

        assert!(Config::load(&runtime, None, None).is_err());
    }

    #[test]
    fn test_is_truthy() {
        for value in ["1", "true", "TRUE", " yes "] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "0", "false", "no", "off"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn test_is_in_caskroom() {
        let config = Config::with_prefix("/opt/homebrew");
        assert!(config.is_in_caskroom(std::path::Path::new(
            "/opt/homebrew/Caskroom/alpha/.metadata/1.0/2024/Casks/alpha.json"
        )));
        assert!(!config.is_in_caskroom(std::path::Path::new(
            "/opt/homebrew/Library/Taps/a/b/Casks/alpha.json"
        )));
        // Component-wise, not string prefix
        assert!(!config.is_in_caskroom(std::path::Path::new(
            "/opt/homebrew/CaskroomOld/alpha"
        )));
    }
}
