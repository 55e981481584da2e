//! The Caskroom: the directory holding one subdirectory per installed cask.

mod installed;
mod provision;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

use crate::config::Config;
use crate::runtime::Runtime;

pub use installed::{InstalledCasks, Strategy};
pub use provision::{ProvisionStep, provisioning_steps};

pub struct Caskroom<'a, R: Runtime> {
    runtime: &'a R,
    config: &'a Config,
}

impl<'a, R: Runtime> Caskroom<'a, R> {
    pub fn new(runtime: &'a R, config: &'a Config) -> Self {
        Self { runtime, config }
    }

    /// `<prefix>/Caskroom`
    pub fn path(&self) -> &Path {
        &self.config.caskroom
    }

    /// Whether at least one cask directory exists.
    #[tracing::instrument(skip(self))]
    pub fn any_installed(&self) -> bool {
        let path = self.path();
        if !self.runtime.exists(path) {
            return false;
        }

        match self.runtime.read_dir(path) {
            Ok(children) => children.iter().any(|child| self.runtime.is_dir(child)),
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                false
            }
        }
    }

    /// Create the Caskroom if it does not exist yet.
    ///
    /// The directory is made group-writable, owned by the invoking user and
    /// grouped under the admin group. When the parent directory is not
    /// writable every step runs through sudo. The first failing step aborts
    /// provisioning; nothing created before it is rolled back.
    #[tracing::instrument(skip(self))]
    pub fn ensure_exists(&self) -> Result<()> {
        let path = self.path();
        if self.runtime.exists(path) {
            debug!("Caskroom already exists at {:?}", path);
            return Ok(());
        }

        let sudo = !path
            .parent()
            .is_some_and(|parent| self.runtime.is_writable(parent));

        if sudo && !self.config.sudo_askpass && self.runtime.is_terminal() {
            self.runtime.notice(
                &format!("Creating Caskroom directory: {}", path.display()),
                "We'll set permissions properly so we won't need sudo in the future.",
            );
        }

        let user = self.runtime.current_user()?;
        for step in provisioning_steps(&user, &self.config.admin_group) {
            let command = step.command(path, sudo).askpass(self.config.sudo_askpass);
            info!("Running: {}", command);
            self.runtime
                .run(&command)
                .with_context(|| format!("Failed to provision Caskroom at {}", path.display()))?;
        }

        info!("Created Caskroom at {:?}", path);
        Ok(())
    }
}
