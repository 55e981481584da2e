//! External command execution.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use super::RealRuntime;

const SUDO: &str = "/usr/bin/sudo";

/// An external command to run, optionally elevated through sudo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub sudo: bool,
    /// Pass `-A` to sudo so it asks through `SUDO_ASKPASS`.
    pub askpass: bool,
}

impl SystemCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            sudo: false,
            askpass: false,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn askpass(mut self, askpass: bool) -> Self {
        self.askpass = askpass;
        self
    }

    /// The executable and arguments actually spawned.
    ///
    /// Elevated commands become `sudo [-A] -E -- <program> <args...>`. A bare
    /// program name is looked up on `PATH`.
    pub fn argv(&self) -> (OsString, Vec<OsString>) {
        if !self.sudo {
            return (self.program.clone().into_os_string(), self.args.clone());
        }

        let mut args: Vec<OsString> = Vec::with_capacity(self.args.len() + 4);
        if self.askpass {
            args.push("-A".into());
        }
        args.push("-E".into());
        args.push("--".into());
        args.push(self.program.clone().into_os_string());
        args.extend(self.args.iter().cloned());
        (OsString::from(SUDO), args)
    }
}

impl fmt::Display for SystemCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sudo {
            write!(f, "{} ", SUDO)?;
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", Path::new(arg).display())?;
        }
        Ok(())
    }
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(&self, command: &SystemCommand) -> Result<()> {
        let (program, args) = command.argv();
        debug!("Executing: {:?} {:?}", program, args);

        duct::cmd(program, &args)
            .run()
            .with_context(|| format!("Failure while executing `{}`", command))?;
        Ok(())
    }
}
