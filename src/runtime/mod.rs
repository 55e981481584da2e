//! Runtime abstraction for system operations.
//!
//! Everything that touches the host (environment, filesystem, subprocesses,
//! the terminal) goes through the [`Runtime`] trait so the cask logic can be
//! exercised against a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables and well-known directories
//! - `fs` - File system queries (exists, read, glob, writability)
//! - `command` - External command execution, optionally through sudo
//! - `user` - User identity and user-facing output

mod command;
mod env;
mod fs;
mod user;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

pub use command::SystemCommand;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn cache_dir(&self) -> Option<PathBuf>;

    // File System
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Whether the current process may create entries inside `path`.
    /// Returns false when `path` does not exist.
    fn is_writable(&self, path: &Path) -> bool;

    /// Expand a glob pattern. Matches are returned in sorted order.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    // Commands
    /// Run an external command to completion with inherited stdio.
    /// A non-zero exit status is an error.
    fn run(&self, command: &SystemCommand) -> Result<()>;

    // User
    /// Login name of the user who invoked the program (the sudo caller when run under sudo).
    fn current_user(&self) -> Result<String>;
    fn is_terminal(&self) -> bool;

    /// Print an informational heading with a detail line to the user.
    fn notice(&self, title: &str, detail: &str);
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir_impl()
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.is_writable_impl(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.glob_impl(pattern)
    }

    fn run(&self, command: &SystemCommand) -> Result<()> {
        self.run_impl(command)
    }

    fn current_user(&self) -> Result<String> {
        self.current_user_impl()
    }

    fn is_terminal(&self) -> bool {
        self.is_terminal_impl()
    }

    fn notice(&self, title: &str, detail: &str) {
        self.notice_impl(title, detail)
    }
}
