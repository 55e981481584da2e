use anyhow::Result;
use std::io::Write;

use crate::{caskroom::Caskroom, config::Config, runtime::Runtime};

/// Print the Caskroom location
pub fn path<R: Runtime, W: Write>(runtime: &R, config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "{}", Caskroom::new(runtime, config).path().display())?;
    Ok(())
}

/// Create the Caskroom if needed
#[tracing::instrument(skip(runtime, config))]
pub fn init<R: Runtime>(runtime: &R, config: &Config) -> Result<()> {
    Caskroom::new(runtime, config).ensure_exists()
}

/// Whether any cask is installed
pub fn any<R: Runtime>(runtime: &R, config: &Config) -> bool {
    Caskroom::new(runtime, config).any_installed()
}
