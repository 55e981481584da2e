use anyhow::Result;
use log::debug;
use std::io::Write;

use crate::{
    cask::{Cask, CaskConfig, CaskDefinition},
    caskroom::InstalledCasks,
    config::Config,
    loader::CaskLoader,
    runtime::Runtime,
};

/// Output options for `list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub json: bool,
    pub cask_config: Option<CaskConfig>,
}

/// List all installed casks
#[tracing::instrument(skip(runtime, config, out))]
pub fn list<R: Runtime, W: Write>(
    runtime: &R,
    config: &Config,
    options: &ListOptions,
    out: &mut W,
) -> Result<()> {
    debug!("Listing casks from {:?}", config.caskroom);

    let loader = CaskLoader::new(runtime, config);
    let casks = InstalledCasks::new(runtime, config, &loader).list(options.cask_config.as_ref())?;
    debug!("Resolved {} cask(s)", casks.len());

    if options.json {
        let definitions: Vec<&CaskDefinition> = casks.iter().map(|c| &c.definition).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&definitions)?)?;
        return Ok(());
    }

    if casks.is_empty() {
        writeln!(out, "No casks installed.")?;
        return Ok(());
    }

    for cask in &casks {
        writeln!(out, "{}", format_line(cask))?;
    }
    Ok(())
}

fn format_line(cask: &Cask) -> String {
    format!("{} {}", cask.token(), cask.version())
}
