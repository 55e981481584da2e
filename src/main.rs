use anyhow::Result;
use caskroom::{cask::CaskConfig, commands, config::Config, runtime::RealRuntime};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// caskroom - inspect and provision the Caskroom
///
/// The Caskroom is `<prefix>/Caskroom`, holding one directory per installed cask.
///
/// Examples:
///   caskroom list            # Show installed casks and their versions
///   caskroom init            # Create the Caskroom if it does not exist
#[derive(Parser, Debug)]
#[command(author, version = env!("CASKROOM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Installation prefix (also via CASKROOM_PREFIX)
    #[arg(
        long = "prefix",
        short = 'p',
        env = "CASKROOM_PREFIX",
        value_name = "PATH",
        global = true
    )]
    pub prefix: Option<PathBuf>,

    /// Prefer definitions from the API index over install-time snapshots
    /// (also via CASKROOM_INSTALL_FROM_API)
    #[arg(long = "install-from-api", global = true)]
    pub install_from_api: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the Caskroom path
    Path,

    /// Create the Caskroom with the right ownership and permissions
    Init,

    /// Exit successfully if at least one cask is installed
    Any,

    /// List installed casks
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Print definitions as JSON
    #[arg(long)]
    pub json: bool,

    /// Target directory for app artifacts
    #[arg(long, value_name = "DIR")]
    pub appdir: Option<PathBuf>,

    /// Preferred language (repeatable)
    #[arg(long = "language", value_name = "LANG")]
    pub languages: Vec<String>,
}

impl ListArgs {
    fn options(self) -> commands::ListOptions {
        let cask_config = if self.appdir.is_none() && self.languages.is_empty() {
            None
        } else {
            Some(CaskConfig {
                appdir: self.appdir,
                languages: self.languages,
            })
        };
        commands::ListOptions {
            json: self.json,
            cask_config,
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    // An absent flag defers to CASKROOM_INSTALL_FROM_API.
    let install_from_api = cli.install_from_api.then_some(true);
    let config = Config::load(&runtime, cli.prefix, install_from_api)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Path => commands::path(&runtime, &config, &mut stdout)?,
        Commands::Init => commands::init(&runtime, &config)?,
        Commands::Any => {
            if !commands::any(&runtime, &config) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List(args) => commands::list(&runtime, &config, &args.options(), &mut stdout)?,
    }
    Ok(ExitCode::SUCCESS)
}
