//! histoenv CLI - validate and inspect the pipeline environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use histoenv::{Config, SiteTable};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "histoenv")]
#[command(version)]
#[command(about = "Environment resolution for the ijc-histology patch pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Resolve as if running on this machine instead of querying the OS
    #[arg(long, global = true)]
    hostname: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that this machine can run the pipeline
    Validate,

    /// Print the resolved configuration
    Show {
        /// Emit JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Resolve for the real machine, or for `--hostname` when given.
fn resolve(hostname: Option<&str>) -> Result<Config> {
    let config = match hostname {
        Some(name) => Config::resolve_with(name, &SiteTable::default()),
        None => Config::resolve(),
    };
    config.context("Failed to resolve pipeline environment")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Validate => {
            let config = resolve(cli.hostname.as_deref())?;
            info!("Environment is valid");
            info!("  Host:       {}", config.host);
            info!("  Project:    {}", config.project_root.display());
            info!("  Data root:  {}", config.data_root.display());
            info!("  Patches:    {}", config.patches_dir.display());
            info!("  Tracking:   {}", config.tracking.project);
        }

        Commands::Show { json } => {
            let config = resolve(cli.hostname.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
