// CLI module - command-line argument parsing and handlers
//
// Provides:
// - (no subcommand): interactive demo
// - script <ids...>: headless activation run
// - config --show|--path|--reset: configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selectkit::config::{Config, VERSION};

/// selectkit - compound selection component demo
#[derive(Parser)]
#[command(name = "selectkit")]
#[command(version = VERSION)]
#[command(about = "Compound selection component demo", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Click the given choices without a terminal UI and print the result
    Script {
        /// Choice identifiers to activate, in order
        ids: Vec<String>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle config commands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show()?;
            } else if *reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: selectkit config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;
    Config::write_default(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
