//! Command line interface definition

use clap::{Parser, Subcommand};
use lanekit_types::ColorChoice;
use std::path::PathBuf;

/// lanekit - CI pipeline actions for mobile release lanes
#[derive(Parser)]
#[command(name = "lanekit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CI pipeline actions for mobile release lanes")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List available actions
    #[command(alias = "ls")]
    Actions,

    /// Show options, outputs and platforms of an action
    Describe {
        /// Action name
        action: String,
    },

    /// Run a single action
    Run {
        /// Action name
        action: String,

        /// Action parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Run every step of a lane file in order
    Lane {
        /// Path to lane file (.toml)
        file: PathBuf,
    },
}
