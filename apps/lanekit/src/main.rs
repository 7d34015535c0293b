//! lanekit - CI pipeline actions for mobile release lanes
//!
//! This is the main CLI application. It loads configuration, runs actions or
//! lanes through the actions crate and renders their events and results.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::{CommandResult, OutputRenderer};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use lanekit_actions::{
    run_lane, ActionConfig, ActionCtx, ActionCtxBuilder, ActionKind, LaneFile, LaneOutputs,
};
use lanekit_config::Config;
use lanekit_events::EventReceiver;
use lanekit_types::{ColorChoice, OutputFormat};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        if json_mode {
            // Human mode already prints the error below
            error!("Application error: {}", e);
            println!("{}", e.to_json());
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting lanekit v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: defaults < file < environment < CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);

    let (event_sender, event_receiver) = lanekit_events::channel();

    let ctx = ActionCtxBuilder::new()
        .with_event_sender(event_sender)
        .with_config(config.clone())
        .build()?;

    let json_output =
        cli.global.json || matches!(config.general.default_output, OutputFormat::Json);
    if matches!(config.general.default_output, OutputFormat::Plain) && cli.global.color.is_none() {
        config.general.color = ColorChoice::Never;
    }

    let renderer = OutputRenderer::new(json_output, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug, json_output);

    let result =
        execute_command_with_events(cli.command, ctx, event_receiver, &mut event_handler).await?;

    renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    ctx: ActionCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<CommandResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(command: Commands, ctx: ActionCtx) -> Result<CommandResult, CliError> {
    match command {
        Commands::Actions => Ok(CommandResult::ActionList(
            ActionKind::ALL.iter().map(|kind| kind.info()).collect(),
        )),

        Commands::Describe { action } => {
            let kind = ActionKind::from_name(&action)?;
            Ok(CommandResult::ActionDetail(kind.info()))
        }

        Commands::Run { action, params } => {
            let kind = ActionKind::from_name(&action)?;
            let params = ActionConfig::from_pairs(&params)?;
            let mut outputs = LaneOutputs::new();
            let outcome = kind.run(&ctx, &params, &mut outputs).await?;
            Ok(CommandResult::ActionRun(outcome))
        }

        Commands::Lane { file } => {
            let lane = LaneFile::load(&file).await?;
            let report = run_lane(&ctx, &lane).await?;
            Ok(CommandResult::LaneRun(report))
        }
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only command results. `RUST_LOG`
/// overrides the default filter.
fn init_tracing(json_mode: bool, debug_enabled: bool) {
    // Human mode already shows events on the terminal; JSON mode keeps them as records
    let default_filter = if debug_enabled {
        "info,lanekit=debug,lanekit_actions=debug,lanekit_net=debug,lanekit_config=debug"
    } else if json_mode {
        "warn,lanekit::logging=info"
    } else {
        "warn,lanekit::logging=off"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if json_mode {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
}
