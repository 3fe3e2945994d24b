//! StudyMate CLI entry point.
//!
//! Binary name: `studymate`
//!
//! Parses CLI arguments, initializes tracing, the database and services,
//! then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use studymate_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.quiet, cli.verbose), cli.otel)?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "studymate", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { persona, chapter } => {
            cli::chat::loop_runner::run_chat_loop(&state, persona, chapter, cli.json).await?;
        }
        Commands::Import { path, name } => {
            cli::import::import(&state, &path, name, cli.json, cli.quiet).await?;
        }
        Commands::Persona { action } => {
            cli::persona::handle_persona_command(action, &state, cli.json).await?;
        }
        Commands::Config { action } => {
            cli::config::handle_config_command(action, &state, cli.json).await?;
        }
        Commands::Study { action } => {
            cli::study::handle_study_command(action, &state, cli.json).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
