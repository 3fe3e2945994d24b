//! API configuration CLI subcommands.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::Password;

use studymate_core::notify::drain;
use studymate_types::config::ApiConfig;

use crate::cli::notice::print_notifications;
use crate::state::AppState;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the stored API configuration (key masked).
    Show,

    /// Update the API configuration. Omitted fields keep their value.
    Set {
        /// Display name of the configuration.
        #[arg(long)]
        name: Option<String>,

        /// Base URL of the chat-completions endpoint.
        #[arg(long)]
        endpoint: Option<String>,

        /// API key. Prompted (hidden) when `--prompt-key` is given instead.
        #[arg(long, env = "STUDYMATE_API_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Prompt for the API key without echoing it.
        #[arg(long, conflicts_with = "key")]
        prompt_key: bool,

        /// Remove the stored API key.
        #[arg(long, conflicts_with_all = ["key", "prompt_key"])]
        clear_key: bool,
    },

    /// Send a minimal request to verify the configuration.
    Test,
}

/// Handle a config subcommand.
pub async fn handle_config_command(cmd: ConfigCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let config = state.settings.api_config().await?;
            print_config(&config, json)
        }
        ConfigCommand::Set {
            name,
            endpoint,
            key,
            prompt_key,
            clear_key,
        } => {
            let mut config = state.settings.api_config().await?;
            if let Some(name) = name {
                config.name = name.trim().to_string();
            }
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint.trim().to_string();
            }
            if prompt_key {
                let entered = Password::new().with_prompt("API key").interact()?;
                config.api_key = Some(entered.trim().to_string());
            } else if let Some(key) = key {
                config.api_key = Some(key.trim().to_string());
            } else if clear_key {
                config.api_key = None;
            }

            state.settings.save_api_config(&config).await?;
            if !json {
                println!("  {} Configuration saved.", style("✓").green().bold());
            }
            print_config(&config, json)
        }
        ConfigCommand::Test => {
            let (config, _) = state.provider().await?;
            let assistant = state.study_assistant().await?;

            let mut notices = state.notifications.subscribe();
            let ok = assistant.test_connection(&config, &state.notifications).await;
            let notices = drain(&mut notices);

            if json {
                let result = serde_json::json!({
                    "ok": ok,
                    "notifications": notices,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!();
                print_notifications(&notices);
                println!();
            }
            if !ok {
                anyhow::bail!("API connection test failed");
            }
            Ok(())
        }
    }
}

fn print_config(config: &ApiConfig, json: bool) -> Result<()> {
    let masked = config.masked_key();

    if json {
        let result = serde_json::json!({
            "name": config.name,
            "endpoint": config.endpoint,
            "api_key": masked,
            "configured": config.is_configured(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("  {}     {}", style("Name:").bold(), style(&config.name).cyan());
    println!("  {} {}", style("Endpoint:").bold(), config.endpoint);
    println!(
        "  {}  {}",
        style("API key:").bold(),
        match &masked {
            Some(key) => style(key.clone()).dim().to_string(),
            None => style("not set".to_string()).yellow().to_string(),
        }
    );
    println!();
    Ok(())
}
