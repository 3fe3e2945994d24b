//! Main chat loop orchestration.
//!
//! Resolves the persona, loads the study document as context, then reads
//! lines from stdin until `/quit` or end of input. Each message goes through
//! the response engine; the reply, its emotion and any notices are printed.

use std::io::Write;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use studymate_core::chat::session::CompanionSession;
use studymate_core::notify::drain;
use studymate_types::chat::ConversationTurn;

use crate::cli::notice::print_notifications;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    persona: Option<String>,
    chapter: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let persona = match persona {
        Some(needle) => state.roster.activate(&needle).await?,
        None => state.roster.active().await?,
    };
    let engine = state.chat_engine().await?;

    let mut session = CompanionSession::new(persona);
    if let Some(document) = state.settings.document().await? {
        session.load_document(document);
    }
    if let Some(n) = chapter {
        if !session.go_to_chapter(n.saturating_sub(1)) {
            anyhow::bail!("chapter {n} does not exist in the study document");
        }
    }

    if !json {
        print_welcome_banner(
            session.persona(),
            &state.config.chat.model,
            session.current_chapter(),
            engine.is_configured(),
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !json {
            print!("{} ", style("you ›").green().bold());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = commands::parse(input) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Exit => break,
                ChatCommand::Clear => {
                    session.clear_memory();
                    println!("  {} Conversation cleared.", style("✓").green().bold());
                }
                ChatCommand::Switch(needle) => match state.roster.activate(&needle).await {
                    Ok(persona) => {
                        let greeting = session.switch_persona(persona);
                        print_reply(&session, &greeting, json)?;
                    }
                    Err(e) => eprintln!("  {} {e}", style("!").yellow().bold()),
                },
                ChatCommand::Chapter(n) => {
                    if session.go_to_chapter(n - 1) {
                        if let Some(chapter) = session.current_chapter() {
                            println!("  {} Now discussing {}", style("i").blue().bold(), style(&chapter.title).cyan());
                        }
                    } else {
                        eprintln!("  {} No chapter {n} in the study document.", style("!").yellow().bold());
                    }
                }
                ChatCommand::Unknown(what) => {
                    eprintln!("  {} Unknown command: {what} (try /help)", style("?").yellow().bold());
                }
            }
            continue;
        }

        let mut notices = state.notifications.subscribe();
        let spinner = (!json).then(thinking_spinner);

        let turn = session.send(&engine, input, &state.notifications).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let notices = drain(&mut notices);

        if json {
            let line = serde_json::json!({
                "persona": session.persona().name,
                "turn": turn,
                "asset": session.current_asset(),
                "notifications": notices,
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            print_notifications(&notices);
            print_turn(&session, &turn);
        }
    }

    if !json {
        println!();
        println!("  {}", style("再见！").dim());
    }
    Ok(())
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn print_turn(session: &CompanionSession, turn: &ConversationTurn) {
    println!();
    println!(
        "  {} {}",
        style(format!("{} ›", session.persona().name)).cyan().bold(),
        turn.reply
    );
    println!(
        "  {}",
        style(format!(
            "[{}] {}",
            turn.emotion.display_name(),
            session.current_asset()
        ))
        .dim()
    );
    println!();
}

fn print_reply(session: &CompanionSession, text: &str, json: bool) -> anyhow::Result<()> {
    if json {
        let line = serde_json::json!({
            "persona": session.persona().name,
            "greeting": text,
            "emotion": session.emotion(),
        });
        println!("{}", serde_json::to_string(&line)?);
    } else {
        println!();
        println!("  {} {}", style(format!("{} ›", session.persona().name)).cyan().bold(), text);
        println!();
    }
    Ok(())
}
