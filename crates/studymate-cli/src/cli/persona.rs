//! Persona management CLI subcommands.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Confirm, Input};

use studymate_types::emotion::EmotionLabel;
use studymate_types::error::PersonaError;
use studymate_types::persona::{CreatePersonaRequest, Persona, DEFAULT_PERSONALITY};

use crate::state::AppState;

/// Persona subcommands.
#[derive(Subcommand)]
pub enum PersonaCommand {
    /// List all personas.
    #[command(alias = "ls")]
    List,

    /// Create a persona and make it active.
    Create {
        /// Display name (prompted when omitted).
        #[arg(long)]
        name: Option<String>,

        /// Personality description injected into the prompt.
        #[arg(long)]
        personality: Option<String>,

        /// Avatar image path or URL.
        #[arg(long)]
        avatar: Option<String>,

        /// Emotion artwork as `label=path` (repeatable), e.g. `sad=./me/sad.png`.
        #[arg(long = "emotion", value_parser = parse_emotion_asset)]
        emotions: Vec<(EmotionLabel, String)>,
    },

    /// Delete a persona.
    #[command(alias = "rm")]
    Delete {
        /// Persona name or id.
        name: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Make a persona the active one.
    Use {
        /// Persona name or id.
        name: String,
    },

    /// Set the artwork shown for one emotion.
    Asset {
        /// Persona name or id.
        name: String,

        /// Emotion label (English or Chinese name).
        emotion: EmotionLabel,

        /// Image path or URL.
        asset: String,
    },
}

/// Handle a persona subcommand.
pub async fn handle_persona_command(cmd: PersonaCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        PersonaCommand::List => list_personas(state, json).await,
        PersonaCommand::Create {
            name,
            personality,
            avatar,
            emotions,
        } => create_persona(state, name, personality, avatar, emotions, json).await,
        PersonaCommand::Delete { name, force } => delete_persona(state, &name, force, json).await,
        PersonaCommand::Use { name } => use_persona(state, &name, json).await,
        PersonaCommand::Asset {
            name,
            emotion,
            asset,
        } => {
            let persona = state.roster.set_emotion_asset(&name, emotion, &asset).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&persona)?);
            } else {
                println!(
                    "  {} {} now shows {} when {}",
                    style("✓").green().bold(),
                    style(&persona.name).cyan(),
                    style(persona.asset_for(emotion)).dim(),
                    emotion.display_name()
                );
            }
            Ok(())
        }
    }
}

async fn list_personas(state: &AppState, json: bool) -> Result<()> {
    let personas = state.roster.list().await?;
    let active = state.roster.active().await?;

    if json {
        let result = serde_json::json!({
            "active": active.id,
            "personas": personas,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Personality").fg(Color::White),
        Cell::new("Custom Art").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for persona in &personas {
        let marker = if persona.id == active.id {
            Cell::new("●").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker,
            Cell::new(&persona.name).fg(Color::Cyan),
            Cell::new(truncate(&persona.personality, 40)),
            Cell::new(custom_art_count(persona)),
            Cell::new(persona.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} persona{}",
        style(personas.len()).bold(),
        if personas.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

async fn create_persona(
    state: &AppState,
    name: Option<String>,
    personality: Option<String>,
    avatar: Option<String>,
    emotions: Vec<(EmotionLabel, String)>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Persona name")
            .interact_text()?,
    };
    let personality = match personality {
        Some(p) => p,
        None => Input::<String>::new()
            .with_prompt("Personality")
            .default(DEFAULT_PERSONALITY.to_string())
            .interact_text()?,
    };

    let request = CreatePersonaRequest {
        name,
        personality,
        avatar,
        emotions: emotions.into_iter().collect::<BTreeMap<_, _>>(),
    };
    let persona = state.roster.create(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&persona)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Created {} and made it active",
        style("✓").green().bold(),
        style(&persona.name).cyan().bold()
    );
    println!("  {} {}", style("Personality:").bold(), persona.personality);
    println!("  {} {}", style("ID:").bold(), style(persona.id.to_string()).dim());
    println!();
    Ok(())
}

async fn delete_persona(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    let persona = state.roster.find(name).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete persona '{}'?", style(&persona.name).red().bold()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let active = match state.roster.delete(&persona.id.to_string()).await {
        Ok(active) => active,
        Err(PersonaError::LastPersona) => {
            anyhow::bail!("至少需要保留一个角色！");
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": persona.id, "active": active.id})
        );
    } else {
        println!(
            "  {} Persona '{}' deleted. Active: {}",
            style("✓").red().bold(),
            persona.name,
            style(&active.name).cyan()
        );
    }
    Ok(())
}

async fn use_persona(state: &AppState, name: &str, json: bool) -> Result<()> {
    let persona = state.roster.activate(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&persona)?);
    } else {
        println!("  {} {}", style(format!("{} ›", persona.name)).cyan().bold(), persona.greeting());
    }
    Ok(())
}

/// Parse `label=asset` for `--emotion`.
fn parse_emotion_asset(raw: &str) -> Result<(EmotionLabel, String), String> {
    let (label, asset) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=ASSET, got '{raw}'"))?;
    let label: EmotionLabel = label.parse()?;
    let asset = asset.trim();
    if asset.is_empty() {
        return Err(format!("missing asset for '{label}'"));
    }
    Ok((label, asset.to_string()))
}

fn custom_art_count(persona: &Persona) -> String {
    let custom = EmotionLabel::ALL
        .into_iter()
        .filter(|label| persona.asset_for(*label) != label.default_asset())
        .count();
    format!("{custom}/{}", EmotionLabel::ALL.len())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emotion_asset() {
        assert_eq!(
            parse_emotion_asset("sad=./me/sad.png").unwrap(),
            (EmotionLabel::Sad, "./me/sad.png".to_string())
        );
        assert_eq!(
            parse_emotion_asset("害羞=https://img.example/shy.png").unwrap().0,
            EmotionLabel::Shy
        );
    }

    #[test]
    fn test_parse_emotion_asset_rejects_malformed() {
        assert!(parse_emotion_asset("sad").is_err());
        assert!(parse_emotion_asset("grumpy=x.png").is_err());
        assert!(parse_emotion_asset("sad=  ").is_err());
    }

    #[test]
    fn test_custom_art_count() {
        let mut persona = Persona::default_companion();
        assert_eq!(custom_art_count(&persona), "0/10");
        persona
            .emotions
            .insert(EmotionLabel::Proud, "/tmp/proud.png".to_string());
        assert_eq!(custom_art_count(&persona), "1/10");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("温柔", 40), "温柔");
        let long = "学".repeat(50);
        assert_eq!(truncate(&long, 10).chars().count(), 10);
    }
}
