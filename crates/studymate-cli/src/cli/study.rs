//! Study document CLI subcommands: browse, translate, analyze, edit, and
//! Markdown rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use studymate_core::notify::drain;
use studymate_types::document::{Chapter, Document};
use studymate_types::notification::Severity;

use crate::cli::notice::print_notifications;
use crate::state::AppState;

/// Study subcommands.
#[derive(Subcommand)]
pub enum StudyCommand {
    /// Show the document outline, or one chapter in full.
    Show {
        /// Chapter number (1-based).
        chapter: Option<usize>,
    },

    /// Translate a chapter to English and store the translation.
    Translate {
        /// Chapter number (1-based).
        chapter: usize,
    },

    /// Generate humorous commentary on a chapter.
    Analyze {
        /// Chapter number (1-based).
        chapter: usize,
    },

    /// Replace a chapter's title and/or body.
    Edit {
        /// Chapter number (1-based).
        chapter: usize,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// File holding the new body text.
        #[arg(long)]
        text_file: Option<PathBuf>,
    },

    /// Convert Markdown to HTML.
    Markdown {
        /// Markdown file to convert (reads stdin when omitted).
        file: Option<PathBuf>,
    },
}

/// Handle a study subcommand.
pub async fn handle_study_command(cmd: StudyCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        StudyCommand::Show { chapter } => show(state, chapter, json).await,
        StudyCommand::Translate { chapter } => translate(state, chapter, json).await,
        StudyCommand::Analyze { chapter } => analyze(state, chapter, json).await,
        StudyCommand::Edit {
            chapter,
            title,
            text_file,
        } => edit(state, chapter, title, text_file, json).await,
        StudyCommand::Markdown { file } => markdown(state, file, json).await,
    }
}

async fn load_document(state: &AppState) -> Result<Document> {
    state
        .settings
        .document()
        .await?
        .context("no study document yet; import one with `studymate import <file>`")
}

fn chapter_index(document: &Document, number: usize) -> Result<usize> {
    let index = number.saturating_sub(1);
    if number == 0 || index >= document.chapters.len() {
        anyhow::bail!(
            "chapter {number} does not exist (document has {} chapters)",
            document.chapters.len()
        );
    }
    Ok(index)
}

async fn show(state: &AppState, chapter: Option<usize>, json: bool) -> Result<()> {
    let document = load_document(state).await?;

    match chapter {
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
                return Ok(());
            }
            println!();
            println!("  {}", style(&document.title).cyan().bold());
            println!();
            for (i, ch) in document.chapters.iter().enumerate() {
                let translated = if ch.translation.is_some() {
                    style(" [EN]").green().to_string()
                } else {
                    String::new()
                };
                println!("  {} {}{translated}", style(format!("{:>3}.", i + 1)).dim(), ch.title);
            }
            println!();
        }
        Some(number) => {
            let ch = &document.chapters[chapter_index(&document, number)?];
            if json {
                println!("{}", serde_json::to_string_pretty(ch)?);
                return Ok(());
            }
            print_chapter(ch);
        }
    }
    Ok(())
}

async fn translate(state: &AppState, number: usize, json: bool) -> Result<()> {
    let mut document = load_document(state).await?;
    let index = chapter_index(&document, number)?;
    let assistant = state.study_assistant().await?;

    let mut notices = state.notifications.subscribe();
    let spinner = (!json).then(|| working_spinner("translating..."));
    let translated = assistant
        .translate_chapter(&mut document.chapters[index], &state.notifications)
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    if translated {
        state.settings.save_document(&document).await?;
    }
    let notices = drain(&mut notices);

    let ch = &document.chapters[index];
    if json {
        let result = serde_json::json!({
            "translated": translated,
            "chapter": ch,
            "notifications": notices,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    print_notifications(&notices);
    if let Some(translation) = &ch.translation {
        println!();
        println!("  {}", style(&ch.title).cyan().bold());
        println!();
        println!("{translation}");
    }
    println!();
    Ok(())
}

async fn analyze(state: &AppState, number: usize, json: bool) -> Result<()> {
    let document = load_document(state).await?;
    let ch = &document.chapters[chapter_index(&document, number)?];
    let assistant = state.study_assistant().await?;

    let mut notices = state.notifications.subscribe();
    let spinner = (!json).then(|| working_spinner("analyzing..."));
    let items = assistant.analyze_chapter(ch, &state.notifications).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let notices = drain(&mut notices);

    if json {
        let result = serde_json::json!({
            "chapter": ch.title,
            "analysis": items,
            "notifications": notices,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    print_notifications(&notices);
    for item in &items {
        let title = match item.kind {
            Severity::Error => style(&item.title).red().bold(),
            _ => style(&item.title).cyan().bold(),
        };
        println!();
        println!("  {title}");
        println!();
        println!("{}", item.content);
    }
    println!();
    Ok(())
}

async fn edit(
    state: &AppState,
    number: usize,
    title: Option<String>,
    text_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut document = load_document(state).await?;
    let index = chapter_index(&document, number)?;
    let current = &document.chapters[index];

    let title = title.unwrap_or_else(|| current.title.clone());
    let text = match text_file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => current.text.clone(),
    };

    if let Err(e) = document.edit_chapter(index, &title, &text) {
        anyhow::bail!(e.notice());
    }
    state.settings.save_document(&document).await?;

    let ch = &document.chapters[index];
    if json {
        println!("{}", serde_json::to_string_pretty(ch)?);
    } else {
        println!("  {} Chapter {number} saved as {}", style("✓").green().bold(), style(&ch.title).cyan());
    }
    Ok(())
}

async fn markdown(state: &AppState, file: Option<PathBuf>, json: bool) -> Result<()> {
    let input = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            use tokio::io::AsyncReadExt;
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read standard input")?;
            buf
        }
    };
    let assistant = state.study_assistant().await?;

    let mut notices = state.notifications.subscribe();
    let html = assistant.render_markdown(&input, &state.notifications).await;
    let notices = drain(&mut notices);

    if json {
        let result = serde_json::json!({
            "html": html,
            "notifications": notices,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !notices.is_empty() {
        eprintln!();
        for notice in &notices {
            eprintln!("  {} {}", style(notice.severity.to_string()).yellow(), notice.message);
        }
    }
    if let Some(html) = html {
        println!("{html}");
    }
    Ok(())
}

fn print_chapter(ch: &Chapter) {
    println!();
    println!("  {}", style(&ch.title).cyan().bold());
    println!();
    println!("{}", ch.text);
    if let Some(translation) = &ch.translation {
        println!();
        println!("  {}", style("── Translation ──").dim());
        println!();
        println!("{translation}");
    }
    println!();
}

fn working_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(chapters: usize) -> Document {
        Document {
            title: "书".to_string(),
            chapters: (1..=chapters)
                .map(|i| Chapter::new(format!("第{i}章"), "正文"))
                .collect(),
        }
    }

    #[test]
    fn test_chapter_index_is_one_based() {
        let doc = document(3);
        assert_eq!(chapter_index(&doc, 1).unwrap(), 0);
        assert_eq!(chapter_index(&doc, 3).unwrap(), 2);
    }

    #[test]
    fn test_chapter_index_out_of_range() {
        let doc = document(2);
        assert!(chapter_index(&doc, 0).is_err());
        assert!(chapter_index(&doc, 3).is_err());
    }
}
