//! `studymate import` -- load study material with a progress bar.
//!
//! Ctrl-C cancels the running import through its handle; the controller
//! reports the cancellation as the terminal event.

use std::path::Path;

use anyhow::Context;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;

use studymate_core::import::controller::outcome_notification;
use studymate_core::import::{ImportController, ImportEvents, ImportHandle, MemorySource};
use studymate_core::notify::drain;
use studymate_infra::filesystem::FileSource;
use studymate_types::document::Document;
use studymate_types::import::ImportEvent;

use crate::cli::notice::print_notifications;
use crate::state::AppState;

/// Import `path` (or stdin for `-`) and persist the resulting document.
pub async fn import(
    state: &AppState,
    path: &Path,
    name: Option<String>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let settings = state.config.import.clone();
    let chunk = settings.read_chunk_bytes;
    let controller = ImportController::new(settings);

    let (handle, events) = if path.as_os_str() == "-" {
        let mut data = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut data)
            .await
            .context("failed to read standard input")?;
        let name = name.unwrap_or_else(|| "stdin.txt".to_string());
        controller.start(MemorySource::new(name, data, chunk))
    } else {
        let source = FileSource::open(path, chunk)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        controller.start(source)
    };

    let bar = (!json && !quiet).then(progress_bar);
    let outcome = drive(handle, events, bar.as_ref()).await;

    let mut notices = state.notifications.subscribe();
    if let Some(notice) = outcome_notification(&outcome) {
        state.notifications.publish(notice);
    }
    if let ImportEvent::Completed { document } = &outcome {
        state.settings.save_document(document).await?;
    }
    let notices = drain(&mut notices);

    if json {
        let result = serde_json::json!({
            "outcome": outcome,
            "notifications": notices,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    print_notifications(&notices);
    if let ImportEvent::Completed { document } = &outcome {
        print_summary(document);
    }
    println!();
    Ok(())
}

/// Consume the event stream, racing it against Ctrl-C. Returns the terminal
/// event.
async fn drive(handle: ImportHandle, mut events: ImportEvents, bar: Option<&ProgressBar>) -> ImportEvent {
    let mut interrupted = false;
    loop {
        let next = tokio::select! {
            event = events.next() => event,
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                tracing::info!("import interrupted by user");
                handle.cancel();
                continue;
            }
        };

        match next {
            Some(ImportEvent::Progress(progress)) => {
                if let Some(bar) = bar {
                    bar.set_position(u64::from(progress.percent));
                    bar.set_message(progress.phase.to_string());
                }
            }
            Some(terminal) => {
                if let Some(bar) = bar {
                    bar.finish_and_clear();
                }
                return terminal;
            }
            None => {
                if let Some(bar) = bar {
                    bar.finish_and_clear();
                }
                return ImportEvent::Failed {
                    message: "导入意外中断".to_string(),
                };
            }
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.cyan/blue} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn print_summary(document: &Document) {
    println!();
    println!(
        "  {} {} ({} chapters)",
        style("Imported").bold(),
        style(&document.title).cyan(),
        document.chapters.len()
    );
    for (i, chapter) in document.chapters.iter().enumerate().take(10) {
        println!("  {} {}", style(format!("{:>3}.", i + 1)).dim(), chapter.title);
    }
    if document.chapters.len() > 10 {
        println!("  {}", style(format!("... and {} more", document.chapters.len() - 10)).dim());
    }
}
