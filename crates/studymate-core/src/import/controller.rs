//! Import session driver.
//!
//! Milestones, in order:
//! - 0..=50 while reading, scaled from bytes read over total size
//! - 60 once reading completes, then the parse delay
//! - 100 once the document is built, then the settle delay
//!
//! Cancellation is cooperative. The token is checked after reading, after
//! the parse delay and after the settle delay. Once observed, no further
//! progress is reported, the partial document is dropped and the session
//! ends with `Cancelled`.

use std::pin::Pin;
use std::time::Duration;

use futures_util::Stream;
use tokio_util::sync::CancellationToken;

use studymate_types::config::ImportSettings;
use studymate_types::document::Document;
use studymate_types::error::ImportError;
use studymate_types::import::{
    title_from_source_name, ImportEvent, ImportPhase, ImportProgress, SourceFormat,
};
use studymate_types::notification::Notification;

use crate::document::segment;

use super::source::ImportSource;

/// Progress and terminal events of one import session.
pub type ImportEvents = Pin<Box<dyn Stream<Item = ImportEvent> + Send + 'static>>;

/// Cancels the session it was returned with.
#[derive(Debug, Clone)]
pub struct ImportHandle {
    token: CancellationToken,
}

impl ImportHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Starts import sessions with the configured pacing.
#[derive(Debug, Clone, Default)]
pub struct ImportController {
    settings: ImportSettings,
}

impl ImportController {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    /// Begin importing `source`.
    ///
    /// Nothing happens until the returned stream is polled. The stream ends
    /// after exactly one terminal event.
    pub fn start<S>(&self, source: S) -> (ImportHandle, ImportEvents)
    where
        S: ImportSource + 'static,
    {
        let token = CancellationToken::new();
        let handle = ImportHandle {
            token: token.clone(),
        };
        let parse_delay = Duration::from_millis(self.settings.parse_delay_ms);
        let settle_delay = Duration::from_millis(self.settings.settle_delay_ms);

        let events = async_stream::stream! {
            let mut source = source;
            let mut session = ImportSession::new(token);
            let name = source.name().to_string();
            let total = source.total_bytes();
            tracing::info!(source = %name, total_bytes = ?total, "import started");

            yield session.report(0, ImportPhase::Reading);

            let mut bytes = Vec::new();
            loop {
                match source.read_chunk().await {
                    Ok(Some(chunk)) => {
                        bytes.extend_from_slice(&chunk);
                        if let Some(event) = session.advance(read_percent(bytes.len(), total), ImportPhase::Reading) {
                            yield event;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        let err = ImportError::from(err);
                        tracing::warn!(source = %name, error = %err, "import read failed");
                        yield ImportEvent::Failed { message: err.notice() };
                        return;
                    }
                }
            }
            if let Some(event) = session.advance(50, ImportPhase::Reading) {
                yield event;
            }

            if session.is_cancelled() {
                yield session.cancelled();
                return;
            }
            if let Some(event) = session.advance(60, ImportPhase::Parsing) {
                yield event;
            }

            pause(parse_delay).await;
            if session.is_cancelled() {
                yield session.cancelled();
                return;
            }

            let text = decode(&bytes);
            let document = match parse_source(&name, &text) {
                Ok(document) => document,
                Err(err) => {
                    tracing::warn!(source = %name, error = %err, "import parse failed");
                    yield ImportEvent::Failed { message: err.notice() };
                    return;
                }
            };
            if let Some(event) = session.advance(100, ImportPhase::Finalizing) {
                yield event;
            }

            pause(settle_delay).await;
            if session.is_cancelled() {
                yield session.cancelled();
                return;
            }

            tracing::info!(source = %name, chapters = document.chapters.len(), "import completed");
            yield ImportEvent::Completed { document };
        };

        (handle, Box::pin(events))
    }
}

/// Transient state of one session. Progress never moves backwards.
struct ImportSession {
    percent: u8,
    phase: ImportPhase,
    token: CancellationToken,
}

impl ImportSession {
    fn new(token: CancellationToken) -> Self {
        Self {
            percent: 0,
            phase: ImportPhase::Reading,
            token,
        }
    }

    fn report(&self, percent: u8, phase: ImportPhase) -> ImportEvent {
        ImportEvent::Progress(ImportProgress { percent, phase })
    }

    /// Move forward, returning an event only when something changed.
    fn advance(&mut self, percent: u8, phase: ImportPhase) -> Option<ImportEvent> {
        let percent = percent.clamp(self.percent, 100);
        if percent == self.percent && phase == self.phase {
            return None;
        }
        self.percent = percent;
        self.phase = phase;
        Some(self.report(percent, phase))
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn cancelled(&self) -> ImportEvent {
        tracing::info!(percent = self.percent, phase = %self.phase, "import cancelled");
        ImportEvent::Cancelled
    }
}

fn read_percent(loaded: usize, total: Option<u64>) -> u8 {
    match total {
        Some(total) if total > 0 => {
            let ratio = loaded as f64 / total as f64;
            (ratio * 50.0).round().clamp(0.0, 50.0) as u8
        }
        _ => 0,
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

/// Build a document from decoded source text.
///
/// `.json` sources are taken verbatim and must contain at least one chapter;
/// everything else is segmented with a title derived from the source name.
pub fn parse_source(name: &str, text: &str) -> Result<Document, ImportError> {
    match SourceFormat::from_file_name(name) {
        SourceFormat::Json => {
            let document: Document = serde_json::from_str(text)
                .map_err(|e| ImportError::InvalidJson(e.to_string()))?;
            if document.chapters.is_empty() {
                return Err(ImportError::NoChapters);
            }
            Ok(document)
        }
        SourceFormat::Text => Ok(segment(text, &title_from_source_name(name))),
    }
}

/// Notice to show for a terminal event.
pub fn outcome_notification(event: &ImportEvent) -> Option<Notification> {
    match event {
        ImportEvent::Progress(_) => None,
        ImportEvent::Completed { .. } => Some(Notification::success("内容导入成功！")),
        ImportEvent::Cancelled => Some(Notification::info("导入已取消")),
        ImportEvent::Failed { message } => Some(Notification::error(message.clone())),
    }
}
