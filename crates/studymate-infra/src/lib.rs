//! Infrastructure layer for StudyMate.
//!
//! Contains implementations of the ports defined in `studymate-core`:
//! SQLite key-value storage, the chat-completions HTTP provider, the
//! file-backed import source and the `config.toml` loader.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
