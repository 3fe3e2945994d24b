//! CLI command definitions for the `studymate` binary.
//!
//! Uses clap derive macros for argument parsing. Resource commands follow a
//! noun-verb pattern (e.g., `studymate persona list`, `studymate study translate`).

pub mod chat;
pub mod config;
pub mod import;
pub mod notice;
pub mod persona;
pub mod study;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Study companion with emotional personas.
#[derive(Parser)]
#[command(name = "studymate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with the active persona.
    Chat {
        /// Persona to activate before chatting (name or id).
        #[arg(long)]
        persona: Option<String>,

        /// Chapter of the study document to discuss (1-based).
        #[arg(long)]
        chapter: Option<usize>,
    },

    /// Import study material from a text or JSON file.
    Import {
        /// Path to the file, or `-` to read standard input.
        path: PathBuf,

        /// Source name used for format detection and the title (stdin only).
        #[arg(long)]
        name: Option<String>,
    },

    /// Manage companion personas.
    Persona {
        #[command(subcommand)]
        action: persona::PersonaCommand,
    },

    /// Manage the remote API configuration.
    Config {
        #[command(subcommand)]
        action: config::ConfigCommand,
    },

    /// Work with the imported study document.
    Study {
        #[command(subcommand)]
        action: study::StudyCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_with_global_flags() {
        let cli = Cli::try_parse_from(["studymate", "import", "book.txt", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Import { path, name } => {
                assert_eq!(path, PathBuf::from("book.txt"));
                assert!(name.is_none());
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_parse_persona_asset() {
        let cli = Cli::try_parse_from(["studymate", "persona", "asset", "小月", "sad", "/tmp/sad.png"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Persona {
                action: persona::PersonaCommand::Asset { .. }
            }
        ));
    }
}
