//! Slash command parsing for the chat loop.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Forget the dialogue memory.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Switch to another persona (name or id).
    Switch(String),
    /// Discuss another chapter (1-based).
    Chapter(usize),
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/switch" => match arg {
            Some(name) => Some(ChatCommand::Switch(name)),
            None => Some(ChatCommand::Unknown("/switch requires a persona name".to_string())),
        },
        "/chapter" => match arg.as_deref().map(str::parse::<usize>) {
            Some(Ok(n)) if n > 0 => Some(ChatCommand::Chapter(n)),
            _ => Some(ChatCommand::Unknown("/chapter requires a chapter number".to_string())),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}            Show this help message", style("/help").cyan());
    println!("  {}           Forget the conversation so far", style("/clear").cyan());
    println!("  {}    Talk to another persona", style("/switch <name>").cyan());
    println!("  {}     Discuss another chapter", style("/chapter <n>").cyan());
    println!("  {}            End the chat session", style("/quit").cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(
            parse("/switch 阿星"),
            Some(ChatCommand::Switch("阿星".to_string()))
        );
        assert!(matches!(parse("/switch   "), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_chapter() {
        assert_eq!(parse("/chapter 3"), Some(ChatCommand::Chapter(3)));
        assert!(matches!(parse("/chapter 0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/chapter two"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("你好"), None);
        assert_eq!(parse("  今天学什么 "), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
