//! Welcome banner display for chat sessions.

use console::style;

use studymate_types::document::Chapter;
use studymate_types::persona::Persona;

/// Print the banner at the start of a chat session: persona, personality,
/// model and the chapter under discussion.
pub fn print_welcome_banner(persona: &Persona, model: &str, chapter: Option<&Chapter>, configured: bool) {
    println!();
    println!("  {} {}", style("*").cyan(), style(&persona.name).cyan().bold());
    println!("  {}", style(&persona.personality).dim());
    println!();
    println!("  {}    {}", style("Model:").bold(), style(model).dim());
    if let Some(chapter) = chapter {
        println!("  {}  {}", style("Chapter:").bold(), style(&chapter.title).dim());
    }
    if !configured {
        println!(
            "  {}",
            style("API not configured, replies use the offline fallback (studymate config set)").yellow()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
