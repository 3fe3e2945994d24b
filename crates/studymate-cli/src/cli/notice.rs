//! Rendering of user-facing notifications.

use console::style;

use studymate_types::notification::{Notification, Severity};

/// Print notices in the order they were published.
pub fn print_notifications(notices: &[Notification]) {
    for notice in notices {
        println!("  {} {}", marker(notice.severity), notice.message);
    }
}

fn marker(severity: Severity) -> String {
    match severity {
        Severity::Info => format!("{}", style("i").blue().bold()),
        Severity::Success => format!("{}", style("✓").green().bold()),
        Severity::Warning => format!("{}", style("!").yellow().bold()),
        Severity::Error => format!("{}", style("✗").red().bold()),
    }
}
