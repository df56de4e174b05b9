use boundary::{EmbedPlaceholder, ErrorPage};
use colored::Colorize;

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print an error message
pub fn error_message(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {} ====", title).cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Print the full error page of a page boundary
pub fn error_page(page: &ErrorPage) {
    match page.messages.as_slice() {
        [single] => error_message(single),
        many => {
            for message in many {
                eprintln!("  {} {}", "•".red(), message.red().bold());
            }
        }
    }

    if let Some(note) = &page.not_your_fault {
        eprintln!("\n{}", note.yellow());
    }

    eprintln!("\n{}", page.detailed_info_note);
    for line in page.diagnostics.lines() {
        eprintln!("    {}", line.dimmed());
    }
}

/// Print the placeholder of an embed boundary
pub fn embed_placeholder(placeholder: &EmbedPlaceholder) {
    eprintln!("{}", placeholder.to_string().yellow());
}
