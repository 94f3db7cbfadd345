//! Display utilities for the USIM CLI

use colored::Colorize;

/// Format a success message
pub fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

/// Format a warning message
pub fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

/// Format a key-value section
pub fn key_value_box(title: &str, items: Vec<(&str, String)>) -> String {
    let mut result = format!("{}", title.bold().underline());

    for (key, value) in items {
        result.push_str(&format!("\n  {}: {}", key.bold(), value));
    }

    result
}
