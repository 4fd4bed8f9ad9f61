//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a node header for one hop of a run.
    pub fn node(name: &str) {
        println!("\n[{}]", style(name).bold());
    }

    /// Print one requested tool call.
    pub fn tool_call(name: &str, arguments: &str) {
        println!(
            "  {} {}({})",
            style("tool:").cyan(),
            name,
            truncate(arguments, 120)
        );
    }

    /// Print event content, truncated for readability.
    pub fn content(text: &str) {
        println!("  {}", content_preview(text, 300));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, flattening newlines.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}... (truncated)", cut)
    }
}

/// Truncate a string with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview_short() {
        assert_eq!(content_preview("line1\nline2", 300), "line1 line2");
    }

    #[test]
    fn test_content_preview_truncates() {
        let long = "x".repeat(400);
        let preview = content_preview(&long, 300);
        assert!(preview.ends_with("... (truncated)"));
        assert!(preview.len() < long.len());
    }

    #[test]
    fn test_spinner_lifecycle() {
        let pb = Output::spinner("working");
        assert!(!pb.is_finished());
        assert_eq!(pb.message(), "working");
        pb.finish_and_clear();
        assert!(pb.is_finished());
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let s = "한국어 텍스트가 길어질 때도 안전해야 한다";
        let t = truncate(s, 10);
        assert!(t.ends_with("..."));
    }
}
