//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Granske Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    println!("{}", style("API Configuration").bold());
    let checks = vec![
        check_required_key("OPENAI_API_KEY", "language model access"),
        check_required_key("TAVILY_API_KEY", "web search"),
        check_optional_key("YOUTUBE_API_KEY", "video metadata"),
    ];
    for check in &checks {
        check.print();
    }

    println!();
    println!("{}", style("Workspace").bold());
    let workspace = settings.workspace_dir();
    if workspace.exists() {
        CheckResult::ok("workspace", &format!("{}", workspace.display())).print();
    } else {
        CheckResult::warning(
            "workspace",
            &format!("{} does not exist yet", workspace.display()),
            "It will be created on the first run.",
        )
        .print();
    }

    println!();
    if checks.iter().any(|c| c.status == CheckStatus::Error) {
        Output::error("Some required credentials are missing.");
    } else {
        Output::success("Ready to research.");
    }

    Ok(())
}

fn check_required_key(name: &str, purpose: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => CheckResult::ok(name, &format!("set ({})", purpose)),
        _ => CheckResult::error(
            name,
            &format!("not set ({})", purpose),
            &format!("export {}='...'", name),
        ),
    }
}

fn check_optional_key(name: &str, purpose: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => CheckResult::ok(name, &format!("set ({})", purpose)),
        _ => CheckResult::warning(
            name,
            &format!("not set ({})", purpose),
            "Metadata will be unavailable; transcript fetching still works.",
        ),
    }
}
