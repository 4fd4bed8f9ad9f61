//! Research command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::Event;
use crate::orchestrator::{Orchestrator, StepRecord};

/// Run a research query end-to-end, streaming per-hop progress.
pub async fn run_research(
    query: &str,
    max_hops: Option<usize>,
    workspace: Option<String>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Research) {
        Output::error(&format!("{}", e));
        Output::info("Run 'granske doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(max_hops) = max_hops {
        settings.orchestrator.max_hops = max_hops;
    }
    if let Some(workspace) = workspace {
        settings.general.workspace_dir = workspace;
    }

    let orchestrator = Orchestrator::new(settings)?;

    Output::info(&format!("Starting research: {}", query));
    Output::kv("run", orchestrator.context().timestamp());
    println!("{}", "=".repeat(50));

    let spinner = Output::spinner("Researching...");
    let result = orchestrator
        .run(query, |record| spinner.suspend(|| render_step(record)))
        .await;
    spinner.finish_and_clear();
    let outcome = result?;

    Output::header("Final report");
    println!("\n{}\n", outcome.final_report);
    Output::success(&format!("Completed in {} hop(s)", outcome.hops));

    Ok(())
}

/// Render one hop of progress.
fn render_step(record: &StepRecord) {
    Output::node(&record.node.to_string());
    for event in &record.events {
        match event {
            Event::ToolRequest { calls, .. } => {
                for call in calls {
                    Output::tool_call(&call.name, &call.arguments.to_string());
                }
            }
            Event::ToolResult { name, text, .. } => {
                Output::content(&format!("{} -> {}", name, text));
            }
            Event::AgentContent { text, .. } => Output::content(text),
            Event::UserRequest { text } => Output::content(text),
        }
    }
}
