//! The run loop for one research run.
//!
//! Drives agent steps and tool-execution steps according to the router,
//! owning the conversation state throughout. Strictly sequential: one step
//! at a time, with the router consulted after each.

use crate::agent::{Agents, ChatModel};
use crate::capability::{self, Capabilities, FileStore, TavilySearch, YoutubeDataApi};
use crate::config::Settings;
use crate::context::RunContext;
use crate::conversation::{AgentRole, Conversation, Event, StepDelta};
use crate::error::{GranskeError, Result};
use crate::executor::execute_tool_request;
use crate::openai::OpenAiChat;
use crate::router::{next_node, Node};
use std::sync::Arc;
use tracing::{info, instrument};

/// Progress record for one hop, streamed to the caller as the run advances.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// The node that just ran.
    pub node: Node,
    /// The events that hop appended.
    pub events: Vec<Event>,
}

/// Outcome of a completed research run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The Writer's closing message.
    pub final_report: String,
    /// Number of hops the run took.
    pub hops: usize,
    /// The full conversation log.
    pub conversation: Conversation,
}

/// The main orchestrator for a research run.
pub struct Orchestrator {
    settings: Settings,
    context: RunContext,
    agents: Agents,
    capabilities: Capabilities,
}

impl Orchestrator {
    /// Create an orchestrator with production providers.
    pub fn new(settings: Settings) -> Result<Self> {
        let search = Arc::new(TavilySearch::from_env()?);
        let video = Arc::new(YoutubeDataApi::from_env());
        let files = FileStore::new(settings.workspace_dir());
        let capabilities =
            Capabilities::new(search, video, files, settings.search.max_results);
        let chat: Arc<dyn ChatModel> = Arc::new(OpenAiChat::new());

        Self::with_components(settings, RunContext::new(), chat, capabilities)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        context: RunContext,
        chat: Arc<dyn ChatModel>,
        capabilities: Capabilities,
    ) -> Result<Self> {
        capability::validate_allow_lists()?;

        let agents = Agents::new(chat, settings.agents.clone());
        Ok(Self {
            settings,
            context,
            agents,
            capabilities,
        })
    }

    /// The run context (timestamp) this orchestrator was created with.
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Run one research query to completion.
    ///
    /// `on_step` receives a progress record after every hop. Fatal failures
    /// (model invocation errors, the hop ceiling) surface as `Err`;
    /// capability failures stay inside the conversation as text results.
    #[instrument(skip(self, on_step), fields(query = %query))]
    pub async fn run(
        &self,
        query: &str,
        mut on_step: impl FnMut(&StepRecord),
    ) -> Result<RunOutcome> {
        let max_hops = self.settings.orchestrator.max_hops;
        let mut conversation = Conversation::new(query);
        let mut node = Node::Supervisor;
        let mut hops = 0;
        let mut final_report = String::new();

        info!("starting research run at {}", self.context.timestamp());

        while node != Node::Terminal {
            hops += 1;
            if hops > max_hops {
                return Err(GranskeError::HopLimit(max_hops));
            }

            let delta = match node {
                Node::Supervisor => {
                    self.agents
                        .step(AgentRole::Supervisor, &conversation, &self.context)
                        .await?
                }
                Node::Analyst => {
                    self.agents
                        .step(AgentRole::Analyst, &conversation, &self.context)
                        .await?
                }
                Node::Writer => {
                    self.agents
                        .step(AgentRole::Writer, &conversation, &self.context)
                        .await?
                }
                Node::SupervisorTools | Node::AnalystTools | Node::WriterTools => {
                    let calls = match conversation.last_event() {
                        Event::ToolRequest { calls, .. } => calls.clone(),
                        _ => {
                            return Err(GranskeError::Agent(format!(
                                "{} reached without a pending tool request",
                                node
                            )))
                        }
                    };
                    StepDelta {
                        events: execute_tool_request(&self.capabilities, &calls).await,
                        active_agent: conversation.active_agent(),
                    }
                }
                Node::Terminal => break,
            };

            if node == Node::Writer {
                if let Some(Event::AgentContent { text, .. }) = delta.events.last() {
                    final_report = text.clone();
                }
            }

            let record = StepRecord {
                node,
                events: delta.events.clone(),
            };
            conversation.append(delta);
            on_step(&record);

            node = next_node(node, conversation.last_event());
        }

        info!("run terminated after {} hop(s)", hops);

        Ok(RunOutcome {
            final_report,
            hops,
            conversation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ChatMessage, ChatOutcome};
    use crate::capability::{SearchHit, SearchProvider, VideoMetadata, VideoProvider};
    use crate::conversation::ToolCall;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Plays back a fixed sequence of model outcomes.
    struct ScriptedModel {
        script: Mutex<std::collections::VecDeque<ChatOutcome>>,
    }

    impl ScriptedModel {
        fn new(outcomes: Vec<ChatOutcome>) -> Self {
            Self {
                script: Mutex::new(outcomes.into()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(
            &self,
            _model: &str,
            _temperature: f32,
            _messages: Vec<ChatMessage>,
            _capabilities: &[crate::capability::Capability],
        ) -> Result<ChatOutcome> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GranskeError::Agent("script exhausted".into()))
        }
    }

    /// Model that always wants to search, never finishing.
    struct RestlessModel;

    #[async_trait]
    impl ChatModel for RestlessModel {
        async fn complete(
            &self,
            _model: &str,
            _temperature: f32,
            _messages: Vec<ChatMessage>,
            _capabilities: &[crate::capability::Capability],
        ) -> Result<ChatOutcome> {
            Ok(calls(&[("search", serde_json::json!({"query": "again"}))]))
        }
    }

    struct StubSearch;

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, _query: &str, _max_results: u32) -> Result<Vec<SearchHit>> {
            Ok(vec![SearchHit {
                title: "iPhone 16 Review".into(),
                url: "https://www.youtube.com/watch?v=abc123".into(),
                content: "In-depth review".into(),
            }])
        }
    }

    struct StubVideo;

    #[async_trait]
    impl VideoProvider for StubVideo {
        async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
            Ok(VideoMetadata {
                title: format!("Video {}", video_id),
                channel: "Reviewer".into(),
                published_at: "2026-08-01T00:00:00Z".into(),
                view_count: 12345,
                like_count: 100,
                comment_count: 10,
            })
        }
        async fn fetch_captions(&self, _video_id: &str) -> Result<String> {
            Ok("The phone is faster and the camera is better.".into())
        }
    }

    fn content(text: &str) -> ChatOutcome {
        ChatOutcome {
            content: Some(text.to_string()),
            tool_calls: Vec::new(),
        }
    }

    fn calls(entries: &[(&str, serde_json::Value)]) -> ChatOutcome {
        ChatOutcome {
            content: None,
            tool_calls: entries
                .iter()
                .map(|(name, args)| ToolCall::new(name, args.clone()))
                .collect(),
        }
    }

    fn build(
        chat: Arc<dyn ChatModel>,
        root: &std::path::Path,
        max_hops: usize,
    ) -> Orchestrator {
        let mut settings = Settings::default();
        settings.orchestrator.max_hops = max_hops;
        let capabilities = Capabilities::new(
            Arc::new(StubSearch),
            Arc::new(StubVideo),
            FileStore::new(root),
            3,
        );
        Orchestrator::with_components(
            settings,
            RunContext::with_timestamp("2026-08-27_09-00"),
            chat,
            capabilities,
        )
        .unwrap()
    }

    /// Full research scenario: search, delegate, analyze, write, terminate.
    #[tokio::test]
    async fn test_end_to_end_research_run() {
        let run_dir = "2026-08-27_09-00";
        let script = vec![
            // Supervisor: search
            calls(&[("search", serde_json::json!({"query": "iPhone 16 review"}))]),
            // Supervisor (after search loops back): delegate to analyst
            calls(&[(
                "transfer_to_analyst",
                serde_json::json!({
                    "youtube_url": "https://www.youtube.com/watch?v=abc123",
                    "instruction": "Focus on camera and battery benchmarks"
                }),
            )]),
            // Analyst: fetch the transcript
            calls(&[(
                "fetch_transcript",
                serde_json::json!({
                    "video_url": "https://www.youtube.com/watch?v=abc123",
                    "save_dir": run_dir
                }),
            )]),
            // Analyst: write the summary
            calls(&[(
                "write_file",
                serde_json::json!({
                    "file_path": format!("{}/abc123_summary.md", run_dir),
                    "content": "## Summary\n\nCamera and battery both improved.",
                    "category": "summary"
                }),
            )]),
            // Analyst: report back
            content("Analysis complete. Summary saved."),
            // Supervisor: conclude research
            content("Research phase complete. Handing over to the writer."),
            // Writer: read the summary
            calls(&[(
                "read_file",
                serde_json::json!({"file_path": run_dir, "file_name": "abc123_summary.md"}),
            )]),
            // Writer: persist the final report
            calls(&[(
                "write_file",
                serde_json::json!({
                    "file_path": format!("{}/final_report.md", run_dir),
                    "content": "# iPhone 16 Report\n\nVerdict: solid upgrade.",
                    "category": "final_report"
                }),
            )]),
            // Writer: done
            content("Report saved to final_report.md."),
        ];

        let dir = tempdir().unwrap();
        let orchestrator = build(Arc::new(ScriptedModel::new(script)), dir.path(), 20);

        let mut visited = Vec::new();
        let outcome = orchestrator
            .run("Summarize the latest iPhone 16 review videos.", |record| {
                visited.push(record.node);
            })
            .await
            .unwrap();

        assert_eq!(outcome.final_report, "Report saved to final_report.md.");
        assert!(outcome.hops <= 20);

        // The final report exists on disk.
        assert!(dir.path().join(run_dir).join("final_report.md").exists());
        assert!(dir.path().join(run_dir).join("abc123_transcript.md").exists());

        // Node order: supervisor loops back after a plain search, and the
        // writer is reached only after the supervisor finishes without
        // tool calls.
        assert_eq!(
            visited,
            vec![
                Node::Supervisor,
                Node::SupervisorTools,
                Node::Supervisor,
                Node::SupervisorTools,
                Node::Analyst,
                Node::AnalystTools,
                Node::Analyst,
                Node::AnalystTools,
                Node::Analyst,
                Node::Supervisor,
                Node::Writer,
                Node::WriterTools,
                Node::Writer,
                Node::WriterTools,
                Node::Writer,
            ]
        );

        // Every tool request is matched by exactly one result per call,
        // in call order, before any agent acts again.
        let events = outcome.conversation.events();
        for (i, event) in events.iter().enumerate() {
            if let Event::ToolRequest { calls, .. } = event {
                for (j, call) in calls.iter().enumerate() {
                    match &events[i + 1 + j] {
                        Event::ToolResult { call_id, name, .. } => {
                            assert_eq!(call_id, &call.id);
                            assert_eq!(name, &call.name);
                        }
                        other => panic!("expected result after request, got {:?}", other),
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_hop_limit_is_fatal() {
        let dir = tempdir().unwrap();
        let orchestrator = build(Arc::new(RestlessModel), dir.path(), 6);

        let mut hops_seen = 0;
        let result = orchestrator
            .run("endless", |_| {
                hops_seen += 1;
            })
            .await;

        match result {
            Err(GranskeError::HopLimit(limit)) => assert_eq!(limit, 6),
            other => panic!("expected hop limit error, got {:?}", other),
        }
        assert!(hops_seen <= 6);
    }

    #[tokio::test]
    async fn test_model_failure_is_fatal() {
        let dir = tempdir().unwrap();
        // Empty script: the first supervisor step fails.
        let orchestrator = build(Arc::new(ScriptedModel::new(Vec::new())), dir.path(), 20);

        let result = orchestrator.run("query", |_| {}).await;
        assert!(matches!(result, Err(GranskeError::Agent(_))));
    }

    #[tokio::test]
    async fn test_mixed_batch_routes_on_last_result_only() {
        // Supervisor issues a batch where the delegation call is NOT last;
        // routing follows the trailing search result back to the
        // supervisor, which then finishes, handing off to the writer.
        let script = vec![
            calls(&[
                (
                    "transfer_to_analyst",
                    serde_json::json!({
                        "youtube_url": "https://youtu.be/abc123",
                        "instruction": "deep dive"
                    }),
                ),
                ("search", serde_json::json!({"query": "more sources"})),
            ]),
            content("Concluding without delegation."),
            content("Nothing to report."),
        ];

        let dir = tempdir().unwrap();
        let orchestrator = build(Arc::new(ScriptedModel::new(script)), dir.path(), 20);

        let mut visited = Vec::new();
        orchestrator
            .run("query", |record| visited.push(record.node))
            .await
            .unwrap();

        assert_eq!(
            visited,
            vec![
                Node::Supervisor,
                Node::SupervisorTools,
                Node::Supervisor,
                Node::Writer,
            ]
        );
    }
}
