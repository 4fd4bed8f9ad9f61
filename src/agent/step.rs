//! The role-parameterized agent step.

use super::{prompts, ChatMessage, ChatModel, ChatOutcome};
use crate::capability::Capability;
use crate::config::AgentSettings;
use crate::context::RunContext;
use crate::conversation::{AgentRole, Conversation, Event, StepDelta};
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// The three agents, sharing one chat-model seam.
pub struct Agents {
    chat: Arc<dyn ChatModel>,
    settings: AgentSettings,
}

impl Agents {
    pub fn new(chat: Arc<dyn ChatModel>, settings: AgentSettings) -> Self {
        Self { chat, settings }
    }

    fn model_for(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::Supervisor => &self.settings.supervisor_model,
            AgentRole::Analyst => &self.settings.analyst_model,
            AgentRole::Writer => &self.settings.writer_model,
        }
    }

    /// Run one agent step: produce exactly one new event.
    ///
    /// A model invocation failure propagates as `Err` - the one error class
    /// the core does not soften.
    pub async fn step(
        &self,
        role: AgentRole,
        conversation: &Conversation,
        context: &RunContext,
    ) -> Result<StepDelta> {
        let messages = build_messages(role, conversation, context);
        debug!("{} step with {} message(s)", role, messages.len());

        let outcome = self
            .chat
            .complete(
                self.model_for(role),
                self.settings.temperature,
                messages,
                Capability::allowed_for(role),
            )
            .await?;

        Ok(StepDelta {
            events: vec![wrap_outcome(role, outcome)],
            active_agent: role,
        })
    }
}

/// Build the model input for a role.
///
/// The Writer is deliberately isolated: it gets only the restated user
/// query, never the event log, and must recover analyst output through
/// `read_file`. This keeps its input bounded regardless of how many
/// analyst rounds occurred.
fn build_messages(
    role: AgentRole,
    conversation: &Conversation,
    context: &RunContext,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::System(prompts::render(
        role,
        context.timestamp(),
    ))];

    if role == AgentRole::Writer {
        messages.push(ChatMessage::User(format!(
            "[Task]\nUser Query: {}",
            conversation.user_query()
        )));
        return messages;
    }

    for event in conversation.events() {
        match event {
            Event::UserRequest { text } => messages.push(ChatMessage::User(text.clone())),
            Event::AgentContent { text, .. } => messages.push(ChatMessage::Assistant {
                content: Some(text.clone()),
                tool_calls: Vec::new(),
            }),
            Event::ToolRequest { calls, .. } => messages.push(ChatMessage::Assistant {
                content: None,
                tool_calls: calls.clone(),
            }),
            Event::ToolResult { call_id, text, .. } => messages.push(ChatMessage::Tool {
                call_id: call_id.clone(),
                content: text.clone(),
            }),
        }
    }

    messages
}

/// Wrap the raw model output as a single conversation event.
fn wrap_outcome(role: AgentRole, outcome: ChatOutcome) -> Event {
    if outcome.tool_calls.is_empty() {
        Event::AgentContent {
            role,
            text: outcome.content.unwrap_or_default(),
        }
    } else {
        Event::ToolRequest {
            role,
            calls: outcome.tool_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ToolCall;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted model that records what it was asked.
    struct Recorder {
        received: Mutex<Vec<Vec<ChatMessage>>>,
        outcome: ChatOutcome,
    }

    impl Recorder {
        fn content(text: &str) -> Self {
            Self {
                received: Mutex::new(Vec::new()),
                outcome: ChatOutcome {
                    content: Some(text.to_string()),
                    tool_calls: Vec::new(),
                },
            }
        }
    }

    #[async_trait]
    impl ChatModel for Recorder {
        async fn complete(
            &self,
            _model: &str,
            _temperature: f32,
            messages: Vec<ChatMessage>,
            _capabilities: &[Capability],
        ) -> Result<ChatOutcome> {
            self.received.lock().unwrap().push(messages);
            Ok(self.outcome.clone())
        }
    }

    fn conversation_with_analyst_rounds(rounds: usize) -> Conversation {
        let mut conv = Conversation::new("Summarize the latest iPhone 16 review videos.");
        for i in 0..rounds {
            let call = ToolCall::new(
                "fetch_transcript",
                serde_json::json!({"video_url": format!("https://youtu.be/video{}", i)}),
            );
            let call_id = call.id.clone();
            conv.append(StepDelta {
                events: vec![Event::ToolRequest {
                    role: AgentRole::Analyst,
                    calls: vec![call],
                }],
                active_agent: AgentRole::Analyst,
            });
            conv.append(StepDelta {
                events: vec![Event::ToolResult {
                    call_id,
                    name: "fetch_transcript".into(),
                    text: format!("[Transcript saved] video{}", i),
                }],
                active_agent: AgentRole::Analyst,
            });
        }
        conv
    }

    #[tokio::test]
    async fn test_writer_receives_only_restated_query() {
        for rounds in [0, 1, 4] {
            let recorder = Arc::new(Recorder::content("done"));
            let agents = Agents::new(recorder.clone(), AgentSettings::default());
            let conv = conversation_with_analyst_rounds(rounds);
            let ctx = RunContext::with_timestamp("2026-08-27_09-00");

            agents.step(AgentRole::Writer, &conv, &ctx).await.unwrap();

            let received = recorder.received.lock().unwrap();
            let messages = &received[0];
            assert_eq!(messages.len(), 2, "system + single user, rounds={}", rounds);
            match &messages[1] {
                ChatMessage::User(text) => {
                    assert!(text.contains("Summarize the latest iPhone 16 review videos."));
                    assert!(!text.contains("[Transcript saved]"));
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_supervisor_sees_full_history() {
        let recorder = Arc::new(Recorder::content("Research complete."));
        let agents = Agents::new(recorder.clone(), AgentSettings::default());
        let conv = conversation_with_analyst_rounds(2);
        let ctx = RunContext::with_timestamp("2026-08-27_09-00");

        agents.step(AgentRole::Supervisor, &conv, &ctx).await.unwrap();

        let received = recorder.received.lock().unwrap();
        // system + user request + 2 * (request + result)
        assert_eq!(received[0].len(), 6);
    }

    #[tokio::test]
    async fn test_content_outcome_becomes_agent_content() {
        let agents = Agents::new(
            Arc::new(Recorder::content("Research phase complete.")),
            AgentSettings::default(),
        );
        let conv = Conversation::new("q");
        let ctx = RunContext::with_timestamp("2026-08-27_09-00");

        let delta = agents.step(AgentRole::Supervisor, &conv, &ctx).await.unwrap();
        assert_eq!(delta.active_agent, AgentRole::Supervisor);
        match &delta.events[0] {
            Event::AgentContent { role, text } => {
                assert_eq!(*role, AgentRole::Supervisor);
                assert_eq!(text, "Research phase complete.");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tool_calls_outcome_becomes_tool_request() {
        let recorder = Recorder {
            received: Mutex::new(Vec::new()),
            outcome: ChatOutcome {
                content: None,
                tool_calls: vec![ToolCall::new(
                    "search",
                    serde_json::json!({"query": "iphone 16 review"}),
                )],
            },
        };
        let agents = Agents::new(Arc::new(recorder), AgentSettings::default());
        let conv = Conversation::new("q");
        let ctx = RunContext::with_timestamp("2026-08-27_09-00");

        let delta = agents.step(AgentRole::Supervisor, &conv, &ctx).await.unwrap();
        assert!(delta.events[0].is_tool_request());
    }
}
