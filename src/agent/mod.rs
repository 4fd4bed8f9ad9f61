//! Role-bound agents.
//!
//! Each agent is a pure step: given the current conversation, it asks the
//! language model (constrained to the role's capability allow-list) for the
//! next move and wraps the answer as exactly one new event.

mod prompts;
mod schema;
mod step;

pub use schema::tool_definitions;
pub use step::Agents;

use crate::capability::Capability;
use crate::conversation::ToolCall;
use crate::error::Result;
use async_trait::async_trait;

/// A chat message in model-neutral form.
#[derive(Debug, Clone)]
pub enum ChatMessage {
    System(String),
    User(String),
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        call_id: String,
        content: String,
    },
}

/// What the model produced: free text, tool calls, or both.
#[derive(Debug, Clone, Default)]
pub struct ChatOutcome {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Seam for the text-generation service. The production implementation
/// lives in `crate::openai`; tests script this trait directly.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one chat completion constrained to the given capabilities.
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        messages: Vec<ChatMessage>,
        capabilities: &[Capability],
    ) -> Result<ChatOutcome>;
}
