//! Shared conversation state.
//!
//! A research run is a single append-only log of events plus a tag naming
//! the agent that last acted. Events are never reordered or mutated in
//! place; each agent or tool-execution step receives a read view and
//! returns a delta that the orchestrator applies.

use serde::{Deserialize, Serialize};

/// The three agent roles in a research team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Supervisor,
    Analyst,
    Writer,
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentRole::Supervisor => write!(f, "Supervisor"),
            AgentRole::Analyst => write!(f, "Analyst"),
            AgentRole::Writer => write!(f, "Writer"),
        }
    }
}

/// One capability invocation requested by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id, round-tripped to the model when reporting results.
    pub id: String,
    /// Capability name, e.g. `search` or `transfer_to_analyst`.
    pub name: String,
    /// Structured arguments as a JSON object.
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Create a call with a fresh id.
    pub fn new(name: &str, arguments: serde_json::Value) -> Self {
        Self {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            arguments,
        }
    }
}

impl std::fmt::Display for ToolCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

/// An immutable record in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The initiating free-text research query.
    UserRequest { text: String },

    /// Free-text agent output with no pending tool calls.
    AgentContent { role: AgentRole, text: String },

    /// One or more capability invocations requested by an agent.
    ToolRequest { role: AgentRole, calls: Vec<ToolCall> },

    /// The result of exactly one tool call. Errors travel in `text` as
    /// descriptive payloads, not on a separate channel.
    ToolResult {
        call_id: String,
        name: String,
        text: String,
    },
}

impl Event {
    /// Whether this event carries pending tool calls.
    pub fn is_tool_request(&self) -> bool {
        matches!(self, Event::ToolRequest { .. })
    }
}

/// New events plus the agent they came from, applied by the orchestrator.
#[derive(Debug, Clone)]
pub struct StepDelta {
    pub events: Vec<Event>,
    pub active_agent: AgentRole,
}

/// The shared, append-only conversation state for one research run.
///
/// Owned exclusively by the orchestrator; steps get `&Conversation`.
#[derive(Debug, Clone)]
pub struct Conversation {
    events: Vec<Event>,
    active_agent: AgentRole,
}

impl Conversation {
    /// Start a conversation from the user's query, with the Supervisor active.
    pub fn new(query: &str) -> Self {
        Self {
            events: vec![Event::UserRequest {
                text: query.to_string(),
            }],
            active_agent: AgentRole::Supervisor,
        }
    }

    /// Append a step's delta. Pure bookkeeping, no failure modes.
    pub fn append(&mut self, delta: StepDelta) {
        self.events.extend(delta.events);
        self.active_agent = delta.active_agent;
    }

    /// All events in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The most recent event. The log is non-empty by construction.
    pub fn last_event(&self) -> &Event {
        self.events.last().expect("conversation starts non-empty")
    }

    /// The agent that last acted.
    pub fn active_agent(&self) -> AgentRole {
        self.active_agent
    }

    /// The original user query.
    pub fn user_query(&self) -> &str {
        match &self.events[0] {
            Event::UserRequest { text } => text,
            _ => "",
        }
    }
}
