//! The tool-execution step.
//!
//! Executes every call of the most recent tool request, in order, and
//! produces exactly one result event per call. Capability failures arrive
//! here already converted to text, so this step itself cannot fail.

use crate::capability::Capabilities;
use crate::conversation::{Event, ToolCall};
use tracing::info;

/// Execute a batch of tool calls, preserving call order.
pub async fn execute_tool_request(capabilities: &Capabilities, calls: &[ToolCall]) -> Vec<Event> {
    let mut results = Vec::with_capacity(calls.len());
    for call in calls {
        info!("executing tool: {}", call);
        let text = capabilities.invoke(&call.name, &call.arguments).await;
        results.push(Event::ToolResult {
            call_id: call.id.clone(),
            name: call.name.clone(),
            text,
        });
    }
    results
}
