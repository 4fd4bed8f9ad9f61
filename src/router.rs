//! Routing between agents and their tool-execution steps.
//!
//! The run is a finite-state machine over the kind of the single most
//! recent event. Transitions never inspect deeper history, which keeps
//! every routing decision O(1).

use crate::conversation::Event;

/// Nodes of the control-flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Supervisor,
    SupervisorTools,
    Analyst,
    AnalystTools,
    Writer,
    WriterTools,
    Terminal,
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Node::Supervisor => "Supervisor",
            Node::SupervisorTools => "supervisor_tools",
            Node::Analyst => "Analyst",
            Node::AnalystTools => "analyst_tools",
            Node::Writer => "Writer",
            Node::WriterTools => "writer_tools",
            Node::Terminal => "__end__",
        };
        write!(f, "{}", name)
    }
}

/// Pick the next node from the one that just ran and the latest event.
///
/// After a tool-execution step only the last result of the batch is
/// examined; a delegation call that is not last does not affect routing.
pub fn next_node(current: Node, last_event: &Event) -> Node {
    match current {
        Node::Supervisor => {
            if last_event.is_tool_request() {
                Node::SupervisorTools
            } else {
                Node::Writer
            }
        }

        Node::SupervisorTools => match last_event {
            Event::ToolResult { name, .. } if name == "transfer_to_analyst" => Node::Analyst,
            // Unreachable in practice: no capability registers under this name.
            Event::ToolResult { name, .. } if name == "transfer_to_report_writer" => Node::Writer,
            _ => Node::Supervisor,
        },

        Node::Analyst => {
            if last_event.is_tool_request() {
                Node::AnalystTools
            } else {
                Node::Supervisor
            }
        }

        Node::AnalystTools => Node::Analyst,

        Node::Writer => {
            if last_event.is_tool_request() {
                Node::WriterTools
            } else {
                Node::Terminal
            }
        }

        Node::WriterTools => Node::Writer,

        Node::Terminal => Node::Terminal,
    }
}
