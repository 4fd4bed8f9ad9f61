//! OpenAI function/tool definitions for the capabilities.

use crate::capability::Capability;
use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

fn function(name: &str, description: &str, parameters: serde_json::Value) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: name.to_string(),
            description: Some(description.to_string()),
            parameters: Some(parameters),
            strict: None,
        },
    }
}

/// Build the tool definition for one capability.
pub fn tool_definition(capability: Capability) -> ChatCompletionTool {
    match capability {
        Capability::Search => function(
            "search",
            "Search the web for YouTube videos relevant to a query. \
             Returns result titles, URLs, and content snippets.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 3)",
                        "default": 3
                    }
                },
                "required": ["query"]
            }),
        ),

        Capability::FetchTranscript => function(
            "fetch_transcript",
            "Extract metadata and the transcript of a YouTube video, save it \
             as '{save_dir}/{video_id}_transcript.md', and return a preview \
             plus the saved path.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "The YouTube video URL"
                    },
                    "save_dir": {
                        "type": "string",
                        "description": "Directory (relative to the workspace) to save the transcript in"
                    }
                },
                "required": ["video_url"]
            }),
        ),

        Capability::ReadFile => function(
            "read_file",
            "Read a persisted file. Use paths returned by other tools.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Directory containing the file"
                    },
                    "file_name": {
                        "type": "string",
                        "description": "File name, e.g. '{video_id}_transcript.md' or '{video_id}_summary.md'"
                    }
                },
                "required": ["file_path", "file_name"]
            }),
        ),

        Capability::WriteFile => function(
            "write_file",
            "Write text content to a file, creating directories as needed.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to save the file at"
                    },
                    "content": {
                        "type": "string",
                        "description": "The text content to write"
                    },
                    "category": {
                        "type": "string",
                        "description": "File category: 'summary' or 'final_report'",
                        "default": "summary"
                    }
                },
                "required": ["file_path", "content"]
            }),
        ),

        Capability::TransferToAnalyst => function(
            "transfer_to_analyst",
            "Delegate one YouTube video to the analyst for deep analysis.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "youtube_url": {
                        "type": "string",
                        "description": "URL of the video to analyze"
                    },
                    "instruction": {
                        "type": "string",
                        "description": "Specific aspects the analyst should focus on"
                    }
                },
                "required": ["youtube_url", "instruction"]
            }),
        ),

        Capability::TransferToWriter => function(
            "transfer_to_writer",
            "Hand off to the report writer with optional instructions.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "instruction": {
                        "type": "string",
                        "description": "Instructions for the final report"
                    },
                    "context_files": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Summary files the writer should read",
                        "default": []
                    }
                },
                "required": ["instruction"]
            }),
        ),
    }
}

/// Tool definitions for a capability allow-list.
pub fn tool_definitions(capabilities: &[Capability]) -> Vec<ChatCompletionTool> {
    capabilities.iter().copied().map(tool_definition).collect()
}
