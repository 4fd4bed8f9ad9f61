//! Capabilities: named external operations invocable with structured
//! arguments, returning text.
//!
//! The capability table is the single seam between the orchestration core
//! and the outside world. The design rule is that `invoke` never returns
//! `Err`: every provider failure, bad argument, or unknown name becomes a
//! descriptive text result that the requesting agent reads in-band.

mod files;
mod search;
mod transcript;
mod video;

pub use files::FileStore;
pub use search::{format_hits, SearchHit, SearchProvider, TavilySearch};
pub use video::{extract_video_id, VideoMetadata, VideoProvider, YoutubeDataApi};

use crate::conversation::AgentRole;
use crate::error::{GranskeError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Registered capability names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Search,
    FetchTranscript,
    ReadFile,
    WriteFile,
    TransferToAnalyst,
    TransferToWriter,
}

impl Capability {
    /// The wire name agents use to request this capability.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Search => "search",
            Capability::FetchTranscript => "fetch_transcript",
            Capability::ReadFile => "read_file",
            Capability::WriteFile => "write_file",
            Capability::TransferToAnalyst => "transfer_to_analyst",
            Capability::TransferToWriter => "transfer_to_writer",
        }
    }

    /// Parse a wire name.
    pub fn parse(name: &str) -> Option<Capability> {
        match name {
            "search" => Some(Capability::Search),
            "fetch_transcript" => Some(Capability::FetchTranscript),
            "read_file" => Some(Capability::ReadFile),
            "write_file" => Some(Capability::WriteFile),
            "transfer_to_analyst" => Some(Capability::TransferToAnalyst),
            "transfer_to_writer" => Some(Capability::TransferToWriter),
            _ => None,
        }
    }

    /// All registered capabilities.
    pub fn all() -> [Capability; 6] {
        [
            Capability::Search,
            Capability::FetchTranscript,
            Capability::ReadFile,
            Capability::WriteFile,
            Capability::TransferToAnalyst,
            Capability::TransferToWriter,
        ]
    }

    /// The capabilities each role may request.
    pub fn allowed_for(role: AgentRole) -> &'static [Capability] {
        match role {
            AgentRole::Supervisor => &[
                Capability::Search,
                Capability::TransferToAnalyst,
                Capability::TransferToWriter,
            ],
            AgentRole::Analyst => &[
                Capability::FetchTranscript,
                Capability::ReadFile,
                Capability::WriteFile,
            ],
            AgentRole::Writer => &[Capability::ReadFile, Capability::WriteFile],
        }
    }
}

/// Verify at startup that every role's allow-list names only registered
/// capabilities.
pub fn validate_allow_lists() -> Result<()> {
    let registered = Capability::all();
    for role in [AgentRole::Supervisor, AgentRole::Analyst, AgentRole::Writer] {
        for cap in Capability::allowed_for(role) {
            if !registered.contains(cap) {
                return Err(GranskeError::Config(format!(
                    "{} allow-list names unregistered capability '{}'",
                    role,
                    cap.name()
                )));
            }
        }
    }
    Ok(())
}

/// The capability table: dispatches named operations to their providers.
pub struct Capabilities {
    search: Arc<dyn SearchProvider>,
    video: Arc<dyn VideoProvider>,
    files: FileStore,
    default_max_results: u32,
}

impl Capabilities {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        video: Arc<dyn VideoProvider>,
        files: FileStore,
        default_max_results: u32,
    ) -> Self {
        Self {
            search,
            video,
            files,
            default_max_results,
        }
    }

    /// The workspace file store.
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Invoke a capability by name with structured arguments.
    ///
    /// Never fails: unknown names, missing arguments, and provider errors
    /// all come back as text.
    pub async fn invoke(&self, name: &str, args: &Value) -> String {
        let Some(capability) = Capability::parse(name) else {
            return format!("Error: unknown capability '{}'", name);
        };

        match capability {
            Capability::Search => {
                let Some(query) = str_arg(args, "query") else {
                    return missing_arg("search", "query");
                };
                let max_results = args["max_results"]
                    .as_u64()
                    .map(|n| n as u32)
                    .unwrap_or(self.default_max_results);
                match self.search.search(query, max_results).await {
                    Ok(hits) => format_hits(&hits),
                    Err(e) => format!("Search Error: {}", e),
                }
            }

            Capability::FetchTranscript => {
                let Some(video_url) = str_arg(args, "video_url") else {
                    return missing_arg("fetch_transcript", "video_url");
                };
                let save_dir = str_arg(args, "save_dir");
                transcript::fetch_transcript(self.video.as_ref(), &self.files, video_url, save_dir)
                    .await
            }

            Capability::ReadFile => {
                let Some(file_path) = str_arg(args, "file_path") else {
                    return missing_arg("read_file", "file_path");
                };
                let Some(file_name) = str_arg(args, "file_name") else {
                    return missing_arg("read_file", "file_name");
                };
                self.files.read(file_path, file_name)
            }

            Capability::WriteFile => {
                let Some(file_path) = str_arg(args, "file_path") else {
                    return missing_arg("write_file", "file_path");
                };
                let Some(content) = str_arg(args, "content") else {
                    return missing_arg("write_file", "content");
                };
                let category = str_arg(args, "category").unwrap_or("summary");
                info!("write_file ({}) -> {}", category, file_path);
                self.files.write(file_path, content)
            }

            // Delegation markers: no side effect beyond signaling the router.
            Capability::TransferToAnalyst => {
                let url = str_arg(args, "youtube_url").unwrap_or("");
                let instruction = str_arg(args, "instruction").unwrap_or("");
                format!(
                    "Delegating to Analyst... URL: {}, Instruction: {}",
                    url, instruction
                )
            }
            Capability::TransferToWriter => {
                let instruction = str_arg(args, "instruction").unwrap_or("");
                let context_files = args["context_files"]
                    .as_array()
                    .map(|files| {
                        files
                            .iter()
                            .filter_map(|f| f.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                format!(
                    "Delegating to Report Writer... Instruction: {}, Context Files: [{}]",
                    instruction, context_files
                )
            }
        }
    }
}

fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

fn missing_arg(capability: &str, key: &str) -> String {
    format!("Error: missing required argument '{}' for {}", key, capability)
}
