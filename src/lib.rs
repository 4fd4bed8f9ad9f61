//! Granske - Multi-Agent Video Research
//!
//! A CLI tool that coordinates a small team of LLM-driven agents to research
//! a topic: a Supervisor searches the web for relevant YouTube videos, a
//! video Analyst extracts and summarizes transcripts, and a Report Writer
//! synthesizes the persisted summaries into a final report.
//!
//! The name "Granske" comes from the Norwegian word for "to examine."
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `context` - Per-run context (timestamp, run directory)
//! - `conversation` - Shared append-only event log
//! - `capability` - External capabilities (search, transcripts, files)
//! - `agent` - Role-bound agent steps and prompts
//! - `router` - Finite-state routing between agents and tool execution
//! - `executor` - Tool-execution step
//! - `orchestrator` - The run loop
//!
//! # Example
//!
//! ```rust,no_run
//! use granske::config::Settings;
//! use granske::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let outcome = orchestrator
//!         .run("Summarize the latest iPhone 16 review videos.", |_| {})
//!         .await?;
//!     println!("{}", outcome.final_report);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod capability;
pub mod cli;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod executor;
pub mod openai;
pub mod orchestrator;
pub mod router;

pub use error::{GranskeError, Result};
