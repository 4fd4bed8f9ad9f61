//! Error types for Granske.
//!
//! Only two failure classes escape as `Err` from the orchestration core:
//! language-model invocation problems and the hop ceiling. Capability-level
//! failures (bad URLs, missing files, provider errors) are converted to
//! descriptive text results so the agents can see and react to them in-band.

use thiserror::Error;

/// Library-level error type for Granske operations.
#[derive(Error, Debug)]
pub enum GranskeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Hop limit exceeded: run did not terminate within {0} hops")]
    HopLimit(usize),

    #[error("Search provider error: {0}")]
    Search(String),

    #[error("Video provider error: {0}")]
    VideoSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Granske operations.
pub type Result<T> = std::result::Result<T, GranskeError>;
