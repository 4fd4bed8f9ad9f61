//! Pre-flight checks before starting a research run.
//!
//! Validates that required credentials are configured before kicking off a
//! run that would otherwise fail midway. The YouTube metadata key is only
//! warned about: its absence degrades to a soft capability result.

use crate::cli::Output;
use crate::error::{GranskeError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// A full research run needs model access and search access.
    Research,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Research => {
            check_env_key("OPENAI_API_KEY")?;
            check_env_key("TAVILY_API_KEY")?;
            if env_key_missing("YOUTUBE_API_KEY") {
                Output::warning(
                    "YOUTUBE_API_KEY not set: video metadata will be unavailable \
                     (transcript fetching still works).",
                );
            }
        }
    }
    Ok(())
}

fn check_env_key(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(GranskeError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(GranskeError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

fn env_key_missing(name: &str) -> bool {
    std::env::var(name).map(|v| v.is_empty()).unwrap_or(true)
}
