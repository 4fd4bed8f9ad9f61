//! Configuration module for Granske.
//!
//! Handles loading and managing application settings. API credentials come
//! from environment variables, never from the settings file.

mod settings;

pub use settings::{
    AgentSettings, GeneralSettings, OrchestratorSettings, SearchSettings, Settings,
};
