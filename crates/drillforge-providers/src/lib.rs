//! drillforge-providers — text-generation backend integrations.
//!
//! Implements the `TextGenerator` trait for Gemini and Ollama, plus a mock
//! backend for testing the session orchestrator without real API calls.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;

pub use config::{create_generator, load_config, load_config_from, DrillforgeConfig, ProviderConfig};
pub use error::ProviderError;
