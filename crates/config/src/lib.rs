//! Configuration for the interview agent
//!
//! Supports loading configuration from:
//! - TOML/YAML/JSON files
//! - Environment variables (INTERVIEWER_ prefix)
//!
//! Also carries the interviewer's prompt templates and the question bank,
//! both with built-in defaults so the engine runs with no files on disk.

pub mod prompts;
pub mod questions;
pub mod settings;

pub use prompts::PromptTemplates;
pub use questions::{Question, QuestionBank};
pub use settings::{InterviewSettings, LlmSettings, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for interviewer_core::Error {
    fn from(err: ConfigError) -> Self {
        interviewer_core::Error::Config(err.to_string())
    }
}
