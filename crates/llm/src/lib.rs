//! LLM integration for the interview agent
//!
//! - `LlmBackend` trait with an Ollama implementation
//! - `AiEngine`: conversation-history-carrying wrapper that never lets a
//!   backend failure reach the state machine

pub mod backend;
pub mod engine;

pub use backend::{GenerationResult, LlmBackend, OllamaBackend};
pub use engine::AiEngine;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for interviewer_core::Error {
    fn from(err: LlmError) -> Self {
        interviewer_core::Error::Llm(err.to_string())
    }
}
