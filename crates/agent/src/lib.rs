//! Interview agent
//!
//! Orchestrates a mock technical interview:
//! - `InterviewStateMachine`: phase-driven conversation flow
//! - `classify`: keyword classifiers for user utterances
//! - `parser`: semi-structured question-response parser
//! - `SessionContext`: per-session accumulated state
//! - `InterviewWorker`: single-consumer task queue serializing LLM and
//!   speech side effects

pub mod classify;
pub mod machine;
pub mod parser;
pub mod session;
pub mod worker;

pub use machine::{InterviewEvent, InterviewStateMachine};
pub use parser::ParsedQuestion;
pub use session::{SessionContext, SessionSummary};
pub use worker::{InterviewWorker, Task, TaskAction, WorkerHandle};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] interviewer_llm::LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] interviewer_config::ConfigError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<AgentError> for interviewer_core::Error {
    fn from(err: AgentError) -> Self {
        interviewer_core::Error::Session(err.to_string())
    }
}
