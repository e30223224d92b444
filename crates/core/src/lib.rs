//! Core traits and types for the interview agent
//!
//! This crate provides foundational types used across all other crates:
//! - Interview phases and the phase transition table
//! - Transcript and mistake-record types
//! - Chat message types shared by the LLM and agent crates
//! - Collaborator traits (speech recognition, speech synthesis, editor)
//! - Error types

pub mod error;
pub mod message;
pub mod phase;
pub mod traits;
pub mod transcript;

pub use error::{Error, Result};
pub use message::{Message, Role};
pub use phase::InterviewPhase;
pub use transcript::{Mistake, Speaker, TranscriptEntry};

pub use traits::{
    EditorSurface, RecognizerEvent, SpeakPriority, SpeechRecognizer, SpeechSynthesizer,
};
