//! Collaborator traits
//!
//! The engine drives external components only through these interfaces:
//! - [`SpeechRecognizer`] - source of candidate utterances
//! - [`SpeechSynthesizer`] - speaks interviewer responses
//! - [`EditorSurface`] - visible work surface questions are written to

pub mod editor;
pub mod speech;

pub use editor::EditorSurface;
pub use speech::{RecognizerEvent, SpeakPriority, SpeechRecognizer, SpeechSynthesizer};
