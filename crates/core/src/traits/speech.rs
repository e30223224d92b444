//! Speech collaborator traits

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::Result;

/// Event emitted by a speech recognizer
///
/// Recognizer failures surface as [`RecognizerEvent::Error`] notifications,
/// never as faults that end the session.
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// Partial hypothesis, may arrive repeatedly while the user speaks.
    /// Informational only; it never drives the state machine.
    Partial(String),
    /// One final transcript per completed utterance
    Final(String),
    /// Recognizer-side failure notification
    Error(String),
}

/// Speech-to-Text interface
///
/// Implementations push [`RecognizerEvent`]s to subscribers from their own
/// capture context; the agent reacts only to `Final` transcripts.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + 'static {
    /// Start capturing audio and emitting events
    async fn start_listening(&self) -> Result<()>;

    /// Stop capturing; pending partials are dropped
    async fn stop_listening(&self) -> Result<()>;

    /// Subscribe to recognition events
    fn subscribe(&self) -> broadcast::Receiver<RecognizerEvent>;
}

/// Playback priority for synthesized speech
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakPriority {
    /// Append to the playback queue
    Normal,
    /// Clear any pending queue before speaking
    Immediate,
}

/// Text-to-Speech interface
///
/// `wait_until_done` is the ordering guarantee of the whole engine: the
/// worker blocks on it so the user never hears two answers overlap.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Queue text for playback
    async fn speak(&self, text: &str, priority: SpeakPriority) -> Result<()>;

    /// Block until playback of all queued text completes
    async fn wait_until_done(&self) -> Result<()>;

    /// Cancel pending and current playback
    async fn stop(&self) -> Result<()>;
}
