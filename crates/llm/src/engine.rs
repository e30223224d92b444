//! Conversation engine
//!
//! Wraps an `LlmBackend` with a bounded conversation history and scripted
//! fallbacks so a backend failure never surfaces to the caller as an error.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::Mutex;

use interviewer_core::Message;

use crate::{LlmBackend, LlmError};

static THINK_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

const FALLBACK_EMPTY: &str = "I'm here to help! Please go ahead.";
const FALLBACK_TIMEOUT: &str = "I need a moment to think about that...";
const FALLBACK_ERROR: &str = "I apologize for the technical issue. Please continue.";

/// Conversation engine with bounded history
pub struct AiEngine {
    backend: Arc<dyn LlmBackend>,
    system_prompt: String,
    history: Mutex<Vec<Message>>,
    history_limit: usize,
}

impl AiEngine {
    pub fn new(backend: Arc<dyn LlmBackend>, system_prompt: String, history_limit: usize) -> Self {
        Self {
            backend,
            system_prompt,
            history: Mutex::new(Vec::new()),
            history_limit,
        }
    }

    /// Clear conversation history for a fresh session
    pub async fn reset_conversation(&self) {
        self.history.lock().await.clear();
    }

    /// Check whether the backend is reachable
    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Generate a response, propagating backend failures to the caller.
    ///
    /// History is only updated on success. Reasoning blocks emitted by
    /// thinking models are stripped before the text is recorded or returned.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, LlmError> {
        let mut messages = vec![Message::system(&self.system_prompt)];
        {
            let history = self.history.lock().await;
            messages.extend(history.iter().cloned());
        }
        messages.push(Message::user(prompt));

        let result = self.backend.generate(&messages).await?;
        let cleaned = clean_response(&result.text);

        tracing::debug!(
            model = self.backend.model_name(),
            tokens = result.tokens,
            elapsed_ms = result.total_time_ms,
            "LLM response generated"
        );

        let mut history = self.history.lock().await;
        history.push(Message::user(prompt));
        history.push(Message::assistant(&cleaned));
        let len = history.len();
        if len > self.history_limit {
            history.drain(..len - self.history_limit);
        }

        Ok(cleaned)
    }

    /// Generate a response, substituting a scripted line when the backend
    /// fails or produces nothing. Always returns something speakable.
    pub async fn generate_response(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) if text.is_empty() => FALLBACK_EMPTY.to_string(),
            Ok(text) => text,
            Err(LlmError::Timeout) => {
                tracing::warn!("LLM request timed out");
                FALLBACK_TIMEOUT.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, "LLM request failed");
                FALLBACK_ERROR.to_string()
            }
        }
    }
}

/// Remove `<think>` reasoning blocks from model output.
///
/// An unmatched closing tag still truncates everything before it, so a
/// response with a dropped opening tag does not leak reasoning text.
fn clean_response(text: &str) -> String {
    let without_blocks = THINK_BLOCK_RE.replace_all(text, "");
    let cleaned = match without_blocks.rfind("</think>") {
        Some(idx) => &without_blocks[idx + "</think>".len()..],
        None => &without_blocks,
    };
    cleaned.trim().to_string()
}
