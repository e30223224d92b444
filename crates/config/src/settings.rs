//! Runtime settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// LLM backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model name, including tag
    #[serde(default = "default_model")]
    pub model: String,
    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds. Interview-turn prompts routinely take
    /// tens of seconds on local models.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum tokens to generate per turn
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_model() -> String {
    // Instruction-tuned model; reasoning models leak <think> blocks the
    // engine then has to strip.
    "mistral:7b-instruct".to_string()
}

fn default_endpoint() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_tokens() -> usize {
    512
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Interview flow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSettings {
    /// Question difficulty bucket
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Questions per session before closing
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
    /// Unrecognized-input attempts before forced progression
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Conversation history entries sent to the model
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_max_questions() -> usize {
    2
}

fn default_max_retries() -> u32 {
    5
}

fn default_history_limit() -> usize {
    20
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            max_questions: default_max_questions(),
            max_retries: default_max_retries(),
            history_limit: default_history_limit(),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub interview: InterviewSettings,
    /// Optional question bank file; the built-in table is used when absent
    #[serde(default)]
    pub questions_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings, layering an optional file under `INTERVIEWER_`
    /// environment overrides (e.g. `INTERVIEWER_LLM__MODEL`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("INTERVIEWER").separator("__"),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            model = %settings.llm.model,
            difficulty = %settings.interview.difficulty,
            "Settings loaded"
        );

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interview.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interview.max_retries".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.interview.max_questions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interview.max_questions".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
