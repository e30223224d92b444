//! Per-session interview state

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use interviewer_core::{Mistake, Speaker, TranscriptEntry};

/// Accumulated state for one interview session
///
/// Pure data; every mutation happens through the state machine, which owns
/// the context for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Detected interview type ("DSA", "System Design", ...)
    pub interview_type: String,
    /// Full text of the question currently being solved
    pub current_question: String,
    /// Titles of every question presented, in order
    pub questions_asked: Vec<String>,
    /// Title of the most recently presented question
    pub last_question_type: String,
    /// Hints given for the current question
    pub hints_given: u32,
    /// Hints given across the whole session
    pub total_hints: u32,
    /// Consecutive unrecognized inputs for the current question
    pub retry_count: u32,
    /// Latest editor snapshot from the candidate
    pub current_code: String,
    /// WRONG-tagged feedback records
    pub mistakes: Vec<Mistake>,
    /// Chronological session transcript
    pub transcript: Vec<TranscriptEntry>,
    /// Session start, set when the interview starts
    pub started_at: Option<DateTime<Utc>>,
    /// Session end, set when the interview ends
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// Append a transcript line
    pub fn add_transcript(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::new(speaker, text));
    }

    /// Record a mistake against the current question.
    ///
    /// The excerpt keeps the first 100 characters of the question so the
    /// closing summary can attribute the mistake without storing the whole
    /// problem statement again.
    pub fn record_mistake(&mut self, wrong_answer: impl Into<String>, correction: impl Into<String>) {
        self.mistakes.push(Mistake {
            question_excerpt: truncate_chars(&self.current_question, 100),
            wrong_answer: wrong_answer.into(),
            correction: correction.into(),
        });
    }

    /// Mistakes attributed to the current question, matched by excerpt prefix
    pub fn mistakes_for_current_question(&self) -> Vec<&Mistake> {
        let prefix = truncate_chars(&self.current_question, 50);
        self.mistakes
            .iter()
            .filter(|m| !prefix.is_empty() && m.question_excerpt.contains(&prefix))
            .collect()
    }

    /// Closing-prompt summary of every recorded mistake
    pub fn mistakes_summary(&self) -> String {
        if self.mistakes.is_empty() {
            return "No major mistakes recorded during this interview.".to_string();
        }

        let mut summary = String::from("MISTAKES MADE DURING INTERVIEW:\n");
        for (i, mistake) in self.mistakes.iter().enumerate() {
            summary.push_str(&format!(
                "{}. They said: \"{}...\"\n   Correction: {}\n",
                i + 1,
                truncate_chars(&mistake.wrong_answer, 50),
                truncate_chars(&mistake.correction, 100),
            ));
        }
        summary
    }

    /// Reset per-question counters when a new question is presented
    pub fn begin_question(&mut self, title: impl Into<String>, text: impl Into<String>) {
        let title = title.into();
        self.current_question = text.into();
        self.last_question_type = title.clone();
        self.questions_asked.push(title);
        self.hints_given = 0;
        self.retry_count = 0;
    }

    /// Build the end-of-session summary
    pub fn summary(&self) -> SessionSummary {
        let duration = match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        };

        SessionSummary {
            interview_type: self.interview_type.clone(),
            questions_asked: self.questions_asked.clone(),
            total_hints: self.total_hints,
            duration,
            transcript: self.transcript.clone(),
        }
    }
}

/// End-of-session report
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub interview_type: String,
    pub questions_asked: Vec<String>,
    pub total_hints: u32,
    #[serde(skip)]
    pub duration: Option<Duration>,
    pub transcript: Vec<TranscriptEntry>,
}

/// Truncate to at most `max` characters on a char boundary
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
