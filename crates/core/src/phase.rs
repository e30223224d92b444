//! Interview phases and the phase transition table

use serde::{Deserialize, Serialize};

/// Phases of the interview flow
///
/// The interview may only move between phases along the edges returned by
/// [`InterviewPhase::allowed_transitions`]. `TopicSelection` is kept in the
/// table for completeness, but the live flow jumps from `Greeting` straight
/// to `QuestionPresenting`: confirming the topic first made the model emit a
/// second question that raced the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    /// No interview in progress
    #[default]
    Idle,
    /// Interviewer introduces itself
    Greeting,
    /// Candidate picks an interview type
    TopicSelection,
    /// A question is being generated and written to the editor
    QuestionPresenting,
    /// Candidate is working on the current question
    CandidateSolving,
    /// A hint is being produced
    GivingHint,
    /// Edge-case follow-up after the candidate declared completion
    FollowUp,
    /// Closing feedback is being produced
    Closing,
    /// Terminal state
    Ended,
}

impl InterviewPhase {
    /// Get allowed transitions from the current phase
    pub fn allowed_transitions(&self) -> &'static [InterviewPhase] {
        use InterviewPhase::*;
        match self {
            Idle => &[Greeting],
            Greeting => &[TopicSelection, QuestionPresenting, Closing],
            TopicSelection => &[QuestionPresenting, Closing],
            QuestionPresenting => &[CandidateSolving, Closing],
            CandidateSolving => &[GivingHint, FollowUp, QuestionPresenting, Closing],
            GivingHint => &[CandidateSolving, Closing],
            FollowUp => &[CandidateSolving, QuestionPresenting, Closing],
            Closing => &[Ended],
            Ended => &[],
        }
    }

    /// Check if a transition to the target phase is allowed
    pub fn can_transition_to(&self, target: InterviewPhase) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Terminal phases accept no further transitions
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InterviewPhase::Idle => "Idle",
            InterviewPhase::Greeting => "Greeting",
            InterviewPhase::TopicSelection => "Topic Selection",
            InterviewPhase::QuestionPresenting => "Question Presenting",
            InterviewPhase::CandidateSolving => "Candidate Solving",
            InterviewPhase::GivingHint => "Giving Hint",
            InterviewPhase::FollowUp => "Follow Up",
            InterviewPhase::Closing => "Closing",
            InterviewPhase::Ended => "Ended",
        };
        write!(f, "{}", name)
    }
}
