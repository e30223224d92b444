//! Interview state machine
//!
//! Drives the conversation through its phases: greeting, question
//! presentation, solving, hints, follow-ups, and closing. Every public
//! method returns the interviewer's next line; speaking it is the worker's
//! job, not the machine's.

use std::sync::Arc;

use tokio::sync::broadcast;

use interviewer_config::{InterviewSettings, PromptTemplates, Question, QuestionBank};
use interviewer_core::{EditorSurface, InterviewPhase, Speaker};
use interviewer_llm::AiEngine;

use crate::classify;
use crate::parser::ParsedQuestion;
use crate::session::{SessionContext, SessionSummary};

const REPROMPT: &str = "I didn't catch that. Could you repeat?";
const HINT_REFUSAL: &str = "Hints are available while solving a problem.";
const NOT_STARTED: &str = "The interview hasn't started yet.";
const ALREADY_ENDED: &str = "The interview has already ended.";
const FEEDBACK_FALLBACK: &str = "[UNCLEAR] Okay, continue.";
const DEFAULT_PRESENTATION: &str = "Alright, I've written the question in the editor. \
Take a look at the problem and walk me through your approach before you start coding.";

/// Event emitted over the machine's broadcast channel
#[derive(Debug, Clone)]
pub enum InterviewEvent {
    PhaseChanged {
        from: InterviewPhase,
        to: InterviewPhase,
    },
    /// The interviewer's next line, ready for playback
    Response(String),
    SpeakingStarted,
    SpeakingFinished,
    Error(String),
}

/// Phase-driven interview flow
pub struct InterviewStateMachine {
    phase: InterviewPhase,
    context: SessionContext,
    engine: Arc<AiEngine>,
    templates: PromptTemplates,
    questions: QuestionBank,
    editor: Option<Arc<dyn EditorSurface>>,
    events: broadcast::Sender<InterviewEvent>,
    settings: InterviewSettings,
}

impl InterviewStateMachine {
    pub fn new(
        engine: Arc<AiEngine>,
        templates: PromptTemplates,
        questions: QuestionBank,
        settings: InterviewSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            phase: InterviewPhase::Idle,
            context: SessionContext::default(),
            engine,
            templates,
            questions,
            editor: None,
            events,
            settings,
        }
    }

    /// Attach an editor surface questions get written into
    pub fn with_editor(mut self, editor: Arc<dyn EditorSurface>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InterviewEvent> {
        self.events.subscribe()
    }

    pub fn event_sender(&self) -> broadcast::Sender<InterviewEvent> {
        self.events.clone()
    }

    pub fn session_summary(&self) -> SessionSummary {
        self.context.summary()
    }

    /// Store the latest editor snapshot
    pub fn update_code(&mut self, code: impl Into<String>) {
        self.context.current_code = code.into();
    }

    /// Begin a fresh session
    pub async fn start_interview(&mut self) -> String {
        self.phase = InterviewPhase::Idle;
        self.context = SessionContext {
            started_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        self.engine.reset_conversation().await;

        self.transition(InterviewPhase::Greeting);
        let response = self.engine.generate_response(&self.templates.greeting).await;
        self.say(response)
    }

    /// Handle one final transcript from the candidate, with an optional
    /// editor snapshot taken at the same moment
    pub async fn process_input(&mut self, utterance: &str, code: Option<&str>) -> String {
        if let Some(code) = code {
            self.context.current_code = code.to_string();
        }
        self.context.add_transcript(Speaker::User, utterance);

        let response = match self.phase {
            InterviewPhase::Idle => NOT_STARTED.to_string(),
            InterviewPhase::Ended => ALREADY_ENDED.to_string(),
            InterviewPhase::Greeting => self.handle_greeting(utterance).await,
            InterviewPhase::CandidateSolving => self.handle_solving(utterance).await,
            InterviewPhase::FollowUp => self.handle_follow_up(utterance).await,
            // A transient phase; the candidate spoke while the engine was
            // still producing output. Answer in context rather than reprompt.
            _ => self.engine.generate_response(utterance).await,
        };
        self.say(response)
    }

    /// Explicit hint request, e.g. from a UI button
    pub async fn request_hint(&mut self) -> String {
        let response = if self.phase == InterviewPhase::CandidateSolving {
            self.give_hint().await
        } else {
            HINT_REFUSAL.to_string()
        };
        self.say(response)
    }

    /// End the session from outside the conversation flow
    pub async fn end_interview(&mut self) -> String {
        if self.phase == InterviewPhase::Ended {
            return ALREADY_ENDED.to_string();
        }
        let response = self.close_session().await;
        self.say(response)
    }

    /// Quick assessment of a code snapshot, outside the phase flow
    pub async fn analyze_code(&mut self, code: &str) -> String {
        self.context.current_code = code.to_string();
        let prompt = self
            .templates
            .format_code_analysis(code, &self.context.current_question);
        let response = self.engine.generate_response(&prompt).await;
        self.say(response)
    }

    async fn handle_greeting(&mut self, utterance: &str) -> String {
        // Any utterance picks a topic; the detector defaults to DSA, so an
        // unintelligible reply still gets the session moving.
        let interview_type = classify::detect_interview_type(utterance);
        self.context.interview_type = interview_type.to_string();
        tracing::info!(interview_type, "Interview type selected");

        self.present_question().await
    }

    /// Generate the next question, write it to the editor, and move to
    /// solving. Falls back to the question bank when generation fails.
    async fn present_question(&mut self) -> String {
        self.transition(InterviewPhase::QuestionPresenting);

        let prompt = self
            .templates
            .format_question(&self.context.interview_type, &self.settings.difficulty);

        let parsed = match self.engine.try_generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => ParsedQuestion::parse(&text),
            Ok(_) => {
                tracing::warn!("Empty question generation, using question bank");
                self.scripted_question()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Question generation failed, using question bank");
                self.scripted_question()
            }
        };

        self.context
            .begin_question(&parsed.title, &parsed.text);

        if let Some(editor) = &self.editor {
            editor.write(&format!(
                "/* Question: {}\n\n{}\n*/\n\n// Your solution:\n",
                parsed.title, parsed.text
            ));
        }

        self.transition(InterviewPhase::CandidateSolving);
        parsed.explanation
    }

    /// Next unused question from the bank for the current type and
    /// difficulty
    fn scripted_question(&self) -> ParsedQuestion {
        let bank = self
            .questions
            .get_or_fallback(&self.context.interview_type, &self.settings.difficulty);
        if bank.is_empty() {
            return ParsedQuestion::parse("");
        }

        let question: &Question = &bank[self.context.questions_asked.len() % bank.len()];
        ParsedQuestion {
            title: question.title.clone(),
            text: question.description.clone(),
            explanation: DEFAULT_PRESENTATION.to_string(),
        }
    }

    async fn handle_solving(&mut self, utterance: &str) -> String {
        if classify::is_garbage(utterance) {
            return REPROMPT.to_string();
        }

        if classify::is_hint_request(utterance) {
            return self.give_hint().await;
        }

        if classify::seems_finished(utterance) {
            return self.ask_follow_up().await;
        }

        // Default path: the utterance matched no classifier. Count it, and
        // after max_retries of these in a row force the session forward.
        self.context.retry_count += 1;
        tracing::debug!(
            retry_count = self.context.retry_count,
            "Unclassified input while solving"
        );
        if self.context.retry_count >= self.settings.max_retries {
            return self.move_on_or_conclude().await;
        }

        let prompt = self.templates.format_feedback(
            &self.context.current_question,
            &self.context.current_code,
            utterance,
            self.context.hints_given,
        );

        let raw = match self.engine.try_generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => FEEDBACK_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Feedback generation failed");
                FEEDBACK_FALLBACK.to_string()
            }
        };

        let stripped = strip_feedback_tags(&raw);
        if contains_tag(&raw, "[WRONG]") {
            self.context.record_mistake(utterance, &stripped);
            tracing::info!(
                mistakes = self.context.mistakes.len(),
                "Incorrect answer recorded"
            );
        }

        stripped
    }

    /// The candidate exhausted their retries; deliver recent corrections
    /// and either present the next question or close
    async fn move_on_or_conclude(&mut self) -> String {
        self.context.retry_count = 0;

        let mut response = String::new();
        let matching = self.context.mistakes_for_current_question();
        // Last two corrections, oldest first
        let recent: Vec<String> = matching
            .iter()
            .skip(matching.len().saturating_sub(2))
            .map(|m| m.correction.clone())
            .collect();
        if !recent.is_empty() {
            response.push_str("Before we move on, let me give you some feedback. ");
            response.push_str(&recent.join(" "));
            response.push(' ');
        }

        if self.context.questions_asked.len() < self.settings.max_questions {
            response.push_str("Let's move on to the next problem. ");
            let presentation = self.present_question().await;
            response.push_str(&presentation);
        } else {
            let closing = self.close_session().await;
            response.push_str(&closing);
        }
        response
    }

    async fn give_hint(&mut self) -> String {
        self.transition(InterviewPhase::GivingHint);

        self.context.hints_given += 1;
        self.context.total_hints += 1;
        self.context.retry_count = 0;
        let hint_level = self.context.hints_given.min(3);

        let prompt = self.templates.format_hint(
            &self.context.current_question,
            &self.context.current_code,
            self.context.hints_given - 1,
            hint_level,
        );
        let response = self.engine.generate_response(&prompt).await;

        self.transition(InterviewPhase::CandidateSolving);
        response
    }

    async fn ask_follow_up(&mut self) -> String {
        self.transition(InterviewPhase::FollowUp);
        self.context.retry_count = 0;

        let prompt = self.templates.format_follow_up(
            &self.context.current_question,
            &self.context.current_code,
        );
        self.engine.generate_response(&prompt).await
    }

    /// Feedback on the follow-up answer, then forced progression: next
    /// question if the session has room for one, closing otherwise
    async fn handle_follow_up(&mut self, utterance: &str) -> String {
        let prompt = self.templates.format_follow_up_feedback(
            &self.context.current_question,
            &self.context.current_code,
            utterance,
        );
        let mut response = self.engine.generate_response(&prompt).await;
        response.push(' ');
        response.push_str(&self.move_on_or_conclude().await);
        response
    }

    async fn close_session(&mut self) -> String {
        self.transition(InterviewPhase::Closing);
        self.context.ended_at = Some(chrono::Utc::now());

        let questions_covered = if self.context.questions_asked.is_empty() {
            "general discussion".to_string()
        } else {
            self.context.questions_asked.join(", ")
        };

        let prompt = self
            .templates
            .format_closing(&questions_covered, &self.context.mistakes_summary());
        let response = self.engine.generate_response(&prompt).await;

        self.transition(InterviewPhase::Ended);
        tracing::info!(
            questions = self.context.questions_asked.len(),
            mistakes = self.context.mistakes.len(),
            "Interview ended"
        );
        response
    }

    /// Move to the target phase if the transition table allows it. Illegal
    /// transitions are logged and ignored rather than panicking mid-session.
    fn transition(&mut self, to: InterviewPhase) {
        if !self.phase.can_transition_to(to) {
            tracing::warn!(from = %self.phase, %to, "Ignoring disallowed phase transition");
            return;
        }
        let from = self.phase;
        self.phase = to;
        tracing::debug!(%from, %to, "Phase transition");
        let _ = self.events.send(InterviewEvent::PhaseChanged { from, to });
    }

    /// Record the line in the transcript and publish it
    fn say(&mut self, text: String) -> String {
        self.context.add_transcript(Speaker::Ai, &text);
        let _ = self.events.send(InterviewEvent::Response(text.clone()));
        text
    }
}

/// Feedback tag check, case-insensitive, anywhere in the response. Models
/// often lead with filler before the tag.
fn contains_tag(text: &str, tag: &str) -> bool {
    text.to_uppercase().contains(tag)
}

/// Remove every [CORRECT]/[WRONG]/[UNCLEAR] tag so they are never spoken
fn strip_feedback_tags(text: &str) -> String {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\[(?:CORRECT|WRONG|UNCLEAR)\]").unwrap());

    TAG_RE.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use interviewer_core::Message;
    use interviewer_llm::{GenerationResult, LlmBackend, LlmError};

    struct ScriptedBackend {
        responses: Mutex<VecDeque<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn generate(&self, _messages: &[Message]) -> Result<GenerationResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "Okay.".to_string());
            Ok(GenerationResult {
                text,
                tokens: 1,
                total_time_ms: 1,
            })
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct RecordingEditor {
        contents: Mutex<String>,
    }

    impl EditorSurface for RecordingEditor {
        fn write(&self, text: &str) {
            *self.contents.lock().unwrap() = text.to_string();
        }
    }

    fn machine_with(backend: Arc<ScriptedBackend>) -> InterviewStateMachine {
        let engine = Arc::new(AiEngine::new(backend, "system".to_string(), 20));
        InterviewStateMachine::new(
            engine,
            PromptTemplates::default(),
            QuestionBank::default(),
            InterviewSettings::default(),
        )
    }

    const QUESTION_RESPONSE: &str = "QUESTION_TITLE: Two Sum\n\
QUESTION_TEXT: Find two numbers that add up to a target.\n\
VERBAL: The problem is in the editor.";

    #[tokio::test]
    async fn test_greeting_to_solving_flow() {
        let backend = ScriptedBackend::new(&["Hello, I'm Alex.", QUESTION_RESPONSE]);
        let editor = Arc::new(RecordingEditor {
            contents: Mutex::new(String::new()),
        });
        let mut machine = machine_with(backend).with_editor(editor.clone());

        let greeting = machine.start_interview().await;
        assert_eq!(greeting, "Hello, I'm Alex.");
        assert_eq!(machine.phase(), InterviewPhase::Greeting);

        let response = machine.process_input("let's do some coding", None).await;
        assert_eq!(response, "The problem is in the editor.");
        assert_eq!(machine.phase(), InterviewPhase::CandidateSolving);
        assert_eq!(machine.context().interview_type, "DSA");
        assert_eq!(machine.context().questions_asked, vec!["Two Sum"]);

        let editor_text = editor.contents.lock().unwrap().clone();
        assert!(editor_text.starts_with("/* Question: Two Sum"));
        assert!(editor_text.contains("// Your solution:"));
    }

    #[tokio::test]
    async fn test_garbage_input_skips_llm() {
        let backend = ScriptedBackend::new(&["Hello.", QUESTION_RESPONSE]);
        let mut machine = machine_with(backend.clone());

        machine.start_interview().await;
        machine.process_input("coding", None).await;
        let calls_before = backend.calls();

        let response = machine.process_input("uh", None).await;
        assert_eq!(response, REPROMPT);
        assert_eq!(backend.calls(), calls_before);
        // Garbage never counts toward forced progression
        assert_eq!(machine.context().retry_count, 0);
    }

    #[tokio::test]
    async fn test_hint_request() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "Consider a hash map.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        let hint = machine.process_input("I'm STUCK on this", None).await;
        assert_eq!(hint, "Consider a hash map.");
        assert_eq!(machine.context().hints_given, 1);
        assert_eq!(machine.phase(), InterviewPhase::CandidateSolving);
    }

    #[tokio::test]
    async fn test_wrong_answer_records_mistake() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "[WRONG] Actually, it is O(n) with a hash map.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        let feedback = machine
            .process_input("the best complexity here is O(n log n)", None)
            .await;
        assert_eq!(feedback, "Actually, it is O(n) with a hash map.");
        assert!(!feedback.contains("[WRONG]"));

        let mistakes = &machine.context().mistakes;
        assert_eq!(mistakes.len(), 1);
        assert_eq!(
            mistakes[0].wrong_answer,
            "the best complexity here is O(n log n)"
        );
    }

    #[tokio::test]
    async fn test_mid_text_wrong_tag_records_mistake() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "Hmm. [WRONG] Actually it is O(n log n).",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        let feedback = machine.process_input("it runs in linear time", None).await;
        assert_eq!(feedback, "Hmm.  Actually it is O(n log n).");

        let mistakes = &machine.context().mistakes;
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].wrong_answer, "it runs in linear time");
    }

    #[tokio::test]
    async fn test_correct_answer_records_nothing() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "[correct] Yes, that's right.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        let feedback = machine.process_input("I'd use a hash map", None).await;
        assert_eq!(feedback, "Yes, that's right.");
        assert!(machine.context().mistakes.is_empty());
    }

    #[tokio::test]
    async fn test_retries_force_progression() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "[UNCLEAR] Okay, continue.",
            "[UNCLEAR] Okay, continue.",
            "[UNCLEAR] Okay, continue.",
            "[UNCLEAR] Okay, continue.",
            "QUESTION_TITLE: Valid Parentheses\nQUESTION_TEXT: Check bracket matching.\nVERBAL: Next one is in the editor.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        // Four unclassified turns get plain feedback and count up
        for i in 1..=4 {
            let response = machine
                .process_input("let me think about that for a moment", None)
                .await;
            assert_eq!(response, "Okay, continue.");
            assert_eq!(machine.context().retry_count, i);
        }
        // The fifth forces progression without a feedback call
        let response = machine
            .process_input("let me think about that for a moment", None)
            .await;
        assert!(response.contains("Let's move on to the next problem."));
        assert!(response.contains("Next one is in the editor."));
        assert_eq!(machine.context().retry_count, 0);
        assert_eq!(machine.context().questions_asked.len(), 2);
        assert_eq!(machine.phase(), InterviewPhase::CandidateSolving);
    }

    #[tokio::test]
    async fn test_progression_feedback_keeps_correction_order() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "[WRONG] First correction.",
            "[WRONG] Second correction.",
            "[WRONG] Third correction.",
            "[UNCLEAR] Okay, continue.",
            "QUESTION_TITLE: Second\nQUESTION_TEXT: Another problem.\nVERBAL: Next one.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        for _ in 0..4 {
            machine.process_input("my answer is definitely twelve", None).await;
        }
        let response = machine.process_input("my answer is definitely twelve", None).await;

        // Last two corrections, spoken oldest first
        let second = response.find("Second correction.").unwrap();
        let third = response.find("Third correction.").unwrap();
        assert!(second < third);
        assert!(!response.contains("First correction."));
    }

    #[tokio::test]
    async fn test_garbage_greeting_still_selects_topic() {
        let backend = ScriptedBackend::new(&["Hello.", QUESTION_RESPONSE]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        let response = machine.process_input("um", None).await;

        assert_eq!(response, "The problem is in the editor.");
        assert_eq!(machine.context().interview_type, "DSA");
        assert_eq!(machine.phase(), InterviewPhase::CandidateSolving);
    }

    #[tokio::test]
    async fn test_question_cap_ends_interview() {
        let backend = ScriptedBackend::new(&[
            "Hello.",
            QUESTION_RESPONSE,
            "What if the array is empty?",
            "Good answer. ",
            "QUESTION_TITLE: Second\nQUESTION_TEXT: Another problem.\nVERBAL: Here is the next one.",
            "What about duplicates?",
            "Fair enough. ",
            "Thanks for your time today.",
        ]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        // First question: declare completion, answer the follow-up
        let follow_up = machine.process_input("I'm done", None).await;
        assert_eq!(follow_up, "What if the array is empty?");
        assert_eq!(machine.phase(), InterviewPhase::FollowUp);

        let response = machine.process_input("it returns an empty list", None).await;
        assert!(response.contains("Let's move on to the next problem."));
        assert_eq!(machine.phase(), InterviewPhase::CandidateSolving);

        // Second question hits the cap; follow-up answer closes the session
        machine.process_input("that should work", None).await;
        let response = machine.process_input("it still works", None).await;
        assert!(response.contains("Thanks for your time today."));
        assert_eq!(machine.phase(), InterviewPhase::Ended);
    }

    #[tokio::test]
    async fn test_hint_refused_outside_solving() {
        let backend = ScriptedBackend::new(&["Hello."]);
        let mut machine = machine_with(backend.clone());

        machine.start_interview().await;
        let calls_before = backend.calls();

        let response = machine.request_hint().await;
        assert_eq!(response, HINT_REFUSAL);
        assert_eq!(backend.calls(), calls_before);
    }

    #[tokio::test]
    async fn test_end_interview_is_idempotent() {
        let backend = ScriptedBackend::new(&["Hello.", "Goodbye."]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        let closing = machine.end_interview().await;
        assert_eq!(closing, "Goodbye.");
        assert_eq!(machine.phase(), InterviewPhase::Ended);

        let again = machine.end_interview().await;
        assert_eq!(again, ALREADY_ENDED);
    }

    #[tokio::test]
    async fn test_input_after_end_is_refused() {
        let backend = ScriptedBackend::new(&["Hello.", "Goodbye."]);
        let mut machine = machine_with(backend.clone());

        machine.start_interview().await;
        machine.end_interview().await;
        let calls_before = backend.calls();

        let response = machine.process_input("one more question", None).await;
        assert_eq!(response, ALREADY_ENDED);
        assert_eq!(backend.calls(), calls_before);
    }

    #[tokio::test]
    async fn test_summary_after_session() {
        let backend = ScriptedBackend::new(&["Hello.", QUESTION_RESPONSE, "Goodbye."]);
        let mut machine = machine_with(backend);

        machine.start_interview().await;
        machine.process_input("coding", None).await;
        machine.end_interview().await;

        let summary = machine.session_summary();
        assert_eq!(summary.interview_type, "DSA");
        assert_eq!(summary.questions_asked, vec!["Two Sum"]);
        assert!(summary.duration.unwrap() >= chrono::Duration::zero());
        // User lines and AI lines both land in the transcript
        assert!(summary
            .transcript
            .iter()
            .any(|e| e.speaker == Speaker::User && e.text == "coding"));
        assert!(summary
            .transcript
            .iter()
            .any(|e| e.speaker == Speaker::Ai && e.text == "Goodbye."));
    }

    #[tokio::test]
    async fn test_phase_change_events() {
        let backend = ScriptedBackend::new(&["Hello.", QUESTION_RESPONSE]);
        let mut machine = machine_with(backend);
        let mut events = machine.subscribe();

        machine.start_interview().await;
        machine.process_input("coding", None).await;

        let mut transitions = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let InterviewEvent::PhaseChanged { to, .. } = event {
                transitions.push(to);
            }
        }
        assert_eq!(
            transitions,
            vec![
                InterviewPhase::Greeting,
                InterviewPhase::QuestionPresenting,
                InterviewPhase::CandidateSolving,
            ]
        );
    }

    #[test]
    fn test_strip_feedback_tags() {
        assert_eq!(strip_feedback_tags("[WRONG] Not quite."), "Not quite.");
        assert_eq!(strip_feedback_tags("[unclear] Okay, continue."), "Okay, continue.");
        assert_eq!(strip_feedback_tags("No tags at all."), "No tags at all.");
    }

    #[test]
    fn test_contains_tag_anywhere() {
        assert!(contains_tag("  [wrong] nope", "[WRONG]"));
        assert!(contains_tag("Well, [WRONG] mid-sentence", "[WRONG]"));
        assert!(!contains_tag("[CORRECT] Yes.", "[WRONG]"));
    }
}
