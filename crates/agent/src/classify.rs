//! Keyword classifiers for user utterances
//!
//! All matching is case-insensitive substring containment. These run before
//! any LLM call so a garbage transcript or a hint request never burns a
//! model round trip.

/// Filler words that carry no intent on their own
const FILLER_WORDS: &[&str] = &["the", "a", "an", "uh", "um"];

const HINT_KEYWORDS: &[&str] = &[
    "hint",
    "help",
    "stuck",
    "don't know",
    "not sure",
    "confused",
    "clue",
];

const FINISHED_KEYWORDS: &[&str] = &[
    "done",
    "finished",
    "complete",
    "that's it",
    "that's my solution",
    "works",
    "should work",
];

/// Detect unusable recognizer output.
///
/// An utterance is garbage when it is under three characters, is a lone
/// filler word, or is mostly one-and-two-character fragments (the shape a
/// recognizer produces when it mishears background noise).
pub fn is_garbage(text: &str) -> bool {
    if text.chars().count() < 3 {
        return true;
    }

    let lower = text.trim().to_lowercase();
    if FILLER_WORDS.contains(&lower.as_str()) {
        return true;
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.len() > 3 {
        let short = words
            .iter()
            .filter(|w| w.chars().count() <= 2)
            .count();
        if short as f64 / words.len() as f64 > 0.6 {
            return true;
        }
    }

    false
}

/// Detect an explicit request for help
pub fn is_hint_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    HINT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Detect a declaration of completion
pub fn seems_finished(text: &str) -> bool {
    let lower = text.to_lowercase();
    FINISHED_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Map a greeting response to an interview type. Defaults to DSA when
/// nothing matches, so the flow always moves forward.
pub fn detect_interview_type(text: &str) -> &'static str {
    let lower = text.to_lowercase();

    if ["dsa", "data structure", "algorithm", "coding"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        "DSA"
    } else if lower.contains("system") || lower.contains("design") {
        "System Design"
    } else if ["dbms", "database", "sql"].iter().any(|kw| lower.contains(kw)) {
        "DBMS"
    } else if lower.contains("os") || lower.contains("operating") {
        "Operating Systems"
    } else {
        "DSA"
    }
}
