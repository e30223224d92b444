//! Semi-structured question-response parser
//!
//! The question prompt asks the model for labeled sections:
//!
//! ```text
//! QUESTION_TITLE: ...
//! QUESTION_TEXT: ...
//! VERBAL: ...
//! ```
//!
//! Models honor that contract most of the time. This parser accepts the
//! labeled form, tolerates missing labels, and always produces something
//! usable for the editor and the speech channel.

use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_TITLE: &str = "Interview Question";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)QUESTION_TITLE:\s*(.+?)(?:---|QUESTION_TEXT:|$)").unwrap());
static TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)QUESTION_TEXT:\s*(.+?)(?:VERBAL:|EXPLANATION:|$)").unwrap());
static EXPLANATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(?:VERBAL|EXPLANATION):\s*(.+)$").unwrap());

/// A question split into its editor and speech parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    /// Short title, used in the editor header and the session summary
    pub title: String,
    /// Full problem statement written to the editor
    pub text: String,
    /// What the interviewer says aloud
    pub explanation: String,
}

impl ParsedQuestion {
    /// Parse a model response into title, text, and verbal explanation.
    ///
    /// Unlabeled responses become both the text and the explanation under
    /// the default title. Empty responses get placeholder content so the
    /// interview never stalls on a blank editor.
    pub fn parse(response: &str) -> Self {
        let response = response.trim();
        if response.is_empty() {
            return Self {
                title: DEFAULT_TITLE.to_string(),
                text: "Please solve the problem.".to_string(),
                explanation: "Let me give you a problem to work on.".to_string(),
            };
        }

        let title = TITLE_RE
            .captures(response)
            .map(|c| clean_section(&c[1]))
            .filter(|t| !t.is_empty())
            .map(|t| t.trim_matches(|c| c == '"' || c == '\'').to_string())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let text = TEXT_RE
            .captures(response)
            .map(|c| clean_section(&c[1]))
            .filter(|t| !t.is_empty());

        let explanation = EXPLANATION_RE
            .captures(response)
            .map(|c| clean_section(&c[1]))
            .filter(|t| !t.is_empty());

        match (text, explanation) {
            (Some(text), Some(explanation)) => Self {
                title,
                text,
                explanation,
            },
            (Some(text), None) => Self {
                title,
                explanation: text.clone(),
                text,
            },
            (None, Some(explanation)) => Self {
                title,
                text: explanation.clone(),
                explanation,
            },
            // No labels at all; speak and show the whole response
            (None, None) => Self {
                title,
                text: response.to_string(),
                explanation: response.to_string(),
            },
        }
    }
}

/// Strip `---` section delimiters and surrounding whitespace
fn clean_section(raw: &str) -> String {
    raw.replace("---", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_response() {
        let response = r#"QUESTION_TITLE: Two Sum

---

QUESTION_TEXT: Given an array of integers, return indices of two numbers
that add up to a target.

Example: nums = [2, 7, 11, 15], target = 9 -> [0, 1]

---

VERBAL: The problem is in the editor. Let me know when you're ready."#;

        let parsed = ParsedQuestion::parse(response);
        assert_eq!(parsed.title, "Two Sum");
        assert!(parsed.text.starts_with("Given an array of integers"));
        assert!(parsed.text.contains("target = 9"));
        assert_eq!(
            parsed.explanation,
            "The problem is in the editor. Let me know when you're ready."
        );
        assert!(!parsed.text.contains("---"));
    }

    #[test]
    fn test_parse_explanation_label_variant() {
        let response =
            "QUESTION_TITLE: Reverse List\nQUESTION_TEXT: Reverse a linked list.\nEXPLANATION: Take a look at the editor.";
        let parsed = ParsedQuestion::parse(response);
        assert_eq!(parsed.title, "Reverse List");
        assert_eq!(parsed.explanation, "Take a look at the editor.");
    }

    #[test]
    fn test_parse_quoted_title() {
        let response = "QUESTION_TITLE: \"Merge Intervals\"\nQUESTION_TEXT: Merge overlapping intervals.";
        let parsed = ParsedQuestion::parse(response);
        assert_eq!(parsed.title, "Merge Intervals");
    }

    #[test]
    fn test_parse_unlabeled_response() {
        let response = "Implement a function that checks whether a string is a palindrome.";
        let parsed = ParsedQuestion::parse(response);
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.text, response);
        assert_eq!(parsed.explanation, response);
    }

    #[test]
    fn test_parse_missing_verbal_reuses_text() {
        let response = "QUESTION_TITLE: Binary Search\nQUESTION_TEXT: Find a target in a sorted array.";
        let parsed = ParsedQuestion::parse(response);
        assert_eq!(parsed.text, "Find a target in a sorted array.");
        assert_eq!(parsed.explanation, parsed.text);
    }

    #[test]
    fn test_parse_empty_response() {
        let parsed = ParsedQuestion::parse("   ");
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.text, "Please solve the problem.");
        assert_eq!(parsed.explanation, "Let me give you a problem to work on.");
    }
}
