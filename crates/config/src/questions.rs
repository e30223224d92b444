//! Question bank
//!
//! External document keyed by interview type, then difficulty, holding an
//! ordered list of questions. Loaded from JSON when a file is configured;
//! otherwise the built-in default table is used.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One prepared interview question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub follow_ups: Vec<String>,
}

/// interview_type -> difficulty -> ordered questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank(HashMap<String, HashMap<String, Vec<Question>>>);

impl QuestionBank {
    /// Load from a JSON file, falling back to the built-in table when the
    /// path is absent or unreadable. Absence is not an error.
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::from_json_file(path) {
                Ok(bank) => {
                    tracing::info!(path = %path.display(), "Question bank loaded");
                    return bank;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Question bank unavailable, using built-in questions"
                    );
                }
            }
        }
        Self::default()
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Questions for a type/difficulty pair
    pub fn get(&self, interview_type: &str, difficulty: &str) -> Option<&[Question]> {
        self.0
            .get(interview_type)
            .and_then(|by_difficulty| by_difficulty.get(difficulty))
            .map(|qs| qs.as_slice())
    }

    /// Questions for a type/difficulty pair, falling back to any difficulty
    /// bucket of that type, then to the DSA medium bucket.
    pub fn get_or_fallback(&self, interview_type: &str, difficulty: &str) -> &[Question] {
        if let Some(qs) = self.get(interview_type, difficulty) {
            if !qs.is_empty() {
                return qs;
            }
        }
        if let Some(by_difficulty) = self.0.get(interview_type) {
            if let Some(qs) = by_difficulty.values().find(|qs| !qs.is_empty()) {
                return qs;
            }
        }
        self.get("DSA", "medium").unwrap_or(&[])
    }

    pub fn interview_types(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        let mut bank: HashMap<String, HashMap<String, Vec<Question>>> = HashMap::new();

        let mut dsa = HashMap::new();
        dsa.insert(
            "easy".to_string(),
            vec![
                Question {
                    title: "Two Sum".to_string(),
                    description: "Given an array of integers 'nums' and an integer 'target', \
return indices of the two numbers such that they add up to target.\n\n\
You may assume that each input would have exactly one solution, and you may not use the same element twice.\n\n\
Example:\nInput: nums = [2, 7, 11, 15], target = 9\nOutput: [0, 1]\n\
Explanation: Because nums[0] + nums[1] == 9, we return [0, 1]."
                        .to_string(),
                    hints: vec![
                        "Think about what complement you need for each number".to_string(),
                        "A hash map can help you look up values in O(1) time".to_string(),
                        "For each number, check if (target - number) exists in your hash map"
                            .to_string(),
                    ],
                    follow_ups: vec![
                        "What's the time complexity of your solution?".to_string(),
                        "Can you solve it in one pass?".to_string(),
                        "What if there could be multiple valid pairs?".to_string(),
                    ],
                },
                Question {
                    title: "Valid Parentheses".to_string(),
                    description: "Given a string containing just the characters '(', ')', '{', '}', '[' and ']', \
determine if the input string is valid.\n\n\
An input string is valid if:\n\
1. Open brackets must be closed by the same type of brackets.\n\
2. Open brackets must be closed in the correct order.\n\n\
Example 1: Input: \"()\" -> Output: true\n\
Example 2: Input: \"()[]{}\" -> Output: true\n\
Example 3: Input: \"(]\" -> Output: false"
                        .to_string(),
                    hints: vec![
                        "Think about what data structure helps with matching pairs in order"
                            .to_string(),
                        "A stack is perfect for this - push opening brackets, pop for closing"
                            .to_string(),
                        "When you see a closing bracket, the top of stack should be its matching opening bracket"
                            .to_string(),
                    ],
                    follow_ups: vec![
                        "What's the space complexity?".to_string(),
                        "What if we only had one type of bracket?".to_string(),
                        "How would you handle an empty string?".to_string(),
                    ],
                },
            ],
        );
        dsa.insert(
            "medium".to_string(),
            vec![
                Question {
                    title: "Longest Substring Without Repeating Characters".to_string(),
                    description: "Given a string s, find the length of the longest substring without repeating characters.\n\n\
Example 1:\nInput: s = \"abcabcbb\"\nOutput: 3\nExplanation: The answer is \"abc\", with the length of 3.\n\n\
Example 2:\nInput: s = \"bbbbb\"\nOutput: 1\nExplanation: The answer is \"b\", with the length of 1."
                        .to_string(),
                    hints: vec![
                        "Think about using a sliding window approach".to_string(),
                        "Use a set or hash map to track characters in current window".to_string(),
                        "When you find a duplicate, shrink the window from the left".to_string(),
                    ],
                    follow_ups: vec![
                        "What's the time complexity?".to_string(),
                        "Could you optimize the space usage?".to_string(),
                        "What if the string contains unicode characters?".to_string(),
                    ],
                },
                Question {
                    title: "Container With Most Water".to_string(),
                    description: "You are given an integer array 'height' of length n. \
Find two lines that together with the x-axis form a container that holds the most water.\n\n\
Return the maximum amount of water a container can store.\n\n\
Example:\nInput: height = [1,8,6,2,5,4,8,3,7]\nOutput: 49\n\
Explanation: The max area is between index 1 (height 8) and index 8 (height 7)."
                        .to_string(),
                    hints: vec![
                        "Think about what determines the area: width and the shorter height"
                            .to_string(),
                        "Two pointers starting from both ends could be useful".to_string(),
                        "Always move the pointer pointing to the shorter line - why?".to_string(),
                    ],
                    follow_ups: vec![
                        "Why do we move the shorter pointer?".to_string(),
                        "Can we prove this greedy approach is optimal?".to_string(),
                        "What's the time and space complexity?".to_string(),
                    ],
                },
            ],
        );
        bank.insert("DSA".to_string(), dsa);

        let mut system_design = HashMap::new();
        system_design.insert(
            "medium".to_string(),
            vec![Question {
                title: "Design a URL Shortener".to_string(),
                description: "Design a URL shortening service like TinyURL.\n\n\
Requirements:\n\
- Given a long URL, generate a short unique alias\n\
- When user accesses short URL, redirect to original\n\
- Handle high read traffic\n\
- URLs should expire after a configurable time\n\n\
What components would you need? How would you handle the ID generation?"
                    .to_string(),
                hints: vec![
                    "Think about how to generate unique short IDs".to_string(),
                    "Consider using base62 encoding for short URLs".to_string(),
                    "Think about caching for frequently accessed URLs".to_string(),
                ],
                follow_ups: vec![
                    "How would you handle URL collisions?".to_string(),
                    "How would you scale this to millions of URLs?".to_string(),
                    "What database would you choose and why?".to_string(),
                ],
            }],
        );
        bank.insert("System Design".to_string(), system_design);

        Self(bank)
    }
}
