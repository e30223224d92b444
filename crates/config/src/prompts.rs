//! Prompt templates for the AI interviewer
//!
//! Templates are plain strings with `{placeholder}` slots so they can be
//! overridden from configuration files; the `format_*` helpers fill them.

use serde::{Deserialize, Serialize};

/// All prompt templates used by the state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplates {
    /// System prompt establishing the interviewer persona
    #[serde(default = "default_system")]
    pub system: String,
    /// Opening line of the session
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Brief acknowledgement of the candidate's topic choice
    #[serde(default = "default_topic_selection")]
    pub topic_selection: String,
    /// Question generation, with the QUESTION_TITLE/QUESTION_TEXT/VERBAL
    /// section contract the response parser expects
    #[serde(default = "default_question")]
    pub question: String,
    /// Feedback on an utterance while solving; the response must start with
    /// a [CORRECT]/[WRONG]/[UNCLEAR] tag
    #[serde(default = "default_feedback")]
    pub feedback: String,
    /// Progressive hint (levels 1-3)
    #[serde(default = "default_hint")]
    pub hint: String,
    /// Edge-case follow-up after the candidate declares completion
    #[serde(default = "default_follow_up")]
    pub follow_up: String,
    /// Feedback on a follow-up answer
    #[serde(default = "default_follow_up_feedback")]
    pub follow_up_feedback: String,
    /// Closing summary with recorded mistakes
    #[serde(default = "default_closing")]
    pub closing: String,
    /// Quick assessment of the candidate's code
    #[serde(default = "default_code_analysis")]
    pub code_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: default_system(),
            greeting: default_greeting(),
            topic_selection: default_topic_selection(),
            question: default_question(),
            feedback: default_feedback(),
            hint: default_hint(),
            follow_up: default_follow_up(),
            follow_up_feedback: default_follow_up_feedback(),
            closing: default_closing(),
            code_analysis: default_code_analysis(),
        }
    }
}

impl PromptTemplates {
    pub fn format_topic_selection(&self, user_input: &str) -> String {
        fill(&self.topic_selection, &[("user_input", user_input)])
    }

    pub fn format_question(&self, interview_type: &str, difficulty: &str) -> String {
        fill(
            &self.question,
            &[
                ("interview_type", interview_type),
                ("difficulty", difficulty),
            ],
        )
    }

    pub fn format_feedback(
        &self,
        question: &str,
        current_code: &str,
        user_speech: &str,
        hints_given: u32,
    ) -> String {
        fill(
            &self.feedback,
            &[
                ("question", question),
                ("current_code", current_code),
                ("user_speech", user_speech),
                ("hints_given", &hints_given.to_string()),
            ],
        )
    }

    pub fn format_hint(
        &self,
        question: &str,
        current_code: &str,
        hints_given: u32,
        hint_level: u32,
    ) -> String {
        fill(
            &self.hint,
            &[
                ("question", question),
                ("current_code", current_code),
                ("hints_given", &hints_given.to_string()),
                ("hint_level", &hint_level.to_string()),
            ],
        )
    }

    pub fn format_follow_up(&self, question: &str, current_code: &str) -> String {
        fill(
            &self.follow_up,
            &[("question", question), ("current_code", current_code)],
        )
    }

    pub fn format_follow_up_feedback(
        &self,
        question: &str,
        current_code: &str,
        user_response: &str,
    ) -> String {
        fill(
            &self.follow_up_feedback,
            &[
                ("question", question),
                ("current_code", current_code),
                ("user_response", user_response),
            ],
        )
    }

    pub fn format_closing(&self, questions_covered: &str, mistakes_summary: &str) -> String {
        fill(
            &self.closing,
            &[
                ("questions_covered", questions_covered),
                ("mistakes_summary", mistakes_summary),
            ],
        )
    }

    pub fn format_code_analysis(&self, code: &str, question: &str) -> String {
        fill(&self.code_analysis, &[("code", code), ("question", question)])
    }
}

/// Fill `{name}` placeholders in a template
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in slots {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

fn default_system() -> String {
    r#"You are Alex, a senior technical interviewer at a FAANG company.
You are conducting a realistic mock interview.

CRITICAL BEHAVIORAL RULES:
1. Be PROFESSIONAL and SERIOUS - this is a real interview simulation, not tutoring
2. Keep responses SHORT (1-2 sentences max) - interviewers don't ramble
3. NEVER give hints unless the candidate explicitly asks for help
4. Don't over-explain - let the candidate think and struggle
5. Ask clarifying questions like a real interviewer: "What's the time complexity?" or "Have you considered edge cases?"
6. If their approach is wrong, just say "Hmm, are you sure about that?" - don't explain why
7. Stay neutral - don't be overly encouraging or discouraging

You understand code in Python, Java, C++, and JavaScript.
Evaluate them fairly but make them work for it."#
        .to_string()
}

fn default_greeting() -> String {
    r#"Start the interview professionally.
Introduce yourself briefly as Alex, the interviewer.

Say something like:
"Hello, I'm Alex and I'll be conducting your technical interview today. What type of problem would you like to work on - coding, system design, or conceptual?"

Be brief and professional. No small talk. 1-2 sentences maximum."#
        .to_string()
}

fn default_topic_selection() -> String {
    r#"The candidate said: "{user_input}"

Acknowledge briefly and move to the question. Example: "Alright, let's start."
Maximum 1 sentence. Don't explain what you're going to do."#
        .to_string()
}

fn default_question() -> String {
    r#"Generate ONE {interview_type} interview question at {difficulty} difficulty level.

FORMAT YOUR RESPONSE EXACTLY LIKE THIS:

QUESTION_TITLE: [A short 2-4 word title]

QUESTION_TEXT: [Complete problem statement with:
- Clear problem description
- Input/output format
- 1-2 examples
- Constraints]

VERBAL: [How you present this - be brief and professional. Just state the problem in 1-2 sentences, then say "The problem is in the editor. Let me know when you're ready to discuss your approach." Don't explain or give hints.]

Generate only ONE question. Be concise."#
        .to_string()
}

fn default_feedback() -> String {
    r#"The candidate is solving a problem.

QUESTION: {question}

THEIR CODE:
```
{current_code}
```

WHAT THEY SAID: "{user_speech}"

HINTS GIVEN: {hints_given}

Respond like a REAL interviewer. Your response MUST start with one of these tags:
[CORRECT] - if their answer/approach is correct
[WRONG] - if their answer is incorrect (then briefly state the correct answer)
[UNCLEAR] - if you can't determine or they're still working

Examples:
- "[CORRECT] Yes, that's right."
- "[WRONG] Actually, the time complexity is O(n log n), not O(n)."
- "[UNCLEAR] Okay, continue."

Keep response to 1-2 sentences after the tag."#
        .to_string()
}

fn default_hint() -> String {
    r#"The candidate ASKED for a hint on:
{question}

Their code:
```
{current_code}
```

Hints already given: {hints_given}

Provide hint level {hint_level} of 3:
- Level 1: Just name a data structure or pattern to consider (1 sentence)
- Level 2: Give direction on the approach (1-2 sentences)
- Level 3: Explain the algorithm logic without code (2-3 sentences)

Be brief. Don't write code. Make them think."#
        .to_string()
}

fn default_follow_up() -> String {
    r#"The candidate finished the problem: {question}

Their solution:
```
{current_code}
```

Ask an EDGE CASE follow-up question. Give them a specific edge case and ask how their solution handles it.

Examples:
- "What if the input array is empty? Walk me through what happens."
- "What if all elements are the same? Does your solution still work?"
- "What about negative numbers? How would that affect your approach?"
- "What if the input is null or undefined?"

Give them the edge case, then ask them to explain or solve for that case.
Keep it to 1-2 sentences."#
        .to_string()
}

fn default_follow_up_feedback() -> String {
    r#"The candidate was asked a follow-up question after solving:
{question}

Their code:
```
{current_code}
```

Their follow-up response: "{user_response}"

Provide brief feedback (1-2 sentences). If this was a good answer, acknowledge it."#
        .to_string()
}

fn default_closing() -> String {
    r#"The interview is ending. They worked on: {questions_covered}

{mistakes_summary}

Provide a closing that includes:
1. Thank them briefly
2. If there were mistakes, list them clearly with corrections
3. Give ONE piece of constructive feedback

Example format:
"Thanks for your time today. During the interview, you had a few areas to review:
- You said X, but the correct answer is Y
- For Z question, remember that...
Overall, your problem-solving was good. Keep practicing edge cases."

Keep it professional and helpful."#
        .to_string()
}

fn default_code_analysis() -> String {
    r#"Analyze this code briefly:
```
{code}
```

Problem: {question}

Give a 1-2 sentence assessment:
- Correct approach? Yes/No and why briefly
- Any bugs?
- Complexity?

Be direct and concise."#
        .to_string()
}
