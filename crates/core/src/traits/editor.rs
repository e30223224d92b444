//! Editor surface trait

/// Visible work surface the interviewer pushes questions into
///
/// Pure sink: the engine writes once per question and never reads back.
/// Candidate code travels the other way, as a snapshot on each task.
pub trait EditorSurface: Send + Sync {
    /// Replace the editor contents with the given text
    fn write(&self, text: &str);
}
