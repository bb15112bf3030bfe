use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("multiple-choice question {id} has no options")]
    MissingOptions { id: QuestionId },

    #[error("question {id} is {kind} and cannot carry options")]
    UnexpectedOptions { id: QuestionId, kind: QuestionKind },

    #[error("correct answer of question {id} is not one of its options")]
    CorrectAnswerNotAnOption { id: QuestionId },

    #[error("correct answer of question {id} does not fit a {kind} question")]
    AnswerKindMismatch { id: QuestionId, kind: QuestionKind },
}

//
// ─── KIND & ANSWER ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
}

impl QuestionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::OpenEnded => "Open Ended",
        }
    }

    /// Whether an answer of this shape can be given to a question of this kind.
    #[must_use]
    pub fn accepts(self, answer: &Answer) -> bool {
        matches!(
            (self, answer),
            (QuestionKind::MultipleChoice | QuestionKind::OpenEnded, Answer::Text(_))
                | (QuestionKind::TrueFalse, Answer::Bool(_))
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A submitted or canonical answer: free/option text, or a true/false value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Text(String),
}

impl Answer {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }

    /// True for a text answer with no characters at all. Whitespace counts as
    /// an answer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(text) => text.is_empty(),
            Answer::Bool(_) => false,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(value) => write!(f, "{value}"),
            Answer::Text(text) => f.write_str(text),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A quiz question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    correct_answer: Answer,
    explanation: String,
}

impl Question {
    /// Build and validate a question of any kind.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, when options are missing
    /// (multiple choice) or present (other kinds), or when the correct answer does
    /// not fit the kind.
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: Answer,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if !kind.accepts(&correct_answer) {
            return Err(QuestionError::AnswerKindMismatch { id, kind });
        }

        match kind {
            QuestionKind::MultipleChoice => {
                if options.is_empty() {
                    return Err(QuestionError::MissingOptions { id });
                }
                let in_options = match &correct_answer {
                    Answer::Text(text) => options.iter().any(|opt| opt == text),
                    Answer::Bool(_) => false,
                };
                if !in_options {
                    return Err(QuestionError::CorrectAnswerNotAnOption { id });
                }
            }
            QuestionKind::TrueFalse | QuestionKind::OpenEnded => {
                if !options.is_empty() {
                    return Err(QuestionError::UnexpectedOptions { id, kind });
                }
            }
        }

        Ok(Self {
            id,
            kind,
            prompt,
            options,
            correct_answer,
            explanation: explanation.into(),
        })
    }

    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn multiple_choice<I, S>(
        id: QuestionId,
        prompt: impl Into<String>,
        options: I,
        correct: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            QuestionKind::MultipleChoice,
            prompt,
            options.into_iter().map(Into::into).collect(),
            Answer::Text(correct.into()),
            explanation,
        )
    }

    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn true_false(
        id: QuestionId,
        prompt: impl Into<String>,
        correct: bool,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        Self::new(
            id,
            QuestionKind::TrueFalse,
            prompt,
            Vec::new(),
            Answer::Bool(correct),
            explanation,
        )
    }

    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn open_ended(
        id: QuestionId,
        prompt: impl Into<String>,
        model_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        Self::new(
            id,
            QuestionKind::OpenEnded,
            prompt,
            Vec::new(),
            Answer::Text(model_answer.into()),
            explanation,
        )
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in display order; empty unless multiple choice.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &Answer {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact-match grading.
    ///
    /// Open-ended answers are compared verbatim as well, so a free-text reply only
    /// counts when it equals the model answer character for character. There is no
    /// semantic grading.
    #[must_use]
    pub fn is_correct(&self, answer: &Answer) -> bool {
        *answer == self.correct_answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(id: u64) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn multiple_choice_requires_correct_answer_in_options() {
        let err = Question::multiple_choice(qid(1), "Pick", ["a", "b"], "c", "").unwrap_err();
        assert_eq!(err, QuestionError::CorrectAnswerNotAnOption { id: qid(1) });
    }

    #[test]
    fn multiple_choice_requires_options() {
        let err =
            Question::multiple_choice(qid(1), "Pick", Vec::<String>::new(), "a", "").unwrap_err();
        assert!(matches!(err, QuestionError::MissingOptions { .. }));
    }

    #[test]
    fn true_false_rejects_text_answer() {
        let err = Question::new(
            qid(2),
            QuestionKind::TrueFalse,
            "Sky is blue",
            Vec::new(),
            Answer::text("true"),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::AnswerKindMismatch { .. }));
    }

    #[test]
    fn open_ended_rejects_options() {
        let err = Question::new(
            qid(3),
            QuestionKind::OpenEnded,
            "Explain",
            vec!["x".into()],
            Answer::text("y"),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::UnexpectedOptions { .. }));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = Question::true_false(qid(4), "  ", true, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt { id: qid(4) });
    }

    #[test]
    fn grading_is_exact_match() {
        let tf = Question::true_false(qid(1), "Q", false, "").unwrap();
        assert!(tf.is_correct(&Answer::Bool(false)));
        assert!(!tf.is_correct(&Answer::Bool(true)));
        assert!(!tf.is_correct(&Answer::text("false")));

        let open = Question::open_ended(qid(2), "Explain", "Light energy", "").unwrap();
        assert!(open.is_correct(&Answer::text("Light energy")));
        assert!(!open.is_correct(&Answer::text("light energy")));
        assert!(!open.is_correct(&Answer::text("Light energy ")));
    }

    #[test]
    fn answer_serde_is_untagged() {
        let parsed: Answer = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, Answer::Bool(false));
        let parsed: Answer = serde_json::from_str("\"Glucose\"").unwrap();
        assert_eq!(parsed, Answer::text("Glucose"));
    }

    #[test]
    fn only_the_empty_string_is_empty() {
        assert!(Answer::text("").is_empty());
        assert!(!Answer::text("  ").is_empty());
        assert!(!Answer::text("x").is_empty());
        assert!(!Answer::Bool(false).is_empty());
    }
}
