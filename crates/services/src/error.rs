//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use study_core::model::{QuestionId, QuestionKind};

/// Precondition violations of the session engines.
///
/// A correct front end never triggers these; the engine rejects the call and
/// leaves its state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    EmptyCatalog,
    #[error("session already started")]
    AlreadyStarted,
    #[error("session not started")]
    NotStarted,
    #[error("session already completed")]
    Completed,
    #[error("question {question_id} has no answer yet")]
    NoAnswer { question_id: QuestionId },
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("answer does not fit {kind} question {question_id}")]
    AnswerKindMismatch {
        question_id: QuestionId,
        kind: QuestionKind,
    },
    #[error("elapsed-time ticker needs a running Tokio runtime")]
    NoRuntime,
}

/// Errors emitted by the tutor chat.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
}

/// Errors emitted while generating study material.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("topic is empty")]
    EmptyTopic,
    #[error(transparent)]
    Material(#[from] study_core::Error),
}

/// Errors emitted while loading a study set from JSON.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudySetError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] study_core::Error),
}
