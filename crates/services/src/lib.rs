#![forbid(unsafe_code)]

pub mod error;
pub mod generation;
pub mod pacing;
pub mod sessions;
pub mod study_sets;
pub mod tutor;

pub use study_core::Clock;

pub use error::{ChatError, GenerationError, SessionError, StudySetError};
pub use generation::{MaterialGenerator, TopicSource};
pub use pacing::Pacer;
pub use sessions::{
    FlashcardProgress, FlashcardSession, LiveQuiz, QuizPhase, QuizProgress, QuizResult,
    QuizSession, QuizStep, ScoreBand,
};
pub use study_sets::{load_study_set, parse_study_set};
pub use tutor::{ChatSession, KeywordTutor, TutorDispatcher};
