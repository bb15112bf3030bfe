mod flashcards;
mod progress;
mod quiz;
mod ticker;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use flashcards::{CardFace, FlashcardSession};
pub use progress::{FlashcardProgress, QuizProgress, percent};
pub use quiz::{QuestionReview, QuizPhase, QuizResult, QuizSession, QuizStep, ScoreBand};
pub use ticker::LiveQuiz;
