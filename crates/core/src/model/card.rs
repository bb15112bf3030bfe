use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::CardId;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// How hard a flashcard is expected to be. Display-only; it never affects sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card {id} has an empty front")]
    EmptyFront { id: CardId },

    #[error("card {id} has an empty back")]
    EmptyBack { id: CardId },
}

/// A single flashcard. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    front: String,
    back: String,
    difficulty: Difficulty,
}

impl Card {
    /// Build a card, trimming both faces.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if either face is blank.
    pub fn new(
        id: CardId,
        front: impl Into<String>,
        back: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, CardError> {
        let front = front.into().trim().to_string();
        let back = back.into().trim().to_string();
        if front.is_empty() {
            return Err(CardError::EmptyFront { id });
        }
        if back.is_empty() {
            return Err(CardError::EmptyBack { id });
        }

        Ok(Self {
            id,
            front,
            back,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_fails_if_front_blank() {
        let err = Card::new(CardId::new(1), "   ", "ok", Difficulty::Easy).unwrap_err();
        assert_eq!(err, CardError::EmptyFront { id: CardId::new(1) });
    }

    #[test]
    fn card_fails_if_back_blank() {
        let err = Card::new(CardId::new(2), "ok", "\n", Difficulty::Hard).unwrap_err();
        assert!(matches!(err, CardError::EmptyBack { .. }));
    }

    #[test]
    fn card_trims_faces() {
        let card = Card::new(CardId::new(3), " Q ", " A\n", Difficulty::Medium).unwrap();
        assert_eq!(card.front(), "Q");
        assert_eq!(card.back(), "A");
        assert_eq!(card.difficulty().to_string(), "medium");
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
