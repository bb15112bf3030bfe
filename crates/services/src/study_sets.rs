//! Loading study sets from JSON.
//!
//! ```json
//! {
//!   "topic": "Photosynthesis",
//!   "material": { "summary": "...", "keyPoints": ["..."], "level": "intermediate",
//!                 "concepts": [{ "concept": "...", "explanation": "...", "icon": "🌱" }] },
//!   "cards": [{ "id": 1, "front": "...", "back": "...", "difficulty": "easy" }],
//!   "questions": [{ "id": 1, "kind": "true-false", "prompt": "...",
//!                   "correctAnswer": false, "explanation": "..." }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use study_core::model::{
    Answer, Card, CardId, Catalog, ConceptExplanation, Difficulty, MaterialLevel, Question,
    QuestionId, QuestionKind, StudyMaterial, StudySet,
};

use crate::error::StudySetError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStudySet {
    topic: String,
    #[serde(default)]
    cards: Vec<RawCard>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
    #[serde(default)]
    material: Option<RawMaterial>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawMaterial {
    summary: String,
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    concepts: Vec<RawConcept>,
    #[serde(default)]
    level: MaterialLevel,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConcept {
    concept: String,
    explanation: String,
    #[serde(default)]
    icon: Option<String>,
}

impl RawMaterial {
    fn into_material(self) -> Result<StudyMaterial, study_core::Error> {
        let concepts = self
            .concepts
            .into_iter()
            .map(|c| {
                let concept = ConceptExplanation::new(c.concept, c.explanation);
                match c.icon {
                    Some(icon) => concept.with_icon(icon),
                    None => concept,
                }
            })
            .collect();
        Ok(StudyMaterial::new(
            self.summary,
            self.key_points,
            concepts,
            self.level,
        )?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCard {
    id: CardId,
    front: String,
    back: String,
    difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawQuestion {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: Answer,
    #[serde(default)]
    explanation: String,
}

/// Parse and validate a study set.
///
/// # Errors
///
/// Returns `StudySetError::Json` for malformed input and
/// `StudySetError::Invalid` when cards, questions or catalogs fail validation.
pub fn parse_study_set(json: &str) -> Result<StudySet, StudySetError> {
    let raw: RawStudySet = serde_json::from_str(json)?;

    let cards = raw
        .cards
        .into_iter()
        .map(|c| Card::new(c.id, c.front, c.back, c.difficulty))
        .collect::<Result<Vec<_>, _>>()
        .map_err(study_core::Error::from)?;
    let questions = raw
        .questions
        .into_iter()
        .map(|q| Question::new(q.id, q.kind, q.prompt, q.options, q.correct_answer, q.explanation))
        .collect::<Result<Vec<_>, _>>()
        .map_err(study_core::Error::from)?;

    let material = raw
        .material
        .map(RawMaterial::into_material)
        .transpose()?
        .unwrap_or_default();

    let cards = Catalog::new(cards).map_err(study_core::Error::from)?;
    let questions = Catalog::new(questions).map_err(study_core::Error::from)?;
    log::debug!(
        "loaded study set {:?}: {} cards, {} questions",
        raw.topic,
        cards.len(),
        questions.len()
    );
    Ok(StudySet::new(raw.topic, cards, questions).with_material(material))
}

/// # Errors
///
/// Returns `StudySetError::Io` if the file cannot be read, otherwise as
/// [`parse_study_set`].
pub fn load_study_set(path: &Path) -> Result<StudySet, StudySetError> {
    let json = std::fs::read_to_string(path).map_err(|source| StudySetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_study_set(&json)
}
