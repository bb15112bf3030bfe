use serde::Deserialize;
use std::fmt;
use thiserror::Error;

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Reading level of a topic's material, shown next to its summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl MaterialLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MaterialLevel::Beginner => "Beginner",
            MaterialLevel::Intermediate => "Intermediate",
            MaterialLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for MaterialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── MATERIAL ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MaterialError {
    #[error("key point {index} is empty")]
    EmptyKeyPoint { index: usize },

    #[error("concept {index} has no name")]
    EmptyConcept { index: usize },

    #[error("concept {concept:?} has no explanation")]
    EmptyExplanation { concept: String },
}

/// A plain-language analogy for one idea in the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptExplanation {
    concept: String,
    explanation: String,
    icon: Option<String>,
}

impl ConceptExplanation {
    #[must_use]
    pub fn new(concept: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            concept: concept.into().trim().to_string(),
            explanation: explanation.into().trim().to_string(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn concept(&self) -> &str {
        &self.concept
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Reading material for a topic: a summary, its key points and a few
/// concept analogies. The empty default stands for "no material".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudyMaterial {
    summary: String,
    key_points: Vec<String>,
    concepts: Vec<ConceptExplanation>,
    level: MaterialLevel,
}

impl StudyMaterial {
    /// # Errors
    ///
    /// Returns `MaterialError` for a blank key point, or a concept missing its
    /// name or explanation.
    pub fn new(
        summary: impl Into<String>,
        key_points: impl IntoIterator<Item = impl Into<String>>,
        concepts: Vec<ConceptExplanation>,
        level: MaterialLevel,
    ) -> Result<Self, MaterialError> {
        let key_points = key_points
            .into_iter()
            .enumerate()
            .map(|(index, point)| {
                let point = point.into().trim().to_string();
                if point.is_empty() {
                    Err(MaterialError::EmptyKeyPoint { index })
                } else {
                    Ok(point)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, concept) in concepts.iter().enumerate() {
            if concept.concept.is_empty() {
                return Err(MaterialError::EmptyConcept { index });
            }
            if concept.explanation.is_empty() {
                return Err(MaterialError::EmptyExplanation {
                    concept: concept.concept.clone(),
                });
            }
        }

        Ok(Self {
            summary: summary.into().trim().to_string(),
            key_points,
            concepts,
            level,
        })
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }

    #[must_use]
    pub fn concepts(&self) -> &[ConceptExplanation] {
        &self.concepts
    }

    #[must_use]
    pub fn level(&self) -> MaterialLevel {
        self.level
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.key_points.is_empty() && self.concepts.is_empty()
    }
}
