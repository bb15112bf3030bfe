use crate::model::card::Card;
use crate::model::catalog::Catalog;
use crate::model::material::StudyMaterial;
use crate::model::question::Question;

/// Everything generated for one topic: reading material, a flashcard deck and a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySet {
    topic: String,
    cards: Catalog<Card>,
    questions: Catalog<Question>,
    material: StudyMaterial,
}

impl StudySet {
    #[must_use]
    pub fn new(topic: impl Into<String>, cards: Catalog<Card>, questions: Catalog<Question>) -> Self {
        Self {
            topic: topic.into(),
            cards,
            questions,
            material: StudyMaterial::default(),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn cards(&self) -> &Catalog<Card> {
        &self.cards
    }

    #[must_use]
    pub fn questions(&self) -> &Catalog<Question> {
        &self.questions
    }

    #[must_use]
    pub fn with_material(mut self, material: StudyMaterial) -> Self {
        self.material = material;
        self
    }

    /// Empty when the set was built without reading material.
    #[must_use]
    pub fn material(&self) -> &StudyMaterial {
        &self.material
    }

    /// Same material under a different topic title.
    #[must_use]
    pub fn retitled(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }
}
