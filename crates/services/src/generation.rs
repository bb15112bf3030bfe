use std::fmt;

use study_core::model::StudySet;
use study_core::model::sample::sample_study_set;

use crate::error::GenerationError;
use crate::pacing::Pacer;

/// Where a study topic comes from. File contents are never inspected; the file
/// name stands in for the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicSource {
    Text(String),
    File { file_name: String },
}

impl TopicSource {
    #[must_use]
    pub fn topic(&self) -> &str {
        match self {
            TopicSource::Text(text) => text.trim(),
            TopicSource::File { file_name } => file_name.trim(),
        }
    }
}

impl fmt::Display for TopicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicSource::Text(_) => write!(f, "topic \"{}\"", self.topic()),
            TopicSource::File { .. } => write!(f, "file \"{}\"", self.topic()),
        }
    }
}

/// Simulated material generation: waits, then hands back the built-in
/// material under the requested topic.
#[derive(Debug, Clone, Default)]
pub struct MaterialGenerator {
    pacer: Pacer,
}

impl MaterialGenerator {
    #[must_use]
    pub fn new(pacer: Pacer) -> Self {
        Self { pacer }
    }

    /// # Errors
    ///
    /// Returns `GenerationError::EmptyTopic` for a blank topic (before waiting).
    pub async fn generate(&self, source: &TopicSource) -> Result<StudySet, GenerationError> {
        let topic = source.topic();
        if topic.is_empty() {
            return Err(GenerationError::EmptyTopic);
        }

        log::info!("generating study material from {source}");
        self.pacer.generation_pause().await;
        Ok(sample_study_set()?.retitled(topic))
    }
}
