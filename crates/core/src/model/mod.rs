mod card;
mod catalog;
mod chat;
mod ids;
mod material;
mod question;
pub mod sample;
mod settings;
mod study_set;

pub use ids::{CardId, MessageId, ParseIdError, QuestionId};

pub use card::{Card, CardError, Difficulty};
pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use chat::{Author, ChatMessage};
pub use material::{ConceptExplanation, MaterialError, MaterialLevel, StudyMaterial};
pub use question::{Answer, Question, QuestionError, QuestionKind};
pub use settings::{SettingsError, StudySettings, StudySettingsDraft};
pub use study_set::StudySet;
