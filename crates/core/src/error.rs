use thiserror::Error;

use crate::model::{CardError, CatalogError, MaterialError, QuestionError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
