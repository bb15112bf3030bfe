use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;

use crate::model::card::Card;
use crate::model::ids::{CardId, QuestionId};
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate id {id} in catalog")]
    DuplicateId { id: String },
}

/// An item that can live in a [`Catalog`].
pub trait CatalogItem {
    type Id: Copy + Eq + Hash + fmt::Display;

    fn item_id(&self) -> Self::Id;
}

impl CatalogItem for Card {
    type Id = CardId;

    fn item_id(&self) -> CardId {
        self.id()
    }
}

impl CatalogItem for Question {
    type Id = QuestionId;

    fn item_id(&self) -> QuestionId {
        self.id()
    }
}

/// Ordered, immutable set of items with unique ids.
///
/// Cloning is cheap; sessions hold a clone and address items by position.
#[derive(Debug, PartialEq, Eq)]
pub struct Catalog<T> {
    items: Arc<[T]>,
}

impl<T> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: CatalogItem> Catalog<T> {
    /// Build a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two items share an id.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self, CatalogError> {
        let items: Vec<T> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let id = item.item_id();
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateId { id: id.to_string() });
            }
        }

        Ok(Self {
            items: items.into(),
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::<T>::new().into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.find(id).is_some()
    }

    #[must_use]
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.item_id() == id)
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::Difficulty;

    fn card(id: u64) -> Card {
        Card::new(CardId::new(id), format!("Q{id}"), format!("A{id}"), Difficulty::Easy).unwrap()
    }

    #[test]
    fn catalog_keeps_order() {
        let catalog = Catalog::new(vec![card(3), card(1), card(2)]).unwrap();
        let ids: Vec<_> = catalog.iter().map(Card::id).collect();
        assert_eq!(ids, vec![CardId::new(3), CardId::new(1), CardId::new(2)]);
        assert_eq!(catalog.find(CardId::new(2)).map(Card::back), Some("A2"));
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![card(1), card(1)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: "1".into() });
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog: Catalog<Card> = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
        assert!(!catalog.contains(CardId::new(1)));
    }
}
