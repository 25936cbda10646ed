//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition available to a game.
//! Definitions are `Arc`-shared so instances can point at them cheaply.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::{EngineError, Result};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use farmyard_engine::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardDefinition::occupation(CardId::new(1), "Wood Cutter")).unwrap();
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Wood Cutter");
/// assert!(catalog.by_name("Wood Cutter").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    by_name: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    ///
    /// Fails with `InvalidInput` if the ID or the name is already taken.
    pub fn insert(&mut self, card: CardDefinition) -> Result<Arc<CardDefinition>> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::invalid_input(format!("{} already in catalog", card.id)));
        }
        if self.by_name.contains_key(&card.name) {
            return Err(EngineError::invalid_input(format!("card named {} already in catalog", card.name)));
        }
        let card = Arc::new(card);
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, Arc::clone(&card));
        Ok(card)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.by_name.get(name).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }

    pub fn occupations(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(|c| c.is_occupation())
    }

    pub fn improvements(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(|c| c.is_improvement())
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<CardDefinition>>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl FromIterator<CardDefinition> for CardCatalog {
    /// Collect definitions, keeping the first of any duplicate ID or name.
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            // Duplicates are dropped.
            let _ = catalog.insert(card);
        }
        catalog
    }
}
