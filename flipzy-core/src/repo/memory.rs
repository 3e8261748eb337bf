use crate::{Card, CardStore, CoreError};
use parking_lot::RwLock;
use std::path::PathBuf;

/// Keeps the collection in process memory. Nothing outlives the value.
#[derive(Default)]
pub struct MemoryStore {
    cards: RwLock<Vec<Card>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: RwLock::new(cards),
        }
    }
}

impl CardStore for MemoryStore {
    fn load_all(&self) -> Vec<Card> {
        self.cards.read().clone()
    }

    fn save_all(&self, cards: &[Card]) -> Result<(), CoreError> {
        *self.cards.write() = cards.to_vec();
        Ok(())
    }

    fn backup_now(&self) -> Result<Option<PathBuf>, CoreError> {
        Ok(None)
    }
}
