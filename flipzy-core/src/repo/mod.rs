use crate::{Card, CoreError};
use std::path::PathBuf;

pub mod memory;

/// Durable id -> card mapping over a single serialized collection.
///
/// Every mutation is a read-modify-write of the whole collection. There is
/// no locking: one writer per backing resource is assumed, last write wins.
pub trait CardStore {
    /// Never fails: an absent or unreadable collection reads as empty.
    fn load_all(&self) -> Vec<Card>;

    /// Replaces the persisted collection with exactly `cards`.
    fn save_all(&self, cards: &[Card]) -> Result<(), CoreError>;

    /// Snapshots the persisted collection. `None` when there is nothing to copy.
    fn backup_now(&self) -> Result<Option<PathBuf>, CoreError>;

    /// Appends without checking for an existing id.
    fn add(&self, card: Card) -> Result<(), CoreError> {
        let mut cards = self.load_all();
        cards.push(card);
        self.save_all(&cards)
    }

    /// Replaces the first card with a matching id; unknown ids change nothing.
    fn update_by_id(&self, card: &Card) -> Result<(), CoreError> {
        let mut cards = self.load_all();
        if let Some(slot) = cards.iter_mut().find(|c| c.id == card.id) {
            *slot = card.clone();
        }
        self.save_all(&cards)
    }

    fn delete_by_id(&self, id: &str) -> Result<(), CoreError> {
        let mut cards = self.load_all();
        cards.retain(|c| c.id != id);
        self.save_all(&cards)
    }

    fn get_by_id(&self, id: &str) -> Option<Card> {
        self.load_all().into_iter().find(|c| c.id == id)
    }
}
