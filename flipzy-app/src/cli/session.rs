use anyhow::Result;
use chrono::{DateTime, Utc};
use flipzy_core::{compute_next_review_at, due_cards_at, Card, CardStore, Quality};
use std::collections::VecDeque;

/// State of one review run. Lives for a single `review` invocation.
pub struct ReviewSession {
    queue: VecDeque<Card>,
    total: usize,
    pub reviewed: usize,
    pub skipped: usize,
}

impl ReviewSession {
    /// Queues the cards due at `now`, in store order, capped at `max`.
    pub fn start<S: CardStore + ?Sized>(store: &S, now: DateTime<Utc>, max: usize) -> Self {
        let queue: VecDeque<Card> = due_cards_at(&store.load_all(), now)
            .into_iter()
            .take(max)
            .collect();
        Self {
            total: queue.len(),
            queue,
            reviewed: 0,
            skipped: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 1-based position of the card `next_card` would hand out.
    pub fn position(&self) -> usize {
        self.total - self.queue.len() + 1
    }

    pub fn next_card(&mut self) -> Option<Card> {
        self.queue.pop_front()
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn grade<S: CardStore + ?Sized>(
        &mut self,
        store: &S,
        card: Card,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let updated = compute_next_review_at(card, quality, now);
        store.update_by_id(&updated)?;
        self.reviewed += 1;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use flipzy_core::MemoryStore;

    fn card(id: &str, due_in_days: i64, now: DateTime<Utc>) -> Card {
        let mut c = Card::new_at(id, id, "answer", now).unwrap();
        c.next_review = now + Duration::days(due_in_days);
        c
    }

    #[test]
    fn queues_only_due_cards_up_to_max() {
        let now = Utc::now();
        let store = MemoryStore::with_cards(vec![
            card("a", 0, now),
            card("b", 3, now),
            card("c", -1, now),
            card("d", -2, now),
        ]);
        let mut s = ReviewSession::start(&store, now, 2);
        assert_eq!(s.total(), 2);
        assert_eq!(s.position(), 1);
        assert_eq!(s.next_card().unwrap().id, "a");
        assert_eq!(s.position(), 2);
        assert_eq!(s.next_card().unwrap().id, "c");
        assert!(s.next_card().is_none());
    }

    #[test]
    fn grading_persists_the_rescheduled_card() {
        let now = Utc::now();
        let store = MemoryStore::with_cards(vec![card("a", 0, now), card("b", 0, now)]);
        let mut s = ReviewSession::start(&store, now, 10);

        let a = s.next_card().unwrap();
        let a = s.grade(&store, a, Quality::new(5).unwrap(), now).unwrap();
        assert_eq!(a.repetitions, 1);
        s.next_card().unwrap();
        s.skip();

        let stored = store.get_by_id("a").unwrap();
        assert_eq!(stored, a);
        assert_eq!(stored.next_review, now + Duration::days(1));
        assert_eq!(store.get_by_id("b").unwrap().repetitions, 0);
        assert_eq!((s.reviewed, s.skipped), (1, 1));
    }
}
