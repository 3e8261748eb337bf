use crate::{due_cards_at, Card};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_cards: usize,
    pub due_for_review: usize,
    pub mastered: usize,
    pub new_cards: usize,
    pub in_progress: usize,
}

pub fn get_stats(cards: &[Card]) -> Stats {
    stats_at(cards, Utc::now())
}

pub fn stats_at(cards: &[Card], now: DateTime<Utc>) -> Stats {
    let total_cards = cards.len();
    let mastered = cards.iter().filter(|c| c.is_mastered()).count();
    let new_cards = cards.iter().filter(|c| c.is_new()).count();
    Stats {
        total_cards,
        due_for_review: due_cards_at(cards, now).len(),
        mastered,
        new_cards,
        // new (0 reps) and mastered (>= 5 reps) never overlap
        in_progress: total_cards - new_cards - mastered,
    }
}

/// Card count per category, largest first; ties by name.
pub fn category_breakdown(cards: &[Card]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in cards {
        *counts.entry(c.category.as_str()).or_default() += 1;
    }
    let mut v: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v
}

pub fn recently_reviewed(cards: &[Card], limit: usize) -> Vec<Card> {
    let mut v: Vec<Card> = cards
        .iter()
        .filter(|c| c.last_reviewed.is_some())
        .cloned()
        .collect();
    v.sort_by(|a, b| b.last_reviewed.cmp(&a.last_reviewed));
    v.truncate(limit);
    v
}

pub fn recently_added(cards: &[Card], limit: usize) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    v.truncate(limit);
    v
}
