use crate::Card;

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.front.to_lowercase().contains(&q)
                || c.back.to_lowercase().contains(&q)
                || c.example
                    .as_ref()
                    .map(|e| e.to_lowercase().contains(&q))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

pub fn filter_by_category(cards: &[Card], category: &str) -> Vec<Card> {
    let q = category.trim().to_lowercase();
    cards
        .iter()
        .filter(|c| c.category.to_lowercase() == q)
        .cloned()
        .collect()
}
