use crate::{Card, Quality, EF_MIN};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// SM-2 ease adjustment. Quality 5 gives the largest bump, quality 3 a penalty.
fn adjust_ease(ef: f64, quality: Quality) -> f64 {
    let miss = (Quality::MAX - quality.value()) as f64;
    (ef + (0.1 - miss * (0.08 + miss * 0.02))).max(EF_MIN)
}

fn next_interval(card: &Card) -> u32 {
    match card.repetitions {
        0 => 1,
        1 => 6,
        _ => (card.interval as f64 * card.ease_factor).floor().max(1.0) as u32,
    }
}

fn add_days(at: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(days as i64)
        .and_then(|d| at.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn compute_next_review(card: Card, quality: Quality) -> Card {
    compute_next_review_at(card, quality, Utc::now())
}

/// Applies one review graded `quality` at `now` and returns the rescheduled card.
///
/// A failed recall resets the streak and interval but keeps the ease factor.
/// A successful one picks the interval from the streak *before* it is
/// extended, using the ease factor from before this review.
pub fn compute_next_review_at(mut card: Card, quality: Quality, now: DateTime<Utc>) -> Card {
    card.last_reviewed = Some(now);

    if quality.is_correct() {
        card.interval = next_interval(&card);
        card.repetitions = card.repetitions.saturating_add(1);
        card.ease_factor = adjust_ease(card.ease_factor, quality);
    } else {
        card.repetitions = 0;
        card.interval = 1;
    }

    card.next_review = add_days(now, card.interval);
    debug!(
        card = %card.id,
        quality = quality.value(),
        interval = card.interval,
        ease_factor = card.ease_factor,
        "rescheduled card"
    );
    card
}

pub fn get_due_cards(cards: &[Card]) -> Vec<Card> {
    due_cards_at(cards, Utc::now())
}

/// Cards with `next_review <= now`, in input order.
pub fn due_cards_at(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|c| c.is_due(now)).cloned().collect()
}
