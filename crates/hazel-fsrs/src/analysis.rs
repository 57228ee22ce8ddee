//! Review analysis helpers

use crate::card::{Card, Rating, ReviewHistory};

/// Share of reviews that were not lapses, 0 for unreviewed cards
pub fn recall_accuracy(card: &Card) -> f64 {
    if card.reps == 0 {
        return 0.0;
    }
    card.reps.saturating_sub(card.lapses) as f64 / card.reps as f64
}

/// Mean grade of a history, clamped to Hard..=Easy
///
/// Rounds half-to-even, so a mean of exactly 2.5 is Hard.
pub fn average_rating(history: &ReviewHistory) -> Option<Rating> {
    if history.is_empty() {
        return None;
    }
    let total: f64 = history.review_logs.iter().map(|log| log.rating.value()).sum();
    let mean = (total / history.len() as f64).clamp(2.0, 4.0);
    Rating::from_u8(mean.round_ties_even() as u8)
}
