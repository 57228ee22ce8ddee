//! Test Data Factory
//!
//! Provides utilities for generating realistic test data:
//! - Cards in each lifecycle state
//! - Review histories, hand-written or produced by the scheduler itself
//! - Batch generation for calibration runs

use chrono::{DateTime, Duration, Utc};
use hazel_fsrs::{Card, Parameters, Rating, ReviewHistory, ReviewLog, State};

use crate::harness::ReviewSimulator;

/// Factory for creating test data
///
/// # Example
///
/// ```rust,ignore
/// let card = TestDataFactory::review_card(10.0, 5.0, 10);
/// let history = TestDataFactory::create_history(1, &[Rating::Good, Rating::Again], 3);
/// let batch = TestDataFactory::create_batch(&BatchConfig::default());
/// ```
pub struct TestDataFactory;

/// Configuration for batch history generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of card histories
    pub count: usize,
    /// Reviews per card
    pub reviews_per_card: usize,
    /// Every n-th review is a lapse (0 = never)
    pub lapse_every: usize,
    /// Run the scheduler instead of fixed spacing
    pub simulated: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 10,
            reviews_per_card: 6,
            lapse_every: 4,
            simulated: true,
        }
    }
}

impl TestDataFactory {
    // ========================================================================
    // CARDS
    // ========================================================================

    /// Unreviewed card due at the simulator epoch
    pub fn new_card() -> Card {
        Card::new(ReviewSimulator::epoch())
    }

    /// Review-state card last reviewed `days_ago` days before the epoch
    pub fn review_card(stability: f64, difficulty: f64, days_ago: i64) -> Card {
        let now = ReviewSimulator::epoch();
        Card {
            due: now,
            stability,
            difficulty,
            elapsed_days: 0,
            scheduled_days: days_ago.max(0) as u64,
            reps: 5,
            lapses: 0,
            state: State::Review,
            last_review: Some(now - Duration::days(days_ago)),
        }
    }

    /// Card mid-way through (re)learning steps
    pub fn learning_card(state: State, stability: f64, difficulty: f64) -> Card {
        let now = ReviewSimulator::epoch();
        Card {
            due: now,
            stability,
            difficulty,
            reps: 1,
            state,
            last_review: Some(now - Duration::minutes(10)),
            ..Card::default()
        }
    }

    // ========================================================================
    // HISTORIES
    // ========================================================================

    /// History with a fixed gap between reviews
    pub fn create_history(card_id: i64, grades: &[Rating], spacing_days: u64) -> ReviewHistory {
        let start = ReviewSimulator::epoch();
        let logs = grades
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                let elapsed = if i == 0 { 0 } else { spacing_days };
                Self::log(
                    *rating,
                    if i == 0 { State::New } else { State::Review },
                    elapsed,
                    start + Duration::days((i as u64 * spacing_days) as i64),
                )
            })
            .collect();
        ReviewHistory::with_logs(card_id, logs)
    }

    /// History produced by reviewing a fresh card on time
    pub fn simulated_history(card_id: i64, grades: &[Rating], params: Parameters) -> ReviewHistory {
        let mut sim = ReviewSimulator::with_card(params, Self::new_card(), card_id);
        sim.run(grades);
        sim.history().clone()
    }

    /// Many histories for calibration
    pub fn create_batch(config: &BatchConfig) -> Vec<ReviewHistory> {
        (0..config.count)
            .map(|id| {
                let grades = Self::grade_pattern(id, config.reviews_per_card, config.lapse_every);
                if config.simulated {
                    let params = Parameters::default().with_short_term(false);
                    Self::simulated_history(id as i64, &grades, params)
                } else {
                    Self::create_history(id as i64, &grades, 1 + (id % 5) as u64)
                }
            })
            .collect()
    }

    /// Deterministic grade sequence, varied by `seed`
    pub fn grade_pattern(seed: usize, len: usize, lapse_every: usize) -> Vec<Rating> {
        (0..len)
            .map(|i| {
                if lapse_every > 0 && i > 0 && (i + seed) % lapse_every == 0 {
                    Rating::Again
                } else {
                    match (i * 7 + seed * 3) % 5 {
                        0 => Rating::Hard,
                        4 => Rating::Easy,
                        _ => Rating::Good,
                    }
                }
            })
            .collect()
    }

    pub fn log(
        rating: Rating,
        state: State,
        elapsed_days: u64,
        review: DateTime<Utc>,
    ) -> ReviewLog {
        ReviewLog {
            rating,
            state,
            elapsed_days,
            scheduled_days: elapsed_days,
            review,
        }
    }
}
