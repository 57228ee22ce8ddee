//! Scheduling strategies
//!
//! - **Short-term**: same-day learning steps measured in minutes, graduating to
//!   day intervals on Good/Easy.
//! - **Long-term**: every outcome gets a whole-day interval; learning cards are
//!   treated as review cards.

mod long_term;
mod short_term;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::Parameters;
use super::scheduler::ReviewSession;
use crate::card::{Card, Rating, SchedulingInfo};

pub use long_term::LongTermScheduler;
pub use short_term::ShortTermScheduler;

/// Per-state transitions of a scheduling strategy
pub trait SchedulingStrategy: Send + Sync {
    /// Card has never been reviewed
    fn new_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo;

    /// Card is in Learning or Relearning
    fn learning_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo;

    /// Card is in Review
    fn review_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo;
}

/// Which strategy a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    ShortTerm,
    LongTerm,
}

impl SchedulerKind {
    /// Short-term when `enable_short_term` is set, long-term otherwise
    pub fn select(params: &Parameters) -> Self {
        if params.enable_short_term {
            SchedulerKind::ShortTerm
        } else {
            SchedulerKind::LongTerm
        }
    }

    pub(crate) fn strategy(self) -> &'static dyn SchedulingStrategy {
        match self {
            SchedulerKind::ShortTerm => &ShortTermScheduler,
            SchedulerKind::LongTerm => &LongTermScheduler,
        }
    }
}

/// Candidate cards for each grade, Again → Easy
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidates {
    again: Card,
    hard: Card,
    good: Card,
    easy: Card,
}

impl Candidates {
    fn splat(card: Card) -> Self {
        Self {
            again: card,
            hard: card,
            good: card,
            easy: card,
        }
    }

    fn get_mut(&mut self, rating: Rating) -> &mut Card {
        match rating {
            Rating::Again => &mut self.again,
            Rating::Hard => &mut self.hard,
            Rating::Good => &mut self.good,
            Rating::Easy => &mut self.easy,
        }
    }

    /// Memoize all four outcomes and return the requested one
    fn record(self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        let again = session.record(Rating::Again, self.again);
        let hard = session.record(Rating::Hard, self.hard);
        let good = session.record(Rating::Good, self.good);
        let easy = session.record(Rating::Easy, self.easy);
        match grade {
            Rating::Again => again,
            Rating::Hard => hard,
            Rating::Good => good,
            Rating::Easy => easy,
        }
    }
}

/// `now` plus whole days, saturating at the latest representable instant
pub(crate) fn due_in_days(now: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    Duration::try_days(days as i64)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Difficulty and recall stabilities for Hard/Good/Easy from a review-state card
fn next_recall_states(
    session: &ReviewSession<'_>,
    candidates: &mut Candidates,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
) {
    let params = session.params;
    for rating in [Rating::Hard, Rating::Good, Rating::Easy] {
        let card = candidates.get_mut(rating);
        card.difficulty = params.next_difficulty(difficulty, rating);
        card.stability =
            params.next_recall_stability(difficulty, stability, retrievability, rating);
    }
}
