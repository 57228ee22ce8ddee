//! Public scheduling facade

use chrono::{DateTime, Utc};

use super::algorithm::Parameters;
use super::scheduler::ReviewSession;
use super::strategy::SchedulerKind;
use crate::card::{Card, Rating, RecordLog, SchedulingInfo, State};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// FSRS scheduler
///
/// Owns the model parameters; every call opens a fresh [`ReviewSession`] so the
/// caller's card is never touched.
///
/// ```rust
/// use chrono::Utc;
/// use hazel_fsrs::{Card, Fsrs, Rating};
///
/// let fsrs = Fsrs::default();
/// let now = Utc::now();
/// let outcome = fsrs.next(&Card::new(now), now, Rating::Good);
/// assert!(outcome.card.due > now);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fsrs {
    params: Parameters,
}

impl Fsrs {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Open a session with the strategy selected by the parameters
    pub fn session(&self, card: &Card, now: DateTime<Utc>) -> ReviewSession<'_> {
        ReviewSession::new(&self.params, card, now, SchedulerKind::select(&self.params))
    }

    /// Candidate outcomes for all four grades
    pub fn repeat(&self, card: &Card, now: DateTime<Utc>) -> RecordLog {
        self.session(card, now).preview()
    }

    /// Outcome for a single grade
    pub fn next(&self, card: &Card, now: DateTime<Utc>, grade: Rating) -> SchedulingInfo {
        self.session(card, now).review(grade)
    }

    /// Current probability of recall, 0 for cards never reviewed
    pub fn get_retrievability(&self, card: &Card, now: DateTime<Utc>) -> f64 {
        if card.state == State::New {
            return 0.0;
        }
        let elapsed_days = card
            .last_review
            .map(|last| ((now - last).num_milliseconds() as f64 / MILLIS_PER_DAY).max(0.0))
            .unwrap_or(0.0);
        self.params.forgetting_curve(elapsed_days, card.stability)
    }
}
