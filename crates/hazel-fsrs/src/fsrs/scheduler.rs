//! Review session - one scheduling transaction over one card
//!
//! A session copies the caller's card into `last` (as it was) and `current`
//! (bumped for this review), derives the fuzz seed for this review, and hands
//! off to the selected strategy. Outcomes are memoized per grade: the Review
//! branch computes all four grades at once and later calls reuse them.

use chrono::{DateTime, Utc};

use super::algorithm::Parameters;
use super::strategy::SchedulerKind;
use crate::card::{Card, RecordLog, ReviewLog, Rating, SchedulingInfo, State};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One scheduling transaction
#[derive(Debug, Clone)]
pub struct ReviewSession<'a> {
    pub(crate) params: &'a Parameters,
    pub(crate) last: Card,
    pub(crate) current: Card,
    pub(crate) now: DateTime<Utc>,
    pub(crate) next: RecordLog,
    seed: String,
    kind: SchedulerKind,
}

impl<'a> ReviewSession<'a> {
    /// Open a session for reviewing `card` at `now`
    pub fn new(
        params: &'a Parameters,
        card: &Card,
        now: DateTime<Utc>,
        kind: SchedulerKind,
    ) -> Self {
        let last = *card;
        let mut current = *card;

        let elapsed_days = match current.last_review {
            Some(last_review) if current.state != State::New => {
                let days = (now - last_review).num_milliseconds() as f64 / MILLIS_PER_DAY;
                days.floor().max(0.0) as u64
            }
            _ => 0,
        };
        current.last_review = Some(now);
        current.elapsed_days = elapsed_days;
        current.reps = current.reps.saturating_add(1);

        // Shortest round-trip decimal. Other ports print the product the same
        // way for magnitudes in [1e-5, 1e15); outside that range they switch to
        // exponent notation and the fuzz diverges.
        let seed = format!(
            "{}_{}_{}",
            now.timestamp(),
            current.reps,
            current.difficulty * current.stability
        );

        tracing::debug!(
            state = %last.state,
            elapsed_days,
            reps = current.reps,
            strategy = ?kind,
            "Opened review session"
        );

        Self {
            params,
            last,
            current,
            now,
            next: RecordLog::new(),
            seed,
            kind,
        }
    }

    /// Outcomes for all four grades
    pub fn preview(&mut self) -> RecordLog {
        let mut log = RecordLog::new();
        for rating in Rating::ALL {
            log.insert(rating, self.review(rating));
        }
        log
    }

    /// Outcome for one grade
    pub fn review(&mut self, grade: Rating) -> SchedulingInfo {
        if let Some(info) = self.next.get(grade) {
            return *info;
        }

        let strategy = self.kind.strategy();
        let info = match self.last.state {
            State::New => strategy.new_state(self, grade),
            State::Learning | State::Relearning => strategy.learning_state(self, grade),
            State::Review => strategy.review_state(self, grade),
        };
        self.next.insert(grade, info);
        info
    }

    /// Fuzz seed derived for this review
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Strategy this session dispatches to
    pub fn kind(&self) -> SchedulerKind {
        self.kind
    }

    /// Card as supplied by the caller
    pub fn last(&self) -> &Card {
        &self.last
    }

    /// Card as seen by this review (elapsed days set, reps bumped)
    pub fn current(&self) -> &Card {
        &self.current
    }

    /// Review timestamp
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Log entry recorded if `rating` is chosen
    pub(crate) fn build_log(&self, rating: Rating) -> ReviewLog {
        ReviewLog {
            rating,
            state: self.current.state,
            elapsed_days: self.current.elapsed_days,
            scheduled_days: self.current.scheduled_days,
            review: self.now,
        }
    }

    /// Interval for `stability`, fuzzed with this session's seed
    pub(crate) fn next_interval(&self, stability: f64, elapsed_days: f64) -> f64 {
        self.params.next_interval(stability, elapsed_days, &self.seed)
    }

    /// Wrap a card with its log and memoize it
    pub(crate) fn record(&mut self, rating: Rating, card: Card) -> SchedulingInfo {
        let info = SchedulingInfo {
            card,
            review_log: self.build_log(rating),
        };
        self.next.insert(rating, info);
        info
    }
}
