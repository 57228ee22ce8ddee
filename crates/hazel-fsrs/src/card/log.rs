//! Review logs and scheduling outcomes

use std::collections::BTreeMap;
use std::ops::Index;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Card, Rating, State};

/// Immutable record of one review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    /// Grade given
    pub rating: Rating,
    /// Lifecycle state at review time
    pub state: State,
    /// Days since the previous review
    pub elapsed_days: u64,
    /// Days the card had been scheduled for
    pub scheduled_days: u64,
    /// When the review happened
    pub review: DateTime<Utc>,
}

/// All review logs recorded for one card
///
/// Logs are not assumed to be in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistory {
    /// Identifier of the card the logs belong to
    pub card_id: i64,
    /// Review logs, in whatever order the store returned them
    pub review_logs: Vec<ReviewLog>,
}

impl ReviewHistory {
    /// Create an empty history for a card
    pub fn new(card_id: i64) -> Self {
        Self {
            card_id,
            review_logs: Vec::new(),
        }
    }

    /// Create a history from existing logs
    pub fn with_logs(card_id: i64, review_logs: Vec<ReviewLog>) -> Self {
        Self {
            card_id,
            review_logs,
        }
    }

    /// Append a log
    pub fn push(&mut self, log: ReviewLog) {
        self.review_logs.push(log);
    }

    /// Number of logs
    pub fn len(&self) -> usize {
        self.review_logs.len()
    }

    /// Whether the history has no logs
    pub fn is_empty(&self) -> bool {
        self.review_logs.is_empty()
    }

    /// Logs sorted by review timestamp (stable for equal timestamps)
    pub fn sorted_logs(&self) -> Vec<ReviewLog> {
        let mut logs = self.review_logs.clone();
        logs.sort_by_key(|log| log.review);
        logs
    }
}

/// One candidate outcome: the next card and the log recorded if it is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInfo {
    /// Card snapshot after the review
    pub card: Card,
    /// Log entry for the review
    pub review_log: ReviewLog,
}

/// Outcomes keyed by grade, iterated Again → Easy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordLog {
    entries: BTreeMap<Rating, SchedulingInfo>,
}

impl RecordLog {
    /// Create an empty record log
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for a grade, if computed
    pub fn get(&self, rating: Rating) -> Option<&SchedulingInfo> {
        self.entries.get(&rating)
    }

    /// Store an outcome, replacing any previous one for the grade
    pub fn insert(&mut self, rating: Rating, info: SchedulingInfo) {
        self.entries.insert(rating, info);
    }

    /// Whether an outcome exists for the grade
    pub fn contains(&self, rating: Rating) -> bool {
        self.entries.contains_key(&rating)
    }

    /// Number of outcomes stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no outcome has been stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every grade has an outcome
    pub fn is_complete(&self) -> bool {
        Rating::ALL.iter().all(|rating| self.contains(*rating))
    }

    /// Iterate outcomes in grade order
    pub fn iter(&self) -> impl Iterator<Item = (Rating, &SchedulingInfo)> {
        self.entries.iter().map(|(rating, info)| (*rating, info))
    }
}

impl Index<Rating> for RecordLog {
    type Output = SchedulingInfo;

    fn index(&self, rating: Rating) -> &Self::Output {
        self.entries
            .get(&rating)
            .unwrap_or_else(|| panic!("no scheduling info for rating {rating}"))
    }
}
