//! Card - the memory-state snapshot the scheduler works on
//!
//! A card carries only FSRS scheduling state:
//! - Due date and last review timestamp
//! - Stability / difficulty (the DSR memory model)
//! - Elapsed and scheduled day counters
//! - Repetition and lapse counters
//!
//! Content, decks and ownership live in the application layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RATING
// ============================================================================

/// Grade given by the reviewer. The ordinal value feeds straight into the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Forgot the card (lapse)
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled after hesitation
    Good = 3,
    /// Recalled effortlessly
    Easy = 4,
}

impl Rating {
    /// All grades in ascending order
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Ordinal value (1-4)
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Ordinal value as a float, for use in formulas
    #[inline]
    pub fn value(self) -> f64 {
        self as u8 as f64
    }

    /// Parse from the ordinal value
    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// LIFECYCLE STATE
// ============================================================================

/// Where a card sits in its learning lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Never reviewed
    #[default]
    New,
    /// First pass through same-day learning steps
    Learning,
    /// Graduated; scheduled in whole days
    Review,
    /// Lapsed out of Review and back in same-day steps
    Relearning,
}

impl State {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            State::New => "new",
            State::Learning => "learning",
            State::Review => "review",
            State::Relearning => "relearning",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(State::New),
            "learning" => Some(State::Learning),
            "review" => Some(State::Review),
            "relearning" => Some(State::Relearning),
            _ => None,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CARD
// ============================================================================

/// Memory-state snapshot of one card
///
/// `Card` is a flat `Copy` value. The scheduler copies the caller's card and
/// only ever mutates its own copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// When the card is next due
    pub due: DateTime<Utc>,
    /// Memory stability in days (interval at which recall drops to 90%)
    pub stability: f64,
    /// Inherent difficulty (1.0 = easy, 10.0 = hard)
    pub difficulty: f64,
    /// Whole days between the previous review and the latest one
    pub elapsed_days: u64,
    /// Whole days the latest review scheduled ahead
    pub scheduled_days: u64,
    /// Number of reviews
    pub reps: u64,
    /// Number of times the card was forgotten from Review
    pub lapses: u64,
    /// Lifecycle state
    pub state: State,
    /// When the card was last reviewed, if ever
    pub last_review: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a fresh card that is due immediately
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            due: now,
            ..Self::default()
        }
    }

    /// Whether the card is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }
}

impl Default for Card {
    fn default() -> Self {
        Self {
            due: DateTime::<Utc>::UNIX_EPOCH,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            last_review: None,
        }
    }
}
