//! # Hazel FSRS
//!
//! Spaced repetition core for flashcard applications:
//!
//! - **FSRS-6**: 21-parameter memory model (stability, difficulty, retrievability)
//! - **Two Strategies**: short-term learning steps in minutes, or whole-day
//!   intervals from the first review
//! - **Deterministic Fuzz**: Alea-seeded interval jitter, reproducible per review
//! - **Weight Calibration**: fit the 21 weights to a user's own review history
//!   with Adam over parallel finite-difference gradients
//!
//! Storage, queues and UI stay with the caller: the scheduler takes a card
//! snapshot plus a clock value and returns candidate snapshots.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use hazel_fsrs::{Card, Fsrs, Parameters, Rating};
//!
//! let fsrs = Fsrs::new(Parameters::default().with_fuzz(true));
//! let now = Utc::now();
//! let card = Card::new(now);
//!
//! // All four grades at once
//! let preview = fsrs.repeat(&card, now);
//! assert!(preview[Rating::Easy].card.due > preview[Rating::Again].card.due);
//!
//! // Commit the grade the user chose
//! let card = fsrs.next(&card, now, Rating::Good).card;
//! assert_eq!(card.reps, 1);
//! ```
//!
//! ## Calibration
//!
//! ```rust,ignore
//! use hazel_fsrs::{FsrsOptimizationService, Parameters};
//!
//! let mut service = FsrsOptimizationService::default();
//! let weights = service.optimize(&histories)?;
//! let params = Parameters::from_weights(weights);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod analysis;
pub mod card;
pub mod error;
pub mod fsrs;

/// Offline weight calibration from review history
pub mod optimizer;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Card data
pub use card::{Card, Rating, RecordLog, ReviewHistory, ReviewLog, SchedulingInfo, State};

// FSRS-6 scheduling
pub use fsrs::{
    Alea,
    AleaState,
    Fsrs,
    LongTermScheduler,
    Parameters,
    ReviewSession,
    SchedulerKind,
    SchedulingStrategy,
    ShortTermScheduler,
    DEFAULT_MAXIMUM_INTERVAL,
    DEFAULT_RETENTION,
    DEFAULT_WEIGHTS,
    MAX_MAXIMUM_INTERVAL,
    WEIGHT_COUNT,
};

// Weight calibration
pub use optimizer::{
    process_histories, FsrsOptimizationService, FsrsTrainer, TrainerConfig, TrainingSample,
};

// Review analysis
pub use analysis::{average_rating, recall_accuracy};

pub use error::{Error, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FSRS algorithm version (6 = 21 parameters)
pub const FSRS_VERSION: u8 = 6;

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Card, Error, Fsrs, FsrsOptimizationService, Parameters, Rating, RecordLog, Result,
        ReviewHistory, ReviewLog, SchedulingInfo, State,
    };
}
