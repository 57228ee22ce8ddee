//! FSRS-6 (Free Spaced Repetition Scheduler) Module
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! ## Core Formulas:
//! - Retrievability: R = (1 + FACTOR * t / S)^(-w20) where FACTOR = 0.9^(-1/w20) - 1
//! - Interval: t = S/FACTOR * (R^(-1/w20) - 1), rounded half-to-even
//!
//! ## Layout:
//! - `algorithm`: `Parameters` and the pure formulas
//! - `alea`: seeded PRNG behind interval fuzz
//! - `scheduler`: `ReviewSession`, one review transaction with its memo cache
//! - `strategy`: short-term and long-term state machines
//! - `engine`: `Fsrs`, the entry point most callers want

mod alea;
mod algorithm;
mod engine;
mod scheduler;
mod strategy;

pub use alea::{Alea, AleaState};

pub use algorithm::{
    constrain_difficulty,
    Parameters,
    // Constants
    DEFAULT_MAXIMUM_INTERVAL,
    DEFAULT_RETENTION,
    DEFAULT_WEIGHTS,
    MAX_DIFFICULTY,
    MAX_MAXIMUM_INTERVAL,
    MIN_DIFFICULTY,
    MIN_RETRIEVABILITY,
    MIN_STABILITY,
    WEIGHT_COUNT,
};

pub use engine::Fsrs;
pub use scheduler::ReviewSession;
pub use strategy::{LongTermScheduler, SchedulerKind, SchedulingStrategy, ShortTermScheduler};
