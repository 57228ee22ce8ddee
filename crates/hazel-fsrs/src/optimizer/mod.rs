//! Weight Calibration Module
//!
//! Offline fitting of the 21 FSRS weights to a user's review history:
//! - `processor`: histories → right-aligned 5-review training windows
//! - `trainer`: Adam over finite-difference gradients, parallel with rayon
//! - `service`: one-call facade over both

mod processor;
mod service;
mod trainer;

pub use processor::{process_histories, TrainingSample, MAX_HISTORY_LENGTH};
pub use service::FsrsOptimizationService;
pub use trainer::{FsrsTrainer, TrainerConfig, DEFAULT_BATCH_SIZE, DEFAULT_EPOCHS};
