//! Calibration facade: review histories in, weights out

use super::processor::process_histories;
use super::trainer::{FsrsTrainer, TrainerConfig, DEFAULT_BATCH_SIZE, DEFAULT_EPOCHS};
use crate::card::ReviewHistory;
use crate::error::{Error, Result};
use crate::fsrs::WEIGHT_COUNT;

/// Windows review histories and trains weights on them
///
/// ```rust,ignore
/// let mut service = FsrsOptimizationService::default();
/// let weights = service.optimize(&histories)?;
/// let params = Parameters::from_weights(weights);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsrsOptimizationService {
    trainer: FsrsTrainer,
}

impl FsrsOptimizationService {
    pub fn new(learning_rate: f64, regularization: f64) -> Self {
        Self {
            trainer: FsrsTrainer::new(learning_rate, regularization),
        }
    }

    pub fn with_config(config: TrainerConfig) -> Self {
        Self {
            trainer: FsrsTrainer::with_config(config),
        }
    }

    pub fn trainer(&self) -> &FsrsTrainer {
        &self.trainer
    }

    /// Calibrate weights with explicit epochs and batch size
    pub fn optimize_weights(
        &mut self,
        histories: &[ReviewHistory],
        epochs: usize,
        batch_size: usize,
    ) -> Result<[f64; WEIGHT_COUNT]> {
        if histories.is_empty() {
            return Err(Error::InvalidInput("no review histories supplied".to_string()));
        }

        let samples = process_histories(histories);
        tracing::debug!(
            histories = histories.len(),
            samples = samples.len(),
            "Windowed review histories"
        );
        self.trainer.train(&samples, epochs, batch_size)
    }

    /// Calibrate weights with the default 5 epochs and batch size 4096
    pub fn optimize(&mut self, histories: &[ReviewHistory]) -> Result<[f64; WEIGHT_COUNT]> {
        self.optimize_weights(histories, DEFAULT_EPOCHS, DEFAULT_BATCH_SIZE)
    }
}
