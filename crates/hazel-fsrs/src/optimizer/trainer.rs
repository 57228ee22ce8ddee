//! Weight trainer
//!
//! Fits the 21 FSRS weights to observed review outcomes. Each window is
//! replayed through a compact form of the memory model, the predicted recall
//! at the target interval is scored with log-loss, and Adam descends on
//! central finite-difference gradients.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::processor::TrainingSample;
use crate::error::{Error, Result};
use crate::fsrs::{DEFAULT_WEIGHTS, WEIGHT_COUNT};

/// Passes over the training split
pub const DEFAULT_EPOCHS: usize = 5;

/// Samples per gradient step
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Share of shuffled samples used for training; the rest validates
const TRAIN_SPLIT: f64 = 0.8;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-8;

/// Bounds applied after every step: w[0..20] and the decay weight w[20]
const WEIGHT_BOUNDS: (f64, f64) = (0.001, 30.0);
const DECAY_BOUNDS: (f64, f64) = (0.01, 0.9);

const MIN_REPLAY_STABILITY: f64 = 0.001;
const PREDICTION_EPSILON: f64 = 1e-9;

// ============================================================================
// TRAINER CONFIG
// ============================================================================

/// Hyperparameters for weight calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainerConfig {
    /// Adam step size
    pub learning_rate: f64,
    /// L2 pull toward the default weights
    pub regularization: f64,
    /// Finite-difference step
    pub gradient_step: f64,
    /// Shuffle seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            regularization: 0.05,
            gradient_step: 1e-4,
            seed: None,
        }
    }
}

// ============================================================================
// TRAINER
// ============================================================================

#[derive(Debug, Clone, Default)]
struct AdamState {
    m: [f64; WEIGHT_COUNT],
    v: [f64; WEIGHT_COUNT],
    t: i32,
}

/// Gradient-descent weight fitter
///
/// Weights and optimizer moments persist across `train` calls, so a second
/// call continues from where the first stopped.
#[derive(Debug, Clone)]
pub struct FsrsTrainer {
    config: TrainerConfig,
    weights: [f64; WEIGHT_COUNT],
    adam: AdamState,
}

impl Default for FsrsTrainer {
    fn default() -> Self {
        Self::with_config(TrainerConfig::default())
    }
}

impl FsrsTrainer {
    pub fn new(learning_rate: f64, regularization: f64) -> Self {
        Self::with_config(TrainerConfig {
            learning_rate,
            regularization,
            ..TrainerConfig::default()
        })
    }

    pub fn with_config(config: TrainerConfig) -> Self {
        Self {
            config,
            weights: DEFAULT_WEIGHTS,
            adam: AdamState::default(),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Current weights
    pub fn weights(&self) -> &[f64; WEIGHT_COUNT] {
        &self.weights
    }

    /// Fit the weights to `dataset`
    pub fn train(
        &mut self,
        dataset: &[TrainingSample],
        epochs: usize,
        batch_size: usize,
    ) -> Result<[f64; WEIGHT_COUNT]> {
        if dataset.is_empty() {
            return Err(Error::InvalidInput("training dataset is empty".to_string()));
        }
        if batch_size == 0 {
            return Err(Error::InvalidInput("batch size must be positive".to_string()));
        }

        tracing::info!(samples = dataset.len(), epochs, batch_size, "Starting FSRS training");
        let started = Instant::now();

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut shuffled = dataset.to_vec();
        shuffled.shuffle(&mut rng);

        let split = (shuffled.len() as f64 * TRAIN_SPLIT) as usize;
        let (train_set, validation_set) = shuffled.split_at(split);
        if train_set.is_empty() {
            tracing::warn!(samples = dataset.len(), "Training split is empty");
            return Err(Error::InvalidInput(format!(
                "{} sample(s) leave an empty training split",
                dataset.len()
            )));
        }

        let loss = self.calculate_loss(validation_set, &self.weights);
        tracing::info!(validation_loss = loss, "Initial validation loss");

        for epoch in 0..epochs {
            for batch in train_set.chunks(batch_size) {
                let grads = self.batch_gradients(batch);
                self.adam_step(&grads);
            }

            let loss = self.calculate_loss(validation_set, &self.weights);
            tracing::info!(epoch = epoch + 1, epochs, validation_loss = loss, "Epoch complete");
        }

        tracing::info!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            "FSRS training finished"
        );
        Ok(self.weights)
    }

    /// Mean log-loss of `weights` over `data`, plus the L2 penalty
    ///
    /// Empty data scores only the penalty.
    pub fn calculate_loss(&self, data: &[TrainingSample], weights: &[f64; WEIGHT_COUNT]) -> f64 {
        let penalty: f64 = weights
            .iter()
            .zip(DEFAULT_WEIGHTS.iter())
            .map(|(w, d)| (w - d) * (w - d))
            .sum();
        let penalty = self.config.regularization * penalty;

        if data.is_empty() {
            return penalty;
        }

        let total: f64 = data.par_iter().map(|sample| sample_log_loss(sample, weights)).sum();
        total / data.len() as f64 + penalty
    }

    /// Central-difference gradient, one weight per parallel task
    fn batch_gradients(&self, batch: &[TrainingSample]) -> [f64; WEIGHT_COUNT] {
        let step = self.config.gradient_step;
        let base = self.weights;

        let partials: Vec<f64> = (0..WEIGHT_COUNT)
            .into_par_iter()
            .map(|i| {
                let mut up = base;
                up[i] += step;
                let mut down = base;
                down[i] -= step;
                (self.calculate_loss(batch, &up) - self.calculate_loss(batch, &down)) / (2.0 * step)
            })
            .collect();

        let mut grads = [0.0; WEIGHT_COUNT];
        grads.copy_from_slice(&partials);
        grads
    }

    fn adam_step(&mut self, grads: &[f64; WEIGHT_COUNT]) {
        let adam = &mut self.adam;
        adam.t += 1;
        let bias1 = 1.0 - BETA1.powi(adam.t);
        let bias2 = 1.0 - BETA2.powi(adam.t);

        for i in 0..WEIGHT_COUNT {
            let g = grads[i].clamp(-1.0, 1.0);
            adam.m[i] = BETA1 * adam.m[i] + (1.0 - BETA1) * g;
            adam.v[i] = BETA2 * adam.v[i] + (1.0 - BETA2) * g * g;

            let m_hat = adam.m[i] / bias1;
            let v_hat = adam.v[i] / bias2;
            self.weights[i] -= self.config.learning_rate * m_hat / (v_hat.sqrt() + ADAM_EPSILON);

            let (lo, hi) = if i < WEIGHT_COUNT - 1 { WEIGHT_BOUNDS } else { DECAY_BOUNDS };
            self.weights[i] = self.weights[i].clamp(lo, hi);
        }
    }
}

/// Replay one window and score the prediction at its target interval
///
/// Reduced model, not the scheduler's: a lapse halves stability and difficulty
/// moves linearly before mean reversion.
fn sample_log_loss(sample: &TrainingSample, w: &[f64; WEIGHT_COUNT]) -> f64 {
    let decay = -w[20];
    let factor = 0.9f64.powf(1.0 / decay) - 1.0;
    let recall = |elapsed: f64, s: f64| (1.0 + factor * elapsed / s).powf(decay);

    let mut memory: Option<(f64, f64)> = None;
    for (elapsed, grade) in sample.window() {
        let idx = usize::from(grade.clamp(1, 4)) - 1;

        memory = Some(match memory {
            None => {
                let s = w[idx].max(MIN_REPLAY_STABILITY);
                let d = (w[4] - ((w[5] * idx as f64).exp() - 1.0)).clamp(1.0, 10.0);
                (s, d)
            }
            Some((s, d)) => {
                let next_s = if grade == 1 {
                    s * 0.5
                } else {
                    let r = recall(elapsed, s);
                    let growth = w[8].exp()
                        * (11.0 - d)
                        * s.powf(-w[9])
                        * (((1.0 - r) * w[10]).exp() - 1.0);
                    s * (1.0 + growth)
                };
                let next_d = d - w[6] * (idx as f64 - 2.0);
                let next_d = (1.0 - w[7]) * next_d + w[7] * w[4];
                (next_s.max(MIN_REPLAY_STABILITY), next_d.clamp(1.0, 10.0))
            }
        });
    }

    let Some((s, _)) = memory else {
        return 0.0;
    };
    let p = recall(sample.target_interval, s).clamp(PREDICTION_EPSILON, 1.0 - PREDICTION_EPSILON);
    -(sample.label * p.ln() + (1.0 - sample.label) * (1.0 - p).ln())
}
