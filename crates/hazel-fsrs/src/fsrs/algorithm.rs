//! FSRS-6 formulas and model parameters
//!
//! Everything here is pure arithmetic over [`Parameters`]. Any value that would
//! come out non-finite or non-positive is replaced by a documented floor
//! (stability `0.01`, retrievability `0.0001`) instead of propagating.

use serde::{Deserialize, Serialize};

use super::alea::Alea;
use crate::card::Rating;
use crate::error::{Error, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of model weights (FSRS-6)
pub const WEIGHT_COUNT: usize = 21;

/// FSRS-6 default weights
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.212, 1.2931, 2.3065, 8.2956, 6.4133, 0.8334, 3.0194, 0.001, 1.8722, 0.1666, 0.796, 1.4835,
    0.0614, 0.2629, 1.6483, 0.6014, 1.8729, 0.5425, 0.0912, 0.0658, 0.1542,
];

/// Default target retention
pub const DEFAULT_RETENTION: f64 = 0.9;

/// Default maximum interval (days)
pub const DEFAULT_MAXIMUM_INTERVAL: f64 = 365.0;

/// Largest accepted maximum interval (days), about a century
pub const MAX_MAXIMUM_INTERVAL: f64 = 36500.0;

/// Stability floor applied before dividing or exponentiating
pub const MIN_STABILITY: f64 = 0.01;

/// Retrievability returned when the curve is undefined
pub const MIN_RETRIEVABILITY: f64 = 0.0001;

pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Retrievability at `t = S` that anchors the forgetting curve
const CURVE_ANCHOR_RETENTION: f64 = 0.9;

/// Intervals below this are never fuzzed
const FUZZ_MIN_INTERVAL: f64 = 2.5;

/// (start, end, growth factor) bands of the fuzz window
const FUZZ_RANGES: [(f64, f64, f64); 3] = [
    (2.5, 7.0, 0.15),
    (7.0, 20.0, 0.10),
    (20.0, f64::INFINITY, 0.05),
];

// ============================================================================
// PARAMETERS
// ============================================================================

/// Model parameters
///
/// `decay` and `factor` are derived from `w[20]` and kept in sync whenever the
/// weights change. Scheduling never mutates a `Parameters`; the per-review fuzz
/// seed is passed in explicitly, so one instance can be shared across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParametersConfig", into = "ParametersConfig")]
pub struct Parameters {
    /// Target probability of recall when a card comes due
    pub request_retention: f64,
    /// Longest interval the scheduler may produce (days)
    pub maximum_interval: f64,
    /// Use same-day learning steps (short-term strategy)
    pub enable_short_term: bool,
    /// Jitter intervals deterministically
    pub enable_fuzz: bool,
    w: [f64; WEIGHT_COUNT],
    decay: f64,
    factor: f64,
}

/// Serialized form of [`Parameters`] (derived constants omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ParametersConfig {
    request_retention: f64,
    maximum_interval: f64,
    weights: [f64; WEIGHT_COUNT],
    enable_short_term: bool,
    enable_fuzz: bool,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Parameters::default().into()
    }
}

impl From<ParametersConfig> for Parameters {
    fn from(config: ParametersConfig) -> Self {
        let mut params = Parameters {
            request_retention: config.request_retention,
            maximum_interval: config.maximum_interval,
            enable_short_term: config.enable_short_term,
            enable_fuzz: config.enable_fuzz,
            w: config.weights,
            decay: 0.0,
            factor: 0.0,
        };
        params.sync_curve();
        params
    }
}

impl From<Parameters> for ParametersConfig {
    fn from(params: Parameters) -> Self {
        Self {
            request_retention: params.request_retention,
            maximum_interval: params.maximum_interval,
            weights: params.w,
            enable_short_term: params.enable_short_term,
            enable_fuzz: params.enable_fuzz,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from_weights(DEFAULT_WEIGHTS)
    }
}

impl Parameters {
    /// Default parameters with custom weights
    pub fn from_weights(weights: [f64; WEIGHT_COUNT]) -> Self {
        let mut params = Self {
            request_retention: DEFAULT_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            enable_short_term: true,
            enable_fuzz: false,
            w: weights,
            decay: 0.0,
            factor: 0.0,
        };
        params.sync_curve();
        params
    }

    /// Set target retention
    pub fn with_retention(mut self, request_retention: f64) -> Self {
        self.request_retention = request_retention;
        self
    }

    /// Set maximum interval (days)
    pub fn with_maximum_interval(mut self, days: f64) -> Self {
        self.maximum_interval = days;
        self
    }

    /// Toggle same-day learning steps
    pub fn with_short_term(mut self, enabled: bool) -> Self {
        self.enable_short_term = enabled;
        self
    }

    /// Toggle interval fuzzing
    pub fn with_fuzz(mut self, enabled: bool) -> Self {
        self.enable_fuzz = enabled;
        self
    }

    /// Model weights
    pub fn weights(&self) -> &[f64; WEIGHT_COUNT] {
        &self.w
    }

    /// Replace the weights (e.g. with calibrated ones) and re-derive the curve
    pub fn set_weights(&mut self, weights: [f64; WEIGHT_COUNT]) {
        self.w = weights;
        self.sync_curve();
    }

    /// Forgetting-curve exponent (`-w20`)
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Forgetting-curve scale, chosen so that `R(S) = 0.9`
    pub fn factor(&self) -> f64 {
        self.factor
    }

    fn sync_curve(&mut self) {
        self.decay = -self.w[20];
        self.factor = CURVE_ANCHOR_RETENTION.powf(1.0 / self.decay) - 1.0;
    }

    /// Check the parameters are usable for scheduling
    pub fn validate(&self) -> Result<()> {
        if !(self.request_retention > 0.0 && self.request_retention < 1.0) {
            return Err(Error::InvalidInput(format!(
                "request retention must be in (0, 1), got {}",
                self.request_retention
            )));
        }
        if !(1.0..=MAX_MAXIMUM_INTERVAL).contains(&self.maximum_interval) {
            return Err(Error::InvalidInput(format!(
                "maximum interval must be in [1, {MAX_MAXIMUM_INTERVAL}] days, got {}",
                self.maximum_interval
            )));
        }
        if let Some(i) = self.w.iter().position(|w| !w.is_finite()) {
            return Err(Error::InvalidInput(format!("weight w[{i}] is not finite")));
        }
        if self.w[20] <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "decay weight w[20] must be positive, got {}",
                self.w[20]
            )));
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Parameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize parameters to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // FORMULAS
    // ========================================================================

    /// Probability of recall after `elapsed_days` at the given stability
    pub fn forgetting_curve(&self, elapsed_days: f64, stability: f64) -> f64 {
        let s = stability.max(MIN_STABILITY);
        let r = (1.0 + self.factor * elapsed_days / s).powf(self.decay);
        if !r.is_finite() || r <= 0.0 {
            return MIN_RETRIEVABILITY;
        }
        r
    }

    /// Initial stability after the first review
    pub fn init_stability(&self, rating: Rating) -> f64 {
        self.w[rating.as_u8() as usize - 1].max(MIN_STABILITY)
    }

    /// Initial difficulty after the first review
    pub fn init_difficulty(&self, rating: Rating) -> f64 {
        constrain_difficulty(self.w[4] - (self.w[5] * (rating.value() - 1.0)).exp() + 1.0)
    }

    /// Difficulty after a review
    pub fn next_difficulty(&self, difficulty: f64, rating: Rating) -> f64 {
        let delta = -self.w[6] * (rating.value() - 3.0);
        let next = difficulty + linear_damping(delta, difficulty);
        constrain_difficulty(self.mean_reversion(self.init_difficulty(Rating::Hard), next))
    }

    /// Pull `current` toward `init` by `w7`
    pub fn mean_reversion(&self, init: f64, current: f64) -> f64 {
        self.w[7] * init + (1.0 - self.w[7]) * current
    }

    /// Same-day stability update
    pub fn short_term_stability(&self, stability: f64, rating: Rating) -> f64 {
        stability.max(MIN_STABILITY) * (self.w[17] * ((rating.value() - 3.0) + self.w[18])).exp()
    }

    /// Stability after a successful recall
    pub fn next_recall_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        let hard_penalty = if rating == Rating::Hard { self.w[15] } else { 1.0 };
        let easy_bonus = if rating == Rating::Easy { self.w[16] } else { 1.0 };
        let base = stability.max(MIN_STABILITY);

        let growth = self.w[8].exp()
            * (11.0 - difficulty)
            * base.powf(-self.w[9])
            * (((1.0 - retrievability) * self.w[10]).exp() - 1.0)
            * hard_penalty
            * easy_bonus;

        floor_stability(stability * (1.0 + growth))
    }

    /// Stability after a lapse
    pub fn next_forget_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
    ) -> f64 {
        let base = stability.max(MIN_STABILITY);
        floor_stability(
            self.w[11]
                * difficulty.powf(-self.w[12])
                * ((base + 1.0).powf(self.w[13]) - 1.0)
                * ((1.0 - retrievability) * self.w[14]).exp(),
        )
    }

    /// Upper bound for a lapse's stability in the short-term strategy
    pub fn same_day_lapse_stability(&self, stability: f64) -> f64 {
        stability / (self.w[17] * self.w[18]).exp()
    }

    /// Interval in whole days that hits `request_retention`, then fuzzed
    ///
    /// `seed` is the per-review fuzz seed; it is ignored unless fuzzing is on.
    pub fn next_interval(&self, stability: f64, elapsed_days: f64, seed: &str) -> f64 {
        let raw = stability / self.factor * (self.request_retention.powf(1.0 / self.decay) - 1.0);
        let interval = raw.round_ties_even().min(self.maximum_interval).max(1.0);
        self.apply_fuzz(interval, elapsed_days, self.enable_fuzz, seed)
    }

    /// Deterministically jitter an interval inside its fuzz window
    pub fn apply_fuzz(&self, interval: f64, elapsed_days: f64, enabled: bool, seed: &str) -> f64 {
        if !enabled || interval < FUZZ_MIN_INTERVAL {
            return interval;
        }
        let fuzz_factor = Alea::new(seed).double();
        let (min_ivl, max_ivl) = self.fuzz_range(interval, elapsed_days);
        (fuzz_factor * (max_ivl - min_ivl + 1) as f64).floor() + min_ivl as f64
    }

    /// Inclusive `(min, max)` window an interval may be fuzzed into
    pub fn fuzz_range(&self, interval: f64, elapsed_days: f64) -> (u64, u64) {
        let delta = FUZZ_RANGES.iter().fold(1.0, |acc, (start, end, factor)| {
            acc + factor * (interval.min(*end) - start).max(0.0)
        });

        let interval = interval.min(self.maximum_interval);
        let mut min_ivl = (interval - delta).round_ties_even().max(2.0);
        let max_ivl = (interval + delta).round_ties_even().min(self.maximum_interval);
        if interval > elapsed_days {
            min_ivl = min_ivl.max(elapsed_days + 1.0);
        }
        min_ivl = min_ivl.min(max_ivl);

        (min_ivl as u64, max_ivl as u64)
    }
}

/// Clamp difficulty into `[1, 10]`
pub fn constrain_difficulty(difficulty: f64) -> f64 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Shrink a difficulty change as difficulty approaches 10
fn linear_damping(delta: f64, difficulty: f64) -> f64 {
    (MAX_DIFFICULTY - difficulty) * delta / 9.0
}

fn floor_stability(stability: f64) -> f64 {
    if !stability.is_finite() || stability <= 0.0 {
        MIN_STABILITY
    } else {
        stability
    }
}
