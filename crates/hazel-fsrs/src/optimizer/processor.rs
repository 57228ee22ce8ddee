//! History windowing: review histories → fixed-width training samples

use serde::{Deserialize, Serialize};

use crate::card::{Rating, ReviewHistory};

/// Reviews of context kept per sample
pub const MAX_HISTORY_LENGTH: usize = 5;

/// One prediction target plus the reviews leading up to it
///
/// Context is right-aligned: with three prior reviews, slots 2..5 are filled
/// and slot 4 is the most recent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSample {
    pub time_history: [f64; MAX_HISTORY_LENGTH],
    pub rating_history: [u8; MAX_HISTORY_LENGTH],
    pub history_length: usize,
    /// Elapsed days at the review being predicted
    pub target_interval: f64,
    /// 0 if the review was Again, 1 otherwise
    pub label: f64,
}

impl TrainingSample {
    /// Filled `(elapsed_days, grade)` slots, oldest first
    pub fn window(&self) -> impl Iterator<Item = (f64, u8)> + '_ {
        let start = MAX_HISTORY_LENGTH - self.history_length.min(MAX_HISTORY_LENGTH);
        (start..MAX_HISTORY_LENGTH).map(move |i| (self.time_history[i], self.rating_history[i]))
    }
}

/// Turn every history with at least two reviews into training samples
pub fn process_histories(histories: &[ReviewHistory]) -> Vec<TrainingSample> {
    let mut samples = Vec::new();

    for history in histories {
        let logs = history.sorted_logs();
        if logs.len() < 2 {
            continue;
        }

        for i in 1..logs.len() {
            let target = &logs[i];
            let window_start = i.saturating_sub(MAX_HISTORY_LENGTH);
            let window = &logs[window_start..i];
            let offset = MAX_HISTORY_LENGTH - window.len();

            let mut sample = TrainingSample {
                history_length: window.len(),
                target_interval: target.elapsed_days as f64,
                label: if target.rating == Rating::Again { 0.0 } else { 1.0 },
                ..TrainingSample::default()
            };
            for (k, log) in window.iter().enumerate() {
                sample.time_history[offset + k] = log.elapsed_days as f64;
                sample.rating_history[offset + k] = log.rating.as_u8();
            }

            samples.push(sample);
        }
    }

    samples
}
