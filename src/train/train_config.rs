use serde::{Deserialize, Serialize};

/// Configuration for a `train_network` run.
///
/// # Fields
/// - `epochs`    — total number of full passes over the training data
/// - `log_every` — emit a debug progress line every this many samples;
///                 `0` disables per-sample progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
        }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
