use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::mnist::{MNIST_CLASSES, MNIST_PIXELS};
use crate::train::train_config::TrainConfig;

/// Run-level settings for the `digit-net` binary.
///
/// These are presentation-layer defaults, not part of the algorithm: every
/// field can be overridden from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    pub log_every: usize,
    pub train_data: PathBuf,
    pub test_data: PathBuf,
    pub model_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input_size: MNIST_PIXELS,
            hidden_size: 200,
            output_size: MNIST_CLASSES,
            learning_rate: 0.1,
            epochs: 5,
            log_every: 10_000,
            train_data: PathBuf::from("data/mnist_train.csv"),
            test_data: PathBuf::from("data/mnist_test.csv"),
            model_path: PathBuf::from("model.bin"),
        }
    }
}

impl RunConfig {
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs).with_log_every(self.log_every)
    }
}
