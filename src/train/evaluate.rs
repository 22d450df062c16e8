use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::mnist::MnistSample;
use crate::error::Result;
use crate::network::network::NeuralNetwork;

/// Outcome of running `predict` over a held-out set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of correct predictions in `[0, 1]`; `0.0` for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

pub fn evaluate(network: &NeuralNetwork, samples: &[MnistSample]) -> Result<Evaluation> {
    let mut correct = 0usize;
    for sample in samples {
        if network.predict(&sample.input)? == sample.label {
            correct += 1;
        }
    }

    let evaluation = Evaluation {
        correct,
        total: samples.len(),
    };
    info!(
        correct = evaluation.correct,
        total = evaluation.total,
        accuracy = evaluation.accuracy(),
        "evaluation complete"
    );
    Ok(evaluation)
}
