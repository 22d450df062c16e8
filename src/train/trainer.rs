use std::time::Instant;

use tracing::{debug, info};

use crate::data::mnist::{target_vector, MnistSample};
use crate::error::{NnError, Result};
use crate::network::network::NeuralNetwork;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Runs `config.epochs` sequential passes of online SGD over `samples`, in
/// the order given.
///
/// Returns one `EpochStats` per completed epoch. The first failing sample
/// aborts the run; samples trained before it keep their updates.
pub fn train_network(
    network: &mut NeuralNetwork,
    samples: &[MnistSample],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if samples.is_empty() {
        return Err(NnError::EmptyDataset);
    }

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let mut total_loss = 0.0;

        for (i, sample) in samples.iter().enumerate() {
            let target = target_vector(sample.label, network.output_size())?;
            total_loss += network.train(&sample.input, &target)?;

            if config.log_every > 0 && (i + 1) % config.log_every == 0 {
                debug!(
                    epoch,
                    sample = i + 1,
                    running_loss = total_loss / (i + 1) as f64,
                    "training"
                );
            }
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_loss: total_loss / samples.len() as f64,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            epoch = stats.epoch,
            total = stats.total_epochs,
            loss = stats.mean_loss,
            elapsed_ms = stats.elapsed_ms,
            "epoch complete"
        );
        history.push(stats);
    }

    Ok(history)
}
