use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use digit_net::{evaluate, load_mnist_csv, train_network, NeuralNetwork, RunConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "digit-net")]
#[command(about = "Train or evaluate a two-layer sigmoid network on MNIST CSV data", long_about = None)]
struct Cli {
    /// Train a fresh network and save it
    #[arg(long, conflicts_with = "evaluate")]
    train: bool,

    /// Load a saved network and report test accuracy
    #[arg(long)]
    evaluate: bool,

    /// Training CSV (header row, label then pixels)
    #[arg(long)]
    train_data: Option<PathBuf>,

    /// Test CSV used by --evaluate
    #[arg(long)]
    test_data: Option<PathBuf>,

    /// Where the model is written (--train) or read (--evaluate)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Passes over the training set
    #[arg(short, long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    hidden: Option<usize>,

    /// Verbosity level
    #[arg(
        short,
        long,
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mut cfg = RunConfig::default();
        if let Some(path) = &self.train_data {
            cfg.train_data = path.clone();
        }
        if let Some(path) = &self.test_data {
            cfg.test_data = path.clone();
        }
        if let Some(path) = &self.model {
            cfg.model_path = path.clone();
        }
        if let Some(epochs) = self.epochs {
            cfg.epochs = epochs;
        }
        if let Some(lr) = self.learning_rate {
            cfg.learning_rate = lr;
        }
        if let Some(hidden) = self.hidden {
            cfg.hidden_size = hidden;
        }
        cfg
    }
}

fn run_train(cfg: &RunConfig) -> Result<()> {
    let samples = load_mnist_csv(&cfg.train_data)
        .with_context(|| format!("failed to load training data from {}", cfg.train_data.display()))?;
    info!(samples = samples.len(), epochs = cfg.epochs, "training");

    let mut network = NeuralNetwork::new(
        cfg.input_size,
        cfg.hidden_size,
        cfg.output_size,
        cfg.learning_rate,
    )?;
    let history = train_network(&mut network, &samples, &cfg.train_config())?;

    network
        .save(&cfg.model_path)
        .with_context(|| format!("failed to save model to {}", cfg.model_path.display()))?;

    if let Some(last) = history.last() {
        println!("Final epoch loss: {:.6}", last.mean_loss);
    }
    println!("Model saved to {}", cfg.model_path.display());
    Ok(())
}

fn run_evaluate(cfg: &RunConfig) -> Result<()> {
    let network = NeuralNetwork::load(&cfg.model_path)
        .with_context(|| format!("failed to load model from {}", cfg.model_path.display()))?;
    let samples = load_mnist_csv(&cfg.test_data)
        .with_context(|| format!("failed to load test data from {}", cfg.test_data.display()))?;

    let eval = evaluate(&network, &samples)?;
    println!("Correct: {}/{}", eval.correct, eval.total);
    println!("Accuracy: {:.4}", eval.accuracy());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = cli.run_config();

    if cli.train {
        run_train(&cfg)
    } else if cli.evaluate {
        run_evaluate(&cfg)
    } else {
        println!("digit-net: pass --train to train a model or --evaluate to test one.");
        println!("Run `digit-net --help` for all options.");
        Ok(())
    }
}
