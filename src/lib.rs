pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod layers;
pub mod network;
pub mod data;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::{Matrix, Vector};
pub use activation::activation::{Activation, ActivationFunction};
pub use layers::dense::Layer;
pub use network::network::NeuralNetwork;
pub use loss::mse::MseLoss;
pub use data::mnist::{load_mnist_csv, target_vector, MnistSample};
pub use train::{evaluate, train_network, EpochStats, Evaluation, TrainConfig};
pub use config::RunConfig;
