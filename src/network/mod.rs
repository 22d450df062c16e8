pub mod network;
pub mod persist;

pub use network::NeuralNetwork;
