pub mod activation;

pub use activation::{sigmoid, sigmoid_derivative, sigmoid_derivative_matrix, Activation, ActivationFunction};
