use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::{sigmoid_derivative_matrix, ActivationFunction};
use crate::error::{NnError, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;

/// Two trainable layers (hidden, output), both sigmoid, trained one sample
/// at a time with MSE loss.
///
/// Shape invariants, checked by every constructor and on decode:
/// - `hidden.weights` is (hidden_size × input_size)
/// - `output.weights` is (output_size × hidden_size)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkRecord")]
pub struct NeuralNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    hidden: Layer,
    output: Layer,
}

#[derive(Deserialize)]
struct NetworkRecord {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    hidden: Layer,
    output: Layer,
}

impl TryFrom<NetworkRecord> for NeuralNetwork {
    type Error = NnError;

    fn try_from(r: NetworkRecord) -> Result<Self> {
        NeuralNetwork::from_layers(
            r.input_size,
            r.hidden_size,
            r.output_size,
            r.learning_rate,
            r.hidden,
            r.output,
        )
    }
}

const ACTIVATION: ActivationFunction = ActivationFunction::Sigmoid;

impl NeuralNetwork {
    /// Builds a network with random weights drawn from the thread RNG.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
    ) -> Result<NeuralNetwork> {
        NeuralNetwork::with_rng(
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            &mut rand::thread_rng(),
        )
    }

    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        let hidden = Layer::random(input_size, hidden_size, rng)?;
        let output = Layer::random(hidden_size, output_size, rng)?;
        NeuralNetwork::from_layers(input_size, hidden_size, output_size, learning_rate, hidden, output)
    }

    /// Builds a network around existing parameters.
    pub fn from_layers(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        hidden: Layer,
        output: Layer,
    ) -> Result<NeuralNetwork> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NnError::InvalidLearningRate(learning_rate));
        }
        if hidden.weights().shape() != (hidden_size, input_size) {
            return Err(NnError::InvalidLayer(format!(
                "hidden weights are {:?}, expected ({}, {})",
                hidden.weights().shape(),
                hidden_size,
                input_size
            )));
        }
        if output.weights().shape() != (output_size, hidden_size) {
            return Err(NnError::InvalidLayer(format!(
                "output weights are {:?}, expected ({}, {})",
                output.weights().shape(),
                output_size,
                hidden_size
            )));
        }

        Ok(NeuralNetwork {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            hidden,
            output,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    /// Forward pass; returns the hidden and output activations as columns.
    pub fn forward(&self, input: &[f64]) -> Result<(Matrix, Matrix)> {
        let hidden = self.hidden.forward_pass(input, &ACTIVATION)?;
        let output = self.output.forward_pass(hidden.data(), &ACTIVATION)?;
        Ok((hidden, output))
    }

    /// Index of the strongest output unit (lowest index on ties).
    pub fn predict(&self, input: &[f64]) -> Result<usize> {
        let (_, output) = self.forward(input)?;
        Ok(output.argmax())
    }

    /// One online gradient-descent step on a single sample.
    ///
    /// Returns the sample's loss as measured before the update. Both layers are
    /// replaced together once every step has succeeded; on error the network
    /// is left as it was.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        let target = Matrix::column(target)?;
        let input_matrix = Matrix::column(input)?;
        let lr = self.learning_rate;

        let (hidden_out, output_out) = self.forward(input)?;
        let loss = MseLoss::loss(&output_out, &target)?;

        // Output layer.
        let output_error = MseLoss::derivative(&output_out, &target)?;
        let output_delta = output_error.multiply_elementwise(&sigmoid_derivative_matrix(&output_out))?;
        let output_weights_grad = output_delta.multiply(&hidden_out.transpose())?;
        let next_output = self.output.apply_gradients(&output_weights_grad, &output_delta, lr)?;

        // Hidden layer, propagated through the pre-update output weights.
        let hidden_error = self.output.weights().transpose().multiply(&output_delta)?;
        let hidden_delta = hidden_error.multiply_elementwise(&sigmoid_derivative_matrix(&hidden_out))?;
        let hidden_weights_grad = hidden_delta.multiply(&input_matrix.transpose())?;
        let next_hidden = self.hidden.apply_gradients(&hidden_weights_grad, &hidden_delta, lr)?;

        self.output = next_output;
        self.hidden = next_hidden;

        Ok(loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zero_network() -> NeuralNetwork {
        let hidden = Layer::new(Matrix::zeros(3, 2).unwrap(), Matrix::zeros(3, 1).unwrap()).unwrap();
        let output = Layer::new(Matrix::zeros(2, 3).unwrap(), Matrix::zeros(2, 1).unwrap()).unwrap();
        NeuralNetwork::from_layers(2, 3, 2, 0.1, hidden, output).unwrap()
    }

    fn seeded(seed: u64) -> NeuralNetwork {
        NeuralNetwork::with_rng(4, 5, 3, 0.5, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_construction_shapes() {
        let net = NeuralNetwork::new(784, 200, 10, 0.1).unwrap();
        assert_eq!(net.hidden_layer().weights().shape(), (200, 784));
        assert_eq!(net.hidden_layer().biases().shape(), (200, 1));
        assert_eq!(net.output_layer().weights().shape(), (10, 200));
        assert_eq!(net.output_layer().biases().shape(), (10, 1));
        assert!(net.hidden_layer().weights().data().iter().all(|w| w.abs() <= 0.1));
        assert!(net.output_layer().biases().data().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_zero_size_fails() {
        assert!(matches!(
            NeuralNetwork::new(0, 3, 2, 0.1),
            Err(NnError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NeuralNetwork::new(2, 3, 2, lr),
                Err(NnError::InvalidLearningRate(_))
            ));
        }
    }

    #[test]
    fn test_from_layers_checks_architecture() {
        let hidden = Layer::new(Matrix::zeros(3, 2).unwrap(), Matrix::zeros(3, 1).unwrap()).unwrap();
        let output = Layer::new(Matrix::zeros(2, 4).unwrap(), Matrix::zeros(2, 1).unwrap()).unwrap();
        assert!(matches!(
            NeuralNetwork::from_layers(2, 3, 2, 0.1, hidden, output),
            Err(NnError::InvalidLayer(_))
        ));
    }

    #[test]
    fn test_zero_parameters_give_half_everywhere() {
        let net = zero_network();
        let (hidden, output) = net.forward(&[0.7, -1.3]).unwrap();
        assert_eq!(hidden.shape(), (3, 1));
        assert_eq!(output.shape(), (2, 1));
        for &v in hidden.data().iter().chain(output.data()) {
            assert_relative_eq!(v, 0.5);
        }
        // all outputs tie, so the first wins
        assert_eq!(net.predict(&[0.7, -1.3]).unwrap(), 0);
    }

    #[test]
    fn test_predict_in_range() {
        let net = seeded(3);
        for i in 0..20 {
            let x = i as f64 / 20.0;
            let class = net.predict(&[x, 1.0 - x, x * x, 0.5]).unwrap();
            assert!(class < net.output_size());
        }
    }

    #[test]
    fn test_predict_rejects_wrong_input_length() {
        let net = seeded(3);
        assert!(net.predict(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_train_step_decreases_loss() {
        let mut net = seeded(11);
        let input = [0.9, 0.1, 0.4, 0.6];
        let target = Matrix::column(&[0.99, 0.01, 0.01]).unwrap();

        let before = MseLoss::loss(&net.forward(&input).unwrap().1, &target).unwrap();
        let reported = net.train(&input, target.data()).unwrap();
        let after = MseLoss::loss(&net.forward(&input).unwrap().1, &target).unwrap();

        assert_relative_eq!(reported, before, epsilon = 1e-15);
        assert!(after < before, "loss went from {} to {}", before, after);
    }

    #[test]
    fn test_train_matches_hand_computed_step() {
        // Zero parameters: H = O = 0.5 everywhere, so every gradient is easy
        // to write down.
        let mut net = zero_network();
        let input = [1.0, 2.0];
        let target = [1.0, 0.0];
        net.train(&input, &target).unwrap();

        // D_out = (O - t) * O(1 - O) = [-0.125, 0.125]
        // G_out = D_out × Hᵀ, every entry of row r is D_out[r] * 0.5
        let ow = net.output_layer().weights();
        for j in 0..3 {
            assert_relative_eq!(ow.get(0, j).unwrap(), 0.1 * 0.0625, epsilon = 1e-12);
            assert_relative_eq!(ow.get(1, j).unwrap(), -0.1 * 0.0625, epsilon = 1e-12);
        }
        assert_relative_eq!(net.output_layer().biases().data()[0], 0.0125, epsilon = 1e-12);
        assert_relative_eq!(net.output_layer().biases().data()[1], -0.0125, epsilon = 1e-12);

        // Old output weights were zero, so no error reaches the hidden layer.
        assert!(net.hidden_layer().weights().data().iter().all(|&w| w == 0.0));
        assert!(net.hidden_layer().biases().data().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_train_failure_leaves_network_unchanged() {
        let mut net = seeded(5);
        let snapshot = net.clone();
        assert!(net.train(&[0.1, 0.2, 0.3, 0.4], &[0.99, 0.01]).is_err());
        assert_eq!(net, snapshot);
    }

    #[test]
    fn test_repeated_training_learns_sample() {
        let mut net = seeded(21);
        let input = [0.2, 0.8, 0.5, 0.1];
        let target = [0.01, 0.99, 0.01];
        for _ in 0..200 {
            net.train(&input, &target).unwrap();
        }
        assert_eq!(net.predict(&input).unwrap(), 1);
    }
}
