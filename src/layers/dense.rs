use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::Activation;
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// Half-width of the uniform range fresh weights are drawn from.
pub const INIT_WEIGHT_RANGE: f64 = 0.1;

/// A fully-connected layer: `weights` is (out × in), `biases` is (out × 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct Layer {
    weights: Matrix,
    biases: Matrix,
}

#[derive(Deserialize)]
struct RawLayer {
    weights: Matrix,
    biases: Matrix,
}

impl TryFrom<RawLayer> for Layer {
    type Error = NnError;

    fn try_from(raw: RawLayer) -> Result<Self> {
        Layer::new(raw.weights, raw.biases)
    }
}

impl Layer {
    pub fn new(weights: Matrix, biases: Matrix) -> Result<Layer> {
        if biases.cols() != 1 {
            return Err(NnError::InvalidLayer(format!(
                "biases must be a column, got {:?}",
                biases.shape()
            )));
        }
        if weights.rows() != biases.rows() {
            return Err(NnError::InvalidLayer(format!(
                "weights {:?} and biases {:?} disagree on output size",
                weights.shape(),
                biases.shape()
            )));
        }
        Ok(Layer { weights, biases })
    }

    /// Weights uniform in `[-0.1, 0.1]`, biases zero.
    pub fn random<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Result<Layer> {
        let weights = Matrix::random_uniform(
            output_size,
            input_size,
            -INIT_WEIGHT_RANGE,
            INIT_WEIGHT_RANGE,
            rng,
        )?;
        let biases = Matrix::zeros(output_size, 1)?;
        Layer::new(weights, biases)
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows()
    }

    /// `activation(weights × input + biases)` as an (out × 1) column.
    pub fn forward_pass<A>(&self, input: &[f64], activation: &A) -> Result<Matrix>
    where
        A: Activation + ?Sized,
    {
        let input = Matrix::column(input)?;
        let z = self.weights.multiply(&input)?.add(&self.biases)?;
        Ok(z.apply(|x| activation.activate(x)))
    }

    /// Returns the layer after one gradient-descent step; `self` is untouched.
    pub fn apply_gradients(&self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) -> Result<Layer> {
        let weights = self.weights.subtract(&weights_grad.scale(lr))?;
        let biases = self.biases.subtract(&biases_grad.scale(lr))?;
        Ok(Layer { weights, biases })
    }
}
