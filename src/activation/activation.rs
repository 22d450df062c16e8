use serde::{Deserialize, Serialize};
use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// A pure scalar-to-scalar transform applied element-wise by a layer.
///
/// `derivative` receives the already-activated output `y`, not the
/// pre-activation input, so backprop can reuse the forward-pass values.
pub trait Activation {
    fn activate(&self, x: f64) -> f64;

    fn derivative(&self, y: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
}

impl Activation for ActivationFunction {
    fn activate(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
        }
    }

    fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_derivative(y),
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
        }
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// `y * (1 - y)` where `y` is a sigmoid output.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

pub fn sigmoid_derivative_matrix(activated: &Matrix) -> Matrix {
    activated.apply(sigmoid_derivative)
}
