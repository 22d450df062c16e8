use crate::error::Result;
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - target)²)
    pub fn loss(predicted: &Matrix, target: &Matrix) -> Result<f64> {
        Ok(predicted.subtract(target)?.apply(|x| x * x).average())
    }

    /// Per-output gradient: predicted - target. The factor of 2 lives in the
    /// learning rate.
    pub fn derivative(predicted: &Matrix, target: &Matrix) -> Result<Matrix> {
        predicted.subtract(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_loss_of_identical_is_zero() {
        let x = Matrix::new(3, 1, vec![0.2, 0.4, 0.9]).unwrap();
        assert_eq!(MseLoss::loss(&x, &x).unwrap(), 0.0);
    }

    #[test]
    fn test_loss_value() {
        let p = Matrix::new(2, 1, vec![1.0, 0.0]).unwrap();
        let t = Matrix::new(2, 1, vec![0.0, 0.0]).unwrap();
        assert_relative_eq!(MseLoss::loss(&p, &t).unwrap(), 0.5);
    }

    #[test]
    fn test_derivative_has_no_factor_of_two() {
        let p = Matrix::new(2, 1, vec![0.75, 0.25]).unwrap();
        let t = Matrix::new(2, 1, vec![0.5, 0.5]).unwrap();
        assert_eq!(MseLoss::derivative(&p, &t).unwrap().data(), &[0.25, -0.25]);
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let p = Matrix::zeros(2, 1).unwrap();
        let t = Matrix::zeros(3, 1).unwrap();
        assert!(MseLoss::loss(&p, &t).is_err());
        assert!(MseLoss::derivative(&p, &t).is_err());
    }
}
