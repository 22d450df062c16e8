use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NnError, Result};

/// An ordered sequence of reals: one row or column of a matrix, a single
/// sample's input, or a target vector.
pub type Vector = Vec<f64>;

/// Dense row-major matrix of `f64`.
///
/// Always holds `rows * cols` elements with both dimensions non-zero. Every
/// operation returns a fresh matrix; none mutate `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unvalidated wire form; decoding funnels through `Matrix::new`.
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = NnError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::new(raw.rows, raw.cols, raw.data)
    }
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(NnError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        let len = element_count(rows, cols)?;
        Matrix::new(rows, cols, vec![0.0; len])
    }

    /// Every entry drawn independently and uniformly from `[low, high]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Result<Matrix> {
        let len = element_count(rows, cols)?;
        let data = (0..len).map(|_| rng.gen_range(low..=high)).collect();
        Matrix::new(rows, cols, data)
    }

    /// Builds an N×1 column matrix from a vector.
    pub fn column(values: &[f64]) -> Result<Matrix> {
        Matrix::new(values.len(), 1, values.to_vec())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major element storage.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[row * self.cols + col])
    }

    pub fn row_vector(&self, row: usize) -> Result<&[f64]> {
        self.check_row(row)?;
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    pub fn col_vector(&self, col: usize) -> Result<Vector> {
        self.check_col(col)?;
        Ok((0..self.rows)
            .map(|row| self.data[row * self.cols + col])
            .collect())
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Hadamard product of two same-shape matrices.
    pub fn multiply_elementwise(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "multiply_elementwise", |a, b| a * b)
    }

    /// Matrix product. Each cell is the dot product of a row of `self` with a
    /// column of `other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(NnError::ShapeMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }

        // Gather columns once instead of once per output row.
        let columns = (0..other.cols)
            .map(|j| other.col_vector(j))
            .collect::<Result<Vec<_>>>()?;

        let mut data = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            let row = self.row_vector(i)?;
            for column in &columns {
                data.push(dot(row, column)?);
            }
        }

        Matrix::new(self.rows, other.cols, data)
    }

    pub fn apply<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.apply(|x| x * factor)
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }

        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Sum of all elements divided by the element count.
    pub fn average(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Index of the largest element in row-major order. Ties go to the first.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &value) in self.data.iter().enumerate().skip(1) {
            if value > self.data[best] {
                best = i;
            }
        }
        best
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, functor: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(NnError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| functor(a, b))
                .collect(),
        })
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(NnError::IndexOutOfRange {
                axis: "row",
                index: row,
                bound: self.rows,
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(NnError::IndexOutOfRange {
                axis: "column",
                index: col,
                bound: self.cols,
            });
        }
        Ok(())
    }
}

/// `rows * cols`, rejecting zero dimensions and products that overflow.
fn element_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(NnError::InvalidDimension { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(NnError::InvalidDimension { rows, cols })
}

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(NnError::VectorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}
