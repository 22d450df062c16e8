//! MNIST in CSV form: a header row, then one row per image with the label in
//! the first column and 784 raw pixel values (0–255) after it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{NnError, Result};
use crate::math::matrix::Vector;

pub const MNIST_PIXELS: usize = 28 * 28;
pub const MNIST_CLASSES: usize = 10;

const TARGET_ON: f64 = 0.99;
const TARGET_OFF: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct MnistSample {
    pub label: usize,
    pub input: Vector,
}

/// Maps a raw 0–255 pixel into `[0.01, 1.0]`, keeping zero inputs away from
/// zero so they still move the weights.
pub fn normalize_pixel(raw: f64) -> f64 {
    (raw / 255.0 * 0.99) + 0.01
}

/// Soft one-hot target: `0.99` at `label`, `0.01` everywhere else.
pub fn target_vector(label: usize, size: usize) -> Result<Vector> {
    if label >= size {
        return Err(NnError::IndexOutOfRange {
            axis: "label",
            index: label,
            bound: size,
        });
    }
    let mut target = vec![TARGET_OFF; size];
    target[label] = TARGET_ON;
    Ok(target)
}

pub fn load_mnist_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MnistSample>> {
    let path = path.as_ref();
    let samples = read_mnist_csv(File::open(path)?)?;
    debug!(path = %path.display(), samples = samples.len(), "loaded dataset");
    Ok(samples)
}

/// Parses every row in file order. Any malformed row fails the whole read.
pub fn read_mnist_csv<R: Read>(reader: R) -> Result<Vec<MnistSample>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut samples = Vec::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;

        let label_cell = record.get(0).unwrap_or_default().trim();
        let label: usize = label_cell.parse().map_err(|_| NnError::Parse {
            row,
            message: format!("label '{}' is not a non-negative integer", label_cell),
        })?;
        if label >= MNIST_CLASSES {
            return Err(NnError::Parse {
                row,
                message: format!("label {} is not a digit", label),
            });
        }

        let input = record
            .iter()
            .skip(1)
            .map(|cell| {
                cell.trim()
                    .parse::<f64>()
                    .map(normalize_pixel)
                    .map_err(|_| NnError::Parse {
                        row,
                        message: format!("pixel '{}' is not a number", cell),
                    })
            })
            .collect::<Result<Vector>>()?;
        if input.is_empty() {
            return Err(NnError::Parse {
                row,
                message: "row has no pixel columns".into(),
            });
        }

        samples.push(MnistSample { label, input });
    }

    Ok(samples)
}
