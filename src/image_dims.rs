use ndarray::Array2;

use crate::error::{Result, VisualizeError};
use crate::Pixel;

// Width and height of the images stored in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    pub width: usize,
    pub height: usize,
}

impl ImageDims {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    // Infer square dimensions from the number of features per row.
    // Only perfect squares are accepted.
    pub fn square_for(feature_count: usize) -> Result<Self> {
        let side = integer_sqrt(feature_count);
        if feature_count == 0 || side * side != feature_count {
            return Err(VisualizeError::NotSquare { feature_count });
        }
        Ok(Self::new(side, side))
    }

    // Explicitly configured dimensions have to cover every feature exactly
    pub fn check(&self, feature_count: usize) -> Result<()> {
        if self.area() == 0 || self.area() != feature_count {
            return Err(VisualizeError::Shape {
                feature_count,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    // Row-major reshape of a flattened image into (height, width)
    pub fn reshape(&self, features: &[Pixel]) -> Result<Array2<Pixel>> {
        self.check(features.len())?;
        Array2::from_shape_vec((self.height, self.width), features.to_vec()).map_err(|_| {
            VisualizeError::Shape {
                feature_count: features.len(),
                width: self.width,
                height: self.height,
            }
        })
    }
}

// Floor of the square root, exact for every usize
fn integer_sqrt(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side.checked_mul(side).map_or(true, |square| square > n) {
        side -= 1;
    }
    while (side + 1).checked_mul(side + 1).map_or(false, |square| square <= n) {
        side += 1;
    }
    side
}
