use ndarray::Array2;

use crate::dataset::Label;
use crate::Pixel;

// One image of a figure, captioned with its label
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    // Index of the source row (0-based, header excluded)
    pub row: usize,
    pub label: Label,
    pub image: Array2<Pixel>,
}

impl Panel {
    pub fn caption(&self) -> String {
        format!("Label: {}", self.label)
    }

    pub fn width(&self) -> usize {
        self.image.ncols()
    }

    pub fn height(&self) -> usize {
        self.image.nrows()
    }

    // Grayscale bytes in row-major order.
    // Each panel is stretched from its own min (black) to its own max (white),
    // so filtered images with small or negative values stay visible.
    // A constant image comes out black.
    pub fn to_luma8(&self) -> Vec<u8> {
        let (min, max) = self
            .image
            .iter()
            .filter(|value| value.is_finite())
            .fold((Pixel::INFINITY, Pixel::NEG_INFINITY), |(min, max), &value| {
                (min.min(value), max.max(value))
            });
        // f64 so that the span between extreme f32 values stays finite
        let (min, max) = (f64::from(min), f64::from(max));
        let range = max - min;

        self.image
            .iter()
            .map(|&value| {
                if !value.is_finite() || !range.is_finite() || range <= 0.0 {
                    0
                } else {
                    ((f64::from(value) - min) / range * 255.0).round() as u8
                }
            })
            .collect()
    }
}

// A single strip of panels drawn side by side, titled with where they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
}
