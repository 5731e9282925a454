pub mod dataset;
pub mod error;
pub mod figure;
pub mod image_dims;
pub mod render;
pub mod sample;
pub mod visualize;

pub use error::{Result, VisualizeError};
pub use visualize::{visualize, VisualizeOptions, DEFAULT_SAMPLE_COUNT};

// Pixel intensities are read as floats so filtered datasets keep their precision
pub type Pixel = f32;
