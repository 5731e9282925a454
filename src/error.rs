use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Everything that can stop a single visualization call.
// Nothing is retried; the caller decides whether one failing source aborts the run.
#[derive(Error, Debug)]
pub enum VisualizeError {
    #[error("cannot open {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // A row needs at least one feature column in front of the label
    #[error("row {row} has no feature columns")]
    Malformed { row: usize },

    #[error("row {row}, column {column}: {value:?} is not a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("{feature_count} features is not a perfect square")]
    NotSquare { feature_count: usize },

    #[error("{feature_count} features cannot form a {width}x{height} image")]
    Shape {
        feature_count: usize,
        width: usize,
        height: usize,
    },

    #[error("cannot draw {requested} distinct rows from {available} available")]
    Sampling { requested: usize, available: usize },

    #[error("sample count must be at least 1")]
    EmptySample,

    #[error("render failed: {message}")]
    Render { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl VisualizeError {
    // NotSquare and Shape are both the shape failure of the pipeline
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::NotSquare { .. } | Self::Shape { .. })
    }
}

pub type Result<T> = std::result::Result<T, VisualizeError>;
