use std::fmt;

use crate::Pixel;

// The class of an image, kept as it was written in the label column.
// MNIST uses digits, but nothing here requires the label to be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// One row of a dataset: the flattened pixels and the trailing label
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledImage {
    pub features: Vec<Pixel>,
    pub label: Label,
}
