// This module contains everything that reads images out of CSV files

mod labeled_image;
pub use labeled_image::{Label, LabeledImage};

mod load_dataset;
pub use load_dataset::load_dataset;

// All rows of one CSV file, split into typed records at load time.
// Every record carries exactly `feature_count` features.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<LabeledImage>,
    feature_count: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Number of pixel columns in front of the label column
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn records(&self) -> &[LabeledImage] {
        &self.records
    }
}

#[cfg(test)]
pub(crate) fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}
