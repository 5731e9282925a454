use std::fs::File;
use std::path::Path;

use log::debug;

use super::{Dataset, Label, LabeledImage};
use crate::error::{Result, VisualizeError};
use crate::Pixel;

// Load labeled images from a csv file.
// The expected format is:
// - A header row, unless `has_headers` is false
// - One image per row
// - All columns but the last are pixel intensities, in row-major order
// - The last column is the label
// Every row must have the same number of columns.
pub fn load_dataset(path: impl AsRef<Path>, has_headers: bool) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VisualizeError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // Use the CSV crate; it rejects rows whose length differs from the first one
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(file);

    let records = reader
        .records()
        .map(|result| {
            let record = result.map_err(|err| read_error(path, err))?;
            parse_record(&record)
        })
        .collect::<Result<Vec<_>>>()?;

    let feature_count = records.first().map_or(0, |image| image.features.len());
    debug!(
        "Loaded {} rows with {} features each from {}",
        records.len(),
        feature_count,
        path.display()
    );

    Ok(Dataset {
        records,
        feature_count,
    })
}

// A failed read halfway through the file is still an unreadable source
fn read_error(path: &Path, err: csv::Error) -> VisualizeError {
    if !err.is_io_error() {
        return VisualizeError::Csv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => VisualizeError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => unreachable!("is_io_error was checked"),
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<LabeledImage> {
    let row = record.position().map_or(0, |pos| pos.line() as usize);
    let n_features = match record.len() {
        0 | 1 => return Err(VisualizeError::Malformed { row }),
        n => n - 1,
    };

    let features = record
        .iter()
        .take(n_features)
        .enumerate()
        .map(|(column, field)| {
            field.parse::<Pixel>().map_err(|_| VisualizeError::Parse {
                row,
                column,
                value: field.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LabeledImage {
        features,
        label: Label::new(&record[n_features]),
    })
}
