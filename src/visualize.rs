use std::path::Path;

use log::debug;
use rand::Rng;

use crate::dataset::{load_dataset, Dataset};
use crate::error::{Result, VisualizeError};
use crate::figure::{Figure, Panel};
use crate::image_dims::ImageDims;
use crate::render::RenderSink;
use crate::sample::sample_rows;

pub const DEFAULT_SAMPLE_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizeOptions {
    // Image size; inferred as a square from the feature count when unset
    pub dims: Option<ImageDims>,
    pub has_headers: bool,
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            dims: None,
            has_headers: true,
        }
    }
}

// Load `source`, pick `sample_count` random rows and draw them as one figure on `sink`
pub fn visualize(
    source: impl AsRef<Path>,
    sample_count: usize,
    options: &VisualizeOptions,
    rng: &mut impl Rng,
    sink: &mut dyn RenderSink,
) -> Result<()> {
    let figure = sample_figure(source, sample_count, options, rng)?;
    sink.render(figure)
}

// Everything `visualize` does short of drawing
pub fn sample_figure(
    source: impl AsRef<Path>,
    sample_count: usize,
    options: &VisualizeOptions,
    rng: &mut impl Rng,
) -> Result<Figure> {
    let source = source.as_ref();
    let dataset = load_dataset(source, options.has_headers)?;
    if dataset.is_empty() {
        return Err(VisualizeError::Sampling {
            requested: sample_count,
            available: 0,
        });
    }

    let dims = resolve_dims(&dataset, options.dims)?;
    debug!(
        "Treating {} features of {} as {}x{} images",
        dataset.feature_count(),
        source.display(),
        dims.width,
        dims.height
    );

    let rows = sample_rows(dataset.len(), sample_count, rng)?;
    let panels = rows
        .into_iter()
        .map(|row| {
            let record = &dataset.records()[row];
            Ok(Panel {
                row,
                label: record.label.clone(),
                image: dims.reshape(&record.features)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Figure {
        title: source.display().to_string(),
        panels,
    })
}

fn resolve_dims(dataset: &Dataset, dims: Option<ImageDims>) -> Result<ImageDims> {
    match dims {
        Some(dims) => {
            dims.check(dataset.feature_count())?;
            Ok(dims)
        }
        None => ImageDims::square_for(dataset.feature_count()),
    }
}
