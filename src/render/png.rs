use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use log::info;

use super::RenderSink;
use crate::error::{Result, VisualizeError};
use crate::figure::Figure;

const DEFAULT_SCALE: u32 = 4;
const DEFAULT_GAP: u32 = 4;
const BACKGROUND: Luma<u8> = Luma([255]);

// Writes each figure to `<dir>/<stem>.png`, with the panel labels next to it
// in `<dir>/<stem>.labels.txt`. The stem is taken from the figure title.
pub struct PngSink {
    dir: PathBuf,
    // Every source pixel becomes a scale x scale block
    scale: u32,
    // Background pixels between neighbouring panels
    gap: u32,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            scale: DEFAULT_SCALE,
            gap: DEFAULT_GAP,
        }
    }

    pub fn image_path(&self, figure: &Figure) -> PathBuf {
        self.dir.join(format!("{}.png", output_stem(&figure.title)))
    }

    pub fn labels_path(&self, figure: &Figure) -> PathBuf {
        self.dir.join(format!("{}.labels.txt", output_stem(&figure.title)))
    }

    // Lay the panels out left to right, top-aligned
    fn compose(&self, figure: &Figure) -> Result<GrayImage> {
        if figure.panels.is_empty() {
            return Err(VisualizeError::Render {
                message: format!("figure {} has no panels", figure.title),
            });
        }

        let scale = self.scale as usize;
        let gap = self.gap as usize;
        let width = figure.panels.iter().map(|panel| panel.width() * scale).sum::<usize>()
            + gap * (figure.panels.len() - 1);
        let height = figure
            .panels
            .iter()
            .map(|panel| panel.height() * scale)
            .max()
            .unwrap_or(0);

        let mut canvas = GrayImage::from_pixel(width as u32, height as u32, BACKGROUND);
        let mut left = 0;
        for panel in &figure.panels {
            let luma = panel.to_luma8();
            for (index, &value) in luma.iter().enumerate() {
                let x = left + (index % panel.width()) * scale;
                let y = (index / panel.width()) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        canvas.put_pixel((x + dx) as u32, (y + dy) as u32, Luma([value]));
                    }
                }
            }
            left += panel.width() * scale + gap;
        }
        Ok(canvas)
    }
}

impl RenderSink for PngSink {
    fn render(&mut self, figure: Figure) -> Result<()> {
        let canvas = self.compose(&figure)?;
        fs::create_dir_all(&self.dir)?;

        let image_path = self.image_path(&figure);
        canvas.save(&image_path)?;

        let mut labels = String::new();
        for panel in &figure.panels {
            // Writing into a String cannot fail
            let _ = writeln!(labels, "{}\t{}", panel.row, panel.label);
        }
        let labels_path = self.labels_path(&figure);
        fs::write(&labels_path, labels)?;

        info!(
            "Wrote {} ({} panels) and {}",
            image_path.display(),
            figure.panels.len(),
            labels_path.display()
        );
        Ok(())
    }
}

fn output_stem(title: &str) -> String {
    Path::new(title)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "figure".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;
    use crate::figure::Panel;
    use ndarray::Array2;

    fn figure() -> Figure {
        let panel = |row, label, values: Vec<f32>| Panel {
            row,
            label: Label::new(label),
            image: Array2::from_shape_vec((2, 2), values).unwrap(),
        };
        Figure {
            title: "data/mnist_sobel.csv".to_string(),
            panels: vec![
                panel(3, "7", vec![0.0, 1.0, 2.0, 3.0]),
                panel(0, "1", vec![5.0, 5.0, 5.0, 10.0]),
            ],
        }
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem("mnist.csv"), "mnist");
        assert_eq!(output_stem("some/dir/mnist_hog_images.csv"), "mnist_hog_images");
        assert_eq!(output_stem(""), "figure");
    }

    #[test]
    fn test_writes_strip_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path());
        let figure = figure();
        sink.render(figure.clone()).unwrap();
        sink.finish().unwrap();

        let image = image::open(sink.image_path(&figure)).unwrap().into_luma8();
        assert_eq!(image.dimensions(), (2 * 4 + 4 + 2 * 4, 2 * 4));
        // Top-left pixel of the first panel is its minimum
        assert_eq!(image.get_pixel(0, 0), &Luma([0]));
        // Bottom-right block of the first panel is its maximum
        assert_eq!(image.get_pixel(7, 7), &Luma([255]));
        // Gap between panels stays background
        assert_eq!(image.get_pixel(8, 0), &BACKGROUND);
        // Second panel starts after the gap
        assert_eq!(image.get_pixel(12, 0), &Luma([0]));
        assert_eq!(image.get_pixel(19, 7), &Luma([255]));

        let labels = fs::read_to_string(sink.labels_path(&figure)).unwrap();
        assert_eq!(labels, "3\t7\n0\t1\n");
    }

    #[test]
    fn test_empty_figure_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSink::new(dir.path());
        let figure = Figure {
            title: "empty.csv".to_string(),
            panels: Vec::new(),
        };
        assert!(matches!(
            sink.render(figure),
            Err(VisualizeError::Render { .. })
        ));
    }
}
