use eframe::egui::{self, vec2, ColorImage, TextureHandle, TextureOptions};
use log::debug;

use super::RenderSink;
use crate::error::{Result, VisualizeError};
use crate::figure::Figure;

// Initial window size in points, the same 10x5 proportions as a plotting figure
const WINDOW_SIZE: [f32; 2] = [1000.0, 500.0];
const MIN_PANEL_SIDE: f32 = 16.0;
const MAX_PANEL_SIDE: f32 = 256.0;

// Shows figures in a native window.
// Only one event loop can run per process, so figures are collected and
// displayed together when the run finishes.
#[derive(Default)]
pub struct WindowSink {
    figures: Vec<Figure>,
}

impl WindowSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for WindowSink {
    fn render(&mut self, figure: Figure) -> Result<()> {
        debug!("Queued figure {} for display", figure.title);
        self.figures.push(figure);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.figures.is_empty() {
            return Ok(());
        }
        let figures = std::mem::take(&mut self.figures);

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
            ..Default::default()
        };

        // Blocks until the window is closed
        eframe::run_native(
            "mnist-peek",
            options,
            Box::new(move |_cc| Ok(Box::new(FigureViewer::new(figures)))),
        )
        .map_err(|err| VisualizeError::Render {
            message: err.to_string(),
        })
    }
}

struct FigureViewer {
    figures: Vec<Figure>,
    // One texture per panel, uploaded on the first frame
    textures: Option<Vec<Vec<TextureHandle>>>,
}

impl FigureViewer {
    fn new(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            textures: None,
        }
    }

    fn load_textures(&mut self, ctx: &egui::Context) {
        if self.textures.is_some() {
            return;
        }

        let textures = self
            .figures
            .iter()
            .enumerate()
            .map(|(figure_index, figure)| {
                figure
                    .panels
                    .iter()
                    .enumerate()
                    .map(|(panel_index, panel)| {
                        let image =
                            ColorImage::from_gray([panel.width(), panel.height()], &panel.to_luma8());
                        ctx.load_texture(
                            format!("figure{figure_index}_panel{panel_index}"),
                            image,
                            TextureOptions::NEAREST,
                        )
                    })
                    .collect()
            })
            .collect();
        self.textures = Some(textures);
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.load_textures(ctx);
        let Some(textures) = &self.textures else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (figure, figure_textures) in self.figures.iter().zip(textures) {
                    ui.vertical_centered(|ui| {
                        ui.heading(figure.title.as_str());
                    });

                    // Every panel gets the same width, splitting the row evenly
                    let count = figure.panels.len().max(1) as f32;
                    let spacing = ui.spacing().item_spacing.x;
                    let side = ((ui.available_width() - spacing * (count - 1.0)) / count)
                        .clamp(MIN_PANEL_SIDE, MAX_PANEL_SIDE);

                    ui.horizontal(|ui| {
                        for (panel, texture) in figure.panels.iter().zip(figure_textures) {
                            ui.vertical(|ui| {
                                ui.label(panel.caption());
                                let aspect = panel.height() as f32 / panel.width() as f32;
                                ui.add(
                                    egui::Image::from_texture(texture)
                                        .fit_to_exact_size(vec2(side, side * aspect)),
                                );
                            });
                        }
                    });
                    ui.separator();
                }
            });
        });
    }
}
