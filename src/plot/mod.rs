use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Figure has nothing to draw")]
    Empty,
    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Clone)]
enum Layer {
    Scatter {
        points: Vec<(f64, f64)>,
        label: Option<String>,
    },
    Line {
        points: Vec<(f64, f64)>,
        label: Option<String>,
    },
}

impl Layer {
    fn points(&self) -> &[(f64, f64)] {
        match self {
            Layer::Scatter { points, .. } | Layer::Line { points, .. } => points,
        }
    }
}

/// An owned plotting canvas.
///
/// Layers accumulate until the caller renders or clears them; there is no
/// process-global drawing state. Rendering is the only side effect and only
/// happens on `render_svg`.
#[derive(Debug, Default, Clone)]
pub struct Figure {
    x_label: String,
    y_label: String,
    layers: Vec<Layer>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
    }

    /// Add a scatter layer of raw (x, y) points.
    pub fn scatter(&mut self, points: Vec<(f64, f64)>, label: Option<String>) {
        self.layers.push(Layer::Scatter { points, label });
    }

    /// Add a line layer connecting (x, y) points in order.
    pub fn line(&mut self, points: Vec<(f64, f64)>, label: Option<String>) {
        self.layers.push(Layer::Line { points, label });
    }

    /// Line-plot a value sequence against its ordinal index, with a legend
    /// entry for the series.
    pub fn plot_series(&mut self, values: &[f64], label: &str) {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        self.line(points, Some(label.to_string()));
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.points().is_empty())
    }

    /// Render every accumulated layer to an SVG file. The figure keeps its
    /// layers; call `clear` before starting an unrelated plot.
    pub fn render_svg<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<()> {
        if self.is_empty() {
            return Err(PlotError::Empty);
        }
        let (x_range, y_range) = self.bounds();

        let root = SVGBackend::new(path.as_ref(), (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        let mut has_labels = false;
        for (i, layer) in self.layers.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            match layer {
                Layer::Scatter { points, label } => {
                    let series = chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.3).filled())),
                        )
                        .map_err(render_err)?;
                    if let Some(label) = label {
                        has_labels = true;
                        series.label(label.as_str()).legend(move |(x, y)| {
                            Circle::new((x + 5, y), 3, color.mix(0.3).filled())
                        });
                    }
                }
                Layer::Line { points, label } => {
                    let series = chart
                        .draw_series(LineSeries::new(points.iter().copied(), &color))
                        .map_err(render_err)?;
                    if let Some(label) = label {
                        has_labels = true;
                        series.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 10, y)], color)
                        });
                    }
                }
            }
        }

        if has_labels {
            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn bounds(&self) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for layer in &self.layers {
            for &(x, y) in layer.points() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        (pad(x_min, x_max), pad(y_min, y_max))
    }
}

// Degenerate spans still need a drawable axis range
fn pad(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    if span == 0.0 {
        (min - 1.0)..(max + 1.0)
    } else {
        (min - 0.05 * span)..(max + 0.05 * span)
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}
