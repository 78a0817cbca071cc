//! Renderable plot data handed to the display layer.

use ndarray::Array2;

/// A 2D line, split into connected segments.
///
/// Undefined samples break the line: the points on either side of a gap
/// end up in different segments and are never joined.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    /// Connected runs of `(x, y)` points, in `x` order.
    pub segments: Vec<Vec<(f64, f64)>>,
    /// Every sample position, including those without a value.
    pub xs: Vec<f64>,
    /// `ys[i]` is the value at `xs[i]`, `None` at gaps.
    pub ys: Vec<Option<f64>>,
    /// Range of the sampled `x` values.
    pub x_bounds: (f64, f64),
    /// Range of the finite `y` values.
    pub y_bounds: (f64, f64),
    /// Number of undefined samples.
    pub gaps: usize,
}

impl LineSeries {
    /// Number of plotted points.
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// A surface `z(x, y)` on a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    /// Column coordinates.
    pub xs: Vec<f64>,
    /// Row coordinates.
    pub ys: Vec<f64>,
    /// `z[[row, col]]` is the height at `(xs[col], ys[row])`, `None` at gaps.
    pub z: Array2<Option<f64>>,
    /// Range of the finite `z` values.
    pub z_bounds: (f64, f64),
    /// Number of undefined cells.
    pub gaps: usize,
}

/// The result of a successful plot request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotArtifact {
    /// 2D line series.
    Line(LineSeries),
    /// 3D surface grid.
    Surface(SurfaceGrid),
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

impl PlotArtifact {
    /// Number of undefined samples in the artifact.
    pub fn gaps(&self) -> usize {
        match self {
            PlotArtifact::Line(line) => line.gaps,
            PlotArtifact::Surface(surface) => surface.gaps,
        }
    }

    /// Serialize as tab-separated values with a header row.
    ///
    /// Lines produce `x\ty` rows and surfaces `x\ty\tz` rows (row-major);
    /// gaps are written as `NaN`.
    pub fn to_tsv(&self) -> String {
        match self {
            PlotArtifact::Line(line) => {
                let mut out = String::with_capacity(line.xs.len() * 24 + 8);
                out.push_str("x\ty\n");
                for (x, y) in line.xs.iter().zip(&line.ys) {
                    out.push_str(&format!("{}\t{}\n", x, format_cell(*y)));
                }
                out
            },
            PlotArtifact::Surface(surface) => {
                let mut out = String::with_capacity(surface.z.len() * 36 + 8);
                out.push_str("x\ty\tz\n");
                for ((row, col), z) in surface.z.indexed_iter() {
                    out.push_str(&format!(
                        "{}\t{}\t{}\n",
                        surface.xs[col],
                        surface.ys[row],
                        format_cell(*z)
                    ));
                }
                out
            },
        }
    }
}
