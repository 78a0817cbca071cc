//! Plot viewer - state for the displayed plot and its probe cursor.
//!
//! The viewer owns the most recent [`PlotArtifact`] (or the error that
//! replaced it), the active plot mode, the heatmap palette and the probe
//! position used for value readouts.

pub mod ui;

use crate::error::{ExprPlotError, Result};
use crate::plot::PlotArtifact;
use crate::sampling::PlotMode;
use crate::util;

/// Color palette for heatmap visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPalette {
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    #[default]
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Rainbow colormap (traditional, high contrast).
    Rainbow,
    /// Blue-gray-red diverging colormap.
    CoolWarm,
}

impl ColorPalette {
    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::CoolWarm,
            Self::CoolWarm => Self::Viridis,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
            Self::CoolWarm => "Cool-Warm",
        }
    }
}

/// Value under the probe cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeReadout {
    /// A point on a line plot.
    Line {
        /// Sample position.
        x: f64,
        /// Value, `None` at a gap.
        y: Option<f64>,
    },
    /// A cell of a surface plot.
    Surface {
        /// Column position.
        x: f64,
        /// Row position.
        y: f64,
        /// Height, `None` at a gap.
        z: Option<f64>,
    },
}

/// State for the plot viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    /// Text of the plotted expression.
    pub expression: Option<String>,
    /// Current plot.
    pub artifact: Option<PlotArtifact>,
    /// Plot mode used for the next request.
    pub mode: PlotMode,
    /// Color palette for heatmap.
    pub color_palette: ColorPalette,
    /// Error message if the last request failed.
    pub error: Option<String>,
    /// Probe column (sample index along `x`).
    pub probe_col: usize,
    /// Probe row (sample index along `y`, surfaces only).
    pub probe_row: usize,
}

impl ViewerState {
    /// Create a new viewer state.
    pub fn new(mode: PlotMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Show a freshly rendered plot and center the probe on it.
    pub fn show(&mut self, expression: String, artifact: PlotArtifact) {
        self.expression = Some(expression);
        self.artifact = Some(artifact);
        self.error = None;
        self.center_probe();
    }

    /// Replace the plot with the error `expression` failed with.
    pub fn set_error(&mut self, expression: String, error: String) {
        self.expression = Some(expression);
        self.error = Some(error);
        self.artifact = None;
    }

    /// Toggle between 2D and 3D.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    /// Cycle to next color palette.
    pub fn cycle_color_palette(&mut self) {
        self.color_palette = self.color_palette.next();
    }

    /// Number of probe positions as `(columns, rows)`.
    fn probe_extent(&self) -> (usize, usize) {
        match &self.artifact {
            Some(PlotArtifact::Line(line)) => (line.xs.len(), 1),
            Some(PlotArtifact::Surface(surface)) => (surface.xs.len(), surface.ys.len()),
            None => (0, 0),
        }
    }

    /// Put the probe in the middle of the plot.
    pub fn center_probe(&mut self) {
        let (cols, rows) = self.probe_extent();
        self.probe_col = cols / 2;
        self.probe_row = rows / 2;
    }

    /// Move the probe by a number of samples, clamped to the plot.
    pub fn move_probe(&mut self, dcol: isize, drow: isize) {
        let (cols, rows) = self.probe_extent();
        if cols == 0 || rows == 0 {
            return;
        }
        self.probe_col = self.probe_col.saturating_add_signed(dcol).min(cols - 1);
        self.probe_row = self.probe_row.saturating_add_signed(drow).min(rows - 1);
    }

    /// Value under the probe.
    pub fn probe(&self) -> Option<ProbeReadout> {
        match self.artifact.as_ref()? {
            PlotArtifact::Line(line) => {
                let x = *line.xs.get(self.probe_col)?;
                let y = line.ys.get(self.probe_col).copied().flatten();
                Some(ProbeReadout::Line { x, y })
            },
            PlotArtifact::Surface(surface) => {
                let x = *surface.xs.get(self.probe_col)?;
                let y = *surface.ys.get(self.probe_row)?;
                let z = surface
                    .z
                    .get((self.probe_row, self.probe_col))
                    .copied()
                    .flatten();
                Some(ProbeReadout::Surface { x, y, z })
            },
        }
    }

    /// Copy the plotted data to the clipboard as TSV.
    pub fn copy_to_clipboard(&self) -> Result<()> {
        let artifact = self.artifact.as_ref().ok_or(ExprPlotError::NothingPlotted)?;
        util::copy_to_clipboard(&artifact.to_tsv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grapher::{Grapher, GrapherConfig};

    fn viewer_with(source: &str, mode: PlotMode) -> ViewerState {
        let mut config = GrapherConfig::default();
        config.line.samples = 401;
        config.surface.samples = 11;
        let artifact = Grapher::new(config).plot(source, mode).unwrap();
        let mut viewer = ViewerState::new(mode);
        viewer.show(source.to_string(), artifact);
        viewer
    }

    #[test]
    fn palette_cycles_back_to_start() {
        let mut palette = ColorPalette::default();
        for _ in 0..4 {
            palette = palette.next();
        }
        assert_eq!(palette, ColorPalette::Viridis);
    }

    #[test]
    fn probe_starts_centered_on_a_line() {
        let viewer = viewer_with("x**2 + 2*x - 3", PlotMode::TwoD);
        assert_eq!(viewer.probe_col, 200);
        assert_eq!(viewer.probe(), Some(ProbeReadout::Line { x: 0.0, y: Some(-3.0) }));
    }

    #[test]
    fn probe_reports_gaps() {
        let viewer = viewer_with("1/x", PlotMode::TwoD);
        assert_eq!(viewer.probe(), Some(ProbeReadout::Line { x: 0.0, y: None }));
    }

    #[test]
    fn probe_is_clamped() {
        let mut viewer = viewer_with("x", PlotMode::TwoD);
        viewer.move_probe(-1000, 0);
        assert_eq!(viewer.probe_col, 0);
        viewer.move_probe(5000, 3);
        assert_eq!(viewer.probe_col, 400);
        assert_eq!(viewer.probe_row, 0);
    }

    #[test]
    fn surface_probe_moves_in_both_axes() {
        let mut viewer = viewer_with("x + 1", PlotMode::ThreeD);
        assert_eq!((viewer.probe_col, viewer.probe_row), (5, 5));
        viewer.move_probe(5, -5);
        assert_eq!(
            viewer.probe(),
            Some(ProbeReadout::Surface {
                x: 5.0,
                y: -5.0,
                z: Some(6.0)
            })
        );
    }

    #[test]
    fn error_replaces_the_plot() {
        let mut viewer = viewer_with("x", PlotMode::TwoD);
        viewer.set_error("y".to_string(), "boom".to_string());
        assert_eq!(viewer.expression.as_deref(), Some("y"));
        assert!(viewer.artifact.is_none());
        assert_eq!(viewer.probe(), None);
        assert!(matches!(
            viewer.copy_to_clipboard(),
            Err(ExprPlotError::NothingPlotted)
        ));
    }
}
