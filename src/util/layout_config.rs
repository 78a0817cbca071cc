//! Layout configuration constants for the plot views.

/// Configuration for the 2D line chart.
#[derive(Debug, Clone)]
pub struct PlotLayoutConfig {
    /// Padding factor for Y-axis (0.1 = 10% margin above and below).
    pub y_axis_padding_factor: f64,
    /// Columns reserved for axis labels when downsampling to the chart width.
    pub label_columns: u16,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            y_axis_padding_factor: 0.1,
            label_columns: 8,
        }
    }
}

/// Configuration for the 3D heatmap view.
#[derive(Debug, Clone)]
pub struct HeatmapLayoutConfig {
    /// Terminal characters per pixel horizontally (for aspect ratio correction).
    pub pixel_width: usize,
    /// Height reserved for colorbar.
    pub colorbar_height: u16,
    /// Maximum width of colorbar in characters.
    pub colorbar_width: usize,
    /// Width reserved on the left for Y-axis labels.
    pub left_margin: u16,
}

impl Default for HeatmapLayoutConfig {
    fn default() -> Self {
        Self {
            pixel_width: 2,
            colorbar_height: 1,
            colorbar_width: 40,
            left_margin: 8,
        }
    }
}

/// Combined layout configuration for both plot modes.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Configuration for the line chart.
    pub plot: PlotLayoutConfig,
    /// Configuration for the heatmap.
    pub heatmap: HeatmapLayoutConfig,
}
