//! Plot viewer - pure rendering layer.

use super::{ProbeReadout, ViewerState};
use crate::plot::{LineSeries, PlotArtifact, SurfaceGrid};
use crate::ui::formatters::{format_axis_label, format_sample, format_stat_value};
use crate::ui::ThemeColors;
use crate::util::layout_config::{HeatmapLayoutConfig, PlotLayoutConfig};
use crate::util::LayoutConfig;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

/// Draw the plot area: the current plot, the last error or a welcome text.
pub fn draw_viewer(
    f: &mut Frame<'_>,
    area: Rect,
    state: &ViewerState,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    if let Some(ref error) = state.error {
        draw_error(f, area, error, colors);
        return;
    }

    match &state.artifact {
        Some(PlotArtifact::Line(line)) => draw_line_view(f, area, state, line, &layout.plot, colors),
        Some(PlotArtifact::Surface(surface)) => {
            draw_heatmap_view(f, area, state, surface, &layout.heatmap, colors)
        },
        None => draw_welcome(f, area, colors),
    }
}

fn expression_label(state: &ViewerState) -> &str {
    state.expression.as_deref().unwrap_or("f(x)")
}

/// Keep roughly one point per chart column, always including segment ends.
fn downsample(segment: &[(f64, f64)], stride: usize) -> Vec<(f64, f64)> {
    if stride <= 1 || segment.len() <= 2 {
        return segment.to_vec();
    }
    let mut out: Vec<(f64, f64)> = segment.iter().step_by(stride).copied().collect();
    if let Some(&last) = segment.last() {
        if out.last() != Some(&last) {
            out.push(last);
        }
    }
    out
}

/// Widen `[lo, hi]` by `factor` of its span on each side, staying finite.
///
/// Flat ranges are padded relative to their magnitude so the curve stays
/// off the frame.
fn padded_bounds(lo: f64, hi: f64, factor: f64) -> (f64, f64) {
    // Halves keep the span finite when the bounds sit near f64::MAX.
    let half_span = hi / 2.0 - lo / 2.0;
    let padding = if half_span.abs() < 1e-12 {
        lo.abs().max(1.0) * factor
    } else {
        half_span * (2.0 * factor)
    };
    (
        (lo - padding).max(f64::MIN),
        (hi + padding).min(f64::MAX),
    )
}

fn draw_line_view(
    f: &mut Frame<'_>,
    area: Rect,
    state: &ViewerState,
    line: &LineSeries,
    config: &PlotLayoutConfig,
    colors: &ThemeColors,
) {
    let (x_min, x_max) = line.x_bounds;
    let (lo, hi) = line.y_bounds;

    let (y_min, y_max) = padded_bounds(lo, hi, config.y_axis_padding_factor);

    let bins = (area.width.saturating_sub(config.label_columns) as usize).max(1) * 2;
    let stride = line.point_count().div_ceil(bins).max(1);
    let series: Vec<Vec<(f64, f64)>> = line
        .segments
        .iter()
        .map(|segment| downsample(segment, stride))
        .collect();

    let line_color = state.color_palette.color(0.6);
    let mut datasets: Vec<Dataset<'_>> = series
        .iter()
        .map(|points| {
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(line_color))
                .data(points)
        })
        .collect();

    let probe = state.probe();
    let probe_line = match probe {
        Some(ProbeReadout::Line { x, .. }) if x >= x_min && x <= x_max => {
            Some(vec![(x, y_min), (x, y_max)])
        },
        _ => None,
    };
    if let Some(ref probe_line) = probe_line {
        datasets.push(
            Dataset::default()
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.accent))
                .data(probe_line),
        );
    }

    let x_axis = Axis::default()
        .title("x")
        .style(Style::default().fg(colors.text))
        .bounds([x_min, x_max])
        .labels(vec![
            format_axis_label(x_min),
            format_axis_label((x_min + x_max) / 2.0),
            format_axis_label(x_max),
        ]);

    let y_axis = Axis::default()
        .title("y")
        .style(Style::default().fg(colors.text))
        .bounds([y_min, y_max])
        .labels(vec![
            format_axis_label(y_min),
            format_axis_label(y_min / 2.0 + y_max / 2.0),
            format_axis_label(y_max),
        ]);

    let readout = match probe {
        Some(ProbeReadout::Line { x, y }) => format!(
            " y = {} @ x={}: {} ",
            expression_label(state),
            format_stat_value(x),
            format_sample(y)
        ),
        _ => format!(" y = {} ", expression_label(state)),
    };
    let title = if line.gaps > 0 {
        format!("{}| {} undefined ", readout, line.gaps)
    } else {
        readout
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .title(title)
                .title_style(Style::default().fg(colors.heading)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

/// Write `text` starting at `(x, y)`, clipped at `max_x`.
fn put_str(buf: &mut Buffer, x: u16, y: u16, max_x: u16, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        let cx = x.saturating_add(i as u16);
        if cx >= max_x {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}

fn draw_heatmap_view(
    f: &mut Frame<'_>,
    area: Rect,
    state: &ViewerState,
    surface: &SurfaceGrid,
    config: &HeatmapLayoutConfig,
    colors: &ThemeColors,
) {
    let (rows, cols) = surface.z.dim();
    let (z_min, z_max) = surface.z_bounds;
    let palette = state.color_palette;

    let readout = match state.probe() {
        Some(ProbeReadout::Surface { x, y, z }) => format!(
            " z = {} @ x={}, y={}: {} ",
            expression_label(state),
            format_stat_value(x),
            format_stat_value(y),
            format_sample(z)
        ),
        _ => format!(" z = {} ", expression_label(state)),
    };
    let title = format!("{}| {} ", readout, palette.name());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(title)
        .title_style(Style::default().fg(colors.heading));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 4 || inner.height < 4 || rows == 0 || cols == 0 {
        return;
    }

    let axis_label_height = 1;
    let heatmap_area = Rect {
        x: inner.x + config.left_margin,
        y: inner.y + config.colorbar_height,
        width: inner.width.saturating_sub(config.left_margin),
        height: inner
            .height
            .saturating_sub(config.colorbar_height + axis_label_height),
    };
    let right_edge = inner.x + inner.width;
    let buf = f.buffer_mut();

    // Colorbar along the top with the z range on either side.
    let colorbar_width = config
        .colorbar_width
        .min((inner.width as usize).saturating_sub(20));
    let colorbar_start = heatmap_area.x
        + ((heatmap_area.width as usize).saturating_sub(colorbar_width) / 2) as u16;
    for i in 0..colorbar_width {
        let t = i as f64 / colorbar_width as f64;
        let x = colorbar_start + i as u16;
        if x < right_edge {
            if let Some(cell) = buf.cell_mut((x, inner.y)) {
                cell.set_char('█').set_fg(palette.color(t));
            }
        }
    }
    let min_label = format_axis_label(z_min);
    let max_label = format_axis_label(z_max);
    put_str(
        buf,
        colorbar_start.saturating_sub(min_label.len() as u16 + 1),
        inner.y,
        right_edge,
        &min_label,
        colors.label,
    );
    put_str(
        buf,
        colorbar_start + colorbar_width as u16 + 1,
        inner.y,
        right_edge,
        &max_label,
        colors.label,
    );

    let pixel_width = config.pixel_width.max(1);
    let max_h = heatmap_area.height as usize;
    let max_w = heatmap_area.width as usize / pixel_width;
    if max_h == 0 || max_w == 0 {
        return;
    }

    let disp_rows = rows.min(max_h);
    let disp_cols = cols.min(max_w);
    let row_step = rows as f64 / disp_rows as f64;
    let col_step = cols as f64 / disp_cols as f64;
    let offset_x = (((max_w - disp_cols) * pixel_width) / 2) as u16;
    let offset_y = ((max_h - disp_rows) / 2) as u16;
    let origin_x = heatmap_area.x + offset_x;
    let origin_y = heatmap_area.y + offset_y;

    // Screen rows run top-down while y grows upward: the top row is the last grid row.
    let data_row = |d: usize| rows - 1 - ((d as f64 * row_step).floor() as usize).min(rows - 1);
    let data_col = |d: usize| ((d as f64 * col_step).floor() as usize).min(cols - 1);

    for dy in 0..disp_rows {
        let row = data_row(dy);
        let screen_y = origin_y + dy as u16;
        for dx in 0..disp_cols {
            let value = surface.z[[row, data_col(dx)]];
            for i in 0..pixel_width {
                let screen_x = origin_x + (dx * pixel_width + i) as u16;
                if screen_x >= heatmap_area.x + heatmap_area.width {
                    break;
                }
                if let Some(cell) = buf.cell_mut((screen_x, screen_y)) {
                    match value {
                        Some(z) => cell.set_char('█').set_fg(palette.color_in(z, (z_min, z_max))),
                        None => cell.set_char('·').set_fg(colors.muted),
                    };
                }
            }
        }
    }

    // Y labels: top, middle and bottom rows, right-aligned against the heatmap.
    for dy in [0, disp_rows / 2, disp_rows - 1] {
        let label: String = format_axis_label(surface.ys[data_row(dy)])
            .chars()
            .take(7)
            .collect();
        let len = label.len() as u16;
        let start = if origin_x > len + 1 {
            origin_x - len - 1
        } else {
            inner.x
        };
        put_str(buf, start, origin_y + dy as u16, origin_x, &label, colors.label);
    }

    // X labels under the last pixel row.
    let x_label_y = origin_y + disp_rows as u16;
    if x_label_y < inner.y + inner.height {
        for dx in [0, disp_cols / 2, disp_cols - 1] {
            let label: String = format_axis_label(surface.xs[data_col(dx)])
                .chars()
                .take(8)
                .collect();
            put_str(
                buf,
                origin_x + (dx * pixel_width) as u16,
                x_label_y,
                heatmap_area.x + heatmap_area.width,
                &label,
                colors.label,
            );
        }
    }

    // Crosshair at the probe.
    let probe_row = state.probe_row.min(rows - 1);
    let probe_col = state.probe_col.min(cols - 1);
    let cy = (((rows - 1 - probe_row) as f64 / rows as f64) * disp_rows as f64).floor() as usize;
    let cx = ((probe_col as f64 / cols as f64) * disp_cols as f64).floor() as usize;
    let screen_y = origin_y + cy.min(disp_rows - 1) as u16;
    let screen_x = origin_x + (cx.min(disp_cols - 1) * pixel_width) as u16;
    for i in 0..pixel_width {
        let x = screen_x + i as u16;
        if x < heatmap_area.x + heatmap_area.width {
            if let Some(cell) = buf.cell_mut((x, screen_y)) {
                cell.set_char('┼').set_fg(colors.accent);
            }
        }
    }
}

fn draw_error(f: &mut Frame<'_>, area: Rect, error: &str, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Error plotting graph",
            Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(colors.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press i to edit the expression",
            Style::default().fg(colors.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.error)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "2D & 3D Graph Generator",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter a function of x, e.g. x**2 + 2*x - 3 or sin(x)/x",
            Style::default().fg(colors.text),
        )),
        Line::from(Span::styled(
            "Press i to type, Enter to plot, Tab to switch between 2D and 3D",
            Style::default().fg(colors.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_keeps_segment_ends() {
        let segment: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
        let out = downsample(&segment, 4);
        assert_eq!(out.first(), Some(&(0.0, 0.0)));
        assert_eq!(out.last(), Some(&(9.0, 0.0)));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn padding_widens_the_value_range() {
        let (lo, hi) = padded_bounds(0.0, 10.0, 0.1);
        assert!((lo + 1.0).abs() < 1e-12);
        assert!((hi - 11.0).abs() < 1e-12);
        let (lo, hi) = padded_bounds(4.0, 4.0, 0.1);
        assert!((lo - 3.6).abs() < 1e-12);
        assert!((hi - 4.4).abs() < 1e-12);
    }

    #[test]
    fn padding_stays_finite_near_the_float_limits() {
        let (lo, hi) = padded_bounds(-1e308, 1e308, 0.1);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < -1e308 && hi > 1e308);
        assert_ne!(format_axis_label(lo), "?");
        assert_ne!(format_axis_label(lo / 2.0 + hi / 2.0), "?");

        let (lo, hi) = padded_bounds(f64::MIN, f64::MAX, 0.1);
        assert_eq!((lo, hi), (f64::MIN, f64::MAX));
    }

    #[test]
    fn short_segments_are_untouched() {
        let segment = vec![(0.0, 1.0), (1.0, 2.0)];
        assert_eq!(downsample(&segment, 10), segment);
        assert_eq!(downsample(&segment, 1), segment);
    }
}
