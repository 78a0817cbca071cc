//! Color mapping functions for surface heatmaps.

use crate::viewer::ColorPalette;
use ratatui::style::Color;

type Rgb = (f64, f64, f64);

const VIRIDIS: [Rgb; 5] = [
    (68.0, 1.0, 84.0),
    (59.0, 82.0, 139.0),
    (33.0, 145.0, 140.0),
    (94.0, 201.0, 98.0),
    (253.0, 231.0, 37.0),
];

const PLASMA: [Rgb; 5] = [
    (13.0, 8.0, 135.0),
    (126.0, 3.0, 168.0),
    (204.0, 71.0, 120.0),
    (248.0, 149.0, 64.0),
    (240.0, 249.0, 33.0),
];

const COOLWARM: [Rgb; 3] = [(59.0, 76.0, 192.0), (221.0, 221.0, 221.0), (180.0, 4.0, 38.0)];

impl ColorPalette {
    /// Map a normalized value (0.0 to 1.0) to an RGB color.
    pub fn color(self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        match self {
            Self::Viridis => interpolate(&VIRIDIS, t),
            Self::Plasma => interpolate(&PLASMA, t),
            Self::Rainbow => rainbow_color(t),
            Self::CoolWarm => interpolate(&COOLWARM, t),
        }
    }

    /// Color for `value` scaled into `bounds`. A flat range maps to the middle.
    pub fn color_in(self, value: f64, bounds: (f64, f64)) -> Color {
        let (lo, hi) = bounds;
        let range = hi - lo;
        if range.abs() < 1e-12 {
            return self.color(0.5);
        }
        self.color((value - lo) / range)
    }
}

/// Piecewise-linear interpolation between evenly spaced color stops.
fn interpolate(stops: &[Rgb], t: f64) -> Color {
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(stops.len() - 2);
    let local = pos - idx as f64;

    let (r0, g0, b0) = stops[idx];
    let (r1, g1, b1) = stops[idx + 1];
    let mix = |a: f64, b: f64| (a + (b - a) * local).round().clamp(0.0, 255.0) as u8;

    Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Hue sweep from blue (low) to red (high).
fn rainbow_color(t: f64) -> Color {
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = match h {
        h if h < 60.0 => (1.0, x, 0.0),
        h if h < 120.0 => (x, 1.0, 0.0),
        h if h < 180.0 => (0.0, 1.0, x),
        _ => (0.0, x, 1.0),
    };

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
