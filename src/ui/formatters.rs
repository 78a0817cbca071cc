//! Shared formatting utilities for UI components.

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a readout value with smart precision.
pub fn format_stat_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format an optional readout, `undefined` for gaps.
pub fn format_sample(val: Option<f64>) -> String {
    val.map_or_else(|| "undefined".to_string(), format_stat_value)
}

/// Format axis label with smart precision.
pub fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val < 1e-9 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_number(400), "400");
        assert_eq!(format_number(10_000), "10,000");
    }

    #[test]
    fn stat_values_pick_precision_by_magnitude() {
        assert_eq!(format_stat_value(-3.0), "-3.0000");
        assert_eq!(format_stat_value(0.25), "0.25000");
        assert_eq!(format_stat_value(1234.5), "1234.50");
        assert_eq!(format_stat_value(2e7), "2.000e7");
        assert_eq!(format_sample(None), "undefined");
    }

    #[test]
    fn axis_labels_are_short() {
        assert_eq!(format_axis_label(-10.0), "-10.0");
        assert_eq!(format_axis_label(1e-12), "0");
        assert_eq!(format_axis_label(250.0), "250");
        assert_eq!(format_axis_label(f64::NAN), "?");
    }
}
