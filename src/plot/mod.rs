//! Turning evaluation results into plot artifacts.

mod artifact;

use thiserror::Error;

pub use artifact::{LineSeries, PlotArtifact, SurfaceGrid};

use crate::sampling::{EvaluationResult, PlotMode, Sample};

/// Why an evaluation result cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The result holds no samples.
    #[error("nothing to plot")]
    Empty,

    /// Every sample is undefined.
    #[error("no valid points to plot ({sentinels} of {total} samples undefined)")]
    NoValidPoints {
        /// Undefined samples.
        sentinels: usize,
        /// All samples.
        total: usize,
    },

    /// The result was evaluated for a different mode.
    #[error("cannot draw {found} samples as a {requested} plot")]
    ModeMismatch {
        /// Requested mode.
        requested: PlotMode,
        /// Mode of the evaluated samples.
        found: PlotMode,
    },
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Build the artifact for `result` in the requested `mode`.
pub fn render(result: &EvaluationResult, mode: PlotMode) -> Result<PlotArtifact, RenderError> {
    if result.mode() != mode {
        return Err(RenderError::ModeMismatch {
            requested: mode,
            found: result.mode(),
        });
    }
    if result.is_empty() {
        return Err(RenderError::Empty);
    }
    if result.valid_count() == 0 {
        return Err(RenderError::NoValidPoints {
            sentinels: result.sentinel_count(),
            total: result.len(),
        });
    }

    let artifact = match result {
        EvaluationResult::Line { xs, samples } => PlotArtifact::Line(render_line(xs, samples)),
        EvaluationResult::Surface { xs, ys, samples } => {
            let z = samples.map(|s| s.value());
            let z_bounds = bounds(z.iter().flatten().copied()).unwrap_or((0.0, 0.0));
            PlotArtifact::Surface(SurfaceGrid {
                xs: xs.clone(),
                ys: ys.clone(),
                z,
                z_bounds,
                gaps: result.sentinel_count(),
            })
        },
    };

    tracing::debug!(mode = %mode, gaps = artifact.gaps(), "Rendered plot");
    Ok(artifact)
}

fn render_line(xs: &[f64], samples: &[Sample]) -> LineSeries {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut gaps = 0;

    for (&x, sample) in xs.iter().zip(samples) {
        match sample.value() {
            Some(y) => current.push((x, y)),
            None => {
                gaps += 1;
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            },
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    let ys: Vec<Option<f64>> = samples.iter().map(|s| s.value()).collect();
    let x_bounds = bounds(xs.iter().copied()).unwrap_or((0.0, 0.0));
    let y_bounds = bounds(ys.iter().flatten().copied()).unwrap_or((0.0, 0.0));

    LineSeries {
        segments,
        xs: xs.to_vec(),
        ys,
        x_bounds,
        y_bounds,
        gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{parse, EvaluationSentinel};
    use crate::sampling::{evaluate, SampleDomain};
    use ndarray::Array2;

    fn plot(source: &str, domain: &SampleDomain) -> Result<PlotArtifact, RenderError> {
        let expr = parse(source).unwrap();
        render(&evaluate(&expr, domain), domain.mode())
    }

    #[test]
    fn continuous_function_is_one_segment() {
        let PlotArtifact::Line(line) = plot("x**2", &SampleDomain::DEFAULT_LINE).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(line.segments.len(), 1);
        assert_eq!(line.point_count(), 400);
        assert_eq!(line.gaps, 0);
        assert_eq!(line.x_bounds, (-10.0, 10.0));
        assert_eq!(line.y_bounds.1, 100.0);
        assert!(line.y_bounds.0 >= 0.0);
    }

    #[test]
    fn sentinel_breaks_the_line() {
        let domain = SampleDomain::line(-10.0, 10.0, 401).unwrap();
        let PlotArtifact::Line(line) = plot("1/x", &domain).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(line.segments.len(), 2);
        assert_eq!(line.gaps, 1);
        assert_eq!(line.point_count(), 400);
        assert!(line.segments[0].iter().all(|&(x, _)| x < 0.0));
        assert!(line.segments[1].iter().all(|&(x, _)| x > 0.0));
        assert_eq!(line.ys[200], None);
        assert_eq!(line.xs.len(), 401);
    }

    #[test]
    fn leading_gap_does_not_create_empty_segment() {
        let PlotArtifact::Line(line) = plot("log(x)", &SampleDomain::DEFAULT_LINE).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(line.segments.len(), 1);
        assert_eq!(line.gaps, 200);
    }

    #[test]
    fn all_sentinel_result_is_an_error() {
        let domain = SampleDomain::line(-10.0, -1.0, 50).unwrap();
        assert_eq!(
            plot("sqrt(x)", &domain),
            Err(RenderError::NoValidPoints {
                sentinels: 50,
                total: 50
            })
        );
        assert_eq!(
            plot("asin(x + 20)", &SampleDomain::DEFAULT_GRID),
            Err(RenderError::NoValidPoints {
                sentinels: 10_000,
                total: 10_000
            })
        );
    }

    #[test]
    fn empty_result_is_an_error() {
        let result = EvaluationResult::Line {
            xs: Vec::new(),
            samples: Vec::new(),
        };
        assert_eq!(render(&result, PlotMode::TwoD), Err(RenderError::Empty));
    }

    #[test]
    fn mode_must_match_result_shape() {
        let expr = parse("x").unwrap();
        let result = evaluate(&expr, &SampleDomain::DEFAULT_LINE);
        assert_eq!(
            render(&result, PlotMode::ThreeD),
            Err(RenderError::ModeMismatch {
                requested: PlotMode::ThreeD,
                found: PlotMode::TwoD
            })
        );
    }

    #[test]
    fn surface_keeps_grid_shape_and_gaps() {
        let domain = SampleDomain::grid(-5.0, 5.0, 11).unwrap();
        let PlotArtifact::Surface(surface) = plot("1/x", &domain).unwrap() else {
            panic!("expected a surface");
        };
        assert_eq!(surface.z.dim(), (11, 11));
        assert_eq!(surface.gaps, 11);
        assert!(surface.z.column(5).iter().all(Option::is_none));
        assert_eq!(surface.z[[3, 10]], Some(0.2));
        assert_eq!(surface.z_bounds, (-1.0, 1.0));
    }

    #[test]
    fn tsv_has_one_row_per_sample() {
        let domain = SampleDomain::line(-1.0, 1.0, 3).unwrap();
        let artifact = plot("1/x", &domain).unwrap();
        assert_eq!(artifact.to_tsv(), "x\ty\n-1\t-1\n0\tNaN\n1\t1\n");

        let grid = SampleDomain::grid(0.0, 1.0, 2).unwrap();
        let artifact = plot("x + 1", &grid).unwrap();
        assert_eq!(artifact.to_tsv(), "x\ty\tz\n0\t0\t1\n1\t0\t2\n0\t1\t1\n1\t1\t2\n");
    }

    #[test]
    fn surface_from_hand_built_result() {
        let samples = Array2::from_shape_vec(
            (1, 2),
            vec![Sample::Value(3.0), Sample::Undefined(EvaluationSentinel::Overflow)],
        )
        .unwrap();
        let result = EvaluationResult::Surface {
            xs: vec![0.0, 1.0],
            ys: vec![0.0],
            samples,
        };
        let PlotArtifact::Surface(surface) = render(&result, PlotMode::ThreeD).unwrap() else {
            panic!("expected a surface");
        };
        assert_eq!(surface.z_bounds, (3.0, 3.0));
        assert_eq!(surface.gaps, 1);
    }
}
