//! Sample domains and per-point evaluation.
//!
//! A [`SampleDomain`] is a finite set of points, either along one axis
//! (2D plots) or on a rectangular grid (3D plots). [`evaluate`] runs an
//! [`Expression`] at every point and records either the value or the
//! [`EvaluationSentinel`] explaining why there is none. A failing sample never
//! aborts the run.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use thiserror::Error;

use crate::expr::{EvaluationSentinel, Expression};

/// Upper bound on the total number of points in one domain.
pub const MAX_TOTAL_SAMPLES: usize = 1_000_000;

/// Which kind of plot to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    /// Line plot of `y = f(x)`.
    #[default]
    TwoD,
    /// Surface `z = f(x)` over an `x`/`y` grid.
    ThreeD,
}

impl PlotMode {
    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            PlotMode::TwoD => PlotMode::ThreeD,
            PlotMode::ThreeD => PlotMode::TwoD,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            PlotMode::TwoD => "2D",
            PlotMode::ThreeD => "3D",
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unrecognised plot mode string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plot mode '{0}' (expected 2D or 3D)")]
pub struct ModeParseError(pub String);

impl FromStr for PlotMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "2D" => Ok(PlotMode::TwoD),
            "3D" => Ok(PlotMode::ThreeD),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

/// Invalid domain parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A bound is NaN or infinite.
    #[error("domain bounds must be finite (got {start} to {end})")]
    NonFiniteBound {
        /// Lower bound.
        start: f64,
        /// Upper bound.
        end: f64,
    },

    /// An axis with no samples.
    #[error("sample count must be positive")]
    NoSamples,

    /// Several samples over an empty or inverted range.
    #[error("domain start {start} must be less than end {end}")]
    InvalidRange {
        /// Lower bound.
        start: f64,
        /// Upper bound.
        end: f64,
    },

    /// The domain holds more points than allowed.
    #[error("{count} samples requested, at most {max} allowed")]
    TooManySamples {
        /// Requested total.
        count: usize,
        /// Allowed total.
        max: usize,
    },
}

/// Evenly spaced points on a closed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    start: f64,
    end: f64,
    count: usize,
}

impl AxisRange {
    /// `count` points from `start` to `end`, both included.
    pub fn new(start: f64, end: f64, count: usize) -> Result<Self, DomainError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(DomainError::NonFiniteBound { start, end });
        }
        if count == 0 {
            return Err(DomainError::NoSamples);
        }
        if count > MAX_TOTAL_SAMPLES {
            return Err(DomainError::TooManySamples {
                count,
                max: MAX_TOTAL_SAMPLES,
            });
        }
        if count > 1 && start >= end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end, count })
    }

    /// Lower bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The `i`-th point.
    pub fn point(&self, i: usize) -> f64 {
        if self.count == 1 {
            return self.start;
        }
        self.start + (self.end - self.start) * i as f64 / (self.count - 1) as f64
    }

    /// All points in order.
    pub fn points(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.point(i)).collect()
    }

    /// Index of the point closest to `value`, clamped to the axis.
    pub fn nearest_index(&self, value: f64) -> usize {
        if self.count == 1 || !value.is_finite() {
            return 0;
        }
        let t = (value - self.start) / (self.end - self.start) * (self.count - 1) as f64;
        (t.round().max(0.0) as usize).min(self.count - 1)
    }
}

/// Points at which an expression is sampled, tagged with the plot mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleDomain {
    /// Points along `x`.
    Line {
        /// The `x` axis.
        x: AxisRange,
    },
    /// A grid over `x` (columns) and `y` (rows).
    Grid {
        /// The `x` axis.
        x: AxisRange,
        /// The `y` axis.
        y: AxisRange,
    },
}

impl SampleDomain {
    /// Default 2D domain: 400 points on `[-10, 10]`.
    pub const DEFAULT_LINE: SampleDomain = SampleDomain::Line {
        x: AxisRange {
            start: -10.0,
            end: 10.0,
            count: 400,
        },
    };

    /// Default 3D domain: a 100×100 grid over `[-5, 5]×[-5, 5]`.
    pub const DEFAULT_GRID: SampleDomain = SampleDomain::Grid {
        x: AxisRange {
            start: -5.0,
            end: 5.0,
            count: 100,
        },
        y: AxisRange {
            start: -5.0,
            end: 5.0,
            count: 100,
        },
    };

    /// A line domain.
    pub fn line(start: f64, end: f64, count: usize) -> Result<Self, DomainError> {
        Ok(SampleDomain::Line {
            x: AxisRange::new(start, end, count)?,
        })
    }

    /// A square grid domain with the same range and count on both axes.
    pub fn grid(start: f64, end: f64, count: usize) -> Result<Self, DomainError> {
        let axis = AxisRange::new(start, end, count)?;
        let total = count.saturating_mul(count);
        if total > MAX_TOTAL_SAMPLES {
            return Err(DomainError::TooManySamples {
                count: total,
                max: MAX_TOTAL_SAMPLES,
            });
        }
        Ok(SampleDomain::Grid { x: axis, y: axis })
    }

    /// The default domain for `mode`.
    pub fn default_for(mode: PlotMode) -> Self {
        match mode {
            PlotMode::TwoD => Self::DEFAULT_LINE,
            PlotMode::ThreeD => Self::DEFAULT_GRID,
        }
    }

    /// The plot mode this domain serves.
    pub fn mode(&self) -> PlotMode {
        match self {
            SampleDomain::Line { .. } => PlotMode::TwoD,
            SampleDomain::Grid { .. } => PlotMode::ThreeD,
        }
    }

    /// The `x` axis.
    pub fn x_axis(&self) -> &AxisRange {
        match self {
            SampleDomain::Line { x } | SampleDomain::Grid { x, .. } => x,
        }
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        match self {
            SampleDomain::Line { x } => x.count(),
            SampleDomain::Grid { x, y } => x.count() * y.count(),
        }
    }

    /// Always false: every domain has at least one point.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The outcome at one sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// A finite real value.
    Value(f64),
    /// No value; the sentinel says why.
    Undefined(EvaluationSentinel),
}

impl Sample {
    /// The value, if there is one.
    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Value(v) => Some(v),
            Sample::Undefined(_) => None,
        }
    }

    /// Whether this sample is a sentinel.
    pub fn is_undefined(self) -> bool {
        matches!(self, Sample::Undefined(_))
    }
}

impl From<Result<f64, EvaluationSentinel>> for Sample {
    fn from(result: Result<f64, EvaluationSentinel>) -> Self {
        match result {
            Ok(v) => Sample::Value(v),
            Err(sentinel) => Sample::Undefined(sentinel),
        }
    }
}

/// Per-point results with the same shape as the domain they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    /// One sample per `x`.
    Line {
        /// Sample positions.
        xs: Vec<f64>,
        /// `samples[i]` is the value at `xs[i]`.
        samples: Vec<Sample>,
    },
    /// One sample per grid cell.
    Surface {
        /// Column positions.
        xs: Vec<f64>,
        /// Row positions.
        ys: Vec<f64>,
        /// `samples[[row, col]]` is the value at `(xs[col], ys[row])`.
        samples: Array2<Sample>,
    },
}

impl EvaluationResult {
    /// The plot mode matching this result's shape.
    pub fn mode(&self) -> PlotMode {
        match self {
            EvaluationResult::Line { .. } => PlotMode::TwoD,
            EvaluationResult::Surface { .. } => PlotMode::ThreeD,
        }
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        match self {
            EvaluationResult::Line { samples, .. } => samples.len(),
            EvaluationResult::Surface { samples, .. } => samples.len(),
        }
    }

    /// Whether there are no samples at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of samples that hold a value.
    pub fn valid_count(&self) -> usize {
        self.len() - self.sentinel_count()
    }

    /// Number of sentinel samples.
    pub fn sentinel_count(&self) -> usize {
        match self {
            EvaluationResult::Line { samples, .. } => {
                samples.iter().filter(|s| s.is_undefined()).count()
            },
            EvaluationResult::Surface { samples, .. } => {
                samples.iter().filter(|s| s.is_undefined()).count()
            },
        }
    }
}

/// Evaluate `expr` at every point of `domain`.
///
/// On a grid only the column coordinate is bound to `x`, so every column
/// is constant along `y`.
pub fn evaluate(expr: &Expression, domain: &SampleDomain) -> EvaluationResult {
    let result = match domain {
        SampleDomain::Line { x } => {
            let xs = x.points();
            let samples = xs.iter().map(|&xv| Sample::from(expr.eval(xv))).collect();
            EvaluationResult::Line { xs, samples }
        },
        SampleDomain::Grid { x, y } => {
            let xs = x.points();
            let ys = y.points();
            let samples =
                Array2::from_shape_fn((ys.len(), xs.len()), |(_, col)| Sample::from(expr.eval(xs[col])));
            EvaluationResult::Surface { xs, ys, samples }
        },
    };

    tracing::debug!(
        expression = %expr,
        mode = %domain.mode(),
        samples = result.len(),
        sentinels = result.sentinel_count(),
        "Evaluated expression"
    );

    result
}
