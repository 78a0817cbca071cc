//! The plot request pipeline: parse, sample, evaluate, render.

use thiserror::Error;

use crate::expr::{self, ParseError};
use crate::plot::{self, PlotArtifact, RenderError};
use crate::sampling::{self, DomainError, PlotMode, SampleDomain};

/// Why a plot request failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// The expression text was rejected.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The configured sample domain is invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Evaluation produced nothing drawable.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Range and resolution of one sampled axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    /// Lower bound.
    pub start: f64,
    /// Upper bound.
    pub end: f64,
    /// Number of samples.
    pub samples: usize,
}

/// Sampling configuration for both plot modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrapherConfig {
    /// The `x` axis of 2D plots.
    pub line: AxisConfig,
    /// Both axes of 3D plots.
    pub surface: AxisConfig,
}

impl Default for GrapherConfig {
    fn default() -> Self {
        Self {
            line: AxisConfig {
                start: -10.0,
                end: 10.0,
                samples: 400,
            },
            surface: AxisConfig {
                start: -5.0,
                end: 5.0,
                samples: 100,
            },
        }
    }
}

/// Stateless plot service: every call starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Grapher {
    config: GrapherConfig,
}

impl Grapher {
    /// Create a grapher with the given sampling configuration.
    pub fn new(config: GrapherConfig) -> Self {
        Self { config }
    }

    /// Sampling configuration.
    pub fn config(&self) -> &GrapherConfig {
        &self.config
    }

    /// The sample domain used for `mode`.
    pub fn domain(&self, mode: PlotMode) -> Result<SampleDomain, DomainError> {
        match mode {
            PlotMode::TwoD => {
                let axis = self.config.line;
                SampleDomain::line(axis.start, axis.end, axis.samples)
            },
            PlotMode::ThreeD => {
                let axis = self.config.surface;
                SampleDomain::grid(axis.start, axis.end, axis.samples)
            },
        }
    }

    /// Plot `text` in `mode`.
    pub fn plot(&self, text: &str, mode: PlotMode) -> Result<PlotArtifact, PlotError> {
        let expression = expr::parse(text).map_err(|e| {
            tracing::info!("Rejected expression {:?}: {}", text, e);
            e
        })?;
        if expression.is_constant() {
            tracing::debug!("Expression {} does not depend on x", expression);
        }

        let domain = self.domain(mode)?;
        let result = sampling::evaluate(&expression, &domain);
        let artifact = plot::render(&result, mode)?;

        tracing::info!(
            expression = %expression,
            mode = %mode,
            samples = result.len(),
            gaps = artifact.gaps(),
            "Plotted expression"
        );
        Ok(artifact)
    }
}
