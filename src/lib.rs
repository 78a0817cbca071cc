//! exprplot - A terminal-based 2D/3D function plotter.
//!
//! exprplot turns a formula in one variable `x` into a plot. The formula is
//! parsed with a small allow-listed grammar (arithmetic, powers, a fixed set
//! of constants and functions), so arbitrary input can never run code.
//!
//! # Features
//!
//! - Safe recursive-descent expression parser with positioned errors
//! - 2D line plots and 3D surfaces rendered as heatmaps
//! - Undefined points (poles, non-real values, overflow) shown as gaps
//! - Input history, probe readout and TSV clipboard export
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```
//! use exprplot::{evaluate, parse, render, PlotArtifact, PlotMode, SampleDomain};
//!
//! let expr = parse("x**2 + 2*x - 3")?;
//! let result = evaluate(&expr, &SampleDomain::DEFAULT_LINE);
//! let PlotArtifact::Line(line) = render(&result, PlotMode::TwoD)? else {
//!     unreachable!();
//! };
//! assert_eq!(line.segments.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod editor;
pub mod error;
pub mod expr;
pub mod grapher;
pub mod plot;
pub mod sampling;
pub mod ui;
pub mod util;
pub mod viewer;

pub use error::{ExprPlotError, Result};
pub use expr::{parse, EvaluationSentinel, Expression, ParseError};
pub use grapher::{Grapher, GrapherConfig, PlotError};
pub use plot::{render, PlotArtifact, RenderError};
pub use sampling::{evaluate, EvaluationResult, PlotMode, SampleDomain};
