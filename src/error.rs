//! Error types for exprplot.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Errors that belong to a single stage of the plotting pipeline live next to
//! that stage ([`ParseError`](crate::expr::ParseError),
//! [`DomainError`](crate::sampling::DomainError),
//! [`RenderError`](crate::plot::RenderError)); this module holds the
//! application-level error used by the terminal shell.

use thiserror::Error;

use crate::grapher::PlotError;

/// Result type alias for exprplot operations.
pub type Result<T> = std::result::Result<T, ExprPlotError>;

/// Errors that can occur in the exprplot application.
#[derive(Debug, Error)]
pub enum ExprPlotError {
    /// A plot request failed.
    #[error("Error plotting graph: {0}")]
    Plot(#[from] PlotError),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// There is nothing to export yet.
    #[error("Nothing plotted yet")]
    NothingPlotted,
}
