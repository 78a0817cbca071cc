//! Utility functions.
//!
//! This module provides clipboard access, heatmap color maps and the
//! layout constants shared by the plot views.

mod clipboard;
mod colormaps;
pub mod layout_config;

pub use clipboard::copy_to_clipboard;
pub use layout_config::LayoutConfig;
