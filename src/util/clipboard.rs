//! Clipboard integration.

use crate::error::Result;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}
