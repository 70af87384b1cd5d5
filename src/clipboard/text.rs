//! System clipboard text placement.

use anyhow::{Context, Result};

/// Seam over clipboard writes so dispatch logic is testable without a
/// display server.
pub trait TextClipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// arboard-backed clipboard.
pub struct SystemClipboard;

impl TextClipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("failed to access clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("failed to copy to clipboard")?;
        Ok(())
    }
}
