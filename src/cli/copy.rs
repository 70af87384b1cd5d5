//! `handoff copy` - put a code reference on the clipboard.

use std::path::Path;

use anyhow::{Context, Result};

use handoff::clipboard::{SystemClipboard, TextClipboard};

pub fn copy_command(file: &Path, lines: &str) -> Result<()> {
    let reference = super::reference_from_flags(Some(&file.to_path_buf()), Some(lines))?
        .context("a file and line range are required")?;

    SystemClipboard.set_text(&reference.format())?;
    println!("{reference}");
    Ok(())
}
