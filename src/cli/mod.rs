//! Command handlers.

pub mod ask;
pub mod cleanup;
pub mod copy;
pub mod image;
pub mod init;
pub mod send;
pub mod start;
pub mod templates;
pub mod watch;

use std::path::PathBuf;

use anyhow::{bail, Result};

use handoff::reference::{CodeReference, LineRange};

/// Build the `@path#L..` reference from the `--file`/`--lines` flags,
/// relative to the current directory.
pub(crate) fn reference_from_flags(
    file: Option<&PathBuf>,
    lines: Option<&str>,
) -> Result<Option<CodeReference>> {
    let Some(file) = file else {
        return Ok(None);
    };
    let Some(lines) = lines else {
        bail!("--file requires --lines");
    };

    let range = LineRange::parse(lines)?;
    let workspace = std::env::current_dir().ok();
    let absolute = if file.is_absolute() {
        file.clone()
    } else {
        workspace
            .as_deref()
            .map(|ws| ws.join(file))
            .unwrap_or_else(|| file.clone())
    };

    Ok(Some(CodeReference::new(
        &absolute,
        range,
        workspace.as_deref(),
    )))
}
