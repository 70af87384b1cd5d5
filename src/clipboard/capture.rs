//! Clipboard image export via OS utilities.
//!
//! There is no portable way to read image bytes off the clipboard without
//! a GUI toolkit, so this shells out: `osascript` on macOS, PowerShell on
//! Windows, `xclip` on Linux. A non-empty PNG at the target path counts as
//! "image found"; anything else (text on the clipboard, missing utility,
//! empty export) is "no image".

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::tempfiles;

/// Seam over clipboard capture so the gate is testable without a real
/// clipboard.
pub trait ImageSource {
    /// Export the current clipboard image into `dir`, returning the saved
    /// path or `None` when the clipboard holds no image.
    fn capture(&mut self, dir: &Path) -> Result<Option<PathBuf>>;
}

/// Production source backed by the platform utilities.
pub struct OsClipboard;

impl ImageSource for OsClipboard {
    fn capture(&mut self, dir: &Path) -> Result<Option<PathBuf>> {
        save_clipboard_image(dir)
    }
}

/// Try to export the current clipboard image into `dir`.
///
/// Export errors are swallowed into `None`; empty output files are deleted
/// before returning.
pub fn save_clipboard_image(dir: &Path) -> Result<Option<PathBuf>> {
    save_with(dir, export_to)
}

fn save_with(dir: &Path, export: impl FnOnce(&Path) -> Result<()>) -> Result<Option<PathBuf>> {
    let target = tempfiles::generate_image_path(dir);

    let exported = match export(&target) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "clipboard image export failed");
            false
        }
    };

    let size = std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
    if !exported || size == 0 {
        // 0-byte exports happen when the clipboard holds text.
        let _ = std::fs::remove_file(&target);
        return Ok(None);
    }

    debug!(path = %target.display(), size, "clipboard image saved");
    Ok(Some(target))
}

#[cfg(target_os = "macos")]
fn export_to(target: &Path) -> Result<()> {
    let script = format!(
        concat!(
            "set theFile to (POSIX file \"{}\") as «class furl»\n",
            "set imageData to the clipboard as «class PNGf»\n",
            "set imageFile to open for access theFile with write permission\n",
            "write imageData to imageFile\n",
            "close access imageFile",
        ),
        target.display()
    );

    let output = Command::new("osascript")
        .args(["-e", &script])
        .output()
        .context("failed to run osascript")?;

    if !output.status.success() {
        bail!(
            "osascript export failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn export_to(target: &Path) -> Result<()> {
    let path = target.display().to_string().replace('\'', "''");
    let script = format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         Add-Type -AssemblyName System.Drawing; \
         $img = [System.Windows.Forms.Clipboard]::GetImage(); \
         if ($img -eq $null) {{ exit 1 }}; \
         $img.Save('{path}', [System.Drawing.Imaging.ImageFormat]::Png)"
    );

    let output = Command::new("powershell")
        .args(["-NoProfile", "-Command", &script])
        .output()
        .context("failed to run powershell")?;

    if !output.status.success() {
        bail!("powershell clipboard export failed");
    }
    Ok(())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn export_to(target: &Path) -> Result<()> {
    // xclip writes the PNG to stdout; capture it and write the file
    // ourselves so a failed run leaves nothing behind.
    let output = Command::new("xclip")
        .args(["-selection", "clipboard", "-t", "image/png", "-o"])
        .output()
        .context("failed to run xclip (install it with your package manager)")?;

    if !output.status.success() {
        bail!(
            "xclip export failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    std::fs::write(target, &output.stdout)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(())
}
