//! Temp image store under `~/.handoff/tmp/`.
//!
//! Clipboard captures are written here with timestamped names so the AI CLI
//! can read them by path long after the clipboard moved on. Nothing is
//! deleted automatically except by the cleanup command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::debug;

/// Filename prefix for images we own. Cleanup never touches other files.
pub const IMAGE_PREFIX: &str = "handoff-";

/// One stored clipboard image.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub size: u64,
    pub created: DateTime<Local>,
}

impl ImageEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn age(&self) -> chrono::Duration {
        Local::now() - self.created
    }
}

/// Per-user temp directory, created on first use.
pub fn temp_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("could not determine home directory")?
        .join(".handoff")
        .join("tmp");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create temp directory: {}", dir.display()))?;
    Ok(dir)
}

/// Fresh capture path: `handoff-YYYY-MM-DDTHH-MM-SS.png`.
pub fn generate_image_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%dT%H-%M-%S");
    dir.join(format!("{IMAGE_PREFIX}{stamp}.png"))
}

/// Metadata for one image path (size, creation time).
pub fn image_entry(path: &Path) -> Result<ImageEntry> {
    let meta = fs::metadata(path)
        .with_context(|| format!("failed to stat image: {}", path.display()))?;
    let created = meta
        .created()
        .or_else(|_| meta.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now());
    Ok(ImageEntry {
        path: path.to_path_buf(),
        size: meta.len(),
        created,
    })
}

/// All stored images, newest first. Unreadable entries are skipped.
pub fn list_images(dir: &Path) -> Vec<ImageEntry> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut images: Vec<ImageEntry> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(IMAGE_PREFIX) || !name.ends_with(".png") {
                return None;
            }
            let meta = entry.metadata().ok()?;
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .ok()
                .map(DateTime::<Local>::from)?;
            Some(ImageEntry {
                path: entry.path(),
                size: meta.len(),
                created,
            })
        })
        .collect();

    images.sort_by(|a, b| b.created.cmp(&a.created));
    images
}

/// Delete images older than `max_age_days`. Returns the number removed.
pub fn cleanup_older_than(dir: &Path, max_age_days: i64) -> usize {
    let max_age = chrono::Duration::days(max_age_days);
    let mut deleted = 0;

    for image in list_images(dir) {
        if image.age() > max_age {
            match fs::remove_file(&image.path) {
                Ok(()) => {
                    debug!(path = %image.path.display(), "deleted old temp image");
                    deleted += 1;
                }
                Err(err) => {
                    tracing::warn!(path = %image.path.display(), %err, "failed to delete temp image");
                }
            }
        }
    }

    deleted
}

/// Delete every stored image. Returns the number removed.
pub fn cleanup_all(dir: &Path) -> usize {
    let mut deleted = 0;
    for image in list_images(dir) {
        if fs::remove_file(&image.path).is_ok() {
            deleted += 1;
        }
    }
    deleted
}

/// Human-readable size.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
