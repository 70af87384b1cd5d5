//! User settings, stored at `~/.handoff/config.toml`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::clipboard::gate::GateConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Clipboard poll cadence for `handoff watch`.
    pub poll_interval_ms: u64,
    /// How long a repeat detection of the same image stays suppressed.
    pub dedup_window_secs: u64,
    /// Play a feedback cue after a successful dispatch.
    pub sound_enabled: bool,
    /// Sound file for the feedback cue.
    pub sound_path: Option<PathBuf>,
    /// Age threshold for `handoff cleanup` without flags.
    pub temp_max_age_days: i64,
    /// CLI `handoff start` launches when none is named on the command line.
    pub preferred_cli: Option<String>,
    /// Workspace-relative directory with template overrides.
    pub workspace_template_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            poll_interval_ms: 2000,
            dedup_window_secs: 60,
            sound_enabled: false,
            sound_path: None,
            temp_max_age_days: 7,
            preferred_cli: None,
            workspace_template_dir: ".handoff/templates".to_string(),
        }
    }
}

impl Settings {
    /// Global config directory (`~/.handoff/`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".handoff")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Bundled defaults directory for prompt templates.
    pub fn default_templates_dir() -> PathBuf {
        Self::config_dir().join("templates")
    }

    /// Workspace override directory, resolved against the current
    /// directory. `None` when it does not exist.
    pub fn workspace_templates_dir(&self) -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(&self.workspace_template_dir);
        dir.is_dir().then_some(dir)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(settings)
    }

    /// Load the global config, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            let settings = Settings::default();
            settings.save_to_file(&path)?;
            return Ok(settings);
        }
        Self::from_file(&path)
    }

    /// Save with an exclusive lock and an atomic temp-file + rename write,
    /// so concurrent invocations cannot corrupt the file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .context("Failed to acquire config lock")?;

        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write config content")?;
        temp_file.sync_all().context("Failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

        Ok(())
    }

    pub fn gate_config(&self) -> GateConfig {
        // tokio's interval panics on a zero period; fall back to the
        // default cadence rather than crashing the watch loop.
        let poll_ms = if self.poll_interval_ms == 0 {
            tracing::warn!("poll_interval_ms = 0 is invalid; using 2000");
            2000
        } else {
            self.poll_interval_ms
        };
        GateConfig {
            poll_interval: Duration::from_millis(poll_ms),
            dedup_window: Duration::from_secs(self.dedup_window_secs),
            sound_enabled: self.sound_enabled,
            sound_path: self.sound_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let settings = Settings {
            poll_interval_ms: 5000,
            sound_enabled: true,
            ..Settings::default()
        };
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.poll_interval_ms, 5000);
        assert!(loaded.sound_enabled);
        assert_eq!(loaded.dedup_window_secs, 60);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = 1000\n").unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.poll_interval_ms, 1000);
        assert_eq!(loaded.temp_max_age_days, 7);
        assert!(loaded.preferred_cli.is_none());
        assert_eq!(loaded.workspace_template_dir, ".handoff/templates");
    }

    #[test]
    fn gate_config_converts_units() {
        let settings = Settings::default();
        let gate = settings.gate_config();
        assert_eq!(gate.poll_interval, Duration::from_secs(2));
        assert_eq!(gate.dedup_window, Duration::from_secs(60));
    }

    #[test]
    fn zero_poll_interval_falls_back_to_default() {
        let settings = Settings {
            poll_interval_ms: 0,
            ..Settings::default()
        };
        let gate = settings.gate_config();
        assert_eq!(gate.poll_interval, Duration::from_secs(2));
    }
}
