//! Audible feedback after a successful dispatch.
//!
//! Playback failures never surface to the user; a missing player or sound
//! file is logged at debug level and the operation carries on.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Play the feedback cue if enabled and a sound file is configured.
pub fn play_feedback(enabled: bool, sound_path: Option<&Path>) {
    if !enabled {
        return;
    }
    let Some(path) = sound_path else {
        debug!("no feedback sound configured");
        return;
    };
    if !path.exists() {
        debug!(path = %path.display(), "feedback sound file not found");
        return;
    }
    if let Err(err) = play(path) {
        debug!(%err, "feedback sound playback failed");
    }
}

#[cfg(target_os = "macos")]
fn play(path: &Path) -> std::io::Result<()> {
    Command::new("afplay").arg(path).status().map(|_| ())
}

#[cfg(target_os = "windows")]
fn play(path: &Path) -> std::io::Result<()> {
    let script = format!(
        "(New-Object Media.SoundPlayer '{}').PlaySync();",
        path.display()
    );
    Command::new("powershell")
        .args(["-NoProfile", "-Command", &script])
        .status()
        .map(|_| ())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn play(path: &Path) -> std::io::Result<()> {
    // Whichever player is installed wins.
    for player in ["paplay", "aplay", "play"] {
        match Command::new(player).arg(path).status() {
            Ok(status) if status.success() => return Ok(()),
            _ => continue,
        }
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no sound player available (tried paplay, aplay, play)",
    ))
}
