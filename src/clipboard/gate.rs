//! Clipboard image polling gate.
//!
//! While enabled, a timer samples the clipboard every couple of seconds.
//! A newly seen image (by content hash, within the dedup window) triggers
//! a preview-and-send offer, but only when an AI terminal is confidently
//! detected; with nothing to send to, the detection is discarded silently.
//!
//! The `processing` flag is a single-slot re-entrancy guard, not a queue:
//! a tick that lands while a capture/prompt cycle is still in flight is
//! skipped outright. Capture errors are swallowed and never stop the
//! timer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::clipboard::capture::ImageSource;
use crate::clipboard::dedup::{content_hash, DedupWindow};
use crate::clipboard::text::TextClipboard;
use crate::prompt::{ImageAction, Prompter};
use crate::terminal::dispatch::Dispatcher;
use crate::terminal::host::TerminalHost;
use crate::terminal::resolver::TerminalResolver;
use crate::{sound, tempfiles};

/// Gate tuning, taken from [`Settings`](crate::config::Settings).
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub poll_interval: Duration,
    pub dedup_window: Duration,
    pub sound_enabled: bool,
    pub sound_path: Option<PathBuf>,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            poll_interval: Duration::from_secs(2),
            dedup_window: super::dedup::DEFAULT_WINDOW,
            sound_enabled: false,
            sound_path: None,
        }
    }
}

/// What one tick did, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A previous cycle was still in flight; the tick was dropped.
    Skipped,
    NoImage,
    Duplicate,
    /// Image found but no AI terminal to send to; discarded silently.
    NoTerminal,
    /// User declined at the notification or the preview.
    Declined,
    Sent,
}

pub struct ClipboardGate {
    host: Box<dyn TerminalHost>,
    prompter: Box<dyn Prompter>,
    clipboard: Box<dyn TextClipboard>,
    source: Box<dyn ImageSource>,
    resolver: TerminalResolver,
    dedup: DedupWindow,
    config: GateConfig,
    temp_dir: PathBuf,
    processing: bool,
}

impl ClipboardGate {
    pub fn new(
        host: Box<dyn TerminalHost>,
        prompter: Box<dyn Prompter>,
        clipboard: Box<dyn TextClipboard>,
        source: Box<dyn ImageSource>,
        temp_dir: PathBuf,
        config: GateConfig,
    ) -> Self {
        ClipboardGate {
            host,
            prompter,
            clipboard,
            source,
            resolver: TerminalResolver::new(),
            dedup: DedupWindow::new(config.dedup_window),
            config,
            temp_dir,
            processing: false,
        }
    }

    /// Poll until Ctrl-C. Reconfiguration means tearing this down and
    /// building a fresh gate; there is no partial-update path.
    pub async fn run(&mut self) -> Result<()> {
        let mut timer = tokio::time::interval(self.config.poll_interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        info!(
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "clipboard watch started"
        );

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.tick();
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("clipboard watch stopping");
                    break;
                }
            }
        }

        self.teardown();
        Ok(())
    }

    /// One polling tick. Never returns an error: every failure inside a
    /// cycle degrades to "nothing happened this tick".
    pub fn tick(&mut self) -> TickOutcome {
        if self.processing {
            debug!("previous clipboard cycle still in flight; tick dropped");
            return TickOutcome::Skipped;
        }

        self.processing = true;
        let outcome = self.check_clipboard();
        self.processing = false;

        match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(%err, "clipboard check failed; polling continues");
                TickOutcome::NoImage
            }
        }
    }

    /// Explicit teardown: tracking and dedup state do not outlive the
    /// polling loop.
    pub fn teardown(&mut self) {
        self.resolver.clear();
        self.dedup.clear();
        self.processing = false;
    }

    fn check_clipboard(&mut self) -> Result<TickOutcome> {
        let Some(path) = self.source.capture(&self.temp_dir)? else {
            return Ok(TickOutcome::NoImage);
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                // Don't leave an unreadable capture behind.
                let _ = std::fs::remove_file(&path);
                return Err(err.into());
            }
        };
        let hash = content_hash(&bytes);

        if self.dedup.seen_within(&hash) {
            debug!("clipboard image already handled recently");
            return Ok(TickOutcome::Duplicate);
        }

        // Don't prompt when there is nothing to send to. The hash stays
        // unrecorded so the image can still prompt once a terminal exists.
        let confident = self
            .resolver
            .find_candidate(self.host.as_ref())?
            .map(|c| c.confident)
            .unwrap_or(false);
        if !confident {
            debug!("no AI terminal detected; discarding clipboard image");
            return Ok(TickOutcome::NoTerminal);
        }

        self.dedup.record(&hash);

        match self.prompter.image_detected(&path)? {
            ImageAction::Ignore => Ok(TickOutcome::Declined),
            ImageAction::PreviewAndSend => self.preview_and_send(path),
        }
    }

    fn preview_and_send(&mut self, path: PathBuf) -> Result<TickOutcome> {
        let entry = tempfiles::image_entry(&path)?;

        if !self.prompter.confirm_send_image(&entry)? {
            // Declining from the preview is silent; the temp file stays.
            return Ok(TickOutcome::Declined);
        }

        let text = format!("Here's an image ({}): {}", entry.file_name(), path.display());
        let dispatcher = Dispatcher {
            host: self.host.as_ref(),
            prompter: self.prompter.as_ref(),
            clipboard: self.clipboard.as_ref(),
        };

        if dispatcher.send(&mut self.resolver, &text)? {
            sound::play_feedback(self.config.sound_enabled, self.config.sound_path.as_deref());
            self.prompter
                .notify(&format!("Image sent to terminal ({})", entry.file_name()));
            Ok(TickOutcome::Sent)
        } else {
            Ok(TickOutcome::Declined)
        }
    }
}
