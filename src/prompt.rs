//! User confirmation surface.
//!
//! Dispatch and the clipboard gate never act on an unconfirmed terminal or
//! image without going through a [`Prompter`]. The console implementation
//! asks on stdin; tests substitute a scripted prompter.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::profile::CliProfile;
use crate::tempfiles::ImageEntry;

/// What to do when no AI terminal was confidently identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackChoice {
    /// Start a fresh AI CLI in a new terminal.
    StartCli,
    /// Send to the unconfirmed fallback terminal anyway.
    ProceedAnyway,
    Abort,
}

/// Which CLI to launch from the picker.
#[derive(Debug, Clone)]
pub enum LaunchChoice {
    Profile(&'static CliProfile),
    /// A user-supplied launch command.
    Custom(String),
}

/// Reaction to a newly detected clipboard image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    PreviewAndSend,
    Ignore,
}

pub trait Prompter {
    /// Blocking choice shown when the resolved terminal is not a verified
    /// AI CLI. `have_fallback` tells the user whether "proceed anyway" has
    /// a terminal to go to at all.
    fn no_ai_terminal(&self, have_fallback: bool) -> Result<FallbackChoice>;

    /// Pick an AI CLI to launch. `installed` marks profiles detected on
    /// PATH. `None` means the user cancelled.
    fn pick_cli(&self, installed: &[(&'static CliProfile, String)]) -> Result<Option<LaunchChoice>>;

    /// Offer to forward a freshly detected clipboard image.
    fn image_detected(&self, path: &Path) -> Result<ImageAction>;

    /// Final confirmation from the preview, with image metadata shown.
    fn confirm_send_image(&self, entry: &ImageEntry) -> Result<bool>;

    /// Non-blocking informational message.
    fn notify(&self, message: &str);

    fn warn(&self, message: &str);
}

/// Stdin/stderr prompter for interactive CLI use.
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn ask(question: &str) -> Result<String> {
        eprint!("{question} ");
        io::stderr().flush().ok();
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        Ok(line.trim().to_string())
    }
}

impl Prompter for ConsolePrompter {
    fn no_ai_terminal(&self, have_fallback: bool) -> Result<FallbackChoice> {
        if have_fallback {
            eprintln!("No AI CLI terminal detected.");
            eprintln!("  [s] start an AI CLI in a new terminal");
            eprintln!("  [p] send to the current terminal anyway");
            eprintln!("  [a] abort");
        } else {
            eprintln!("No terminal found.");
            eprintln!("  [s] start an AI CLI");
            eprintln!("  [a] abort");
        }

        loop {
            let answer = Self::ask("choice [s/p/a]:")?;
            match answer.to_lowercase().as_str() {
                "s" => return Ok(FallbackChoice::StartCli),
                "p" if have_fallback => return Ok(FallbackChoice::ProceedAnyway),
                "a" | "" => return Ok(FallbackChoice::Abort),
                _ => continue,
            }
        }
    }

    fn pick_cli(&self, installed: &[(&'static CliProfile, String)]) -> Result<Option<LaunchChoice>> {
        let profiles = crate::profile::CLI_PROFILES.as_slice();
        eprintln!("Select AI CLI to start (will try to run even if not detected):");
        for (i, profile) in profiles.iter().enumerate() {
            let detected = installed
                .iter()
                .find(|(p, _)| p.family == profile.family)
                .map(|(_, cmd)| format!(" [detected: {cmd}]"))
                .unwrap_or_default();
            eprintln!("  [{}] {}{}", i + 1, profile.name, detected);
        }
        eprintln!("  [c] custom command");
        eprintln!("  [q] cancel");

        loop {
            let answer = Self::ask("choice:")?;
            match answer.to_lowercase().as_str() {
                "q" | "" => return Ok(None),
                "c" => {
                    let command = Self::ask("command:")?;
                    if command.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(LaunchChoice::Custom(command)));
                }
                n => {
                    if let Ok(idx) = n.parse::<usize>() {
                        if idx >= 1 && idx <= profiles.len() {
                            return Ok(Some(LaunchChoice::Profile(&profiles[idx - 1])));
                        }
                    }
                }
            }
        }
    }

    fn image_detected(&self, path: &Path) -> Result<ImageAction> {
        eprintln!("Screenshot detected in clipboard: {}", path.display());
        let answer = Self::ask("preview & send? [y/N]:")?;
        if answer.eq_ignore_ascii_case("y") {
            Ok(ImageAction::PreviewAndSend)
        } else {
            Ok(ImageAction::Ignore)
        }
    }

    fn confirm_send_image(&self, entry: &ImageEntry) -> Result<bool> {
        eprintln!(
            "{} ({}, created {})",
            entry.path.display(),
            crate::tempfiles::format_size(entry.size),
            entry.created.format("%Y-%m-%d %H:%M:%S"),
        );
        let answer = Self::ask("send image reference to the AI terminal? [y/N]:")?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}
