//! `handoff send` - dispatch free text and/or a code reference.

use std::path::PathBuf;

use anyhow::{bail, Result};

use handoff::clipboard::SystemClipboard;
use handoff::config::Settings;
use handoff::prompt::ConsolePrompter;
use handoff::sound;
use handoff::terminal::{Dispatcher, TerminalResolver, TmuxHost};

pub async fn send_command(
    text: Option<String>,
    file: Option<PathBuf>,
    lines: Option<String>,
) -> Result<()> {
    let reference = super::reference_from_flags(file.as_ref(), lines.as_deref())?;

    let payload = match (text, reference) {
        (Some(text), Some(reference)) => format!("{text} {reference}"),
        (Some(text), None) => text,
        (None, Some(reference)) => reference.format(),
        (None, None) => bail!("nothing to send: pass TEXT and/or --file with --lines"),
    };

    let settings = Settings::load()?;
    let host = TmuxHost::new();
    let prompter = ConsolePrompter;
    let clipboard = SystemClipboard;
    let mut resolver = TerminalResolver::new();

    let dispatcher = Dispatcher {
        host: &host,
        prompter: &prompter,
        clipboard: &clipboard,
    };

    if dispatcher.send(&mut resolver, &payload)? {
        sound::play_feedback(settings.sound_enabled, settings.sound_path.as_deref());
    }
    Ok(())
}
