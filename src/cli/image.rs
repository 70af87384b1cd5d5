//! `handoff image` - one-shot clipboard image capture and send.

use anyhow::Result;

use handoff::clipboard::{save_clipboard_image, SystemClipboard};
use handoff::config::Settings;
use handoff::prompt::{ConsolePrompter, Prompter};
use handoff::terminal::{Dispatcher, TerminalResolver, TmuxHost};
use handoff::{sound, tempfiles};

pub async fn image_command() -> Result<()> {
    let settings = Settings::load()?;
    let temp_dir = tempfiles::temp_dir()?;
    let prompter = ConsolePrompter;

    let Some(path) = save_clipboard_image(&temp_dir)? else {
        prompter.warn("no image found in clipboard; copy a screenshot first");
        return Ok(());
    };

    let entry = tempfiles::image_entry(&path)?;
    if !prompter.confirm_send_image(&entry)? {
        // The capture stays in the temp store either way.
        prompter.notify(&format!("saved to {}", path.display()));
        return Ok(());
    }

    let host = TmuxHost::new();
    let clipboard = SystemClipboard;
    let mut resolver = TerminalResolver::new();
    let dispatcher = Dispatcher {
        host: &host,
        prompter: &prompter,
        clipboard: &clipboard,
    };

    let text = format!("Here's an image ({}): {}", entry.file_name(), path.display());
    if dispatcher.send(&mut resolver, &text)? {
        sound::play_feedback(settings.sound_enabled, settings.sound_path.as_deref());
        prompter.notify(&format!("image sent (saved in {})", temp_dir.display()));
    }
    Ok(())
}
