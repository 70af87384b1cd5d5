//! `handoff watch` - run the clipboard image gate until Ctrl-C.

use anyhow::Result;

use handoff::clipboard::{ClipboardGate, OsClipboard, SystemClipboard};
use handoff::config::Settings;
use handoff::prompt::ConsolePrompter;
use handoff::tempfiles;
use handoff::terminal::TmuxHost;

pub async fn watch_command() -> Result<()> {
    let settings = Settings::load()?;
    let temp_dir = tempfiles::temp_dir()?;

    let mut gate = ClipboardGate::new(
        Box::new(TmuxHost::new()),
        Box::new(ConsolePrompter),
        Box::new(SystemClipboard),
        Box::new(OsClipboard),
        temp_dir,
        settings.gate_config(),
    );

    gate.run().await
}
