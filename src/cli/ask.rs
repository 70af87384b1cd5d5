//! `handoff ask` - template-driven prompt plus a code reference.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

use handoff::clipboard::SystemClipboard;
use handoff::config::Settings;
use handoff::prompt::ConsolePrompter;
use handoff::sound;
use handoff::templates::{self, PromptTemplate};
use handoff::terminal::{Dispatcher, TerminalResolver, TmuxHost};

pub async fn ask_command(
    template: Option<String>,
    file: Option<PathBuf>,
    lines: Option<String>,
) -> Result<()> {
    let settings = Settings::load()?;
    let loaded = templates::load_templates(
        &Settings::default_templates_dir(),
        settings.workspace_templates_dir().as_deref(),
    );

    let chosen = match template {
        Some(name) => match templates::find_template(&loaded, &name) {
            Some(t) => t.clone(),
            None => bail!("no template named '{name}' (see `handoff templates list`)"),
        },
        None => match pick_interactively(&loaded)? {
            Some(t) => t,
            None => return Ok(()),
        },
    };

    let reference = super::reference_from_flags(file.as_ref(), lines.as_deref())?;
    let payload = match reference {
        Some(reference) => format!("{} {reference}", chosen.prompt),
        None => chosen.prompt.clone(),
    };

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

fn pick_interactively(loaded: &[PromptTemplate]) -> Result<Option<PromptTemplate>> {
    eprintln!("Pick a prompt:");
    for (i, template) in loaded.iter().enumerate() {
        eprintln!("  [{}] {}", i + 1, template.label);
    }
    eprint!("choice (empty to cancel): ");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    match line.parse::<usize>() {
        Ok(n) if n >= 1 && n <= loaded.len() => Ok(Some(loaded[n - 1].clone())),
        _ => bail!("invalid choice: {line}"),
    }
}
