//! `handoff start` - launch an AI CLI in a new terminal.

use anyhow::{bail, Result};

use handoff::config::Settings;
use handoff::profile::{self, CliProfile};
use handoff::prompt::{ConsolePrompter, LaunchChoice, Prompter};
use handoff::terminal::{TerminalHost, TmuxHost};

pub fn start_command(which: Option<String>) -> Result<()> {
    let installed = profile::detect_installed();
    let which = which.or_else(|| Settings::load().ok().and_then(|s| s.preferred_cli));

    let (title, command) = match which {
        Some(name) => {
            let Some(profile) = profile::profile_by_name(&name) else {
                bail!("unknown AI CLI '{name}'");
            };
            (profile.pane_title.to_string(), resolved_command(profile, &installed))
        }
        None => match ConsolePrompter.pick_cli(&installed)? {
            None => return Ok(()),
            Some(LaunchChoice::Custom(command)) => (command.clone(), command),
            Some(LaunchChoice::Profile(profile)) => {
                (profile.pane_title.to_string(), resolved_command(profile, &installed))
            }
        },
    };

    let host = TmuxHost::new();
    let id = host.spawn(&title, &command)?;
    host.focus(&id).ok();
    println!("started {title} in pane {id}");
    Ok(())
}

/// Prefer the binary actually found on PATH over the profile default.
fn resolved_command(
    profile: &'static CliProfile,
    installed: &[(&'static CliProfile, String)],
) -> String {
    installed
        .iter()
        .find(|(p, _)| p.family == profile.family)
        .map(|(_, cmd)| cmd.clone())
        .unwrap_or_else(|| profile.command.to_string())
}
