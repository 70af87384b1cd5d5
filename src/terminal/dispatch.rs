//! Dispatching text to a resolved AI terminal.
//!
//! The hard rule: text is never silently sent to a terminal that was not
//! confidently identified as an AI CLI. Low-confidence targets surface a
//! blocking choice (start a CLI, proceed anyway, abort) before anything
//! moves.
//!
//! Per-family delivery differs. Claude, Gemini and aider accept direct
//! text injection, sent without a newline so the user can review before
//! submitting. Droid's injection is unreliable, so its text goes to the
//! system clipboard followed by the host paste action. ChatGPT is
//! recognized but unsupported and is rejected outright.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::clipboard::text::TextClipboard;
use crate::profile::{self, CliFamily};
use crate::prompt::{FallbackChoice, LaunchChoice, Prompter};

use super::host::TerminalHost;
use super::resolver::{Candidate, TerminalResolver};

/// How long a freshly launched CLI gets to come up before text is sent.
const LAUNCH_GRACE: Duration = Duration::from_secs(2);

/// Strip one trailing continuation marker (`\`) plus surrounding
/// whitespace. Interior markers are untouched.
pub fn strip_continuation(text: &str) -> &str {
    let trimmed = text.trim_end();
    trimmed.strip_suffix('\\').map(str::trim_end).unwrap_or(trimmed).trim_start()
}

/// Everything `send` needs besides the resolver state.
pub struct Dispatcher<'a> {
    pub host: &'a dyn TerminalHost,
    pub prompter: &'a dyn Prompter,
    pub clipboard: &'a dyn TextClipboard,
}

impl Dispatcher<'_> {
    /// Resolve a target terminal and deliver `text` to it.
    ///
    /// Returns `Ok(false)` when nothing was sent: the user aborted, the
    /// CLI family is unsupported, or the terminal went stale at time of
    /// use. Stale handles are purged from tracking; the caller re-invokes
    /// if it wants a retry.
    pub fn send(&self, resolver: &mut TerminalResolver, text: &str) -> Result<bool> {
        let candidate = resolver.find_candidate(self.host)?;

        let candidate = match candidate {
            Some(c) if c.confident => c,
            other => match self.resolve_unconfirmed(resolver, other)? {
                Some(c) => c,
                None => return Ok(false),
            },
        };

        // Terminals close asynchronously; re-validate right before use.
        let live = self.host.terminals()?;
        if candidate.info.revalidate(&live).is_none() {
            resolver.untrack(&candidate.info.id);
            self.prompter
                .warn("terminal closed before the text could be sent");
            return Ok(false);
        }

        let payload = strip_continuation(text);
        debug!(target_pane = %candidate.info.id, family = ?candidate.family, "dispatching");

        match candidate.family {
            CliFamily::Claude | CliFamily::Gemini | CliFamily::Aider => {
                self.host.focus(&candidate.info.id).ok();
                self.host.send_text(&candidate.info.id, payload, false)?;
            }
            CliFamily::Droid => {
                // Direct injection is unreliable for droid; go through the
                // clipboard and the host paste action instead.
                self.clipboard.set_text(payload)?;
                if let Err(err) = self.host.paste(&candidate.info.id) {
                    debug!(%err, "host paste action unavailable");
                    self.prompter.notify(
                        "Prompt copied to clipboard. Paste it into the droid terminal manually.",
                    );
                }
            }
            CliFamily::ChatGpt => {
                self.prompter
                    .warn("sending to the ChatGPT CLI is not supported");
                return Ok(false);
            }
            CliFamily::Unknown => {
                // Only reachable after an explicit "proceed anyway".
                self.host.focus(&candidate.info.id).ok();
                self.host.send_text(&candidate.info.id, payload, false)?;
            }
        }

        info!(family = ?candidate.family, "sent to terminal");
        Ok(true)
    }

    /// Blocking flow for a low-confidence (or absent) target terminal.
    fn resolve_unconfirmed(
        &self,
        resolver: &mut TerminalResolver,
        fallback: Option<Candidate>,
    ) -> Result<Option<Candidate>> {
        match self.prompter.no_ai_terminal(fallback.is_some())? {
            FallbackChoice::Abort => Ok(None),
            FallbackChoice::ProceedAnyway => Ok(fallback),
            FallbackChoice::StartCli => self.launch_cli(resolver),
        }
    }

    /// Run the CLI picker and spawn the chosen command in a new terminal.
    fn launch_cli(&self, resolver: &mut TerminalResolver) -> Result<Option<Candidate>> {
        let installed = profile::detect_installed();

        let (title, command) = match self.prompter.pick_cli(&installed)? {
            None => return Ok(None),
            Some(LaunchChoice::Custom(command)) => (command.clone(), command),
            Some(LaunchChoice::Profile(p)) => {
                let command = installed
                    .iter()
                    .find(|(installed, _)| installed.family == p.family)
                    .map(|(_, cmd)| cmd.clone())
                    .unwrap_or_else(|| p.command.to_string());
                (p.pane_title.to_string(), command)
            }
        };

        let id = self.host.spawn(&title, &command)?;
        resolver.track(id.clone());
        self.host.focus(&id).ok();
        self.prompter.notify(&format!(
            "Starting {title}... install it first if nothing comes up."
        ));

        // Give the CLI a moment to start before text arrives. Blocking
        // wait: dispatch runs synchronously from both the command handlers
        // and the gate tick, and nothing else shares the flow while a
        // launch is pending.
        std::thread::sleep(LAUNCH_GRACE);

        let live = self.host.terminals()?;
        let Some(info) = live.into_iter().find(|t| t.id == id) else {
            warn!(pane = %id, "launched terminal disappeared immediately");
            resolver.untrack(&id);
            return Ok(None);
        };

        let family = CliFamily::classify(&info.display_name, &info.process_hint);
        Ok(Some(Candidate {
            confident: family.is_known(),
            family,
            info,
        }))
    }
}
