//! tmux-backed [`TerminalHost`] implementation.
//!
//! Every operation shells out to the `tmux` binary and targets panes by
//! their stable `%N` pane id. The pane listing doubles as our liveness
//! check: a pane missing from `list-panes -a` is gone.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

use super::host::{TerminalHost, TerminalId, TerminalInfo};

/// Field separator for `list-panes` format strings. Unlikely to occur in
/// window names or commands.
const SEP: char = '\u{1f}';

pub struct TmuxHost;

impl TmuxHost {
    pub fn new() -> Self {
        TmuxHost
    }

    fn tmux(args: &[&str]) -> Result<String> {
        let output = Command::new("tmux")
            .args(args)
            .output()
            .context("failed to run tmux (is it installed and running?)")?;

        if !output.status.success() {
            bail!(
                "tmux {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn parse_pane_line(line: &str) -> Option<TerminalInfo> {
        let mut fields = line.splitn(4, SEP);
        let id = fields.next()?;
        let window_name = fields.next()?;
        let pane_title = fields.next()?;
        let current_cmd = fields.next().unwrap_or_default();

        // Prefer the pane title when set to something other than the
        // default (tmux fills it with the hostname or the command).
        let display_name = if pane_title.is_empty() {
            window_name.to_string()
        } else {
            format!("{window_name} {pane_title}")
        };

        Some(TerminalInfo {
            id: TerminalId(id.to_string()),
            display_name,
            process_hint: current_cmd.to_string(),
        })
    }
}

impl Default for TmuxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalHost for TmuxHost {
    fn terminals(&self) -> Result<Vec<TerminalInfo>> {
        let format = format!("#{{pane_id}}{SEP}#{{window_name}}{SEP}#{{pane_title}}{SEP}#{{pane_current_command}}");
        let out = Self::tmux(&["list-panes", "-a", "-F", &format])?;

        Ok(out.lines().filter_map(Self::parse_pane_line).collect())
    }

    fn focused(&self) -> Result<Option<TerminalId>> {
        // display-message resolves against the active pane of the attached
        // client; detached servers have no focused pane.
        match Self::tmux(&["display-message", "-p", "#{pane_id}"]) {
            Ok(out) => {
                let id = out.trim();
                if id.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(TerminalId(id.to_string())))
                }
            }
            Err(_) => Ok(None),
        }
    }

    fn send_text(&self, id: &TerminalId, text: &str, submit: bool) -> Result<()> {
        // -l sends the text literally, without key-name interpretation and
        // without a trailing Enter.
        Self::tmux(&["send-keys", "-t", id.as_str(), "-l", text])?;
        if submit {
            Self::tmux(&["send-keys", "-t", id.as_str(), "Enter"])?;
        }
        Ok(())
    }

    fn paste(&self, id: &TerminalId) -> Result<()> {
        // Route the system clipboard through a tmux buffer: load-buffer
        // reads stdin, paste-buffer types it into the target pane.
        let text = arboard::Clipboard::new()
            .and_then(|mut c| c.get_text())
            .context("failed to read system clipboard")?;

        let mut child = Command::new("tmux")
            .args(["load-buffer", "-b", "handoff", "-"])
            .stdin(Stdio::piped())
            .spawn()
            .context("failed to run tmux load-buffer")?;
        child
            .stdin
            .as_mut()
            .context("tmux load-buffer stdin unavailable")?
            .write_all(text.as_bytes())?;
        let status = child.wait()?;
        if !status.success() {
            bail!("tmux load-buffer failed");
        }

        Self::tmux(&["paste-buffer", "-d", "-b", "handoff", "-t", id.as_str()])?;
        Ok(())
    }

    fn spawn(&self, name: &str, command: &str) -> Result<TerminalId> {
        let out = Self::tmux(&[
            "new-window",
            "-n",
            name,
            "-P",
            "-F",
            "#{pane_id}",
            command,
        ])?;
        let id = out.trim();
        if id.is_empty() {
            bail!("tmux new-window returned no pane id");
        }
        Ok(TerminalId(id.to_string()))
    }

    fn focus(&self, id: &TerminalId) -> Result<()> {
        Self::tmux(&["select-window", "-t", id.as_str()])?;
        Self::tmux(&["select-pane", "-t", id.as_str()])?;
        Ok(())
    }
}
