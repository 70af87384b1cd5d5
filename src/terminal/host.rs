//! Host abstraction over externally-owned terminal sessions.
//!
//! Terminals belong to the multiplexer, not to us: handles here are opaque
//! references into the host's live list and can go stale at any moment.
//! Callers must re-validate against [`TerminalHost::terminals`] before
//! acting on a cached handle.

use anyhow::Result;

/// Opaque identifier for one terminal session (e.g. a tmux pane id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalId(pub String);

impl TerminalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TerminalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A snapshot of one live terminal as reported by the host.
#[derive(Debug, Clone)]
pub struct TerminalInfo {
    pub id: TerminalId,
    /// Window/pane title shown to the user.
    pub display_name: String,
    /// The command currently running in the terminal, or its shell path.
    pub process_hint: String,
}

/// Operations the terminal host provides. Production code talks to tmux;
/// tests substitute a scripted host.
pub trait TerminalHost {
    /// All currently open terminals, in creation order (oldest first).
    fn terminals(&self) -> Result<Vec<TerminalInfo>>;

    /// The currently focused terminal, if the host reports one.
    fn focused(&self) -> Result<Option<TerminalId>>;

    /// Send literal text to a terminal. With `submit = false` the text is
    /// typed without a trailing newline so the user can review it first.
    fn send_text(&self, id: &TerminalId, text: &str, submit: bool) -> Result<()>;

    /// Trigger the host's paste action for a terminal, pasting whatever is
    /// on the system clipboard. Hosts without a paste action return an error.
    fn paste(&self, id: &TerminalId) -> Result<()>;

    /// Open a new terminal running `command`, titled `name`.
    fn spawn(&self, name: &str, command: &str) -> Result<TerminalId>;

    /// Bring a terminal to the foreground.
    fn focus(&self, id: &TerminalId) -> Result<()>;
}

impl TerminalInfo {
    /// Find this terminal in a fresh host listing. `None` means the handle
    /// went stale.
    pub fn revalidate(&self, current: &[TerminalInfo]) -> Option<TerminalInfo> {
        current.iter().find(|t| t.id == self.id).cloned()
    }
}
