//! AI terminal discovery.
//!
//! Resolution follows a confidence hierarchy: terminals we spawned
//! ourselves, then terminals whose name or command matches a known AI CLI
//! keyword, then the focused / most recent terminal as a best-effort
//! fallback. Only a keyword match counts as a confident identification.

use std::collections::HashSet;

use anyhow::Result;
use tracing::debug;

use crate::profile::CliFamily;

use super::host::{TerminalHost, TerminalId, TerminalInfo};

/// A resolved terminal plus how sure we are that an AI CLI is running in it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub info: TerminalInfo,
    pub family: CliFamily,
    /// True only when the terminal matched the keyword scan. Fallback
    /// terminals are never confident, no matter how they were found.
    pub confident: bool,
}

/// Tracks terminals this process spawned and resolves dispatch targets.
///
/// Holds ids only; every lookup re-validates against the host's live list
/// because terminals close asynchronously. Scoped to the process: call
/// [`clear`](Self::clear) on teardown rather than relying on exit.
#[derive(Debug, Default)]
pub struct TerminalResolver {
    tracked: HashSet<TerminalId>,
}

impl TerminalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a terminal we spawned ourselves.
    pub fn track(&mut self, id: TerminalId) {
        self.tracked.insert(id);
    }

    /// Forget a terminal (closed, or found stale at time of use).
    pub fn untrack(&mut self, id: &TerminalId) {
        self.tracked.remove(id);
    }

    pub fn is_tracked(&self, id: &TerminalId) -> bool {
        self.tracked.contains(id)
    }

    /// Drop all tracking state.
    pub fn clear(&mut self) {
        self.tracked.clear();
    }

    /// Locate the terminal most plausibly running a supported AI CLI.
    ///
    /// Returns `None` only when the host reports no terminals at all.
    /// Tracked terminals the host no longer lists are pruned as a side
    /// effect.
    pub fn find_candidate(&mut self, host: &dyn TerminalHost) -> Result<Option<Candidate>> {
        let terminals = host.terminals()?;

        // Prune tracked ids that no longer exist.
        self.tracked.retain(|id| {
            let alive = terminals.iter().any(|t| &t.id == id);
            if !alive {
                debug!(pane = %id, "pruning stale tracked terminal");
            }
            alive
        });

        // (a) self-launched terminals, highest confidence of intent.
        if let Some(info) = terminals.iter().find(|t| self.tracked.contains(&t.id)) {
            return Ok(Some(Self::candidate(info.clone())));
        }

        // (b) keyword scan over name and launch command.
        if let Some(info) = terminals
            .iter()
            .find(|t| CliFamily::classify(&t.display_name, &t.process_hint).is_known())
        {
            return Ok(Some(Self::candidate(info.clone())));
        }

        // (c) best-effort fallback: focused terminal, else the most
        // recently created one.
        let focused = host.focused()?;
        let fallback = focused
            .and_then(|id| terminals.iter().find(|t| t.id == id).cloned())
            .or_else(|| terminals.last().cloned());

        Ok(fallback.map(Self::candidate))
    }

    /// Classification is the single source of truth for confidence, so a
    /// tracked terminal whose AI CLI already exited degrades to
    /// low-confidence instead of being trusted forever.
    fn candidate(info: TerminalInfo) -> Candidate {
        let family = CliFamily::classify(&info.display_name, &info.process_hint);
        Candidate {
            confident: family.is_known(),
            family,
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::cell::RefCell;

    struct FakeHost {
        terminals: RefCell<Vec<TerminalInfo>>,
        focused: Option<TerminalId>,
    }

    impl FakeHost {
        fn new(terminals: Vec<(&str, &str, &str)>) -> Self {
            FakeHost {
                terminals: RefCell::new(
                    terminals
                        .into_iter()
                        .map(|(id, name, hint)| TerminalInfo {
                            id: TerminalId(id.to_string()),
                            display_name: name.to_string(),
                            process_hint: hint.to_string(),
                        })
                        .collect(),
                ),
                focused: None,
            }
        }
    }

    impl TerminalHost for FakeHost {
        fn terminals(&self) -> Result<Vec<TerminalInfo>> {
            Ok(self.terminals.borrow().clone())
        }
        fn focused(&self) -> Result<Option<TerminalId>> {
            Ok(self.focused.clone())
        }
        fn send_text(&self, _: &TerminalId, _: &str, _: bool) -> Result<()> {
            Ok(())
        }
        fn paste(&self, _: &TerminalId) -> Result<()> {
            Ok(())
        }
        fn spawn(&self, _: &str, _: &str) -> Result<TerminalId> {
            unimplemented!()
        }
        fn focus(&self, _: &TerminalId) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn keyword_match_beats_fallback() {
        let host = FakeHost::new(vec![
            ("%0", "shell", "zsh"),
            ("%1", "Claude Code", "claude"),
            ("%2", "editor", "nvim"),
        ]);
        let mut resolver = TerminalResolver::new();

        let candidate = resolver.find_candidate(&host).unwrap().unwrap();
        assert_eq!(candidate.info.id.as_str(), "%1");
        assert!(candidate.confident);
        assert_eq!(candidate.family, CliFamily::Claude);
    }

    #[test]
    fn tracked_terminal_wins_over_keyword_match() {
        let host = FakeHost::new(vec![
            ("%0", "gemini", "gemini"),
            ("%1", "Claude Code", "claude"),
        ]);
        let mut resolver = TerminalResolver::new();
        resolver.track(TerminalId("%1".to_string()));

        let candidate = resolver.find_candidate(&host).unwrap().unwrap();
        assert_eq!(candidate.info.id.as_str(), "%1");
    }

    #[test]
    fn fallback_is_never_confident() {
        let host = FakeHost::new(vec![("%0", "shell", "zsh"), ("%1", "editor", "nvim")]);
        let mut resolver = TerminalResolver::new();

        let candidate = resolver.find_candidate(&host).unwrap().unwrap();
        // Most recently created terminal, low confidence.
        assert_eq!(candidate.info.id.as_str(), "%1");
        assert!(!candidate.confident);
        assert_eq!(candidate.family, CliFamily::Unknown);
    }

    #[test]
    fn focused_fallback_preferred_over_last_created() {
        let mut host = FakeHost::new(vec![("%0", "shell", "zsh"), ("%1", "editor", "nvim")]);
        host.focused = Some(TerminalId("%0".to_string()));
        let mut resolver = TerminalResolver::new();

        let candidate = resolver.find_candidate(&host).unwrap().unwrap();
        assert_eq!(candidate.info.id.as_str(), "%0");
        assert!(!candidate.confident);
    }

    #[test]
    fn no_terminals_yields_none() {
        let host = FakeHost::new(vec![]);
        let mut resolver = TerminalResolver::new();
        assert!(resolver.find_candidate(&host).unwrap().is_none());
    }

    #[test]
    fn stale_tracked_terminals_are_pruned() {
        let host = FakeHost::new(vec![("%1", "Claude Code", "claude")]);
        let mut resolver = TerminalResolver::new();
        resolver.track(TerminalId("%9".to_string()));

        let candidate = resolver.find_candidate(&host).unwrap().unwrap();
        assert_eq!(candidate.info.id.as_str(), "%1");
        assert!(!resolver.is_tracked(&TerminalId("%9".to_string())));
    }
}
