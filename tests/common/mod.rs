//! Shared test doubles: a scriptable terminal host, prompter and
//! clipboard for exercising resolution and dispatch without tmux.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Result};

use handoff::profile::CliProfile;
use handoff::prompt::{FallbackChoice, ImageAction, LaunchChoice, Prompter};
use handoff::tempfiles::ImageEntry;
use handoff::terminal::{TerminalHost, TerminalId, TerminalInfo};

/// In-memory terminal host. Panes can be added, removed and spawned;
/// sent text and paste calls are recorded for assertions.
pub struct MockHost {
    pub panes: RefCell<Vec<TerminalInfo>>,
    pub focused: RefCell<Option<TerminalId>>,
    pub sent: RefCell<Vec<(TerminalId, String, bool)>>,
    pub pastes: RefCell<Vec<TerminalId>>,
    pub paste_supported: bool,
    /// When set, every `terminals()` call after the Nth returns an empty
    /// list, simulating panes closing underneath us.
    pub vanish_after: Cell<Option<usize>>,
    list_calls: Cell<usize>,
    next_id: Cell<u32>,
}

impl MockHost {
    pub fn new(panes: Vec<(&str, &str, &str)>) -> Self {
        MockHost {
            panes: RefCell::new(
                panes
                    .into_iter()
                    .map(|(id, name, hint)| TerminalInfo {
                        id: TerminalId(id.to_string()),
                        display_name: name.to_string(),
                        process_hint: hint.to_string(),
                    })
                    .collect(),
            ),
            focused: RefCell::new(None),
            sent: RefCell::new(Vec::new()),
            pastes: RefCell::new(Vec::new()),
            paste_supported: true,
            vanish_after: Cell::new(None),
            list_calls: Cell::new(0),
            next_id: Cell::new(100),
        }
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(_, t, _)| t.clone()).collect()
    }
}

impl TerminalHost for MockHost {
    fn terminals(&self) -> Result<Vec<TerminalInfo>> {
        let calls = self.list_calls.get() + 1;
        self.list_calls.set(calls);
        if let Some(limit) = self.vanish_after.get() {
            if calls > limit {
                return Ok(Vec::new());
            }
        }
        Ok(self.panes.borrow().clone())
    }

    fn focused(&self) -> Result<Option<TerminalId>> {
        Ok(self.focused.borrow().clone())
    }

    fn send_text(&self, id: &TerminalId, text: &str, submit: bool) -> Result<()> {
        self.sent
            .borrow_mut()
            .push((id.clone(), text.to_string(), submit));
        Ok(())
    }

    fn paste(&self, id: &TerminalId) -> Result<()> {
        if !self.paste_supported {
            bail!("paste action unavailable");
        }
        self.pastes.borrow_mut().push(id.clone());
        Ok(())
    }

    fn spawn(&self, name: &str, command: &str) -> Result<TerminalId> {
        let id = TerminalId(format!("%{}", self.next_id.get()));
        self.next_id.set(self.next_id.get() + 1);
        self.panes.borrow_mut().push(TerminalInfo {
            id: id.clone(),
            display_name: name.to_string(),
            process_hint: command.to_string(),
        });
        Ok(id)
    }

    fn focus(&self, _: &TerminalId) -> Result<()> {
        Ok(())
    }
}

/// Prompter with a pre-scripted answer for the no-AI-terminal choice.
/// Warnings and notifications are recorded.
pub struct ScriptedPrompter {
    pub fallback_choice: FallbackChoice,
    pub launch: Option<LaunchChoice>,
    pub warnings: Rc<RefCell<Vec<String>>>,
    pub notices: Rc<RefCell<Vec<String>>>,
    pub prompted: Cell<bool>,
}

impl ScriptedPrompter {
    pub fn answering(choice: FallbackChoice) -> Self {
        ScriptedPrompter {
            fallback_choice: choice,
            launch: None,
            warnings: Rc::new(RefCell::new(Vec::new())),
            notices: Rc::new(RefCell::new(Vec::new())),
            prompted: Cell::new(false),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn no_ai_terminal(&self, _have_fallback: bool) -> Result<FallbackChoice> {
        self.prompted.set(true);
        Ok(self.fallback_choice.clone())
    }

    fn pick_cli(&self, _: &[(&'static CliProfile, String)]) -> Result<Option<LaunchChoice>> {
        Ok(self.launch.clone())
    }

    fn image_detected(&self, _: &Path) -> Result<ImageAction> {
        Ok(ImageAction::Ignore)
    }

    fn confirm_send_image(&self, _: &ImageEntry) -> Result<bool> {
        Ok(false)
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

/// Clipboard that records everything placed on it.
#[derive(Default)]
pub struct RecordingClipboard {
    pub texts: RefCell<Vec<String>>,
}

impl handoff::clipboard::TextClipboard for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        self.texts.borrow_mut().push(text.to_string());
        Ok(())
    }
}
