//! End-to-end dispatch behavior against a scripted host.

mod common;

use common::{MockHost, RecordingClipboard, ScriptedPrompter};
use handoff::prompt::FallbackChoice;
use handoff::terminal::{Dispatcher, TerminalResolver};

fn dispatcher<'a>(
    host: &'a MockHost,
    prompter: &'a ScriptedPrompter,
    clipboard: &'a RecordingClipboard,
) -> Dispatcher<'a> {
    Dispatcher {
        host,
        prompter,
        clipboard,
    }
}

#[test]
fn claude_terminal_gets_text_without_auto_submit() {
    let host = MockHost::new(vec![
        ("%0", "shell", "zsh"),
        ("%1", "Claude Code", "claude"),
    ]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "Explain this \\")
        .unwrap();

    assert!(sent);
    // Confident match: no blocking choice was shown.
    assert!(!prompter.prompted.get());

    let sends = host.sent.borrow();
    assert_eq!(sends.len(), 1);
    let (id, text, submit) = &sends[0];
    assert_eq!(id.as_str(), "%1");
    assert_eq!(text, "Explain this");
    assert!(!submit, "direct injection must not auto-submit");
}

#[test]
fn interior_continuation_markers_survive_dispatch() {
    let host = MockHost::new(vec![("%1", "aider", "aider")]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "fix a \\ b \\")
        .unwrap();

    assert_eq!(host.sent_texts(), vec!["fix a \\ b".to_string()]);
}

#[test]
fn fallback_terminal_blocks_until_user_decides() {
    let host = MockHost::new(vec![("%0", "shell", "zsh")]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "hello")
        .unwrap();

    assert!(!sent);
    assert!(prompter.prompted.get());
    assert!(host.sent.borrow().is_empty(), "abort must not send anything");
}

#[test]
fn proceed_anyway_sends_to_fallback_terminal() {
    let host = MockHost::new(vec![("%0", "shell", "zsh")]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::ProceedAnyway);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "hello")
        .unwrap();

    assert!(sent);
    assert_eq!(host.sent_texts(), vec!["hello".to_string()]);
}

#[test]
fn chatgpt_family_is_rejected_with_warning() {
    let host = MockHost::new(vec![("%1", "chatgpt", "chatgpt")]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "hello")
        .unwrap();

    assert!(!sent);
    assert!(host.sent.borrow().is_empty());
    assert_eq!(prompter.warnings.borrow().len(), 1);
}

#[test]
fn droid_goes_through_clipboard_and_paste() {
    let host = MockHost::new(vec![("%1", "droid", "droid")]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "review this \\")
        .unwrap();

    assert!(sent);
    assert!(host.sent.borrow().is_empty(), "droid must not use direct injection");
    assert_eq!(clipboard.texts.borrow().as_slice(), ["review this"]);
    assert_eq!(host.pastes.borrow().len(), 1);
}

#[test]
fn droid_paste_failure_falls_back_to_manual_instruction() {
    let mut host = MockHost::new(vec![("%1", "droid", "droid")]);
    host.paste_supported = false;
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "review this")
        .unwrap();

    // The clipboard placement succeeded, so the operation did too.
    assert!(sent);
    assert_eq!(clipboard.texts.borrow().len(), 1);
    assert_eq!(prompter.notices.borrow().len(), 1);
}

#[test]
fn stale_terminal_purges_tracking_and_reports_failure() {
    let host = MockHost::new(vec![("%1", "Claude Code", "claude")]);
    // The pane disappears right after resolution.
    host.vanish_after.set(Some(1));

    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();
    resolver.track(handoff::terminal::TerminalId("%1".to_string()));

    let sent = dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "hello")
        .unwrap();

    assert!(!sent);
    assert!(host.sent.borrow().is_empty());
    assert!(!resolver.is_tracked(&handoff::terminal::TerminalId("%1".to_string())));
    assert_eq!(prompter.warnings.borrow().len(), 1);
}

#[test]
fn tracked_pane_is_preferred_over_other_matches() {
    let host = MockHost::new(vec![
        ("%0", "gemini", "gemini"),
        ("%1", "Claude Code", "claude"),
    ]);
    let prompter = ScriptedPrompter::answering(FallbackChoice::Abort);
    let clipboard = RecordingClipboard::default();
    let mut resolver = TerminalResolver::new();
    resolver.track(handoff::terminal::TerminalId("%1".to_string()));

    dispatcher(&host, &prompter, &clipboard)
        .send(&mut resolver, "hi")
        .unwrap();

    let sends = host.sent.borrow();
    assert_eq!(sends[0].0.as_str(), "%1");
}
