//! handoff - hand context to the AI CLI in your terminal
//!
//! handoff glues selected source code, clipboard screenshots and prompt
//! templates into text forwarded to an AI coding CLI (Claude Code, Gemini
//! CLI, aider, ...) running in a tmux pane.
//!
//! ## How targets are found
//!
//! Terminals are resolved with a confidence hierarchy: panes handoff
//! launched itself, then panes whose title or running command matches a
//! known AI CLI keyword, then the focused pane as a best-effort fallback.
//! Only keyword-matched panes count as verified; anything else requires
//! explicit user approval before text is sent.
//!
//! ## Clipboard watching
//!
//! `handoff watch` polls the clipboard for copied images, suppresses
//! repeats of the same image within a 60 second window, and offers to
//! forward new screenshots as file references the AI CLI can open.

pub mod clipboard;
pub mod config;
pub mod profile;
pub mod prompt;
pub mod reference;
pub mod sound;
pub mod tempfiles;
pub mod templates;
pub mod terminal;
