//! Supported AI CLI families and their launch profiles.
//!
//! Terminal identification and dispatch formatting both go through
//! [`CliFamily::classify`], so there is exactly one keyword table for
//! "is this an AI terminal" and "which CLI is it".

use once_cell::sync::Lazy;
use std::process::Command;

/// Which AI CLI a terminal appears to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliFamily {
    Claude,
    Gemini,
    Droid,
    ChatGpt,
    Aider,
    Unknown,
}

/// Keyword table for classification, scanned in order. Tool names come
/// before model names (`aider` before `gpt`, since aider invocations name
/// a model), and longer keywords before their substrings (`chatgpt`
/// before `gpt`).
const KEYWORDS: &[(&str, CliFamily)] = &[
    ("claude", CliFamily::Claude),
    ("anthropic", CliFamily::Claude),
    ("gemini", CliFamily::Gemini),
    ("droid", CliFamily::Droid),
    ("aider", CliFamily::Aider),
    ("chatgpt", CliFamily::ChatGpt),
    ("gpt", CliFamily::ChatGpt),
];

impl CliFamily {
    /// Classify a terminal from its display name and process hint
    /// (launch command or shell path). Case-insensitive substring scan.
    pub fn classify(display_name: &str, process_hint: &str) -> Self {
        let name = display_name.to_lowercase();
        let hint = process_hint.to_lowercase();

        for (keyword, family) in KEYWORDS {
            if name.contains(keyword) || hint.contains(keyword) {
                return *family;
            }
        }
        CliFamily::Unknown
    }

    /// Whether this family was identified by an explicit keyword signal.
    pub fn is_known(self) -> bool {
        self != CliFamily::Unknown
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CliFamily::Claude => "Claude Code",
            CliFamily::Gemini => "Gemini CLI",
            CliFamily::Droid => "Droid",
            CliFamily::ChatGpt => "ChatGPT CLI",
            CliFamily::Aider => "Aider",
            CliFamily::Unknown => "Unknown",
        }
    }
}

/// Static descriptor of a supported AI CLI: how to launch it and how to
/// recognize it. Loaded once at startup; never mutated.
#[derive(Debug, Clone)]
pub struct CliProfile {
    pub family: CliFamily,
    pub name: &'static str,
    /// Command used to launch the CLI in a fresh terminal.
    pub command: &'static str,
    /// Alternate binary names probed when `command` is not on PATH.
    pub fallback_commands: &'static [&'static str],
    /// Title given to a terminal we spawn for this CLI.
    pub pane_title: &'static str,
    /// Families with `supported = false` are recognized but rejected at
    /// dispatch time.
    pub supported: bool,
}

/// Fixed table of known AI CLIs.
pub static CLI_PROFILES: Lazy<Vec<CliProfile>> = Lazy::new(|| {
    vec![
        CliProfile {
            family: CliFamily::Claude,
            name: "Claude Code",
            command: "claude",
            fallback_commands: &[],
            pane_title: "Claude Code",
            supported: true,
        },
        CliProfile {
            family: CliFamily::Gemini,
            name: "Gemini CLI",
            command: "gemini-cli",
            fallback_commands: &["gemini"],
            pane_title: "Gemini CLI",
            supported: true,
        },
        CliProfile {
            family: CliFamily::Droid,
            name: "Droid",
            command: "droid",
            fallback_commands: &[],
            pane_title: "Droid",
            supported: true,
        },
        CliProfile {
            family: CliFamily::ChatGpt,
            name: "ChatGPT CLI",
            command: "chatgpt",
            fallback_commands: &[],
            pane_title: "ChatGPT",
            supported: false,
        },
        CliProfile {
            family: CliFamily::Aider,
            name: "Aider",
            command: "aider",
            fallback_commands: &[],
            pane_title: "Aider",
            supported: true,
        },
    ]
});

/// Look up the profile for a classified family.
pub fn profile_for(family: CliFamily) -> Option<&'static CliProfile> {
    CLI_PROFILES.iter().find(|p| p.family == family)
}

/// Look up a profile by its launch command or name (case-insensitive).
pub fn profile_by_name(name: &str) -> Option<&'static CliProfile> {
    let needle = name.to_lowercase();
    CLI_PROFILES.iter().find(|p| {
        p.command == needle
            || p.name.to_lowercase() == needle
            || p.fallback_commands.contains(&needle.as_str())
    })
}

/// Check whether a binary resolves on PATH via `command -v` (or `where`
/// on Windows).
fn binary_on_path(binary: &str) -> bool {
    #[cfg(windows)]
    let probe = Command::new("where").arg(binary).output();
    #[cfg(not(windows))]
    let probe = Command::new("sh").args(["-c", &format!("command -v {binary}")]).output();

    matches!(probe, Ok(out) if out.status.success())
}

/// Probe which profiles are installed, resolving fallback binary names.
/// Returns `(profile, resolved command)` pairs.
pub fn detect_installed() -> Vec<(&'static CliProfile, String)> {
    let mut installed = Vec::new();

    for profile in CLI_PROFILES.iter() {
        if binary_on_path(profile.command) {
            installed.push((profile, profile.command.to_string()));
            continue;
        }
        for fallback in profile.fallback_commands {
            if binary_on_path(fallback) {
                installed.push((profile, fallback.to_string()));
                break;
            }
        }
    }

    installed
}
