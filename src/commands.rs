//! CLI command definitions for handoff.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send text and/or a code reference to the AI terminal
    Send {
        /// Free text to send ahead of the reference
        text: Option<String>,

        /// File the reference points into
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Line or line range, e.g. `5` or `5-8` (requires --file)
        #[arg(short, long, requires = "file")]
        lines: Option<String>,
    },

    /// Pick a prompt template and send it with a code reference
    Ask {
        /// Template label or filename stem (interactive pick when omitted)
        #[arg(short, long)]
        template: Option<String>,

        /// File the reference points into
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Line or line range, e.g. `5` or `5-8` (requires --file)
        #[arg(short, long, requires = "file")]
        lines: Option<String>,
    },

    /// Copy a code reference to the clipboard
    Copy {
        /// File the reference points into
        #[arg(short, long)]
        file: PathBuf,

        /// Line or line range, e.g. `5` or `5-8`
        #[arg(short, long)]
        lines: String,
    },

    /// Capture the clipboard image once and offer to send it
    Image,

    /// Watch the clipboard for copied images and offer to forward them
    Watch,

    /// Start an AI CLI in a new terminal
    Start {
        /// CLI to start (e.g. `claude`, `aider`); interactive pick when omitted
        #[arg(long)]
        cli: Option<String>,
    },

    /// Manage prompt templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Clean up saved clipboard images
    Cleanup {
        /// Delete every saved image
        #[arg(long, conflicts_with = "older_than")]
        all: bool,

        /// Delete images older than this many days (default from config)
        #[arg(long)]
        older_than: Option<i64>,
    },

    /// Write the default config and deploy bundled templates
    Init {
        /// Overwrite an existing config file with defaults
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List merged templates and where each came from
    List,
}
