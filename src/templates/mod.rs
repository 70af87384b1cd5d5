//! Prompt templates for quick actions.
//!
//! Templates live as markdown files in two places: the bundled defaults
//! directory (deployed into the config dir by `handoff init`) and an
//! optional per-workspace override directory. They merge by filename with
//! the workspace entries winning.

mod loader;
mod parser;

pub use loader::{find_template, load_templates, write_default_templates, DEFAULT_TEMPLATE_FILES};
pub use parser::{parse_template_content, parse_template_file, TemplateParseError};

use serde::Deserialize;

/// Where a template was loaded from; workspace templates shadow defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    Default,
    User,
}

/// Rough category for grouping templates in pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    #[serde(rename = "quickfix")]
    QuickFix,
    Refactor,
    Info,
    Review,
}

/// One loaded prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub label: String,
    pub kind: TemplateKind,
    /// The prompt body, sent ahead of the code reference.
    pub prompt: String,
    /// Merge key: the markdown file's name.
    pub filename: String,
    pub source: TemplateSource,
}
