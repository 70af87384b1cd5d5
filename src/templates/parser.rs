//! Prompt template file parser.
//!
//! Templates are markdown files with a small YAML frontmatter block:
//! ```markdown
//! ---
//! label: Explain this code
//! kind: quickfix
//! enabled: true
//! ---
//! Explain this code
//! ```
//! The body is the prompt sent ahead of the code reference.

use std::path::Path;

use serde::Deserialize;

use super::{PromptTemplate, TemplateKind, TemplateSource};

#[derive(Debug, thiserror::Error)]
pub enum TemplateParseError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template format: {0}")]
    Format(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct Frontmatter {
    label: Option<String>,
    #[serde(default)]
    kind: Option<TemplateKind>,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Parse a template file. Returns `Ok(None)` for templates disabled via
/// frontmatter.
pub fn parse_template_file(
    path: &Path,
    source: TemplateSource,
) -> Result<Option<PromptTemplate>, TemplateParseError> {
    let content = std::fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_template_content(&content, &filename, source)
}

/// Parse template content from a string.
pub fn parse_template_content(
    content: &str,
    filename: &str,
    source: TemplateSource,
) -> Result<Option<PromptTemplate>, TemplateParseError> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let meta: Frontmatter = serde_yaml::from_str(&frontmatter)?;

    if !meta.enabled {
        return Ok(None);
    }

    let label = meta
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| filename.trim_end_matches(".md").to_string());

    Ok(Some(PromptTemplate {
        label,
        kind: meta.kind.unwrap_or_default(),
        prompt: body.trim().to_string(),
        filename: filename.to_string(),
        source,
    }))
}

/// Split content into the YAML frontmatter block and the markdown body.
fn split_frontmatter(content: &str) -> Result<(String, String), TemplateParseError> {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return Err(TemplateParseError::Format(
            "template must start with YAML frontmatter (---)".to_string(),
        ));
    }

    let after_first = &content[3..];
    match after_first.find("\n---") {
        Some(pos) => {
            let frontmatter = after_first[..pos].trim().to_string();
            let body = after_first[pos + 4..].to_string();
            Ok((frontmatter, body))
        }
        None => Err(TemplateParseError::Format(
            "missing closing --- for YAML frontmatter".to_string(),
        )),
    }
}
