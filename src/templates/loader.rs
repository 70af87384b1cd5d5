//! Template directory loading and merging.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::parser::parse_template_file;
use super::{PromptTemplate, TemplateKind, TemplateSource};

/// Bundled template files, written out by `handoff init`.
pub const DEFAULT_TEMPLATE_FILES: &[(&str, &str)] = &[
    (
        "explain.md",
        "---\nlabel: Explain this code\nkind: quickfix\n---\nExplain this code\n",
    ),
    (
        "fix-bugs.md",
        "---\nlabel: Find and fix bugs\nkind: quickfix\n---\nFind and fix bugs in this code\n",
    ),
    (
        "refactor.md",
        "---\nlabel: Refactor this code\nkind: refactor\n---\nRefactor this code for better readability and maintainability\n",
    ),
    (
        "unit-tests.md",
        "---\nlabel: Write unit tests\nkind: quickfix\n---\nWrite unit tests for this code\n",
    ),
    (
        "document.md",
        "---\nlabel: Add documentation\nkind: quickfix\n---\nAdd detailed comments and documentation to this code\n",
    ),
    (
        "optimize.md",
        "---\nlabel: Optimize performance\nkind: refactor\n---\nOptimize this code for better performance\n",
    ),
    (
        "security-review.md",
        "---\nlabel: Security review\nkind: review\n---\nReview this code for security vulnerabilities\n",
    ),
    (
        "simplify.md",
        "---\nlabel: Simplify logic\nkind: refactor\n---\nSimplify this code logic\n",
    ),
];

/// Load and merge templates: defaults first, then the user directory,
/// keyed by filename so user files shadow same-named defaults. Sorted by
/// label. Falls back to the built-in table when both directories are
/// empty or missing.
pub fn load_templates(defaults_dir: &Path, user_dir: Option<&Path>) -> Vec<PromptTemplate> {
    let mut merged: BTreeMap<String, PromptTemplate> = BTreeMap::new();

    for template in load_from_directory(defaults_dir, TemplateSource::Default) {
        merged.insert(template.filename.clone(), template);
    }
    if let Some(dir) = user_dir {
        for template in load_from_directory(dir, TemplateSource::User) {
            merged.insert(template.filename.clone(), template);
        }
    }

    if merged.is_empty() {
        debug!("no template files found; using built-in defaults");
        return builtin_templates();
    }

    let mut templates: Vec<PromptTemplate> = merged.into_values().collect();
    templates.sort_by(|a, b| a.label.cmp(&b.label));
    templates
}

/// Find a template by exact label or filename stem, case-insensitive.
pub fn find_template<'a>(templates: &'a [PromptTemplate], name: &str) -> Option<&'a PromptTemplate> {
    let needle = name.to_lowercase();
    templates.iter().find(|t| {
        t.label.to_lowercase() == needle || t.filename.trim_end_matches(".md").to_lowercase() == needle
    })
}

/// Write the bundled defaults into `dir`, skipping files that exist.
pub fn write_default_templates(dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create template directory: {}", dir.display()))?;

    let mut written = 0;
    for (filename, content) in DEFAULT_TEMPLATE_FILES {
        let path = dir.join(filename);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write template: {}", path.display()))?;
        written += 1;
    }
    Ok(written)
}

fn load_from_directory(dir: &Path, source: TemplateSource) -> Vec<PromptTemplate> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut templates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|e| e == "md");
        let is_readme = path
            .file_name()
            .is_some_and(|n| n.eq_ignore_ascii_case("README.md"));
        if !is_markdown || is_readme {
            continue;
        }

        match parse_template_file(&path, source) {
            Ok(Some(template)) => templates.push(template),
            Ok(None) => debug!(path = %path.display(), "template disabled; skipping"),
            Err(err) => warn!(path = %path.display(), %err, "skipping malformed template"),
        }
    }
    templates
}

fn builtin_templates() -> Vec<PromptTemplate> {
    let mut templates: Vec<PromptTemplate> = DEFAULT_TEMPLATE_FILES
        .iter()
        .filter_map(|(filename, content)| {
            super::parser::parse_template_content(content, filename, TemplateSource::Default)
                .ok()
                .flatten()
        })
        .collect();
    templates.sort_by(|a, b| a.label.cmp(&b.label));
    templates
}
