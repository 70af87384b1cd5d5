//! Code reference strings in the `@path#L5-8` form AI CLIs understand.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// A selection of lines in a source file. Line numbers are 1-indexed and
/// inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReference {
    pub path: String,
    pub start: u32,
    pub end: u32,
}

impl CodeReference {
    /// Build a reference for `file`, relativized against `workspace_root`
    /// when the file lives inside it. Separators are normalized to forward
    /// slashes for cross-platform consistency.
    pub fn new(file: &Path, lines: LineRange, workspace_root: Option<&Path>) -> Self {
        let relative = workspace_root
            .and_then(|root| file.strip_prefix(root).ok())
            .unwrap_or(file);

        CodeReference {
            path: normalize_path(&relative.to_string_lossy()),
            start: lines.start,
            end: lines.end,
        }
    }

    /// Render as `@path#L<start>` or `@path#L<start>-<end>`.
    pub fn format(&self) -> String {
        if self.end == self.start {
            format!("@{}#L{}", self.path, self.start)
        } else {
            format!("@{}#L{}-{}", self.path, self.start, self.end)
        }
    }
}

impl std::fmt::Display for CodeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

/// A 1-indexed inclusive line range as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Parse `"5"` or `"5-8"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (start, end) = match spec.split_once('-') {
            None => {
                let line = spec.trim().parse::<u32>().context("invalid line number")?;
                (line, line)
            }
            Some((a, b)) => (
                a.trim().parse::<u32>().context("invalid start line")?,
                b.trim().parse::<u32>().context("invalid end line")?,
            ),
        };

        if start == 0 {
            bail!("line numbers are 1-indexed");
        }
        if end < start {
            bail!("end line {end} is before start line {start}");
        }
        Ok(LineRange { start, end })
    }
}

/// Forward slashes everywhere, including on Windows.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn single_line_omits_end() {
        let reference = CodeReference {
            path: "src/lib.rs".into(),
            start: 5,
            end: 5,
        };
        assert_eq!(reference.format(), "@src/lib.rs#L5");
    }

    #[test]
    fn range_includes_end() {
        let reference = CodeReference {
            path: "src/lib.rs".into(),
            start: 5,
            end: 8,
        };
        assert_eq!(reference.format(), "@src/lib.rs#L5-8");
    }

    #[test]
    fn relativizes_against_workspace_root() {
        let root = PathBuf::from("/home/dev/project");
        let file = root.join("src/main.rs");
        let reference = CodeReference::new(
            &file,
            LineRange { start: 1, end: 3 },
            Some(root.as_path()),
        );
        assert_eq!(reference.format(), "@src/main.rs#L1-3");
    }

    #[test]
    fn file_outside_workspace_keeps_absolute_path() {
        let reference = CodeReference::new(
            Path::new("/etc/hosts"),
            LineRange { start: 1, end: 1 },
            Some(Path::new("/home/dev/project")),
        );
        assert_eq!(reference.format(), "@/etc/hosts#L1");
    }

    #[test]
    fn backslashes_are_normalized() {
        assert_eq!(normalize_path("src\\util\\mod.rs"), "src/util/mod.rs");
    }

    #[test]
    fn parses_single_line_and_ranges() {
        assert_eq!(LineRange::parse("5").unwrap(), LineRange { start: 5, end: 5 });
        assert_eq!(LineRange::parse("5-8").unwrap(), LineRange { start: 5, end: 8 });
        assert_eq!(LineRange::parse(" 2 - 4 ").unwrap(), LineRange { start: 2, end: 4 });
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(LineRange::parse("0").is_err());
        assert!(LineRange::parse("8-5").is_err());
        assert!(LineRange::parse("abc").is_err());
    }
}
