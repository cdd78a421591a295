//! Combined ignore-rule set for the directory walk.
//!
//! Three pattern sources feed one gitignore-style matcher: the built-in
//! default-exclude table, patterns from `.gitignore` at the scan root, and
//! caller-supplied patterns. A path is included only if no combined rule
//! matches its root-relative path.

use crate::fs::FileSystem;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::warn;

/// Build artifacts, VCS internals, caches, and language-specific
/// venvs/targets that are never interesting in a project overview.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
    ".cache",
    ".parcel-cache",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".idea",
    ".vscode",
    ".DS_Store",
    "*.pyc",
    ".terraform",
    ".gradle",
];

pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Combine the rule sources for a scan rooted at `root`.
    ///
    /// `include_all` drops the default table and `.gitignore`; caller
    /// patterns always apply.
    pub fn build(
        fs: &dyn FileSystem,
        root: &Path,
        extra_patterns: &[String],
        include_all: bool,
    ) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        if !include_all {
            for pattern in DEFAULT_EXCLUDES {
                add_pattern(&mut builder, pattern);
            }
            if let Some(gitignore) = fs.read_optional(&root.join(".gitignore")) {
                for line in gitignore.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    add_pattern(&mut builder, line);
                }
            }
        }

        for pattern in extra_patterns {
            add_pattern(&mut builder, pattern);
        }

        let matcher = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to build ignore matcher, scanning unfiltered");
            Gitignore::empty()
        });

        Self { matcher }
    }

    /// Whether a root-relative path is excluded by any combined rule.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }
}

fn add_pattern(builder: &mut GitignoreBuilder, pattern: &str) {
    if let Err(err) = builder.add_line(None, pattern) {
        warn!(pattern, error = %err, "skipping unparseable ignore pattern");
    }
}
