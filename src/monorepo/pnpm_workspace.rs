//! pnpm workspace (`pnpm-workspace.yaml`).
//!
//! The package list is read by a minimal line-based reader rather than a
//! YAML parser: the `packages:` block is the only shape consumed.

use super::{expand_glob, package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use std::path::Path;

pub struct PnpmWorkspaceStrategy;

impl WorkspaceStrategy for PnpmWorkspaceStrategy {
    fn label(&self) -> &'static str {
        "pnpm-workspace"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        let raw = fs.read_optional(&root.join("pnpm-workspace.yaml"))?;
        let patterns = parse_packages_block(&raw);

        let packages = patterns
            .iter()
            .flat_map(|pattern| expand_glob(fs, root, pattern))
            .map(|rel| package_from_dir(fs, root, &rel))
            .collect();

        Some(MonorepoInfo {
            monorepo_type: self.label().to_string(),
            packages,
        })
    }
}

/// Extract the `- glob` items under a top-level `packages:` key.
fn parse_packages_block(raw: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut in_packages = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "packages:" {
            in_packages = true;
            continue;
        }
        if in_packages {
            if let Some(item) = trimmed.strip_prefix("- ") {
                let item = item.trim().trim_matches('"').trim_matches('\'');
                // negation patterns exclude, and we only gather includes
                if !item.is_empty() && !item.starts_with('!') {
                    patterns.push(item.to_string());
                }
            } else {
                // next top-level key ends the block
                in_packages = false;
            }
        }
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_quoted_and_bare_globs() {
        let raw = "packages:\n  - \"apps/*\"\n  - 'libs/*'\n  - docs\n  - '!**/test/**'\ncatalog:\n  react: ^18\n";
        assert_eq!(parse_packages_block(raw), vec!["apps/*", "libs/*", "docs"]);
    }

    #[test]
    fn expands_workspace_globs() {
        let fs = MockFileSystem::new();
        fs.add_file("pnpm-workspace.yaml", "packages:\n  - 'apps/*'\n");
        fs.add_file("apps/site/package.json", r#"{"name": "site"}"#);

        let info = PnpmWorkspaceStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.monorepo_type, "pnpm-workspace");
        assert_eq!(info.packages.len(), 1);
        assert_eq!(info.packages[0].name, "site");
    }
}
