//! Workspace/monorepo detection cascade.
//!
//! Seven convention probes, tried in fixed order with first success winning:
//! Turborepo, Nx, Lerna, pnpm workspace, npm/yarn workspaces, Go workspace,
//! Cargo workspace. Each strategy normalizes its findings into a
//! [`MonorepoInfo`] with one [`WorkspacePackage`] per member. No strategy
//! matching is a normal outcome, not an error.

use crate::detect::ProjectDetector;
use crate::fs::FileSystem;
use crate::types::{MonorepoInfo, ProjectType, WorkspacePackage};
use std::path::Path;
use tracing::debug;

mod cargo_workspace;
mod go_workspace;
mod lerna;
mod npm_workspaces;
mod nx;
mod pnpm_workspace;
mod turborepo;

pub use cargo_workspace::CargoWorkspaceStrategy;
pub use go_workspace::GoWorkspaceStrategy;
pub use lerna::LernaStrategy;
pub use npm_workspaces::NpmWorkspacesStrategy;
pub use nx::NxStrategy;
pub use pnpm_workspace::PnpmWorkspaceStrategy;
pub use turborepo::TurborepoStrategy;

/// One workspace-convention probe.
pub trait WorkspaceStrategy: Send + Sync {
    /// Strategy label recorded as `MonorepoInfo.type` when it matches.
    fn label(&self) -> &'static str;

    /// Try the convention at `root`; `None` when it does not apply.
    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo>;
}

pub struct MonorepoDetector {
    strategies: Vec<Box<dyn WorkspaceStrategy>>,
}

impl MonorepoDetector {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(TurborepoStrategy),
                Box::new(NxStrategy),
                Box::new(LernaStrategy),
                Box::new(PnpmWorkspaceStrategy),
                Box::new(NpmWorkspacesStrategy),
                Box::new(GoWorkspaceStrategy),
                Box::new(CargoWorkspaceStrategy),
            ],
        }
    }

    pub fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        for strategy in &self.strategies {
            if let Some(info) = strategy.detect(fs, root) {
                debug!(
                    strategy = strategy.label(),
                    packages = info.packages.len(),
                    "workspace convention matched"
                );
                return Some(info);
            }
        }
        None
    }
}

impl Default for MonorepoDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a workspace glob into package directories.
///
/// A trailing `/*` or `*` is stripped to get a base directory whose immediate
/// subdirectories each become one package; a pattern without a glob names a
/// single package directory. Returned paths are root-relative.
pub(crate) fn expand_glob(fs: &dyn FileSystem, root: &Path, pattern: &str) -> Vec<String> {
    let pattern = pattern.trim().trim_start_matches("./");
    let (base, wildcard) = match pattern.strip_suffix('*') {
        Some(stripped) => (stripped.trim_end_matches('/'), true),
        None => (pattern.trim_end_matches('/'), false),
    };

    if !wildcard {
        if fs.is_dir(&root.join(base)) {
            return vec![base.to_string()];
        }
        return Vec::new();
    }

    let base_dir = if base.is_empty() {
        root.to_path_buf()
    } else {
        root.join(base)
    };
    let Ok(entries) = fs.read_dir(&base_dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<String> = entries
        .into_iter()
        .filter(|e| e.is_dir())
        .map(|e| {
            if base.is_empty() {
                e.name
            } else {
                format!("{}/{}", base, e.name)
            }
        })
        .collect();
    dirs.sort();
    dirs
}

/// Build a package record for a member directory: name from its manifest if
/// one is present, else the directory name, plus a best-effort ecosystem tag.
pub(crate) fn package_from_dir(fs: &dyn FileSystem, root: &Path, rel: &str) -> WorkspacePackage {
    let dir = root.join(rel);
    let fallback = rel.rsplit('/').next().unwrap_or(rel).to_string();

    let name = manifest_name(fs, &dir).unwrap_or(fallback);
    let package_type = match ProjectDetector::new().detect_type(fs, &dir) {
        ProjectType::Unknown => None,
        t => Some(t),
    };

    WorkspacePackage {
        name,
        path: rel.to_string(),
        package_type,
    }
}

fn manifest_name(fs: &dyn FileSystem, dir: &Path) -> Option<String> {
    if let Some(raw) = fs.read_optional(&dir.join("package.json")) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&raw) {
            if let Some(name) = json["name"].as_str() {
                return Some(name.to_string());
            }
        }
    }
    if let Some(raw) = fs.read_optional(&dir.join("Cargo.toml")) {
        if let Ok(doc) = crate::readers::toml_lite::parse(&raw) {
            if let Some(name) =
                crate::readers::toml_lite::get(&doc, "package.name").and_then(|v| v.as_str())
            {
                return Some(name.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn glob_expansion_lists_immediate_subdirs() {
        let fs = MockFileSystem::new();
        fs.add_file("packages/a/package.json", "{}");
        fs.add_file("packages/b/package.json", "{}");
        fs.add_file("packages/readme.txt", "not a dir");

        let dirs = expand_glob(&fs, fs.root(), "packages/*");
        assert_eq!(dirs, vec!["packages/a".to_string(), "packages/b".to_string()]);
    }

    #[test]
    fn non_glob_pattern_names_one_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("docs");

        assert_eq!(expand_glob(&fs, fs.root(), "docs"), vec!["docs".to_string()]);
        assert!(expand_glob(&fs, fs.root(), "missing").is_empty());
    }

    #[test]
    fn package_name_prefers_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file("packages/a/package.json", r#"{"name": "@scope/a"}"#);
        fs.add_dir("packages/bare");

        let pkg = package_from_dir(&fs, fs.root(), "packages/a");
        assert_eq!(pkg.name, "@scope/a");
        assert_eq!(pkg.package_type, Some(ProjectType::Node));

        let bare = package_from_dir(&fs, fs.root(), "packages/bare");
        assert_eq!(bare.name, "bare");
        assert_eq!(bare.package_type, None);
    }

    #[test]
    fn no_convention_yields_none() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");

        assert!(MonorepoDetector::new().detect(&fs, fs.root()).is_none());
    }
}
