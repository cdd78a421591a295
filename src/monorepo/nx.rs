//! Nx (`nx.json`).
//!
//! Packages are discovered in the three conventional member directories
//! (`packages`, `apps`, `libs`); each immediate subdirectory is one package.

use super::{package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use std::path::Path;

const MEMBER_DIRS: &[&str] = &["packages", "apps", "libs"];

pub struct NxStrategy;

impl WorkspaceStrategy for NxStrategy {
    fn label(&self) -> &'static str {
        "nx"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        if !fs.is_file(&root.join("nx.json")) {
            return None;
        }

        let mut packages = Vec::new();
        for member_dir in MEMBER_DIRS {
            let Ok(entries) = fs.read_dir(&root.join(member_dir)) else {
                continue;
            };
            let mut names: Vec<String> = entries
                .into_iter()
                .filter(|e| e.is_dir())
                .map(|e| e.name)
                .collect();
            names.sort();
            for name in names {
                packages.push(package_from_dir(fs, root, &format!("{member_dir}/{name}")));
            }
        }

        Some(MonorepoInfo {
            monorepo_type: self.label().to_string(),
            packages,
        })
    }
}
