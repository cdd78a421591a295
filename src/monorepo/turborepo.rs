//! Turborepo (`turbo.json`).
//!
//! Turborepo does not declare members itself; discovery is delegated to the
//! npm-workspaces check, then the pnpm check, and the result is relabeled.

use super::{NpmWorkspacesStrategy, PnpmWorkspaceStrategy, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use std::path::Path;

pub struct TurborepoStrategy;

impl WorkspaceStrategy for TurborepoStrategy {
    fn label(&self) -> &'static str {
        "turborepo"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        if !fs.is_file(&root.join("turbo.json")) {
            return None;
        }

        let delegated = NpmWorkspacesStrategy
            .detect(fs, root)
            .or_else(|| PnpmWorkspaceStrategy.detect(fs, root))?;

        Some(MonorepoInfo {
            monorepo_type: self.label().to_string(),
            packages: delegated.packages,
        })
    }
}
