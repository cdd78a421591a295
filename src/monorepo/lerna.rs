//! Lerna (`lerna.json` with a `packages` glob list).

use super::{expand_glob, package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use serde_json::Value;
use std::path::Path;

pub struct LernaStrategy;

impl WorkspaceStrategy for LernaStrategy {
    fn label(&self) -> &'static str {
        "lerna"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        let raw = fs.read_optional(&root.join("lerna.json"))?;
        let config: Value = serde_json::from_str(&raw).ok()?;

        let patterns: Vec<String> = config["packages"]
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_else(|| vec!["packages/*".to_string()]);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_package_globs() {
        let fs = MockFileSystem::new();
        fs.add_file("lerna.json", r#"{"packages": ["modules/*"]}"#);
        fs.add_file("modules/core/package.json", r#"{"name": "core"}"#);

        let info = LernaStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.monorepo_type, "lerna");
        assert_eq!(info.packages[0].name, "core");
    }

    #[test]
    fn defaults_to_packages_glob() {
        let fs = MockFileSystem::new();
        fs.add_file("lerna.json", r#"{"version": "independent"}"#);
        fs.add_file("packages/a/package.json", r#"{"name": "a"}"#);

        let info = LernaStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.packages.len(), 1);
    }
}
