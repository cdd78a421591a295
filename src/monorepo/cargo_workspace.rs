//! Cargo workspace (`[workspace] members` in `Cargo.toml`).

use super::{expand_glob, package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::readers::toml_lite;
use crate::types::MonorepoInfo;
use serde_json::Value;
use std::path::Path;

pub struct CargoWorkspaceStrategy;

impl WorkspaceStrategy for CargoWorkspaceStrategy {
    fn label(&self) -> &'static str {
        "cargo-workspace"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        let raw = fs.read_optional(&root.join("Cargo.toml"))?;
        let doc = toml_lite::parse(&raw).ok()?;
        let members = toml_lite::get(&doc, "workspace.members").and_then(Value::as_array)?;

        let packages = members
            .iter()
            .filter_map(Value::as_str)
            .flat_map(|member| expand_glob(fs, root, member))
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
    fn expands_wildcard_members() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "Cargo.toml",
            "[workspace]\nmembers = [\"crates/*\", \"cli\"]\n",
        );
        fs.add_file("crates/core/Cargo.toml", "[package]\nname = \"demo-core\"\n");
        fs.add_file("crates/util/Cargo.toml", "[package]\nname = \"demo-util\"\n");
        fs.add_file("cli/Cargo.toml", "[package]\nname = \"demo-cli\"\n");

        let info = CargoWorkspaceStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.monorepo_type, "cargo-workspace");
        assert_eq!(info.packages.len(), 3);

        let names: Vec<&str> = info.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["demo-core", "demo-util", "demo-cli"]);
    }

    #[test]
    fn plain_package_is_no_match() {
        let fs = MockFileSystem::new();
        fs.add_file("Cargo.toml", "[package]\nname = \"solo\"\n");
        assert!(CargoWorkspaceStrategy.detect(&fs, fs.root()).is_none());
    }
}
