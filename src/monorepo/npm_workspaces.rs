//! npm/yarn workspaces (`workspaces` field in `package.json`).

use super::{expand_glob, package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use serde_json::Value;
use std::path::Path;

pub struct NpmWorkspacesStrategy;

impl WorkspaceStrategy for NpmWorkspacesStrategy {
    fn label(&self) -> &'static str {
        "npm-workspaces"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        let manifest: Value =
            serde_json::from_str(&fs.read_optional(&root.join("package.json"))?).ok()?;
        let patterns = workspace_patterns(&manifest)?;

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

/// `workspaces` is either an array of globs or an object with a `packages`
/// array (the yarn "nohoist" form).
fn workspace_patterns(manifest: &Value) -> Option<Vec<String>> {
    let field = manifest.get("workspaces")?;
    let list = match field {
        Value::Array(list) => list,
        Value::Object(obj) => obj.get("packages")?.as_array()?,
        _ => return None,
    };
    Some(
        list.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn array_form() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"workspaces": ["packages/*"]}"#);
        fs.add_file("packages/a/package.json", r#"{"name": "pkg-a"}"#);
        fs.add_file("packages/b/package.json", r#"{"name": "pkg-b"}"#);

        let info = NpmWorkspacesStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.monorepo_type, "npm-workspaces");
        assert_eq!(info.packages.len(), 2);
        assert_eq!(info.packages[0].name, "pkg-a");
        assert_eq!(info.packages[1].name, "pkg-b");
    }

    #[test]
    fn object_form() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"workspaces": {"packages": ["apps/*"], "nohoist": ["**/x"]}}"#,
        );
        fs.add_file("apps/web/package.json", r#"{"name": "web"}"#);

        let info = NpmWorkspacesStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.packages.len(), 1);
        assert_eq!(info.packages[0].path, "apps/web");
    }

    #[test]
    fn no_workspaces_field_is_no_match() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"name": "solo"}"#);
        assert!(NpmWorkspacesStrategy.detect(&fs, fs.root()).is_none());
    }
}
