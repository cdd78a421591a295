//! Go workspace (`go.work` `use` directives).

use super::{package_from_dir, WorkspaceStrategy};
use crate::fs::FileSystem;
use crate::types::MonorepoInfo;
use std::path::Path;

pub struct GoWorkspaceStrategy;

impl WorkspaceStrategy for GoWorkspaceStrategy {
    fn label(&self) -> &'static str {
        "go-workspace"
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> Option<MonorepoInfo> {
        let raw = fs.read_optional(&root.join("go.work"))?;

        let packages = parse_use_directives(&raw)
            .iter()
            .map(|rel| package_from_dir(fs, root, rel))
            .collect();

        Some(MonorepoInfo {
            monorepo_type: self.label().to_string(),
            packages,
        })
    }
}

/// `use ./mod` single lines and `use ( ... )` blocks, one module path each.
fn parse_use_directives(raw: &str) -> Vec<String> {
    let mut modules = Vec::new();
    let mut in_block = false;

    for line in raw.lines() {
        let line = line.trim();

        if in_block {
            if line == ")" {
                in_block = false;
            } else if !line.is_empty() && !line.starts_with("//") {
                modules.push(clean_module_path(line));
            }
            continue;
        }

        if line == "use (" {
            in_block = true;
        } else if let Some(rest) = line.strip_prefix("use ") {
            let rest = rest.trim();
            if rest == "(" {
                in_block = true;
            } else {
                modules.push(clean_module_path(rest));
            }
        }
    }

    modules.retain(|m| !m.is_empty() && *m != ".");
    modules
}

fn clean_module_path(raw: &str) -> String {
    raw.split("//")
        .next()
        .unwrap_or("")
        .trim()
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_and_block_use() {
        let raw = "go 1.22\n\nuse ./tools\n\nuse (\n\t./services/api\n\t./services/worker // background jobs\n)\n";
        assert_eq!(
            parse_use_directives(raw),
            vec!["tools", "services/api", "services/worker"]
        );
    }

    #[test]
    fn detects_workspace() {
        let fs = MockFileSystem::new();
        fs.add_file("go.work", "go 1.22\n\nuse (\n\t./api\n)\n");
        fs.add_file("api/go.mod", "module example.com/api\n");

        let info = GoWorkspaceStrategy.detect(&fs, fs.root()).unwrap();
        assert_eq!(info.monorepo_type, "go-workspace");
        assert_eq!(info.packages.len(), 1);
        assert_eq!(info.packages[0].name, "api");
        assert_eq!(info.packages[0].path, "api");
    }
}
