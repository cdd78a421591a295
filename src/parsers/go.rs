//! Go ecosystem parser (`go.mod`).

use super::EcosystemParser;
use crate::fs::FileSystem;
use crate::types::{Dependency, GoInfo, ProjectInfo, ProjectType};
use std::path::Path;

pub struct GoParser;

impl EcosystemParser for GoParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Go
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> bool {
        fs.is_file(&root.join("go.mod"))
    }

    fn parse(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo {
        let mut info = ProjectInfo {
            project_type: ProjectType::Go,
            ..ProjectInfo::unknown()
        };

        let Some(content) = fs.read_optional(&root.join("go.mod")) else {
            return info;
        };

        let mut go = GoInfo::default();
        let mut in_require_block = false;

        for line in content.lines() {
            let line = line.trim();

            if in_require_block {
                if line == ")" {
                    in_require_block = false;
                } else if let Some(dep) = parse_require_line(line) {
                    info.dependencies.push(dep);
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("module ") {
                go.module = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("go ") {
                go.go_version = Some(rest.trim().to_string());
            } else if line == "require (" {
                in_require_block = true;
            } else if let Some(rest) = line.strip_prefix("require ") {
                if let Some(dep) = parse_require_line(rest) {
                    info.dependencies.push(dep);
                }
            }
        }

        info.go = Some(go);
        info
    }
}

/// One `name version [// indirect]` requirement line.
fn parse_require_line(line: &str) -> Option<Dependency> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return None;
    }

    let is_indirect = line.contains("// indirect");
    let line = line.split("//").next().unwrap_or("").trim();

    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let version = parts.next().unwrap_or("latest");

    Some(Dependency {
        name: name.to_string(),
        version: version.to_string(),
        is_dev: false,
        is_indirect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_module_version_and_requires() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "go.mod",
            "module example.com/app\n\ngo 1.21\n\nrequire github.com/gorilla/mux v1.8.0\n\nrequire (\n\tgithub.com/x/y v1.2.3 // indirect\n\tgithub.com/a/b v0.4.0\n)\n",
        );

        let info = GoParser.parse(&fs, fs.root());
        let go = info.go.unwrap();
        assert_eq!(go.module.as_deref(), Some("example.com/app"));
        assert_eq!(go.go_version.as_deref(), Some("1.21"));

        assert_eq!(info.dependencies.len(), 3);
        let indirect = info
            .dependencies
            .iter()
            .find(|d| d.name == "github.com/x/y")
            .unwrap();
        assert_eq!(indirect.version, "v1.2.3");
        assert!(indirect.is_indirect);

        let direct = info
            .dependencies
            .iter()
            .find(|d| d.name == "github.com/gorilla/mux")
            .unwrap();
        assert!(!direct.is_indirect);
    }

    #[test]
    fn comment_lines_in_block_are_skipped() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "go.mod",
            "module m\n\nrequire (\n\t// a comment\n\tgithub.com/a/b v1.0.0\n)\n",
        );

        let info = GoParser.parse(&fs, fs.root());
        assert_eq!(info.dependencies.len(), 1);
    }

    #[test]
    fn missing_manifest_yields_empty() {
        let fs = MockFileSystem::new();
        let info = GoParser.parse(&fs, fs.root());
        assert!(info.dependencies.is_empty());
        assert!(info.go.is_none());
    }
}
