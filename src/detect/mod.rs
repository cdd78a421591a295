//! Project-type detection cascade.
//!
//! An ordered list of ecosystem probes; the first whose marker files are
//! present wins and its parser runs. No marker present yields
//! [`ProjectType::Unknown`] with an empty dependency list.

use crate::fs::FileSystem;
use crate::parsers::{EcosystemParser, GoParser, NodeParser, PythonParser, RustParser};
use crate::types::{ProjectInfo, ProjectType};
use std::path::Path;
use tracing::debug;

pub struct ProjectDetector {
    parsers: Vec<Box<dyn EcosystemParser>>,
}

impl ProjectDetector {
    /// Fixed probe order: Node, Rust, Go, Python.
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(NodeParser),
                Box::new(RustParser),
                Box::new(GoParser),
                Box::new(PythonParser),
            ],
        }
    }

    /// Pick exactly one ecosystem for `root` and parse its manifests.
    pub fn detect(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo {
        for parser in &self.parsers {
            if parser.detect(fs, root) {
                debug!(
                    root = %root.display(),
                    project_type = %parser.project_type(),
                    "project type detected"
                );
                return parser.parse(fs, root);
            }
        }
        ProjectInfo::unknown()
    }

    /// Detection without parsing, for tagging workspace packages.
    pub fn detect_type(&self, fs: &dyn FileSystem, root: &Path) -> ProjectType {
        self.parsers
            .iter()
            .find(|p| p.detect(fs, root))
            .map(|p| p.project_type())
            .unwrap_or(ProjectType::Unknown)
    }
}

impl Default for ProjectDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_wins_over_rust() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");
        fs.add_file("Cargo.toml", "[package]\nname = \"x\"\n");

        let info = ProjectDetector::new().detect(&fs, fs.root());
        assert_eq!(info.project_type, ProjectType::Node);
    }

    #[test]
    fn rust_wins_over_go_and_python() {
        let fs = MockFileSystem::new();
        fs.add_file("Cargo.toml", "[package]\nname = \"x\"\n");
        fs.add_file("go.mod", "module m\n");
        fs.add_file("requirements.txt", "requests\n");

        let info = ProjectDetector::new().detect(&fs, fs.root());
        assert_eq!(info.project_type, ProjectType::Rust);
    }

    #[test]
    fn setup_py_alone_is_python() {
        let fs = MockFileSystem::new();
        fs.add_file("setup.py", "from setuptools import setup\n");

        let info = ProjectDetector::new().detect(&fs, fs.root());
        assert_eq!(info.project_type, ProjectType::Python);
    }

    #[test]
    fn no_markers_is_unknown() {
        let fs = MockFileSystem::new();
        fs.add_file("README.md", "# hi\n");

        let info = ProjectDetector::new().detect(&fs, fs.root());
        assert_eq!(info.project_type, ProjectType::Unknown);
        assert!(info.dependencies.is_empty());
    }
}
