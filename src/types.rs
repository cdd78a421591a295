//! Core data model shared by the scanner, detectors, and formatters.
//!
//! Everything here is a plain value type: a scan produces one [`ScanResult`]
//! and nothing in it outlives the call that built it. All types serialize to
//! camelCase JSON because the structured-record output is part of the wire
//! contract.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One filesystem entry discovered by the scanner.
///
/// Entries are ordered by discovery: directories before files within each
/// parent, each group sorted by name, depth-first so a directory's subtree is
/// contiguous. `depth` counts ancestor directories below the scan root (root
/// children are depth 0). `size` is best-effort and absent when stat fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub relative_path: String,
    pub is_directory: bool,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A single declared dependency from a manifest.
///
/// `version` is the literal constraint string from the manifest, or the
/// sentinel `"latest"` / `"specified"` when the manifest names a dependency
/// without a usable version. Duplicate names are intentionally kept: each
/// manifest line that declares one yields one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub is_dev: bool,
    pub is_indirect: bool,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_dev: false,
            is_indirect: false,
        }
    }

    pub fn dev(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            is_dev: true,
            ..Self::new(name, version)
        }
    }
}

/// Ecosystem a project belongs to, picked by the detection cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Node,
    Python,
    Go,
    Rust,
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Node => "node",
            ProjectType::Python => "python",
            ProjectType::Go => "go",
            ProjectType::Rust => "rust",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TypeScript compiler settings lifted from `tsconfig.json`.
///
/// Omitted entirely when none of the tracked fields are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub paths: Vec<(String, Vec<String>)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub references: Vec<String>,
}

impl TsConfigInfo {
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.paths.is_empty()
            && self.target.is_none()
            && self.module.is_none()
            && self.strict.is_none()
            && self.jsx.is_none()
            && self.references.is_empty()
    }
}

/// Node ecosystem metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub package_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<TsConfigInfo>,
}

/// Python ecosystem metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Interpreter version; `.python-version` overrides the manifest value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Go ecosystem metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_version: Option<String>,
}

/// Rust ecosystem metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
}

/// Normalized project description produced by one ecosystem parser.
///
/// Exactly one ecosystem sub-record is populated, matching `project_type`
/// (none for `Unknown`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PythonInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go: Option<GoInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rust: Option<RustInfo>,
}

impl ProjectInfo {
    pub fn unknown() -> Self {
        Self {
            project_type: ProjectType::Unknown,
            dependencies: Vec::new(),
            node: None,
            python: None,
            go: None,
            rust: None,
        }
    }
}

/// One member of a workspace/monorepo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePackage {
    pub name: String,
    pub path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<ProjectType>,
}

/// Workspace/monorepo description; `monorepo_type` names the detection
/// strategy that matched (e.g. `"turborepo"`, `"npm-workspaces"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonorepoInfo {
    #[serde(rename = "type")]
    pub monorepo_type: String,
    pub packages: Vec<WorkspacePackage>,
}

/// Aggregate artifact of one scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub root: PathBuf,
    pub entries: Vec<Entry>,
    pub project_info: ProjectInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monorepo: Option<MonorepoInfo>,
}
