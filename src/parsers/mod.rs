//! Per-ecosystem manifest parsers.
//!
//! Each parser turns one or more manifest files into a normalized
//! [`ProjectInfo`]. Parsers are best-effort throughout: a missing or
//! malformed manifest yields an empty dependency list and an absent
//! ecosystem sub-record, never an error.

use crate::fs::FileSystem;
use crate::types::{ProjectInfo, ProjectType};
use std::path::Path;

pub mod go;
pub mod node;
pub mod python;
pub mod rust;

pub use go::GoParser;
pub use node::NodeParser;
pub use python::PythonParser;
pub use rust::RustParser;

/// One ecosystem's detection probe and manifest parser.
pub trait EcosystemParser: Send + Sync {
    fn project_type(&self) -> ProjectType;

    /// Whether this ecosystem's marker files are present at `root`.
    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> bool;

    /// Parse the manifests at `root` into a normalized record.
    fn parse(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo;
}
