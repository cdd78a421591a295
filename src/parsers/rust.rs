//! Rust ecosystem parser (`Cargo.toml`).

use super::EcosystemParser;
use crate::fs::FileSystem;
use crate::readers::toml_lite;
use crate::types::{Dependency, ProjectInfo, ProjectType, RustInfo};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Dependency tables we flatten; build deps count as dev.
const DEP_TABLES: &[(&str, bool)] = &[
    ("dependencies", false),
    ("dev-dependencies", true),
    ("build-dependencies", true),
];

pub struct RustParser;

impl EcosystemParser for RustParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Rust
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> bool {
        fs.is_file(&root.join("Cargo.toml"))
    }

    fn parse(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo {
        let mut info = ProjectInfo {
            project_type: ProjectType::Rust,
            ..ProjectInfo::unknown()
        };

        let Some(raw) = fs.read_optional(&root.join("Cargo.toml")) else {
            return info;
        };
        let doc = match toml_lite::parse(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                debug!(root = %root.display(), error = %err, "Cargo.toml malformed");
                return info;
            }
        };

        for (table, is_dev) in DEP_TABLES {
            if let Some(deps) = toml_lite::get(&doc, table).and_then(Value::as_object) {
                for (name, value) in deps {
                    info.dependencies.push(Dependency {
                        name: name.clone(),
                        version: dependency_version(value),
                        is_dev: *is_dev,
                        is_indirect: false,
                    });
                }
            }
        }

        info.rust = Some(RustInfo {
            name: toml_lite::get(&doc, "package.name")
                .and_then(Value::as_str)
                .map(String::from),
            edition: toml_lite::get(&doc, "package.edition")
                .and_then(Value::as_str)
                .map(String::from),
        });
        info
    }
}

/// A table value is either a bare version string or an inline table whose
/// `version` key we take; everything else (path/git/workspace refs) reads as
/// declared-but-unversioned.
fn dependency_version(value: &Value) -> String {
    match value {
        Value::String(v) => v.clone(),
        Value::Object(table) => table
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("specified")
            .to_string(),
        _ => "specified".to_string(),
    }
}
