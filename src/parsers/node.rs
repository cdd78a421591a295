//! Node ecosystem parser (`package.json`, lockfiles, `tsconfig.json`).

use super::EcosystemParser;
use crate::fs::FileSystem;
use crate::types::{Dependency, NodeInfo, ProjectInfo, ProjectType, TsConfigInfo};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Lockfile precedence for package-manager detection. First hit wins.
const LOCKFILES: &[(&str, &str)] = &[
    ("bun.lockb", "bun"),
    ("bun.lock", "bun"),
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
];

pub struct NodeParser;

impl EcosystemParser for NodeParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Node
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> bool {
        fs.is_file(&root.join("package.json"))
    }

    fn parse(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo {
        let mut info = ProjectInfo {
            project_type: ProjectType::Node,
            ..ProjectInfo::unknown()
        };

        let Some(manifest) = fs
            .read_optional(&root.join("package.json"))
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        else {
            debug!(root = %root.display(), "package.json missing or malformed");
            return info;
        };

        collect_deps(&manifest["dependencies"], false, &mut info.dependencies);
        collect_deps(&manifest["devDependencies"], true, &mut info.dependencies);

        let tsconfig = fs
            .read_optional(&root.join("tsconfig.json"))
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
            .and_then(|json| parse_tsconfig(&json));

        info.node = Some(NodeInfo {
            name: manifest["name"].as_str().map(String::from),
            version: manifest["version"].as_str().map(String::from),
            package_manager: detect_package_manager(fs, root),
            tsconfig,
        });
        info
    }
}

fn collect_deps(table: &Value, is_dev: bool, out: &mut Vec<Dependency>) {
    let Some(map) = table.as_object() else {
        return;
    };
    for (name, version) in map {
        out.push(Dependency {
            name: name.clone(),
            version: version.as_str().unwrap_or("latest").to_string(),
            is_dev,
            is_indirect: false,
        });
    }
}

fn detect_package_manager(fs: &dyn FileSystem, root: &Path) -> String {
    for (lockfile, manager) in LOCKFILES {
        if fs.is_file(&root.join(lockfile)) {
            return (*manager).to_string();
        }
    }
    "npm".to_string()
}

/// Extract the compiler settings we surface; `None` when nothing relevant is
/// present, so the sub-record is omitted entirely.
fn parse_tsconfig(json: &Value) -> Option<TsConfigInfo> {
    let opts = &json["compilerOptions"];

    let paths = opts["paths"]
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(alias, targets)| {
                    let targets = targets
                        .as_array()
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|v| v.as_str().map(String::from))
                                .collect()
                        })
                        .unwrap_or_default();
                    (alias.clone(), targets)
                })
                .collect()
        })
        .unwrap_or_default();

    let references = json["references"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|r| r["path"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let cfg = TsConfigInfo {
        base_url: opts["baseUrl"].as_str().map(String::from),
        paths,
        target: opts["target"].as_str().map(String::from),
        module: opts["module"].as_str().map(String::from),
        strict: opts["strict"].as_bool(),
        jsx: opts["jsx"].as_str().map(String::from),
        references,
    };

    if cfg.is_empty() {
        None
    } else {
        Some(cfg)
    }
}
