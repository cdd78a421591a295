//! Python ecosystem parser (`pyproject.toml`, `Pipfile`, `requirements.txt`).
//!
//! Manifest dialects are tried in order: PEP 621 / Poetry `pyproject.toml`
//! first, then `Pipfile`, then `requirements.txt`. A `.python-version` file
//! overrides any interpreter version found in the manifest.

use super::EcosystemParser;
use crate::fs::FileSystem;
use crate::readers::toml_lite;
use crate::types::{Dependency, ProjectInfo, ProjectType, PythonInfo};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

/// Leading `name[extras]` token of a PEP 508 requirement.
fn requirement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)(\[[^\]]*\])?\s*(.*)$").expect("valid regex")
    })
}

pub struct PythonParser;

impl EcosystemParser for PythonParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Python
    }

    fn detect(&self, fs: &dyn FileSystem, root: &Path) -> bool {
        ["pyproject.toml", "requirements.txt", "Pipfile", "setup.py", "setup.cfg"]
            .iter()
            .any(|marker| fs.is_file(&root.join(marker)))
    }

    fn parse(&self, fs: &dyn FileSystem, root: &Path) -> ProjectInfo {
        let mut info = ProjectInfo {
            project_type: ProjectType::Python,
            ..ProjectInfo::unknown()
        };
        let mut python = PythonInfo::default();
        let mut parsed = false;

        if let Some(doc) = fs
            .read_optional(&root.join("pyproject.toml"))
            .and_then(|raw| toml_lite::parse(&raw).ok())
        {
            parse_pyproject(&doc, &mut info.dependencies, &mut python);
            parsed = true;
        } else if let Some(doc) = fs
            .read_optional(&root.join("Pipfile"))
            .and_then(|raw| toml_lite::parse(&raw).ok())
        {
            parse_pipfile(&doc, &mut info.dependencies);
            parsed = true;
        } else if let Some(raw) = fs.read_optional(&root.join("requirements.txt")) {
            parse_requirements(&raw, &mut info.dependencies);
            parsed = true;
        }

        // .python-version wins over whatever the manifest declared.
        if let Some(pinned) = fs.read_optional(&root.join(".python-version")) {
            let pinned = pinned.trim();
            if !pinned.is_empty() {
                python.version = Some(pinned.to_string());
                parsed = true;
            }
        }

        if parsed {
            info.python = Some(python);
        }
        info
    }
}

fn parse_pyproject(doc: &Value, deps: &mut Vec<Dependency>, python: &mut PythonInfo) {
    python.name = toml_lite::get(doc, "project.name")
        .or_else(|| toml_lite::get(doc, "tool.poetry.name"))
        .and_then(Value::as_str)
        .map(String::from);
    python.version = toml_lite::get(doc, "project.requires-python")
        .and_then(Value::as_str)
        .map(String::from);

    // PEP 621
    if let Some(list) = toml_lite::get(doc, "project.dependencies").and_then(Value::as_array) {
        for item in list.iter().filter_map(Value::as_str) {
            deps.push(split_requirement(item, false));
        }
    }
    if let Some(list) =
        toml_lite::get(doc, "project.optional-dependencies.dev").and_then(Value::as_array)
    {
        for item in list.iter().filter_map(Value::as_str) {
            deps.push(split_requirement(item, true));
        }
    }

    // Poetry
    if let Some(table) =
        toml_lite::get(doc, "tool.poetry.dependencies").and_then(Value::as_object)
    {
        for (name, value) in table {
            if name == "python" {
                if python.version.is_none() {
                    python.version = poetry_version(value);
                }
                continue;
            }
            deps.push(Dependency {
                name: name.clone(),
                version: poetry_version(value).unwrap_or_else(|| "specified".to_string()),
                is_dev: false,
                is_indirect: false,
            });
        }
    }
    for dev_table in ["tool.poetry.group.dev.dependencies", "tool.poetry.dev-dependencies"] {
        if let Some(table) = toml_lite::get(doc, dev_table).and_then(Value::as_object) {
            for (name, value) in table {
                deps.push(Dependency {
                    name: name.clone(),
                    version: poetry_version(value).unwrap_or_else(|| "specified".to_string()),
                    is_dev: true,
                    is_indirect: false,
                });
            }
        }
    }
}

fn poetry_version(value: &Value) -> Option<String> {
    match value {
        Value::String(v) => Some(v.clone()),
        Value::Object(table) => table.get("version").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

fn parse_pipfile(doc: &Value, deps: &mut Vec<Dependency>) {
    for (table, is_dev) in [("packages", false), ("dev-packages", true)] {
        if let Some(map) = toml_lite::get(doc, table).and_then(Value::as_object) {
            for (name, value) in map {
                let version = match poetry_version(value).as_deref() {
                    None | Some("*") => "latest".to_string(),
                    Some(v) => v.to_string(),
                };
                deps.push(Dependency {
                    name: name.clone(),
                    version,
                    is_dev,
                    is_indirect: false,
                });
            }
        }
    }
}

fn parse_requirements(raw: &str, deps: &mut Vec<Dependency>) {
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        // Environment markers are not constraints.
        let line = line.split(';').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        deps.push(split_requirement(line, false));
    }
}

/// Split `name[extra]<op><version>` into a dependency record. Lines that do
/// not look like a requirement still count, with version `"latest"`.
fn split_requirement(raw: &str, is_dev: bool) -> Dependency {
    let raw = raw.split(';').next().unwrap_or(raw).trim();
    if let Some(caps) = requirement_re().captures(raw) {
        let name = caps.get(1).map_or(raw, |m| m.as_str());
        let spec = caps.get(3).map_or("", |m| m.as_str()).trim();
        // Only a real comparison counts as a version; URLs and editable
        // installs fall through as uninterpretable.
        if spec.is_empty() {
            return Dependency {
                name: name.to_string(),
                version: "latest".to_string(),
                is_dev,
                is_indirect: false,
            };
        }
        if spec.starts_with(['<', '>', '=', '!', '~']) {
            return Dependency {
                name: name.to_string(),
                version: spec.to_string(),
                is_dev,
                is_indirect: false,
            };
        }
    }
    Dependency {
        name: raw.to_string(),
        version: "latest".to_string(),
        is_dev,
        is_indirect: false,
    }
}
