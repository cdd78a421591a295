//! Structured-record renderer: the machine-readable JSON form of a scan.
//!
//! Byte/token metadata is computed after a first serialization pass so it
//! reflects the final payload size rather than a guess.

use super::estimate_tokens;
use crate::types::ScanResult;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordEntry<'a> {
    path: &'a str,
    kind: &'static str,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

pub fn render_record(result: &ScanResult) -> String {
    let entries: Vec<RecordEntry> = result
        .entries
        .iter()
        .map(|e| RecordEntry {
            path: &e.relative_path,
            kind: if e.is_directory { "dir" } else { "file" },
            depth: e.depth,
            size: e.size,
        })
        .collect();

    let mut record = json!({
        "root": result.root,
        "projectType": result.project_info.project_type,
        "entries": entries,
        "dependencies": result.project_info.dependencies,
    });
    if let Some(monorepo) = &result.monorepo {
        record["monorepo"] = serde_json::to_value(monorepo).unwrap_or_default();
    }

    // First pass sizes the payload, second pass carries the metadata.
    let first = serde_json::to_string_pretty(&record).unwrap_or_default();
    record["meta"] = json!({
        "bytes": first.len(),
        "tokens": estimate_tokens(&first),
        "entryCount": result.entries.len(),
        "dependencyCount": result.project_info.dependencies.len(),
    });
    serde_json::to_string_pretty(&record).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dependency, Entry, ProjectInfo, ProjectType};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::path::PathBuf;

    fn sample_result() -> ScanResult {
        ScanResult {
            root: PathBuf::from("/r"),
            entries: vec![
                Entry {
                    name: "src".into(),
                    path: PathBuf::from("/r/src"),
                    relative_path: "src".into(),
                    is_directory: true,
                    depth: 0,
                    size: None,
                },
                Entry {
                    name: "main.rs".into(),
                    path: PathBuf::from("/r/src/main.rs"),
                    relative_path: "src/main.rs".into(),
                    is_directory: false,
                    depth: 1,
                    size: Some(120),
                },
            ],
            project_info: ProjectInfo {
                project_type: ProjectType::Rust,
                dependencies: vec![Dependency::new("serde", "1.0")],
                ..ProjectInfo::unknown()
            },
            monorepo: None,
        }
    }

    #[test]
    fn counts_round_trip() {
        let result = sample_result();
        let record: Value = serde_json::from_str(&render_record(&result)).unwrap();

        assert_eq!(
            record["entries"].as_array().unwrap().len(),
            result.entries.len()
        );
        assert_eq!(
            record["dependencies"].as_array().unwrap().len(),
            result.project_info.dependencies.len()
        );
        assert_eq!(record["meta"]["entryCount"], 2);
        assert_eq!(record["meta"]["dependencyCount"], 1);
    }

    #[test]
    fn kinds_and_sizes() {
        let record: Value = serde_json::from_str(&render_record(&sample_result())).unwrap();
        let entries = record["entries"].as_array().unwrap();

        assert_eq!(entries[0]["kind"], "dir");
        assert!(entries[0].get("size").is_none());
        assert_eq!(entries[1]["kind"], "file");
        assert_eq!(entries[1]["size"], 120);
    }

    #[test]
    fn meta_reflects_payload_size() {
        let record: Value = serde_json::from_str(&render_record(&sample_result())).unwrap();
        let bytes = record["meta"]["bytes"].as_u64().unwrap();
        let tokens = record["meta"]["tokens"].as_u64().unwrap();

        assert!(bytes > 0);
        assert_eq!(tokens, (bytes as usize).div_ceil(4) as u64);
    }
}
