//! End-to-end tests for context assembly and the JSON-RPC interface
//!
//! These tests run the full scan-detect-render pipeline on tempdir
//! fixtures and exercise the serve loop over in-memory streams.

use repoctx::context::{build_context, build_tree, RenderOptions};
use repoctx::fs::RealFileSystem;
use repoctx::scanner::ScanOptions;
use repoctx::OutputFormat;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn create_node_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"name": "demo", "dependencies": {"react": "^18.0.0"}, "devDependencies": {"vitest": "^1.2.0"}}"#,
    )
    .unwrap();
    fs::write(root.join("src/index.ts"), "export {}\n").unwrap();
    fs::write(root.join("README.md"), "# demo\n").unwrap();
    temp_dir
}

#[test]
fn context_document_contains_all_sections() {
    let temp_dir = create_node_repo();
    let fs_impl = RealFileSystem::new();
    let rendered = build_context(
        &fs_impl,
        temp_dir.path(),
        &ScanOptions::default(),
        &RenderOptions::default(),
    )
    .unwrap();

    assert!(rendered.text.contains("# Project Context:"));
    assert!(rendered.text.contains("- Type: node"));
    assert!(rendered.text.contains("- Package manager: npm"));
    assert!(rendered.text.contains("## Directory Structure"));
    assert!(rendered.text.contains("├── "));
    assert!(rendered.text.contains("## Dependencies (2)"));
    assert!(rendered.text.contains("- vitest ^1.2.0 (dev)"));
    assert_eq!(rendered.bytes, rendered.text.len());
    assert_eq!(rendered.tokens, rendered.text.chars().count().div_ceil(4));
}

#[test]
fn json_record_carries_meta_and_entries() {
    let temp_dir = create_node_repo();
    let fs_impl = RealFileSystem::new();
    let rendered = build_tree(
        &fs_impl,
        temp_dir.path(),
        &ScanOptions::default(),
        &RenderOptions {
            format: OutputFormat::Json,
            emoji: false,
        },
    )
    .unwrap();

    let record: Value = serde_json::from_str(&rendered.text).unwrap();
    assert_eq!(record["projectType"], "node");
    assert_eq!(record["meta"]["entryCount"], 4);
    assert_eq!(record["meta"]["dependencyCount"], 2);
    assert!(record["meta"]["tokens"].as_u64().unwrap() > 0);

    let kinds: Vec<&str> = record["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds[0], "dir");
}

#[test]
fn toon_format_indents_by_depth() {
    let temp_dir = create_node_repo();
    let fs_impl = RealFileSystem::new();
    let rendered = build_tree(
        &fs_impl,
        temp_dir.path(),
        &ScanOptions::default(),
        &RenderOptions {
            format: OutputFormat::Toon,
            emoji: false,
        },
    )
    .unwrap();

    assert!(rendered.text.contains("src/\n  index.ts\n"));
    assert!(!rendered.text.contains("├── "));
}

#[tokio::test]
async fn serve_loop_handles_real_repository() {
    let temp_dir = create_node_repo();
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "context",
        "params": {"path": temp_dir.path(), "format": "toon"}
    });
    let input = format!("{request}\n");

    let mut output = Vec::new();
    repoctx::mcp::serve(input.as_bytes(), &mut output, &RealFileSystem::new())
        .await
        .unwrap();

    let response: Value = serde_json::from_str(std::str::from_utf8(&output).unwrap().trim())
        .unwrap();
    assert_eq!(response["id"], 1);
    let text = response["result"]["text"].as_str().unwrap();
    assert!(text.contains("- Type: node"));
    assert_eq!(
        response["result"]["bytes"].as_u64().unwrap() as usize,
        text.len()
    );
}

#[tokio::test]
async fn serve_loop_survives_bad_request_between_good_ones() {
    let temp_dir = create_node_repo();
    let good = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tree",
        "params": {"path": temp_dir.path()}
    });
    let input = format!("{good}\nnot-json\n{good}\n");

    let mut output = Vec::new();
    repoctx::mcp::serve(input.as_bytes(), &mut output, &RealFileSystem::new())
        .await
        .unwrap();

    let lines: Vec<Value> = std::str::from_utf8(&output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0]["result"].is_object());
    assert_eq!(lines[1]["error"]["code"], -32700);
    assert!(lines[2]["result"].is_object());
}
