//! Line-delimited JSON-RPC interface for agent integration.
//!
//! Each request is a single line of JSON on stdin and each response is a
//! single line on stdout. Malformed input produces an error response but
//! never terminates the loop.

use crate::context::{build_context, build_dependencies, build_tree, RenderOptions, Rendered};
use crate::format::OutputFormat;
use crate::fs::{FileSystem, RealFileSystem};
use crate::scanner::ScanOptions;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScanParams {
    path: PathBuf,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    emoji: bool,
    #[serde(default)]
    max_depth: Option<usize>,
    #[serde(default)]
    focus: Option<String>,
    #[serde(default)]
    include_all: bool,
    #[serde(default)]
    exclude: Vec<String>,
}

impl ScanParams {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            ignore_patterns: self.exclude.clone(),
            include_all: self.include_all,
            max_depth: self.max_depth,
            focus: self.focus.clone(),
        }
    }

    fn render_options(&self) -> Result<RenderOptions, String> {
        let format = match self.format.as_deref() {
            None => OutputFormat::default(),
            Some(name) => name
                .parse::<OutputFormat>()
                .map_err(|_| format!("unknown format: {name}"))?,
        };
        Ok(RenderOptions {
            format,
            emoji: self.emoji,
        })
    }
}

/// Serve requests over stdin/stdout until EOF.
pub async fn serve_stdio() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    serve(stdin, stdout, &RealFileSystem::new()).await
}

/// Serve requests over arbitrary streams. Split out for tests.
pub async fn serve<R, W>(reader: R, mut writer: W, fs: &dyn FileSystem) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&line, fs);
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }
    debug!("request stream closed");
    Ok(())
}

fn handle_line(line: &str, fs: &dyn FileSystem) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "unparseable request line");
            return error_response(Value::Null, PARSE_ERROR, &format!("parse error: {err}"));
        }
    };
    dispatch(request, fs)
}

fn dispatch(request: Request, fs: &dyn FileSystem) -> Value {
    let id = request.id.clone();
    debug!(method = %request.method, "dispatching request");

    match request.method.as_str() {
        "ping" => success_response(id, json!({"ok": true})),
        "tree" | "context" | "dependencies" => {
            let params: ScanParams = match serde_json::from_value(request.params) {
                Ok(params) => params,
                Err(err) => {
                    return error_response(id, INVALID_PARAMS, &format!("invalid params: {err}"))
                }
            };
            let render = match params.render_options() {
                Ok(render) => render,
                Err(message) => return error_response(id, INVALID_PARAMS, &message),
            };
            let scan_options = params.scan_options();
            let result = match request.method.as_str() {
                "tree" => build_tree(fs, &params.path, &scan_options, &render),
                "context" => build_context(fs, &params.path, &scan_options, &render),
                _ => build_dependencies(fs, &params.path, &scan_options, &render),
            };
            match result {
                Ok(rendered) => success_response(id, rendered_payload(&rendered)),
                Err(err) => error_response(id, INTERNAL_ERROR, &err.to_string()),
            }
        }
        other => error_response(id, METHOD_NOT_FOUND, &format!("unknown method: {other}")),
    }
}

fn rendered_payload(rendered: &Rendered) -> Value {
    json!({
        "text": rendered.text,
        "bytes": rendered.bytes,
        "tokens": rendered.tokens,
    })
}

fn success_response(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    async fn roundtrip(fs: &MockFileSystem, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output, fs).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn sample_fs() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"name": "demo"}"#);
        fs.add_file("src/index.ts", "export {}\n");
        fs
    }

    #[tokio::test]
    async fn tree_request_returns_rendered_text() {
        let fs = sample_fs();
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tree",
            "params": {"path": fs.root()}
        });
        let responses = roundtrip(&fs, &format!("{request}\n")).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 1);
        let text = responses[0]["result"]["text"].as_str().unwrap();
        assert!(text.contains("package.json"));
        assert!(responses[0]["result"]["tokens"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn unknown_method_keeps_loop_alive() {
        let fs = sample_fs();
        let bad = json!({"jsonrpc": "2.0", "id": 1, "method": "nope"});
        let ping = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
        let responses = roundtrip(&fs, &format!("{bad}\n{ping}\n")).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(responses[1]["result"]["ok"], true);
    }

    #[tokio::test]
    async fn malformed_json_reports_parse_error() {
        let fs = sample_fs();
        let responses = roundtrip(&fs, "{not json\n").await;

        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[0]["id"], Value::Null);
    }

    #[tokio::test]
    async fn missing_path_is_invalid_params() {
        let fs = sample_fs();
        let request = json!({"jsonrpc": "2.0", "id": 7, "method": "context", "params": {}});
        let responses = roundtrip(&fs, &format!("{request}\n")).await;

        assert_eq!(responses[0]["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unreadable_root_is_internal_error_not_crash() {
        let fs = sample_fs();
        let request = json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tree",
            "params": {"path": "/mock/definitely-missing"}
        });
        let ping = json!({"jsonrpc": "2.0", "id": 4, "method": "ping"});
        let responses = roundtrip(&fs, &format!("{request}\n{ping}\n")).await;

        assert_eq!(responses[0]["error"]["code"], INTERNAL_ERROR);
        assert_eq!(responses[1]["result"]["ok"], true);
    }
}
