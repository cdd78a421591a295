use crate::cli::commands::ScanArgs;
use crate::context::{build_context, build_dependencies, build_tree, RenderOptions, Rendered};
use crate::fs::RealFileSystem;
use crate::mcp;
use crate::scanner::ScanOptions;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

enum Document {
    Context,
    Tree,
    Dependencies,
}

pub async fn handle_context(args: &ScanArgs, quiet: bool) -> i32 {
    run_scan(args, quiet, Document::Context)
}

pub async fn handle_tree(args: &ScanArgs, quiet: bool) -> i32 {
    run_scan(args, quiet, Document::Tree)
}

pub async fn handle_deps(args: &ScanArgs, quiet: bool) -> i32 {
    run_scan(args, quiet, Document::Dependencies)
}

pub async fn handle_serve() -> i32 {
    match mcp::serve_stdio().await {
        Ok(()) => 0,
        Err(err) => {
            error!("serve loop failed: {err:#}");
            1
        }
    }
}

fn run_scan(args: &ScanArgs, quiet: bool, document: Document) -> i32 {
    let dir = resolve_path(args.path.as_deref());
    let fs = RealFileSystem::new();
    let scan_options = ScanOptions {
        ignore_patterns: args.exclude.clone(),
        include_all: args.include_all,
        max_depth: args.depth,
        focus: args.focus.clone(),
    };
    let render = RenderOptions {
        format: args.format.into(),
        emoji: args.emoji,
    };

    let rendered = match document {
        Document::Context => build_context(&fs, &dir, &scan_options, &render),
        Document::Tree => build_tree(&fs, &dir, &scan_options, &render),
        Document::Dependencies => build_dependencies(&fs, &dir, &scan_options, &render),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(err) => {
            error!("scan failed: {err}");
            return 1;
        }
    };

    if let Err(err) = deliver(&rendered, args) {
        error!("output failed: {err:#}");
        return 1;
    }

    if !quiet {
        eprintln!(
            "{} ({}, ~{} tokens)",
            match document {
                Document::Context => "Context rendered",
                Document::Tree => "Tree rendered",
                Document::Dependencies => "Dependencies rendered",
            },
            format_bytes(rendered.bytes),
            rendered.tokens
        );
    }
    0
}

fn deliver(rendered: &Rendered, args: &ScanArgs) -> Result<()> {
    match &args.output {
        Some(file) => {
            std::fs::write(file, &rendered.text)
                .with_context(|| format!("failed to write {}", file.display()))?;
        }
        None => println!("{}", rendered.text),
    }

    if args.copy {
        copy_to_clipboard(&rendered.text);
    }
    Ok(())
}

// Clipboard failure downgrades to a warning: the document already went to
// stdout or the output file.
fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text.to_string()) {
                warn!("clipboard copy failed: {err}");
            }
        }
        Err(err) => warn!("clipboard unavailable: {err}"),
    }
}

fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
