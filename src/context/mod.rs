//! Context assembly: the library surface collaborators call.
//!
//! One scan invocation runs the walk, the project-type cascade, and the
//! monorepo cascade, then merges the results. The build functions route the
//! merged [`ScanResult`] through a formatter and report the byte length and
//! token estimate of the final text.

use crate::detect::ProjectDetector;
use crate::format::{
    estimate_tokens, render_indent, render_record, render_tree, OutputFormat,
};
use crate::fs::FileSystem;
use crate::monorepo::MonorepoDetector;
use crate::scanner::{scan_entries, ScanOptions};
use crate::types::{Dependency, ProjectInfo, ScanResult};
use crate::error::ScanError;
use serde_json::json;
use std::path::Path;
use tracing::info;

/// Rendering knobs shared by all build functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub emoji: bool,
}

/// One rendered document plus its size metadata.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub bytes: usize,
    pub tokens: usize,
}

impl Rendered {
    fn new(text: String) -> Self {
        let bytes = text.len();
        let tokens = estimate_tokens(&text);
        Self {
            text,
            bytes,
            tokens,
        }
    }
}

/// Scan `dir` and merge walk, project, and workspace information.
pub fn scan(
    fs: &dyn FileSystem,
    dir: &Path,
    options: &ScanOptions,
) -> Result<ScanResult, ScanError> {
    let entries = scan_entries(fs, dir, options)?;
    let project_info = ProjectDetector::new().detect(fs, dir);
    let monorepo = MonorepoDetector::new().detect(fs, dir);

    info!(
        root = %dir.display(),
        entries = entries.len(),
        project_type = %project_info.project_type,
        monorepo = monorepo.as_ref().map(|m| m.monorepo_type.as_str()).unwrap_or("none"),
        "scan assembled"
    );

    Ok(ScanResult {
        root: dir.to_path_buf(),
        entries,
        project_info,
        monorepo,
    })
}

/// Directory tree only.
pub fn build_tree(
    fs: &dyn FileSystem,
    dir: &Path,
    scan_options: &ScanOptions,
    render: &RenderOptions,
) -> Result<Rendered, ScanError> {
    let result = scan(fs, dir, scan_options)?;
    let text = match render.format {
        OutputFormat::Tree => render_tree(&result.entries, render.emoji),
        OutputFormat::Toon => render_indent(&result.entries, render.emoji),
        OutputFormat::Json => render_record(&result),
    };
    Ok(Rendered::new(text))
}

/// Full context document: header, tree, dependency summary, monorepo summary.
pub fn build_context(
    fs: &dyn FileSystem,
    dir: &Path,
    scan_options: &ScanOptions,
    render: &RenderOptions,
) -> Result<Rendered, ScanError> {
    let result = scan(fs, dir, scan_options)?;

    if render.format == OutputFormat::Json {
        return Ok(Rendered::new(render_record(&result)));
    }

    let tree = match render.format {
        OutputFormat::Toon => render_indent(&result.entries, render.emoji),
        _ => render_tree(&result.entries, render.emoji),
    };

    let mut text = project_header(&result);
    text.push_str("\n## Directory Structure\n\n");
    text.push_str(&tree);

    let deps = &result.project_info.dependencies;
    text.push_str(&format!("\n## Dependencies ({})\n\n", deps.len()));
    if deps.is_empty() {
        text.push_str("(none found)\n");
    } else {
        for dep in deps {
            text.push_str(&dependency_line(dep));
        }
    }

    if let Some(monorepo) = &result.monorepo {
        text.push_str(&format!(
            "\n## Monorepo: {} ({} packages)\n\n",
            monorepo.monorepo_type,
            monorepo.packages.len()
        ));
        for package in &monorepo.packages {
            match package.package_type {
                Some(t) => {
                    text.push_str(&format!("- {} ({}) [{}]\n", package.name, package.path, t))
                }
                None => text.push_str(&format!("- {} ({})\n", package.name, package.path)),
            }
        }
    }

    Ok(Rendered::new(text))
}

/// Dependency list only.
pub fn build_dependencies(
    fs: &dyn FileSystem,
    dir: &Path,
    scan_options: &ScanOptions,
    render: &RenderOptions,
) -> Result<Rendered, ScanError> {
    let result = scan(fs, dir, scan_options)?;
    let info = &result.project_info;

    if render.format == OutputFormat::Json {
        let payload = json!({
            "projectType": info.project_type,
            "dependencies": info.dependencies,
        });
        let text = serde_json::to_string_pretty(&payload).unwrap_or_default();
        return Ok(Rendered::new(text));
    }

    let mut text = format!(
        "# Dependencies: {} ({} total)\n\n",
        info.project_type,
        info.dependencies.len()
    );
    if info.dependencies.is_empty() {
        text.push_str("(none found)\n");
    } else {
        for dep in &info.dependencies {
            text.push_str(&dependency_line(dep));
        }
    }
    Ok(Rendered::new(text))
}

fn dependency_line(dep: &Dependency) -> String {
    let mut line = format!("- {} {}", dep.name, dep.version);
    if dep.is_dev {
        line.push_str(" (dev)");
    }
    if dep.is_indirect {
        line.push_str(" (indirect)");
    }
    line.push('\n');
    line
}

/// Human-readable document header built from project and ecosystem metadata.
fn project_header(result: &ScanResult) -> String {
    let name = result
        .root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| result.root.display().to_string());

    let mut header = format!("# Project Context: {name}\n\n");
    header.push_str(&format!("- Type: {}\n", result.project_info.project_type));
    header.push_str(&ecosystem_lines(&result.project_info));
    header
}

fn ecosystem_lines(info: &ProjectInfo) -> String {
    let mut lines = String::new();
    if let Some(node) = &info.node {
        lines.push_str(&format!("- Package manager: {}\n", node.package_manager));
        if let Some(name) = &node.name {
            lines.push_str(&format!("- Package: {name}\n"));
        }
        if node.tsconfig.is_some() {
            lines.push_str("- TypeScript: configured\n");
        }
    }
    if let Some(python) = &info.python {
        if let Some(version) = &python.version {
            lines.push_str(&format!("- Python: {version}\n"));
        }
    }
    if let Some(go) = &info.go {
        if let Some(module) = &go.module {
            lines.push_str(&format!("- Module: {module}\n"));
        }
        if let Some(version) = &go.go_version {
            lines.push_str(&format!("- Go: {version}\n"));
        }
    }
    if let Some(rust) = &info.rust {
        if let Some(name) = &rust.name {
            match &rust.edition {
                Some(edition) => {
                    lines.push_str(&format!("- Crate: {name} (edition {edition})\n"))
                }
                None => lines.push_str(&format!("- Crate: {name}\n")),
            }
        }
    }
    lines
}
