//! repoctx - repository context extraction for coding agents
//!
//! This library walks a repository, detects its ecosystem and workspace
//! layout, and renders a compact context document sized for language-model
//! prompts.
//!
//! # Core Concepts
//!
//! - **Scanning**: a filtered, depth-aware directory walk producing an
//!   ordered entry list (directories first, lexicographic, contiguous
//!   subtrees)
//! - **Detection**: a first-match cascade over ecosystem parsers
//!   (Node, Rust, Go, Python) that reads the winning manifest into
//!   structured project metadata
//! - **Monorepo detection**: an ordered cascade over workspace strategies
//!   (Turborepo, Nx, Lerna, pnpm, npm/yarn, Go, Cargo) that enumerates
//!   member packages
//! - **Rendering**: connector-tree, indentation, or structured JSON output
//!   plus a byte-based token estimate
//!
//! # Example Usage
//!
//! ```ignore
//! use repoctx::context::{build_context, RenderOptions};
//! use repoctx::fs::RealFileSystem;
//! use repoctx::scanner::ScanOptions;
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! let rendered = build_context(
//!     &fs,
//!     Path::new("."),
//!     &ScanOptions::default(),
//!     &RenderOptions::default(),
//! )?;
//! println!("{}", rendered.text);
//! # Ok::<(), repoctx::error::ScanError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`scanner`]: filtered directory walk
//! - [`detect`] / [`parsers`]: project-type cascade and manifest parsing
//! - [`monorepo`]: workspace strategy cascade
//! - [`format`]: renderers and token estimation
//! - [`context`]: the assembler tying the pipeline together
//! - [`mcp`]: line-delimited JSON-RPC interface

pub mod cli;
pub mod context;
pub mod detect;
pub mod error;
pub mod format;
pub mod fs;
pub mod mcp;
pub mod monorepo;
pub mod parsers;
pub mod readers;
pub mod scanner;
pub mod types;

pub use context::{build_context, build_dependencies, build_tree, scan, RenderOptions, Rendered};
pub use detect::ProjectDetector;
pub use error::ScanError;
pub use format::{estimate_tokens, OutputFormat};
pub use fs::{FileSystem, RealFileSystem};
pub use monorepo::MonorepoDetector;
pub use scanner::{scan_entries, ScanOptions};
pub use types::{
    Dependency, Entry, MonorepoInfo, ProjectInfo, ProjectType, ScanResult, WorkspacePackage,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
