//! Minimal manifest-format readers.
//!
//! The pipeline never pulls in full grammar parsers for manifest dialects it
//! only needs a corner of: `toml_lite` understands the subset of TOML that
//! `Cargo.toml`, `pyproject.toml`, and `Pipfile` actually use for dependency
//! tables, and the YAML-ish `pnpm-workspace.yaml` package list is read
//! line-by-line where it is consumed (see the monorepo detector).

pub mod toml_lite;
