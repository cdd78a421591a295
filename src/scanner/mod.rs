//! Ignore-aware, depth- and focus-bounded directory walk.
//!
//! The walk is depth-first and sequential: a directory's entire subtree is
//! emitted contiguously right after it. Within one directory, subdirectories
//! come before files and each group is sorted by name. Per-entry stat
//! failures are never fatal (the entry stays, its size is omitted); only an
//! unreadable scan root aborts.

mod rules;

pub use rules::{IgnoreRules, DEFAULT_EXCLUDES};

use crate::error::ScanError;
use crate::fs::{DirEntry, FileSystem};
use crate::types::Entry;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Caller-facing knobs for one scan invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Extra ignore patterns, gitignore syntax, applied on top of the rule set.
    pub ignore_patterns: Vec<String>,
    /// Disable the default-exclude table and `.gitignore` loading.
    pub include_all: bool,
    /// Deepest entry depth to emit; entries at the boundary keep their place,
    /// their children do not.
    pub max_depth: Option<usize>,
    /// Restrict the walk to one subtree plus the ancestor chain leading to it.
    pub focus: Option<String>,
}

/// Walk `root` and produce the ordered entry list.
pub fn scan_entries(
    fs: &dyn FileSystem,
    root: &Path,
    options: &ScanOptions,
) -> Result<Vec<Entry>, ScanError> {
    if !fs.exists(root) {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !fs.is_dir(root) {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }

    let started = Instant::now();
    let rules = IgnoreRules::build(fs, root, &options.ignore_patterns, options.include_all);
    let focus = options
        .focus
        .as_deref()
        .map(|f| f.trim_matches('/').to_string())
        .filter(|f| !f.is_empty());

    let mut entries = Vec::new();
    let listing = fs
        .read_dir(root)
        .map_err(|source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;
    walk_level(
        fs,
        listing,
        "",
        0,
        &rules,
        focus.as_deref(),
        options.max_depth,
        &mut entries,
    );

    debug!(
        root = %root.display(),
        entries = entries.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan complete"
    );
    Ok(entries)
}

#[allow(clippy::too_many_arguments)]
fn walk_level(
    fs: &dyn FileSystem,
    listing: Vec<DirEntry>,
    prefix: &str,
    depth: usize,
    rules: &IgnoreRules,
    focus: Option<&str>,
    max_depth: Option<usize>,
    out: &mut Vec<Entry>,
) {
    let (mut dirs, mut files): (Vec<DirEntry>, Vec<DirEntry>) =
        listing.into_iter().partition(DirEntry::is_dir);
    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    for dir in dirs {
        let rel = join_rel(prefix, &dir.name);
        if rules.is_ignored(&rel, true) {
            continue;
        }
        if let Some(focus) = focus {
            if !focus_overlaps(&rel, focus) {
                continue;
            }
        }

        out.push(Entry {
            name: dir.name.clone(),
            path: dir.path.clone(),
            relative_path: rel.clone(),
            is_directory: true,
            depth,
            size: None,
        });

        let descend = max_depth.map_or(true, |max| depth < max);
        if !descend {
            continue;
        }
        match fs.read_dir(&dir.path) {
            Ok(listing) => walk_level(
                fs,
                listing,
                &rel,
                depth + 1,
                rules,
                focus,
                max_depth,
                out,
            ),
            Err(err) => {
                // unreadable subtree: the directory itself stays listed
                warn!(path = %dir.path.display(), error = %err, "skipping unreadable directory");
            }
        }
    }

    for file in files {
        let rel = join_rel(prefix, &file.name);
        if rules.is_ignored(&rel, false) {
            continue;
        }
        if let Some(focus) = focus {
            if !focus_overlaps(&rel, focus) {
                continue;
            }
        }

        out.push(Entry {
            name: file.name.clone(),
            path: file.path.clone(),
            relative_path: rel,
            is_directory: false,
            depth,
            size: fs.file_size(&file.path).ok(),
        });
    }
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Ancestor-or-descendant test on whole path components, applied uniformly
/// to directories and files: keep the focus subtree itself plus the chain of
/// ancestors leading to it.
fn focus_overlaps(relative_path: &str, focus: &str) -> bool {
    let rel: Vec<&str> = relative_path.split('/').collect();
    let focus: Vec<&str> = focus.split('/').collect();
    let shared = rel.len().min(focus.len());
    rel[..shared] == focus[..shared]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use pretty_assertions::assert_eq;

    fn rel_paths(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative_path.as_str()).collect()
    }

    fn sample_tree() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("src/api/handler.rs", "");
        fs.add_file("src/web/index.ts", "");
        fs.add_file("src/main.rs", "");
        fs.add_file("README.md", "# demo");
        fs.add_file("node_modules/react/index.js", "");
        fs
    }

    #[test]
    fn directories_precede_files_and_subtrees_are_contiguous() {
        let fs = sample_tree();
        let entries = scan_entries(&fs, fs.root(), &ScanOptions::default()).unwrap();

        assert_eq!(
            rel_paths(&entries),
            vec![
                "src",
                "src/api",
                "src/api/handler.rs",
                "src/web",
                "src/web/index.ts",
                "src/main.rs",
                "README.md",
            ]
        );
    }

    #[test]
    fn depth_matches_separator_count() {
        let fs = sample_tree();
        let entries = scan_entries(&fs, fs.root(), &ScanOptions::default()).unwrap();

        for entry in &entries {
            let separators = entry.relative_path.matches('/').count();
            assert_eq!(entry.depth, separators, "{}", entry.relative_path);
        }
    }

    #[test]
    fn default_excludes_prune_whole_subtrees() {
        let fs = sample_tree();
        let entries = scan_entries(&fs, fs.root(), &ScanOptions::default()).unwrap();

        assert!(entries.iter().all(|e| !e.relative_path.contains("node_modules")));
    }

    #[test]
    fn depth_limit_keeps_boundary_entries() {
        let fs = sample_tree();
        let options = ScanOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let entries = scan_entries(&fs, fs.root(), &options).unwrap();

        assert!(entries.iter().any(|e| e.relative_path == "src/api"));
        assert!(entries.iter().all(|e| e.depth <= 1));
        assert!(entries.iter().all(|e| e.relative_path != "src/api/handler.rs"));
    }

    #[test]
    fn focus_keeps_subtree_and_ancestor_chain() {
        let fs = sample_tree();
        let options = ScanOptions {
            focus: Some("src/api".to_string()),
            ..Default::default()
        };
        let entries = scan_entries(&fs, fs.root(), &options).unwrap();

        assert_eq!(rel_paths(&entries), vec!["src", "src/api", "src/api/handler.rs"]);
    }

    #[test]
    fn focus_component_match_is_exact() {
        // "src/ap" must not pull in "src/api"
        assert!(!focus_overlaps("src/api", "src/ap"));
        assert!(focus_overlaps("src", "src/api"));
        assert!(focus_overlaps("src/api/handler.rs", "src/api"));
    }

    #[test]
    fn missing_root_is_fatal() {
        let fs = MockFileSystem::new();
        let err = scan_entries(&fs, Path::new("/mock/absent"), &ScanOptions::default());
        assert!(matches!(err, Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn rescan_is_idempotent() {
        let fs = sample_tree();
        let options = ScanOptions::default();
        let first = scan_entries(&fs, fs.root(), &options).unwrap();
        let second = scan_entries(&fs, fs.root(), &options).unwrap();

        assert_eq!(rel_paths(&first), rel_paths(&second));
    }

    #[test]
    fn include_all_surfaces_default_excluded_dirs() {
        let fs = sample_tree();
        let options = ScanOptions {
            include_all: true,
            ..Default::default()
        };
        let entries = scan_entries(&fs, fs.root(), &options).unwrap();

        assert!(entries.iter().any(|e| e.relative_path == "node_modules"));
    }
}
