//! Connector-tree renderer (`├──`/`└──` with indentation guides).

use super::glyph_for;
use crate::types::Entry;

/// Render the entry list as a classic tree. Parent/child relationships are
/// reconstructed from relative paths; last children per sibling group get the
/// corner connector.
pub fn render_tree(entries: &[Entry], emoji: bool) -> String {
    let mut out = String::new();
    // DFS entry order means children-by-parent keeps sibling order intact.
    let children = group_children(entries);
    if let Some(roots) = children.get("") {
        render_group(entries, &children, roots, "", emoji, &mut out);
    }
    out
}

/// Map from a parent's relative path ("" for the root level) to the indices
/// of its immediate children, in entry order.
fn group_children<'a>(
    entries: &'a [Entry],
) -> std::collections::HashMap<&'a str, Vec<usize>> {
    let mut children: std::collections::HashMap<&str, Vec<usize>> =
        std::collections::HashMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        let parent = match entry.relative_path.rsplit_once('/') {
            Some((parent, _)) => parent,
            None => "",
        };
        children.entry(parent).or_default().push(idx);
    }
    children
}

fn render_group(
    entries: &[Entry],
    children: &std::collections::HashMap<&str, Vec<usize>>,
    group: &[usize],
    prefix: &str,
    emoji: bool,
    out: &mut String,
) {
    for (pos, &idx) in group.iter().enumerate() {
        let entry = &entries[idx];
        let is_last = pos == group.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        out.push_str(prefix);
        out.push_str(connector);
        if emoji {
            out.push_str(glyph_for(&entry.name, entry.is_directory));
            out.push(' ');
        }
        out.push_str(&entry.name);
        if entry.is_directory {
            out.push('/');
        }
        out.push('\n');

        if entry.is_directory {
            if let Some(group) = children.get(entry.relative_path.as_str()) {
                let child_prefix = if is_last {
                    format!("{prefix}    ")
                } else {
                    format!("{prefix}│   ")
                };
                render_group(entries, children, group, &child_prefix, emoji, out);
            }
        }
    }
}
