//! Indentation-notation renderer: two spaces per depth level, no connectors,
//! directories suffixed with `/`.

use super::glyph_for;
use crate::types::Entry;

pub fn render_indent(entries: &[Entry], emoji: bool) -> String {
    let mut out = String::new();
    for entry in entries {
        for _ in 0..entry.depth {
            out.push_str("  ");
        }
        if emoji {
            out.push_str(glyph_for(&entry.name, entry.is_directory));
            out.push(' ');
        }
        out.push_str(&entry.name);
        if entry.is_directory {
            out.push('/');
        }
        out.push('\n');
    }
    out
}
