//! File-type glyph lookup tables for emoji output.
//!
//! Pure configuration data: special filenames take priority over extension
//! lookup, directories have a fixed glyph, and anything unmatched falls back
//! to a plain file glyph.

const DIR_GLYPH: &str = "📁";
const FILE_GLYPH: &str = "📄";

/// Exact-filename glyphs, checked before extensions.
const SPECIAL_FILES: &[(&str, &str)] = &[
    ("package.json", "📦"),
    ("Cargo.toml", "📦"),
    ("go.mod", "📦"),
    ("pyproject.toml", "📦"),
    ("requirements.txt", "📦"),
    ("Pipfile", "📦"),
    ("Dockerfile", "🐳"),
    ("docker-compose.yml", "🐳"),
    ("docker-compose.yaml", "🐳"),
    ("Makefile", "🔧"),
    ("README.md", "📖"),
    ("LICENSE", "⚖️"),
    (".gitignore", "🙈"),
    (".env", "🔐"),
];

const EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "🦀"),
    ("go", "🐹"),
    ("py", "🐍"),
    ("js", "📜"),
    ("mjs", "📜"),
    ("cjs", "📜"),
    ("ts", "📘"),
    ("tsx", "⚛️"),
    ("jsx", "⚛️"),
    ("json", "📋"),
    ("toml", "⚙️"),
    ("yml", "⚙️"),
    ("yaml", "⚙️"),
    ("md", "📝"),
    ("html", "🌐"),
    ("css", "🎨"),
    ("scss", "🎨"),
    ("sh", "🖥️"),
    ("sql", "🗄️"),
    ("png", "🖼️"),
    ("jpg", "🖼️"),
    ("svg", "🖼️"),
    ("lock", "🔒"),
];

/// Glyph for one entry name. Filename table first, then extension, then the
/// generic file/directory glyph.
pub fn glyph_for(name: &str, is_directory: bool) -> &'static str {
    if is_directory {
        return DIR_GLYPH;
    }
    if let Some((_, glyph)) = SPECIAL_FILES.iter().find(|(special, _)| *special == name) {
        return glyph;
    }
    if let Some(ext) = name.rsplit_once('.').map(|(_, ext)| ext) {
        if let Some((_, glyph)) = EXTENSIONS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        {
            return glyph;
        }
    }
    FILE_GLYPH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_filename_beats_extension() {
        // package.json would otherwise hit the json extension glyph
        assert_eq!(glyph_for("package.json", false), "📦");
        assert_eq!(glyph_for("data.json", false), "📋");
    }

    #[test]
    fn directory_and_fallback() {
        assert_eq!(glyph_for("src", true), "📁");
        assert_eq!(glyph_for("mystery.xyz", false), "📄");
        assert_eq!(glyph_for("no_extension", false), "📄");
    }
}
