//! Output renderers and the token estimator.
//!
//! Three renderers consume the same entry list: the connector tree, the
//! two-space indentation notation ("toon"), and the structured JSON record.

mod glyphs;
mod indent;
mod record;
mod tokens;
mod tree;

pub use glyphs::glyph_for;
pub use indent::render_indent;
pub use record::render_record;
pub use tokens::estimate_tokens;
pub use tree::render_tree;

use std::fmt;
use std::str::FromStr;

/// Output format selector shared by the CLI and the agent interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tree,
    Toon,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Toon => "toon",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "toon" => Ok(OutputFormat::Toon),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{other}` (expected tree, toon, or json)")),
        }
    }
}
