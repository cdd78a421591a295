use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::format::OutputFormat;

/// Repository context extractor for coding agents
#[derive(Parser, Debug)]
#[command(
    name = "repoctx",
    about = "Repository context extractor for coding agents",
    version,
    author,
    long_about = "repoctx walks a repository, detects its ecosystem and workspace layout, \
                  and renders a compact context document sized for language-model prompts. \
                  It understands Node, Rust, Go, and Python projects plus the common \
                  monorepo orchestrators."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (debug logging)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Render the full project context document",
        long_about = "Walks the directory, detects the project type and monorepo layout, and \
                      renders a context document with a tree, dependency summary, and \
                      workspace packages.\n\n\
                      Examples:\n  \
                      repoctx context\n  \
                      repoctx context /path/to/repo --format json\n  \
                      repoctx context --depth 3 --focus src --copy"
    )]
    Context(ScanArgs),

    #[command(
        about = "Render the directory tree only",
        long_about = "Renders just the filtered directory tree without project metadata.\n\n\
                      Examples:\n  \
                      repoctx tree\n  \
                      repoctx tree /path/to/repo --format toon --emoji"
    )]
    Tree(ScanArgs),

    #[command(
        about = "List detected dependencies",
        long_about = "Detects the project type and prints its declared dependencies.\n\n\
                      Examples:\n  \
                      repoctx deps\n  \
                      repoctx deps /path/to/repo --format json"
    )]
    Deps(ScanArgs),

    #[command(
        about = "Serve JSON-RPC requests over stdin/stdout",
        long_about = "Runs a line-delimited JSON-RPC loop for agent integration. Methods: \
                      tree, context, dependencies, ping."
    )]
    Serve,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "tree",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Prefix entries with file-type emoji")]
    pub emoji: bool,

    #[arg(
        short = 'd',
        long,
        value_name = "N",
        help = "Maximum directory depth to descend"
    )]
    pub depth: Option<usize>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Only include entries overlapping this relative path"
    )]
    pub focus: Option<String>,

    #[arg(long, help = "Disable default excludes and .gitignore handling")]
    pub include_all: bool,

    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        help = "Additional ignore pattern (can be repeated)"
    )]
    pub exclude: Vec<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(short = 'c', long, help = "Copy output to the system clipboard")]
    pub copy: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Tree,
    Toon,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Tree => OutputFormat::Tree,
            OutputFormatArg::Toon => OutputFormat::Toon,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}
