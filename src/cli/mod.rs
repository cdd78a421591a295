pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Commands, OutputFormatArg, ScanArgs};
