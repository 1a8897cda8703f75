//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Convert an Anchor 0.30+ IDL to the legacy (pre-0.29) format
#[derive(Debug, Parser)]
#[command(name = "convert-idl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the input IDL JSON (0.30+ format)
    pub input: PathBuf,

    /// Destination path for the converted legacy IDL JSON
    pub output: PathBuf,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
