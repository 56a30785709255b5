//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::BackendKind;

/// Scroll text typed on stdin across a MAX7219 seven-segment display
#[derive(Parser, Debug)]
#[command(name = "marquee", version, about)]
pub struct Cli {
    /// Configuration file (defaults built in when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the transport backend from the configuration
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Show 1.2.3.4.5.6.7.8. and exit
    #[arg(long)]
    pub test_pattern: bool,
}
