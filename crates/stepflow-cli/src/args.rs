//! Command-line argument definitions for the Stepflow CLI.
//!
//! A diagram is described either by a JSON request file or by flags. Steps
//! given by flags may be repeated, read from one-step-per-line text files, or
//! both.

use clap::Parser;

/// Command-line arguments for the Stepflow diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON diagram request, or `-` to read standard input
    #[arg(
        help = "Path to a JSON request ({title, manualSteps, automationSteps}), or - for stdin",
        conflicts_with_all = ["title", "manual", "automation", "manual_file", "automation_file"]
    )]
    pub input: Option<String>,

    /// Diagram title
    #[arg(short, long)]
    pub title: Option<String>,

    /// A manual step; repeat for each step in order
    #[arg(short, long, value_name = "STEP")]
    pub manual: Vec<String>,

    /// An automation step; repeat for each step in order
    #[arg(short, long, value_name = "STEP")]
    pub automation: Vec<String>,

    /// Text file with one manual step per line, appended after --manual steps
    #[arg(long, value_name = "PATH")]
    pub manual_file: Option<String>,

    /// Text file with one automation step per line, appended after --automation steps
    #[arg(long, value_name = "PATH")]
    pub automation_file: Option<String>,

    /// Path to the output PNG file [default: <title>_workflow.png]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Font family for all text, overriding the configuration
    #[arg(long)]
    pub font_family: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
