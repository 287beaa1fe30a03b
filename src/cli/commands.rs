//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: list registered tools
//! - describe: show a tool's input form and help
//! - run: collect input and run a tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use toolbox::host::OutputFormat;

/// Toolbox - pluggable physics and math tools
#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered tools
    List,

    /// Show the input form and help of a tool
    Describe {
        /// Tool name, e.g. "Linear Graph"
        tool: String,
    },

    /// Run a tool
    Run {
        /// Tool name, e.g. "Charged Particles"
        tool: String,

        /// Parameter for flat-input tools, as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE", conflicts_with_all = ["rows", "input"])]
        params: Vec<String>,

        /// Table row for tabular tools, cells comma-separated in column order (repeatable)
        #[arg(short, long = "row", value_name = "CELLS", allow_hyphen_values = true, conflicts_with = "input")]
        rows: Vec<String>,

        /// YAML or JSON file holding parameters or rows
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}
