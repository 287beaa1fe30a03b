//! CLI module for toolbox - command-line interface and subcommands.
//!
//! Stands in for a windowed shell: lists tools, shows their input form,
//! and runs them on input given as flags or a file.

pub mod commands;

pub use commands::Cli;
