//! Toolbox - pluggable physics and math tools
//!
//! Each tool declares an input schema, runs on structured numeric input, and
//! returns one of a small set of renderer-agnostic output shapes. The registry
//! makes tools addressable by name so a host needs no tool-specific logic.

pub mod error;
pub mod host;
pub mod output;
pub mod physics;
pub mod tools;

pub use error::{Result, ToolboxError};
