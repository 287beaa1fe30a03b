//! Tool system - the contract every computational tool implements, the
//! built-in tools, and the registry that makes them addressable by name.
//!
//! The host never branches on a specific tool: it reads `input_schema()` to
//! build a form or a table, hands the collected [`ToolInput`] to `run`, and
//! renders whichever [`ToolOutput`] shape comes back.

mod charged_particles;
mod linear_graph;
mod registry;
mod schema;

pub use charged_particles::ChargedParticlesTool;
pub use linear_graph::LinearGraphTool;
pub use registry::{LoadFailure, ToolFactory, ToolRegistry};
pub use schema::{InputSchema, Parameter, Row, TableSchema, ToolInput};

use serde::Serialize;

use crate::error::Result;
use crate::output::ToolOutput;

/// A pluggable computation the host can parameterize and run
pub trait Tool: Send + Sync {
    /// Display and lookup name, unique within a registry
    fn name(&self) -> &'static str;

    /// Declared input shape
    fn input_schema(&self) -> InputSchema;

    /// Usage text, if the tool has any
    fn help(&self) -> Option<&'static str> {
        None
    }

    /// Execute the tool on input matching `input_schema()`
    fn run(&self, input: &ToolInput) -> Result<ToolOutput>;
}

/// Serializable description of a tool for hosts and menus
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub input_schema: InputSchema,
    pub help: Option<String>,
}

impl ToolDescriptor {
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            input_schema: tool.input_schema(),
            help: tool.help().map(str::to_string),
        }
    }
}

/// Factories for the tools shipped with the crate
pub fn builtin_factories() -> Vec<ToolFactory> {
    vec![
        ToolFactory::new("tools::linear_graph", build_linear_graph),
        ToolFactory::new("tools::charged_particles", build_charged_particles),
    ]
}

fn build_linear_graph() -> Result<Box<dyn Tool>> {
    Ok(Box::new(LinearGraphTool))
}

fn build_charged_particles() -> Result<Box<dyn Tool>> {
    Ok(Box::new(ChargedParticlesTool))
}
