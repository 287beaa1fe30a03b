//! Shell session - tool selection and dispatch without any UI toolkit
//!
//! Holds only presentation state (the current selection). A windowed or
//! terminal front end drives it: populate a menu from `tool_names`, build a
//! form from `current_descriptor`, and pass the collected input to `submit`.

use log::{debug, warn};

use super::input::{RawInput, collect};
use crate::error::{Result, ToolboxError};
use crate::output::ToolOutput;
use crate::tools::{Tool, ToolDescriptor, ToolRegistry};

pub struct Shell {
    registry: ToolRegistry,
    current: Option<String>,
}

impl Shell {
    /// Open a shell on the first tool in menu order
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_default(registry, None)
    }

    /// Open a shell on `default_tool`, falling back to the first tool
    pub fn with_default(registry: ToolRegistry, default_tool: Option<&str>) -> Self {
        let current = match default_tool {
            Some(name) if registry.contains(name) => Some(name.to_string()),
            Some(name) => {
                warn!("Default tool '{}' is not registered", name);
                registry.first().map(|t| t.name().to_string())
            }
            None => registry.first().map(|t| t.name().to_string()),
        };
        Self { registry, current }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Names for the tool menu
    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Select a tool by name; an unknown name leaves no tool selected
    pub fn select(&mut self, name: &str) -> Option<&dyn Tool> {
        self.current = self.registry.contains(name).then(|| name.to_string());
        if self.current.is_none() {
            debug!("No tool named '{}', selection cleared", name);
        }
        self.current()
    }

    /// The selected tool, if any
    pub fn current(&self) -> Option<&dyn Tool> {
        self.current.as_deref().and_then(|name| self.registry.get(name))
    }

    /// What a front end needs to build the input form for the selected tool
    pub fn current_descriptor(&self) -> Option<ToolDescriptor> {
        self.current().map(ToolDescriptor::from_tool)
    }

    /// Collect `raw` against the selected tool's schema and run it
    ///
    /// Input errors are returned without invoking the tool.
    pub fn submit(&self, raw: &RawInput) -> Result<ToolOutput> {
        let tool = self.current().ok_or(ToolboxError::NoToolSelected)?;
        let input = collect(&tool.input_schema(), raw)?;
        debug!("Running '{}'", tool.name());
        tool.run(&input)
    }
}
