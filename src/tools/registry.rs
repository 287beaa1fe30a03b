//! Tool registry - discovers tools from factories and serves lookups by name

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};

use super::{Tool, ToolDescriptor};
use crate::error::{Result, ToolboxError};

/// Explicit registration entry standing in for a tool location
#[derive(Clone, Copy)]
pub struct ToolFactory {
    origin: &'static str,
    build: fn() -> Result<Box<dyn Tool>>,
}

impl ToolFactory {
    pub const fn new(origin: &'static str, build: fn() -> Result<Box<dyn Tool>>) -> Self {
        Self { origin, build }
    }

    /// Where this tool comes from, used in diagnostics
    pub fn origin(&self) -> &'static str {
        self.origin
    }

    /// Instantiate the tool
    pub fn build(&self) -> Result<Box<dyn Tool>> {
        (self.build)()
    }
}

impl fmt::Debug for ToolFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolFactory").field("origin", &self.origin).finish()
    }
}

/// A factory that did not yield a conforming tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub origin: String,
    pub reason: String,
}

impl LoadFailure {
    fn new(origin: &str, cause: &ToolboxError) -> Self {
        Self {
            origin: origin.to_string(),
            reason: cause.to_string(),
        }
    }

    /// The failure as a crate error
    pub fn to_error(&self) -> ToolboxError {
        ToolboxError::ToolLoad {
            origin: self.origin.clone(),
            reason: self.reason.clone(),
        }
    }
}

/// Name-keyed set of tools, read-only once built
///
/// Names iterate in alphabetical order. When two factories produce the same
/// name, the one registered last wins.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
    failures: Vec<LoadFailure>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every factory
    pub fn discover(factories: &[ToolFactory]) -> Self {
        Self::discover_with(factories, |_| true)
    }

    /// Build a registry, admitting only tools whose name passes `filter`
    ///
    /// A factory that fails to build, or whose tool has a blank name or an
    /// invalid schema, is skipped and recorded in [`failures`](Self::failures).
    pub fn discover_with<F>(factories: &[ToolFactory], filter: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut registry = Self::new();

        for factory in factories {
            let tool = match factory.build().and_then(admit) {
                Ok(tool) => tool,
                Err(e) => {
                    let failure = LoadFailure::new(factory.origin(), &e);
                    warn!("{}", failure.to_error());
                    registry.failures.push(failure);
                    continue;
                }
            };

            if !filter(tool.name()) {
                debug!("Tool '{}' from {} filtered out", tool.name(), factory.origin());
                continue;
            }

            if registry.add_tool(tool).is_some() {
                warn!("Tool from {} replaced an earlier tool with the same name", factory.origin());
            }
        }

        info!(
            "Registered {} tool(s), {} failed to load",
            registry.len(),
            registry.failures.len()
        );
        registry
    }

    /// Add a tool, returning the one it replaced
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) -> Option<Box<dyn Tool>> {
        self.tools.insert(tool.name().to_string(), tool)
    }

    /// Look up a tool; unknown names are `None`
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Look up a tool, treating an unknown name as an error
    pub fn require(&self, name: &str) -> Result<&dyn Tool> {
        self.get(name).ok_or_else(|| ToolboxError::UnknownTool(name.to_string()))
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in menu order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// First tool in menu order
    pub fn first(&self) -> Option<&dyn Tool> {
        self.tools.values().next().map(|t| t.as_ref())
    }

    /// Descriptors for every registered tool, in menu order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| ToolDescriptor::from_tool(t.as_ref())).collect()
    }

    /// Factories that failed to produce a tool
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("failures", &self.failures)
            .finish()
    }
}

/// Capability check run before a tool enters the registry
fn admit(tool: Box<dyn Tool>) -> Result<Box<dyn Tool>> {
    if tool.name().trim().is_empty() {
        return Err(ToolboxError::InvalidSchema("tool has a blank name".to_string()));
    }
    tool.input_schema().validate()?;
    Ok(tool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Curve, ToolOutput};
    use crate::tools::{InputSchema, TableSchema, ToolInput, builtin_factories};

    struct Constant {
        name: &'static str,
        value: f64,
    }

    impl Tool for Constant {
        fn name(&self) -> &'static str {
            self.name
        }

        fn input_schema(&self) -> InputSchema {
            InputSchema::flat([("unused", 0.0)])
        }

        fn run(&self, _input: &ToolInput) -> Result<ToolOutput> {
            Ok(ToolOutput::Curve(Curve::new(vec![0.0], vec![self.value])?))
        }
    }

    struct BadSchema;

    impl Tool for BadSchema {
        fn name(&self) -> &'static str {
            "Bad Schema"
        }

        fn input_schema(&self) -> InputSchema {
            InputSchema::table(TableSchema::new(["x", "x"], 1))
        }

        fn run(&self, _input: &ToolInput) -> Result<ToolOutput> {
            Err(ToolboxError::Tool("unreachable".to_string()))
        }
    }

    fn first_constant() -> Result<Box<dyn Tool>> {
        Ok(Box::new(Constant { name: "Constant", value: 1.0 }))
    }

    fn second_constant() -> Result<Box<dyn Tool>> {
        Ok(Box::new(Constant { name: "Constant", value: 2.0 }))
    }

    fn other_constant() -> Result<Box<dyn Tool>> {
        Ok(Box::new(Constant { name: "Another", value: 3.0 }))
    }

    fn bad_schema() -> Result<Box<dyn Tool>> {
        Ok(Box::new(BadSchema))
    }

    fn failing_build() -> Result<Box<dyn Tool>> {
        Err(ToolboxError::Tool("construction panicked".to_string()))
    }

    fn value_of(registry: &ToolRegistry, name: &str) -> f64 {
        let input = ToolInput::Params(Default::default());
        match registry.get(name).unwrap().run(&input).unwrap() {
            ToolOutput::Curve(curve) => curve.y()[0],
            other => panic!("Expected curve, got {}", other.kind()),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.first().is_none());
        assert!(registry.failures().is_empty());
    }

    #[test]
    fn test_builtin_discovery() {
        let registry = ToolRegistry::discover(&builtin_factories());
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Linear Graph"));
        assert!(registry.contains("Charged Particles"));
        assert!(registry.failures().is_empty());
    }

    #[test]
    fn test_names_are_alphabetical() {
        let factories = [
            ToolFactory::new("first", first_constant),
            ToolFactory::new("other", other_constant),
        ];
        let registry = ToolRegistry::discover(&factories);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Another", "Constant"]);
        assert_eq!(registry.first().unwrap().name(), "Another");
    }

    #[test]
    fn test_last_registered_wins() {
        let factories = [
            ToolFactory::new("first", first_constant),
            ToolFactory::new("second", second_constant),
        ];
        let registry = ToolRegistry::discover(&factories);
        assert_eq!(registry.len(), 1);
        assert_eq!(value_of(&registry, "Constant"), 2.0);
    }

    #[test]
    fn test_load_failures_are_isolated() {
        let factories = [
            ToolFactory::new("tools::broken", failing_build),
            ToolFactory::new("tools::bad_schema", bad_schema),
            ToolFactory::new("tools::constant", first_constant),
        ];
        let registry = ToolRegistry::discover(&factories);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Constant"));
        assert!(!registry.contains("Bad Schema"));

        let failures = registry.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].origin, "tools::broken");
        assert!(failures[0].reason.contains("construction panicked"));
        assert_eq!(failures[1].origin, "tools::bad_schema");
        assert!(failures[1].reason.contains("duplicate column"));
    }

    #[test]
    fn test_load_failure_as_error() {
        let registry = ToolRegistry::discover(&[ToolFactory::new("tools::broken", failing_build)]);
        let err = registry.failures()[0].to_error();
        assert!(matches!(&err, ToolboxError::ToolLoad { origin, .. } if origin == "tools::broken"));
        assert_eq!(
            err.to_string(),
            "Failed to load tool from tools::broken: Tool error: construction panicked"
        );
    }

    #[test]
    fn test_discover_with_filter() {
        let registry = ToolRegistry::discover_with(&builtin_factories(), |name| name != "Linear Graph");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Charged Particles"]);
    }

    #[test]
    fn test_unknown_lookup() {
        let registry = ToolRegistry::discover(&builtin_factories());
        assert!(registry.get("Quadratic").is_none());
        assert!(matches!(registry.require("Quadratic"), Err(ToolboxError::UnknownTool(_))));
    }

    #[test]
    fn test_descriptors_follow_name_order() {
        let registry = ToolRegistry::discover(&builtin_factories());
        let names: Vec<_> = registry.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Charged Particles", "Linear Graph"]);
    }

    #[test]
    fn test_add_tool_returns_replaced() {
        let mut registry = ToolRegistry::new();
        assert!(registry.add_tool(first_constant().unwrap()).is_none());
        let replaced = registry.add_tool(second_constant().unwrap());
        assert!(replaced.is_some());
        assert_eq!(value_of(&registry, "Constant"), 2.0);
    }
}
