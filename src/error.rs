//! Error types for Toolbox
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Toolbox
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// Non-numeric, non-finite, missing or unexpected input value
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// No usable parameters or rows were supplied
    #[error("No input: {0}")]
    EmptyInput(String),

    /// Tool name not present in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Submit attempted while no tool is selected
    #[error("No tool selected")]
    NoToolSelected,

    /// Declared input schema is malformed
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// A tool factory failed to produce a conforming tool
    #[error("Failed to load tool from {origin}: {reason}")]
    ToolLoad { origin: String, reason: String },

    /// Tool execution error
    #[error("Tool error: {0}")]
    Tool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ToolboxError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the input boundary (reported to the user, not a fault)
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::EmptyInput(_))
    }
}

/// Result type alias for Toolbox operations
pub type Result<T> = std::result::Result<T, ToolboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = ToolboxError::invalid_input("q", "'abc' is not a number");
        assert_eq!(err.to_string(), "Invalid input for 'q': 'abc' is not a number");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_empty_input_error() {
        let err = ToolboxError::EmptyInput("table has no populated rows".to_string());
        assert_eq!(err.to_string(), "No input: table has no populated rows");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = ToolboxError::UnknownTool("Quadratic".to_string());
        assert_eq!(err.to_string(), "Unknown tool: Quadratic");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_tool_load_error() {
        let err = ToolboxError::ToolLoad {
            origin: "tools::broken".to_string(),
            reason: "duplicate column 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load tool from tools::broken: duplicate column 'x'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolboxError = io_err.into();
        assert!(matches!(err, ToolboxError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ToolboxError = json_err.into();
        assert!(matches!(err, ToolboxError::Json(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<f64>>("{a: [").unwrap_err();
        let err: ToolboxError = yaml_err.into();
        assert!(matches!(err, ToolboxError::Yaml(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ToolboxError::NoToolSelected)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
