//! Input schemas and the structured input handed to tools
//!
//! A tool declares either a flat set of named parameters or a table. The host
//! renders a form or a table from the schema and delivers a matching
//! [`ToolInput`] to `run`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolboxError};

/// Named scalar parameter with its default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub default: f64,
}

impl Parameter {
    pub fn new(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

/// Layout of a tabular input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<String>,
    pub default_rows: usize,
    pub rows_extendable: bool,
    pub columns_extendable: bool,
}

impl TableSchema {
    /// Table with fixed columns; rows may be added
    pub fn new<I, S>(columns: I, default_rows: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            default_rows,
            rows_extendable: true,
            columns_extendable: false,
        }
    }

    pub fn with_fixed_rows(mut self) -> Self {
        self.rows_extendable = false;
        self
    }

    pub fn with_extendable_columns(mut self) -> Self {
        self.columns_extendable = true;
        self
    }
}

/// Declared input shape of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSchema {
    Flat { parameters: Vec<Parameter> },
    Table(TableSchema),
}

impl InputSchema {
    /// Flat schema from `(name, default)` pairs
    pub fn flat<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::Flat {
            parameters: parameters
                .into_iter()
                .map(|(name, default)| Parameter::new(name, default))
                .collect(),
        }
    }

    pub fn table(table: TableSchema) -> Self {
        Self::Table(table)
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat { .. })
    }

    /// Parameter or column names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::Flat { parameters } => parameters.iter().map(|p| p.name.as_str()).collect(),
            Self::Table(table) => table.columns.iter().map(String::as_str).collect(),
        }
    }

    /// Check the schema is usable by a host
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Flat { parameters } => {
                if parameters.is_empty() {
                    return Err(ToolboxError::InvalidSchema("no parameters declared".to_string()));
                }
                check_names(parameters.iter().map(|p| p.name.as_str()), "parameter")?;
                if let Some(p) = parameters.iter().find(|p| !p.default.is_finite()) {
                    return Err(ToolboxError::InvalidSchema(format!(
                        "parameter '{}' has non-finite default {}",
                        p.name, p.default
                    )));
                }
            }
            Self::Table(table) => {
                if table.columns.is_empty() {
                    return Err(ToolboxError::InvalidSchema("no columns declared".to_string()));
                }
                check_names(table.columns.iter().map(String::as_str), "column")?;
                if table.default_rows == 0 && !table.rows_extendable {
                    return Err(ToolboxError::InvalidSchema(
                        "fixed-row table must have at least one row".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn check_names<'a>(names: impl Iterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ToolboxError::InvalidSchema(format!("blank {} name", what)));
        }
        if !seen.insert(name) {
            return Err(ToolboxError::InvalidSchema(format!("duplicate {} '{}'", what, name)));
        }
    }
    Ok(())
}

/// One populated table row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, f64>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        self.0.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.0.get(column).copied()
    }

    /// Value of a column the tool cannot do without
    pub fn require(&self, column: &str) -> Result<f64> {
        self.get(column)
            .ok_or_else(|| ToolboxError::invalid_input(column, "missing value"))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Row {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Structured, already-numeric input delivered to a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    Params(BTreeMap<String, f64>),
    Rows(Vec<Row>),
}

impl ToolInput {
    /// Named parameter of a flat input
    pub fn param(&self, name: &str) -> Result<f64> {
        match self {
            Self::Params(params) => params
                .get(name)
                .copied()
                .ok_or_else(|| ToolboxError::invalid_input(name, "missing parameter")),
            Self::Rows(_) => Err(ToolboxError::invalid_input(name, "expected parameters, got table rows")),
        }
    }

    /// Rows of a tabular input
    pub fn rows(&self) -> Result<&[Row]> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Params(_) => Err(ToolboxError::invalid_input("rows", "expected table rows, got parameters")),
        }
    }
}
