//! Input boundary - raw form/table text converted into a [`ToolInput`]
//!
//! Everything that can go wrong with user input is caught here, before a tool
//! is run: non-numeric text, non-finite values, unknown names, partially
//! filled rows, and tables with no populated rows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolboxError};
use crate::tools::{InputSchema, Parameter, Row, TableSchema, ToolInput};

/// A single form field or table cell as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value of the cell; blank text is `None`
    pub fn value(&self, field: &str) -> Result<Option<f64>> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<f64>()
                    .map_err(|_| ToolboxError::invalid_input(field, format!("'{}' is not a number", text)))?
            }
        };

        if !value.is_finite() {
            return Err(ToolboxError::invalid_input(field, format!("{} is not a finite number", value)));
        }
        Ok(Some(value))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One table row as entered, either in column order or keyed by column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRow {
    Positional(Vec<Cell>),
    Named(BTreeMap<String, Cell>),
}

impl RawRow {
    /// Parse a comma-separated row such as `0, 0.5, 1e-9`
    pub fn parse(line: &str) -> Self {
        Self::Positional(line.split(',').map(|cell| Cell::from(cell.trim())).collect())
    }

    /// A row with no filled cell is not part of the input
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Positional(cells) => cells.iter().all(Cell::is_blank),
            Self::Named(cells) => cells.values().all(Cell::is_blank),
        }
    }
}

/// Everything the host collected for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Rows(Vec<RawRow>),
    Params(BTreeMap<String, Cell>),
}

impl Default for RawInput {
    fn default() -> Self {
        Self::Params(BTreeMap::new())
    }
}

impl RawInput {
    /// Parse YAML (or JSON) input: a mapping of parameters or a list of rows
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read input from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parameters from `NAME=VALUE` pairs
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = BTreeMap::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| ToolboxError::invalid_input(assignment, "expected NAME=VALUE"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ToolboxError::invalid_input(assignment, "parameter name is empty"));
            }
            params.insert(name.to_string(), Cell::from(value));
        }
        Ok(Self::Params(params))
    }

    /// Rows from comma-separated lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Rows(lines.into_iter().map(|line| RawRow::parse(line.as_ref())).collect())
    }
}

/// Convert raw input into the structured input the schema declares
pub fn collect(schema: &InputSchema, raw: &RawInput) -> Result<ToolInput> {
    match (schema, raw) {
        (InputSchema::Flat { parameters }, RawInput::Params(values)) => collect_params(parameters, values),
        (InputSchema::Flat { parameters }, RawInput::Rows(rows)) if rows.is_empty() => {
            collect_params(parameters, &BTreeMap::new())
        }
        (InputSchema::Table(table), RawInput::Rows(rows)) => collect_rows(table, rows),
        (InputSchema::Table(_), RawInput::Params(values)) if values.is_empty() => {
            Err(ToolboxError::EmptyInput("table has no populated rows".to_string()))
        }
        (InputSchema::Flat { .. }, RawInput::Rows(_)) => {
            Err(ToolboxError::invalid_input("input", "expected named parameters, got table rows"))
        }
        (InputSchema::Table(_), RawInput::Params(_)) => {
            Err(ToolboxError::invalid_input("input", "expected table rows, got named parameters"))
        }
    }
}

fn collect_params(parameters: &[Parameter], values: &BTreeMap<String, Cell>) -> Result<ToolInput> {
    if let Some(unknown) = values.keys().find(|k| !parameters.iter().any(|p| &p.name == *k)) {
        return Err(ToolboxError::invalid_input(unknown.as_str(), "unknown parameter"));
    }

    let mut params = BTreeMap::new();
    for parameter in parameters {
        let value = match values.get(&parameter.name) {
            Some(cell) => cell
                .value(&parameter.name)?
                .ok_or_else(|| ToolboxError::invalid_input(&parameter.name, "missing value"))?,
            None => parameter.default,
        };
        params.insert(parameter.name.clone(), value);
    }
    Ok(ToolInput::Params(params))
}

fn collect_rows(table: &TableSchema, rows: &[RawRow]) -> Result<ToolInput> {
    let populated: Vec<&RawRow> = rows.iter().filter(|row| !row.is_blank()).collect();
    if populated.is_empty() {
        return Err(ToolboxError::EmptyInput("table has no populated rows".to_string()));
    }
    if !table.rows_extendable && populated.len() > table.default_rows {
        return Err(ToolboxError::invalid_input(
            "rows",
            format!("table allows at most {} rows, got {}", table.default_rows, populated.len()),
        ));
    }

    let rows = populated
        .into_iter()
        .enumerate()
        .map(|(i, raw)| collect_row(table, i + 1, raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(ToolInput::Rows(rows))
}

fn collect_row(table: &TableSchema, number: usize, raw: &RawRow) -> Result<Row> {
    let cells: Vec<(String, &Cell)> = match raw {
        RawRow::Positional(cells) => {
            if cells.len() > table.columns.len() && !table.columns_extendable {
                return Err(ToolboxError::invalid_input(
                    format!("row {}", number),
                    format!("expected {} cells, got {}", table.columns.len(), cells.len()),
                ));
            }
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let name = table.columns.get(i).cloned().unwrap_or_else(|| format!("col{}", i + 1));
                    (name, cell)
                })
                .collect()
        }
        RawRow::Named(cells) => {
            if !table.columns_extendable {
                if let Some(unknown) = cells.keys().find(|k| !table.columns.contains(*k)) {
                    return Err(ToolboxError::invalid_input(
                        unknown.as_str(),
                        format!("row {}: unknown column", number),
                    ));
                }
            }
            cells.iter().map(|(name, cell)| (name.clone(), cell)).collect()
        }
    };

    let mut row = Row::new();
    for (name, cell) in &cells {
        if let Some(value) = cell.value(name)? {
            row.insert(name.clone(), value);
        }
    }

    if let Some(missing) = table.columns.iter().find(|c| row.get(c).is_none()) {
        return Err(ToolboxError::invalid_input(
            missing.as_str(),
            format!("row {}: missing value", number),
        ));
    }
    Ok(row)
}
