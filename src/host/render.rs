//! Presentation of tool descriptors and outputs for a terminal

use std::fmt::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::{ChargeSign, Curve, FieldScene, ToolOutput};
use crate::tools::{InputSchema, ToolDescriptor};

/// How an output is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render a tool output in the requested format
pub fn render(output: &ToolOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match output {
            ToolOutput::Curve(curve) => curve_text(curve),
            ToolOutput::FieldScene(scene) => scene_text(scene),
        }),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(output)?),
    }
}

fn curve_text(curve: &Curve) -> String {
    let mut out = String::from("x\ty\n");
    for (x, y) in curve.points() {
        let _ = writeln!(out, "{}\t{}", x, y);
    }
    out
}

fn scene_text(scene: &FieldScene) -> String {
    let mut out = String::from("particles:\n");
    for (i, p) in scene.particles.iter().enumerate() {
        let sign = match p.sign {
            ChargeSign::Positive => "+",
            ChargeSign::Negative => "-",
            ChargeSign::Neutral => "0",
        };
        let _ = writeln!(
            out,
            "  Q{} [{}] at ({}, {})  |E|={:.6e}  F=({:.6e}, {:.6e})",
            i + 1,
            sign,
            p.x,
            p.y,
            p.field.magnitude(),
            p.force.ex,
            p.force.ey
        );
    }
    out.push_str("\nfields:\n");
    out.push_str(&scene.annotation_text());
    out.push('\n');
    out
}

/// Human-readable summary of a tool's input form and help
pub fn describe(descriptor: &ToolDescriptor) -> String {
    let mut out = format!("{}\n", descriptor.name);
    match &descriptor.input_schema {
        InputSchema::Flat { parameters } => {
            out.push_str("  parameters:\n");
            for p in parameters {
                let _ = writeln!(out, "    {} = {}", p.name, p.default);
            }
        }
        InputSchema::Table(table) => {
            let _ = writeln!(out, "  table columns: {}", table.columns.join(", "));
            let _ = writeln!(
                out,
                "  default rows: {} (rows extendable: {}, columns extendable: {})",
                table.default_rows,
                yes_no(table.rows_extendable),
                yes_no(table.columns_extendable)
            );
        }
    }
    if let Some(help) = &descriptor.help {
        out.push_str("  help:\n");
        for line in help.lines() {
            let _ = writeln!(out, "    {}", line.trim_start());
        }
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
