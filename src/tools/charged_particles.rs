//! Charged Particles tool - electric field at each of a set of point charges

use log::debug;

use super::{InputSchema, TableSchema, Tool, ToolInput};
use crate::error::{Result, ToolboxError};
use crate::output::{FieldScene, ToolOutput};
use crate::physics::{Particle, compute_fields};

const HELP: &str = "Inputs:
    coordinates (x, y) in meters,
    charge (q) in coulombs, e notation is valid (1.602*10^-19 = 1.602e-19)";

pub struct ChargedParticlesTool;

impl ChargedParticlesTool {
    fn particles(input: &ToolInput) -> Result<Vec<Particle>> {
        input
            .rows()?
            .iter()
            .map(|row| -> Result<Particle> {
                Ok(Particle::new(row.require("x")?, row.require("y")?, row.require("q")?))
            })
            .collect()
    }
}

impl Tool for ChargedParticlesTool {
    fn name(&self) -> &'static str {
        "Charged Particles"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::table(TableSchema::new(["x", "y", "q"], 2))
    }

    fn help(&self) -> Option<&'static str> {
        Some(HELP)
    }

    fn run(&self, input: &ToolInput) -> Result<ToolOutput> {
        let particles = Self::particles(input)?;
        if particles.is_empty() {
            return Err(ToolboxError::EmptyInput("no particles given".to_string()));
        }
        debug!("Computing fields for {} particle(s)", particles.len());

        let fields = compute_fields(&particles);
        Ok(ToolOutput::FieldScene(FieldScene::from_solution(&particles, &fields)?))
    }
}
