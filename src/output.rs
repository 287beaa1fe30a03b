//! Renderer-agnostic result shapes
//!
//! Every tool returns one of a closed set of shapes. The renderer branches on
//! the variant and never needs to know which tool produced it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolboxError};
use crate::physics::{FieldVector, Particle, compute_forces};

/// Output of a tool run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    /// Simple line plot
    Curve(Curve),
    /// Particles with per-particle field vectors and annotation text
    FieldScene(FieldScene),
}

impl ToolOutput {
    /// Variant name, as used in the serialized `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Curve(_) => "curve",
            Self::FieldScene(_) => "field_scene",
        }
    }
}

/// Paired x/y samples of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// Build a curve, rejecting sequences of unequal length
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ToolboxError::Tool(format!(
                "curve has {} x samples but {} y samples",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Sign category of a charge, used by renderers to pick a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeSign {
    Positive,
    Negative,
    Neutral,
}

impl ChargeSign {
    pub fn of(q: f64) -> Self {
        if q > 0.0 {
            Self::Positive
        } else if q < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// One particle of a [`FieldScene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneParticle {
    pub x: f64,
    pub y: f64,
    pub q: f64,
    pub sign: ChargeSign,
    /// Field at the particle due to all others (V/m)
    pub field: FieldVector,
    /// Force on the particle, `q * field` (N)
    pub force: FieldVector,
}

/// Scatter of particles with field vectors and a per-particle summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldScene {
    pub particles: Vec<SceneParticle>,
    pub annotation: Vec<String>,
}

impl FieldScene {
    /// Shape a solver result. `fields[i]` must belong to `particles[i]`.
    pub fn from_solution(particles: &[Particle], fields: &[FieldVector]) -> Result<Self> {
        if particles.len() != fields.len() {
            return Err(ToolboxError::Tool(format!(
                "{} particles but {} field vectors",
                particles.len(),
                fields.len()
            )));
        }

        let forces = compute_forces(particles, fields);
        let entries: Vec<SceneParticle> = particles
            .iter()
            .zip(fields)
            .zip(forces)
            .map(|((p, field), force)| SceneParticle {
                x: p.x,
                y: p.y,
                q: p.q,
                sign: ChargeSign::of(p.q),
                field: *field,
                force,
            })
            .collect();

        let annotation = entries
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "Q{}: ({:?}, {:?}), E={:.6e}i + {:.6e}j",
                    i + 1,
                    p.x,
                    p.y,
                    p.field.ex,
                    p.field.ey
                )
            })
            .collect();

        Ok(Self {
            particles: entries,
            annotation,
        })
    }

    /// Annotation lines joined for display in a text pane
    pub fn annotation_text(&self) -> String {
        self.annotation.join("\n")
    }
}
