//! Numeric core: point charges and Coulomb field superposition in two dimensions.

pub mod constants;
mod electrostatic;

pub use electrostatic::{FieldVector, Particle, compute_fields, compute_forces, electric_field_at_point};
