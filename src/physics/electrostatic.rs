use serde::{Deserialize, Serialize};

use super::constants::coulomb_constant;

/// Point charge in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position along x in meters.
    pub x: f64,
    /// Position along y in meters.
    pub y: f64,
    /// Charge in coulombs.
    pub q: f64,
}

impl Particle {
    #[must_use]
    pub const fn new(x: f64, y: f64, q: f64) -> Self {
        Self { x, y, q }
    }
}

/// Planar vector quantity, used for both field (V/m) and force (N).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldVector {
    pub ex: f64,
    pub ey: f64,
}

impl FieldVector {
    pub const ZERO: Self = Self { ex: 0.0, ey: 0.0 };

    #[must_use]
    pub const fn new(ex: f64, ey: f64) -> Self {
        Self { ex, ey }
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.ex.hypot(self.ey)
    }
}

/// Electric field at `(x, y)` due to `particles`.
///
/// A particle sitting exactly on the point contributes nothing; there is no
/// other regularization, so nearly coincident charges yield very large values.
///
/// Separations small enough that `dx² + dy²` underflows to zero divide by
/// zero: a charged source then contributes `±inf` (or `NaN` along a zero
/// component) and a neutral source contributes `NaN`. Neither panics.
#[must_use]
pub fn electric_field_at_point(x: f64, y: f64, particles: &[Particle]) -> FieldVector {
    let k = coulomb_constant();
    let mut field = FieldVector::ZERO;
    for p in particles {
        let dx = x - p.x;
        let dy = y - p.y;
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        let r2 = dx * dx + dy * dy;
        let r = r2.sqrt();
        let r3 = r2 * r;
        field.ex += k * p.q * dx / r3;
        field.ey += k * p.q * dy / r3;
    }
    field
}

/// Field at each particle's position due to all the others.
///
/// `result[i]` belongs to `particles[i]`. O(n²).
#[must_use]
pub fn compute_fields(particles: &[Particle]) -> Vec<FieldVector> {
    particles
        .iter()
        .map(|p| electric_field_at_point(p.x, p.y, particles))
        .collect()
}

/// Coulomb force on each particle, `F = q E`, given the fields from [`compute_fields`].
#[must_use]
pub fn compute_forces(particles: &[Particle], fields: &[FieldVector]) -> Vec<FieldVector> {
    particles
        .iter()
        .zip(fields)
        .map(|(p, e)| FieldVector::new(p.q * e.ex, p.q * e.ey))
        .collect()
}
