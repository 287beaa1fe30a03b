//! Physical constants used by the solvers.
//!
//! Values follow CODATA 2018 (<https://physics.nist.gov/cuu/Constants/>).

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// Elementary charge _e_ in coulombs (C). Exact by the 2019 SI definition.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Coulomb constant k = 1 / (4π ε₀) in N·m²/C².
#[inline]
#[must_use]
pub fn coulomb_constant() -> f64 {
    1.0 / (4.0 * PI * VACUUM_PERMITTIVITY)
}
