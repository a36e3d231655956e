//! Prescribed support displacements (settlements)

use serde::{Deserialize, Serialize};

/// A prescribed displacement at a restrained node
///
/// Components apply only at DOFs that are actually restrained; values at
/// free DOFs are ignored during assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportDisplacement {
    /// Prescribed translation in X (m)
    pub ux: f64,
    /// Prescribed translation in Y (m)
    pub uy: f64,
    /// Prescribed rotation about Z (rad)
    pub rz: f64,
    /// Load case this settlement belongs to
    pub case: String,
}

impl SupportDisplacement {
    /// Create a new prescribed displacement
    pub fn new(ux: f64, uy: f64, rz: f64, case: &str) -> Self {
        Self {
            ux,
            uy,
            rz,
            case: case.to_string(),
        }
    }

    /// A vertical settlement (negative = downward)
    pub fn settlement(uy: f64, case: &str) -> Self {
        Self::new(0.0, uy, 0.0, case)
    }

    /// Get the components as an array (Ux, Uy, Rz)
    pub fn as_array(&self) -> [f64; 3] {
        [self.ux, self.uy, self.rz]
    }

    /// Scale the settlement by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            ux: self.ux * factor,
            uy: self.uy * factor,
            rz: self.rz * factor,
            case: self.case.clone(),
        }
    }
}
