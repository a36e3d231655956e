//! Material properties

use serde::{Deserialize, Serialize};

/// Material properties for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Density in kg/m³
    pub density: f64,
    /// Yield strength (optional) in Pa
    pub fy: Option<f64>,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, density: f64) -> Self {
        Self {
            e,
            density,
            fy: None,
        }
    }

    /// Create a material with yield strength
    pub fn with_yield_strength(mut self, fy: f64) -> Self {
        self.fy = Some(fy);
        self
    }

    /// Standard structural steel
    pub fn steel() -> Self {
        Self {
            e: 200e9,
            density: 7850.0,
            fy: Some(250e6),
        }
    }

    /// Normal-weight concrete from compressive strength `fc` (Pa)
    ///
    /// E estimated with the ACI correlation 4700·sqrt(f'c in MPa) MPa.
    pub fn concrete(fc: f64) -> Self {
        let fc_mpa = fc / 1e6;
        Self {
            e: 4700.0 * fc_mpa.sqrt() * 1e6,
            density: 2400.0,
            fy: None,
        }
    }

    /// Aluminum 6061-T6
    pub fn aluminum() -> Self {
        Self {
            e: 68.9e9,
            density: 2700.0,
            fy: Some(276e6),
        }
    }
}
