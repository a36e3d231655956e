//! Nodal loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};
use super::point_load::LoadDirection;
use crate::math::Vec3;

/// Comparison grid for tolerant equality, roughly at the limit of what
/// survives a solve round-trip
const EQUALITY_GRID: f64 = 1e-10;

/// A force/moment applied directly to a node
///
/// Loads with `Local` direction are expressed in the node's rotated frame
/// and converted to global through the node transformation during
/// assembly.
///
/// Equality and hashing quantize components to a 1e-10 grid, so loads
/// differing only by floating-point noise compare equal and hash
/// together. Values straddling a grid boundary may still compare unequal;
/// that is the accepted trade-off for keeping equality transitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
    /// Moment about Z axis (N·m)
    pub mz: f64,
    /// Coordinate frame of the components
    pub direction: LoadDirection,
    /// Load case this load belongs to
    pub case: String,
}

impl NodalLoad {
    /// Create a new nodal load in global coordinates
    pub fn new(fx: f64, fy: f64, mz: f64, case: &str) -> Self {
        Self {
            fx,
            fy,
            mz,
            direction: LoadDirection::Global,
            case: case.to_string(),
        }
    }

    /// Create a nodal load in the node's local frame
    pub fn local(fx: f64, fy: f64, mz: f64, case: &str) -> Self {
        Self {
            direction: LoadDirection::Local,
            ..Self::new(fx, fy, mz, case)
        }
    }

    /// Create a force-only nodal load
    pub fn force(fx: f64, fy: f64, case: &str) -> Self {
        Self::new(fx, fy, 0.0, case)
    }

    /// Create a moment-only nodal load
    pub fn moment(mz: f64, case: &str) -> Self {
        Self::new(0.0, 0.0, mz, case)
    }

    /// Create a load in X direction
    pub fn fx(value: f64, case: &str) -> Self {
        Self::force(value, 0.0, case)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64, case: &str) -> Self {
        Self::force(0.0, value, case)
    }

    /// Get the load as a vector (Fx, Fy, Mz)
    pub fn as_vector(&self) -> Vec3 {
        Vec3::new(self.fx, self.fy, self.mz)
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            fx: self.fx * factor,
            fy: self.fy * factor,
            mz: self.mz * factor,
            direction: self.direction,
            case: self.case.clone(),
        }
    }

    fn quantized(&self) -> (i64, i64, i64) {
        (
            quantize(self.fx),
            quantize(self.fy),
            quantize(self.mz),
        )
    }
}

fn quantize(value: f64) -> i64 {
    (value / EQUALITY_GRID).round() as i64
}

impl Default for NodalLoad {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, "Case 1")
    }
}

impl PartialEq for NodalLoad {
    fn eq(&self, other: &Self) -> bool {
        self.quantized() == other.quantized()
            && self.direction == other.direction
            && self.case == other.case
    }
}

impl Eq for NodalLoad {}

impl std::hash::Hash for NodalLoad {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.quantized().hash(state);
        self.direction.hash(state);
        self.case.hash(state);
    }
}
