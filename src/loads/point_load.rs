//! Concentrated loads on members

use serde::{Deserialize, Serialize};

/// Coordinate frame a load is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoadDirection {
    /// Components in the global frame
    Global,
    /// Components in the member (or node) local frame
    Local,
}

/// A concentrated force/moment applied at a station along a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLoad {
    /// Force along X (N)
    pub fx: f64,
    /// Force along Y (N)
    pub fy: f64,
    /// Moment about Z (N·m)
    pub mz: f64,
    /// Distance from the start node (m)
    pub position: f64,
    /// Coordinate frame of the components
    pub direction: LoadDirection,
    /// Load case this load belongs to
    pub case: String,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(
        fx: f64,
        fy: f64,
        mz: f64,
        position: f64,
        direction: LoadDirection,
        case: &str,
    ) -> Self {
        Self {
            fx,
            fy,
            mz,
            position,
            direction,
            case: case.to_string(),
        }
    }

    /// A downward (negative global Y) force
    pub fn downward(magnitude: f64, position: f64, case: &str) -> Self {
        Self::new(
            0.0,
            -magnitude.abs(),
            0.0,
            position,
            LoadDirection::Global,
            case,
        )
    }

    /// A force along the member axis
    pub fn axial(magnitude: f64, position: f64, case: &str) -> Self {
        Self::new(magnitude, 0.0, 0.0, position, LoadDirection::Local, case)
    }

    /// A concentrated moment
    pub fn moment(magnitude: f64, position: f64, case: &str) -> Self {
        Self::new(0.0, 0.0, magnitude, position, LoadDirection::Global, case)
    }

    /// Check if this load is expressed in member-local coordinates
    pub fn is_local(&self) -> bool {
        self.direction == LoadDirection::Local
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            fx: self.fx * factor,
            fy: self.fy * factor,
            mz: self.mz * factor,
            position: self.position,
            direction: self.direction,
            case: self.case.clone(),
        }
    }
}
