//! Distributed (line) loads on members

use serde::{Deserialize, Serialize};
use super::point_load::LoadDirection;

/// A linearly varying line load on a member
///
/// The load acts from `start` (measured from the start node) to
/// `end_offset` measured back from the end node. Intensities interpolate
/// linearly from (wx1, wy1) at the start of the loaded span to (wx2, wy2)
/// at its end, in N/m of member length. A uniform load has equal start
/// and end intensities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Axis-X intensity at the start of the loaded span
    pub wx1: f64,
    /// Axis-Y intensity at the start of the loaded span
    pub wy1: f64,
    /// Axis-X intensity at the end of the loaded span
    pub wx2: f64,
    /// Axis-Y intensity at the end of the loaded span
    pub wy2: f64,
    /// Offset of the loaded span from the start node (m)
    pub start: f64,
    /// Offset of the loaded span from the end node (m)
    pub end_offset: f64,
    /// Coordinate frame of the intensities
    pub direction: LoadDirection,
    /// Load case this load belongs to
    pub case: String,
}

impl DistributedLoad {
    /// Create a trapezoidal load over part of the member
    #[allow(clippy::too_many_arguments)]
    pub fn trapezoidal(
        wx1: f64,
        wy1: f64,
        wx2: f64,
        wy2: f64,
        start: f64,
        end_offset: f64,
        direction: LoadDirection,
        case: &str,
    ) -> Self {
        Self {
            wx1,
            wy1,
            wx2,
            wy2,
            start,
            end_offset,
            direction,
            case: case.to_string(),
        }
    }

    /// Create a uniform load over the full member length
    pub fn uniform(wx: f64, wy: f64, direction: LoadDirection, case: &str) -> Self {
        Self::trapezoidal(wx, wy, wx, wy, 0.0, 0.0, direction, case)
    }

    /// Create a uniform load over part of the member
    pub fn uniform_partial(
        wx: f64,
        wy: f64,
        start: f64,
        end_offset: f64,
        direction: LoadDirection,
        case: &str,
    ) -> Self {
        Self::trapezoidal(wx, wy, wx, wy, start, end_offset, direction, case)
    }

    /// Create a uniform downward load (negative global Y)
    pub fn uniform_downward(w: f64, case: &str) -> Self {
        Self::uniform(0.0, -w.abs(), LoadDirection::Global, case)
    }

    /// Check if the load is uniform (constant intensity)
    pub fn is_uniform(&self) -> bool {
        (self.wx1 - self.wx2).abs() < 1e-10 && (self.wy1 - self.wy2).abs() < 1e-10
    }

    /// Check if this load is expressed in member-local coordinates
    pub fn is_local(&self) -> bool {
        self.direction == LoadDirection::Local
    }

    /// Intensities at distance `x` from the start node on a member of the
    /// given length, interpolated over the loaded span
    pub fn intensity_at(&self, x: f64, length: f64) -> (f64, f64) {
        let a = self.start;
        let b = length - self.end_offset;
        if b <= a {
            return (0.0, 0.0);
        }
        let t = ((x - a) / (b - a)).clamp(0.0, 1.0);
        (
            self.wx1 + (self.wx2 - self.wx1) * t,
            self.wy1 + (self.wy2 - self.wy1) * t,
        )
    }

    /// Total force resultant (X, Y) of this load on a member of the given
    /// length
    pub fn total_force(&self, length: f64) -> (f64, f64) {
        let span = length - self.end_offset - self.start;
        if span <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (self.wx1 + self.wx2) / 2.0 * span,
            (self.wy1 + self.wy2) / 2.0 * span,
        )
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            wx1: self.wx1 * factor,
            wy1: self.wy1 * factor,
            wx2: self.wx2 * factor,
            wy2: self.wy2 * factor,
            start: self.start,
            end_offset: self.end_offset,
            direction: self.direction,
            case: self.case.clone(),
        }
    }
}
