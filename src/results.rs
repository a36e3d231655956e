//! Result types for planar frame analysis

use serde::{Deserialize, Serialize};

use crate::math::{Vec3, Vec6};

/// Displacement components at a node or a station along a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Translation in X
    pub ux: f64,
    /// Translation in Y
    pub uy: f64,
    /// Rotation about Z
    pub rz: f64,
}

impl Displacement {
    pub fn new(ux: f64, uy: f64, rz: f64) -> Self {
        Self { ux, uy, rz }
    }

    pub fn from_vector(v: Vec3) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.ux.powi(2) + self.uy.powi(2)).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.ux * factor, self.uy * factor, self.rz * factor)
    }
}

impl std::ops::Add for Displacement {
    type Output = Displacement;

    fn add(self, rhs: Displacement) -> Displacement {
        Displacement::new(self.ux + rhs.ux, self.uy + rhs.uy, self.rz + rhs.rz)
    }
}

/// Internal force components at a station along a member
///
/// The sign convention follows the member end forces at the start node:
/// the values at x = 0 are exactly the local end forces there, and the
/// moment decreases by Fy per unit length in the absence of span loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    /// Axial force
    pub fx: f64,
    /// Shear force
    pub fy: f64,
    /// Bending moment
    pub mz: f64,
}

impl InternalForces {
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.fx * factor, self.fy * factor, self.mz * factor)
    }
}

impl std::ops::Add for InternalForces {
    type Output = InternalForces;

    fn add(self, rhs: InternalForces) -> InternalForces {
        InternalForces::new(self.fx + rhs.fx, self.fy + rhs.fy, self.mz + rhs.mz)
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction force in X
    pub fx: f64,
    /// Reaction force in Y
    pub fy: f64,
    /// Reaction moment about Z
    pub mz: f64,
}

impl Reaction {
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    pub fn from_vector(v: Vec3) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.fx * factor, self.fy * factor, self.mz * factor)
    }
}

impl std::ops::Add for Reaction {
    type Output = Reaction;

    fn add(self, rhs: Reaction) -> Reaction {
        Reaction::new(self.fx + rhs.fx, self.fy + rhs.fy, self.mz + rhs.mz)
    }
}

/// End forces of a member at both nodes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MemberEndForces {
    /// Forces acting on the member at the start node
    pub i: InternalForces,
    /// Forces acting on the member at the end node
    pub j: InternalForces,
}

impl MemberEndForces {
    pub fn from_vector(q: Vec6) -> Self {
        Self {
            i: InternalForces::new(q[0], q[1], q[2]),
            j: InternalForces::new(q[3], q[4], q[5]),
        }
    }

    /// Axial force with tension positive
    pub fn axial(&self) -> f64 {
        -self.i.fx
    }
}

/// A sub-interval of a member over which internal forces and
/// displacements are closed-form polynomials
///
/// Segments partition [0, length]; `forces_1`/`displacement_1` hold the
/// state at the segment start, `forces_2`/`displacement_2` at its end,
/// and (wx1, wy1)-(wx2, wy2) the net distributed intensities across it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeshSegment {
    /// Start station, measured from the member start node
    pub x1: f64,
    /// End station
    pub x2: f64,
    /// Cross-sectional area over the segment
    pub area: f64,
    /// Modulus of elasticity over the segment
    pub elastic_modulus: f64,
    /// Moment of inertia over the segment (zero for axial-only members)
    pub inertia: f64,
    /// Internal forces at the segment start
    pub forces_1: InternalForces,
    /// Internal forces at the segment end
    pub forces_2: InternalForces,
    /// Displacements at the segment start
    pub displacement_1: Displacement,
    /// Displacements at the segment end
    pub displacement_2: Displacement,
    /// Axial distributed intensity at the segment start
    pub wx1: f64,
    /// Axial distributed intensity at the segment end
    pub wx2: f64,
    /// Transverse distributed intensity at the segment start
    pub wy1: f64,
    /// Transverse distributed intensity at the segment end
    pub wy2: f64,
}

impl MeshSegment {
    pub(crate) fn new(x1: f64, x2: f64, e: f64, a: f64, i: f64) -> Self {
        Self {
            x1,
            x2,
            area: a,
            elastic_modulus: e,
            inertia: i,
            forces_1: InternalForces::default(),
            forces_2: InternalForces::default(),
            displacement_1: Displacement::default(),
            displacement_2: Displacement::default(),
            wx1: 0.0,
            wx2: 0.0,
            wy1: 0.0,
            wy2: 0.0,
        }
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Whether the member station `x` falls inside this segment
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x1 - 1e-9 && x <= self.x2 + 1e-9
    }

    /// Internal forces at offset `xi` from the segment start
    ///
    /// Axial and shear vary linearly under the linear distributed
    /// intensities; the moment is their cubic integral.
    pub fn internal_force_at(&self, xi: f64) -> InternalForces {
        let h = self.length();
        let dwx = if h > 0.0 { (self.wx2 - self.wx1) / h } else { 0.0 };
        let dwy = if h > 0.0 { (self.wy2 - self.wy1) / h } else { 0.0 };

        let fx = self.forces_1.fx + self.wx1 * xi + dwx * xi * xi / 2.0;
        let fy = self.forces_1.fy + self.wy1 * xi + dwy * xi * xi / 2.0;
        let mz = self.forces_1.mz
            - self.forces_1.fy * xi
            - self.wy1 * xi * xi / 2.0
            - dwy * xi * xi * xi / 6.0;

        InternalForces::new(fx, fy, mz)
    }

    /// Displacements at offset `xi` from the segment start
    ///
    /// The axial field integrates EA u' = -N; the transverse field
    /// integrates EI v'' = -Mz twice from the start state. Axial-only
    /// segments (zero inertia) interpolate linearly between the stored
    /// end states instead.
    pub fn displacement_at(&self, xi: f64) -> Displacement {
        let h = self.length();

        if self.inertia <= 0.0 {
            let t = if h > 0.0 { xi / h } else { 0.0 };
            return Displacement::new(
                self.displacement_1.ux + (self.displacement_2.ux - self.displacement_1.ux) * t,
                self.displacement_1.uy + (self.displacement_2.uy - self.displacement_1.uy) * t,
                self.displacement_1.rz + (self.displacement_2.rz - self.displacement_1.rz) * t,
            );
        }

        let dwx = if h > 0.0 { (self.wx2 - self.wx1) / h } else { 0.0 };
        let dwy = if h > 0.0 { (self.wy2 - self.wy1) / h } else { 0.0 };

        let ea = self.elastic_modulus * self.area;
        let ei = self.elastic_modulus * self.inertia;

        let xi2 = xi * xi;
        let xi3 = xi2 * xi;
        let xi4 = xi3 * xi;
        let xi5 = xi4 * xi;

        let f1 = &self.forces_1;
        let d1 = &self.displacement_1;

        let ux = d1.ux - (f1.fx * xi + self.wx1 * xi2 / 2.0 + dwx * xi3 / 6.0) / ea;

        let rz = d1.rz
            - (f1.mz * xi - f1.fy * xi2 / 2.0 - self.wy1 * xi3 / 6.0 - dwy * xi4 / 24.0) / ei;

        let uy = d1.uy + d1.rz * xi
            - (f1.mz * xi2 / 2.0
                - f1.fy * xi3 / 6.0
                - self.wy1 * xi4 / 24.0
                - dwy * xi5 / 120.0)
                / ei;

        Displacement::new(ux, uy, rz)
    }
}

/// Summary of analysis results for one load case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free (solved) DOFs
    pub free_dofs: usize,
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with the maximum translation
    pub max_displacement_node: String,
    /// Maximum reaction force magnitude
    pub max_reaction: f64,
    /// Node with the maximum reaction
    pub max_reaction_node: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_forces_without_span_load() {
        let mut segment = MeshSegment::new(0.0, 5.0, 2e11, 0.01, 1e-4);
        segment.forces_1 = InternalForces::new(0.0, 10.0, 50.0);

        let mid = segment.internal_force_at(2.5);
        assert_relative_eq!(mid.fy, 10.0, epsilon = 1e-12);
        assert_relative_eq!(mid.mz, 25.0, epsilon = 1e-12);

        let end = segment.internal_force_at(5.0);
        assert_relative_eq!(end.mz, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_uniform_load_closes_shear() {
        // Simply supported span: start shear wL/2, uniform w
        let w = -5.0;
        let l = 6.0;
        let mut segment = MeshSegment::new(0.0, l, 2e11, 0.01, 1e-4);
        segment.forces_1 = InternalForces::new(0.0, -w * l / 2.0, 0.0);
        segment.wy1 = w;
        segment.wy2 = w;

        let mid = segment.internal_force_at(l / 2.0);
        assert_relative_eq!(mid.fy, 0.0, epsilon = 1e-9);
        assert_relative_eq!(mid.mz, w * l * l / 8.0, epsilon = 1e-9);

        let end = segment.internal_force_at(l);
        assert_relative_eq!(end.fy, w * l / 2.0, epsilon = 1e-9);
        assert_relative_eq!(end.mz, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cantilever_tip_deflection_closed_form() {
        // Root state of a tip-loaded cantilever: V = P, M = P*L
        let p = 10.0e3;
        let l = 5.0;
        let e = 2.0e11;
        let i = 1.0e-4;

        let mut segment = MeshSegment::new(0.0, l, e, 0.01, i);
        segment.forces_1 = InternalForces::new(0.0, p, p * l);

        let tip = segment.displacement_at(l);
        let expected = -p * l.powi(3) / (3.0 * e * i);
        assert_relative_eq!(tip.uy, expected, epsilon = 1e-12);
        assert_relative_eq!(tip.rz, -p * l * l / (2.0 * e * i), epsilon = 1e-12);
    }

    #[test]
    fn test_axial_only_segment_interpolates() {
        let mut segment = MeshSegment::new(0.0, 4.0, 0.0, 0.0, 0.0);
        segment.displacement_1 = Displacement::new(0.0, 0.0, 0.0);
        segment.displacement_2 = Displacement::new(0.02, -0.01, 0.0);

        let mid = segment.displacement_at(2.0);
        assert_relative_eq!(mid.ux, 0.01, epsilon = 1e-12);
        assert_relative_eq!(mid.uy, -0.005, epsilon = 1e-12);
    }
}
