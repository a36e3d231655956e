//! Element dispatch - the contract every member kind satisfies
//!
//! The solver pipeline treats an element as an opaque contributor of a
//! local stiffness matrix, a transformation, and per-load-case equivalent
//! end forces. The closed set of member kinds is dispatched through this
//! enum.

use serde::{Deserialize, Serialize};

use super::{FrameMember, MemberReleases, SpringMember, TrussMember};
use crate::loads::{DistributedLoad, PointLoad};
use crate::math::{self, Mat6, ShapeMat, Vec6};

/// Cached geometry of a two-node member, computed at registration
#[derive(Debug, Clone, Copy)]
pub struct MemberGeometry {
    /// Member length
    pub length: f64,
    /// Cosine of the angle with the global X axis
    pub cos: f64,
    /// Sine of the angle with the global X axis
    pub sin: f64,
}

impl MemberGeometry {
    /// Rotate a global (x, y) pair into member-local components
    pub fn to_local(&self, fx: f64, fy: f64) -> (f64, f64) {
        (
            self.cos * fx + self.sin * fy,
            -self.sin * fx + self.cos * fy,
        )
    }

    /// Rotate a member-local (x, y) pair into global components
    pub fn to_global(&self, fx: f64, fy: f64) -> (f64, f64) {
        (
            self.cos * fx - self.sin * fy,
            self.sin * fx + self.cos * fy,
        )
    }
}

/// Resolved material and section properties of a member
#[derive(Debug, Clone, Copy)]
pub struct MemberProps {
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Moment of inertia (zero for axial-only members)
    pub i: f64,
}

/// A structural element of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Frame(FrameMember),
    Truss(TrussMember),
    Spring(SpringMember),
}

impl From<FrameMember> for Element {
    fn from(member: FrameMember) -> Self {
        Element::Frame(member)
    }
}

impl From<TrussMember> for Element {
    fn from(member: TrussMember) -> Self {
        Element::Truss(member)
    }
}

impl From<SpringMember> for Element {
    fn from(member: SpringMember) -> Self {
        Element::Spring(member)
    }
}

impl Element {
    /// Name of the start node
    pub fn i_node(&self) -> &str {
        match self {
            Element::Frame(m) => &m.i_node,
            Element::Truss(m) => &m.i_node,
            Element::Spring(m) => &m.i_node,
        }
    }

    /// Name of the end node
    pub fn j_node(&self) -> &str {
        match self {
            Element::Frame(m) => &m.j_node,
            Element::Truss(m) => &m.j_node,
            Element::Spring(m) => &m.j_node,
        }
    }

    /// Name of the material, for kinds that reference one
    pub fn material(&self) -> Option<&str> {
        match self {
            Element::Frame(m) => Some(&m.material),
            Element::Truss(m) => Some(&m.material),
            Element::Spring(_) => None,
        }
    }

    /// Name of the section, for kinds that reference one
    pub fn section(&self) -> Option<&str> {
        match self {
            Element::Frame(m) => Some(&m.section),
            Element::Truss(m) => Some(&m.section),
            Element::Spring(_) => None,
        }
    }

    /// Member length, available once initialized
    pub fn length(&self) -> Option<f64> {
        self.geometry().map(|g| g.length)
    }

    /// End releases, for frame members
    pub fn releases(&self) -> Option<MemberReleases> {
        match self {
            Element::Frame(m) => Some(m.releases),
            _ => None,
        }
    }

    /// Whether the element carries a moment release at either end
    pub fn has_releases(&self) -> bool {
        self.releases().map(|r| r.any()).unwrap_or(false)
    }

    /// Concentrated loads carried by this element
    pub fn point_loads(&self) -> &[PointLoad] {
        match self {
            Element::Frame(m) => &m.point_loads,
            _ => &[],
        }
    }

    /// Distributed loads carried by this element
    pub fn dist_loads(&self) -> &[DistributedLoad] {
        match self {
            Element::Frame(m) => &m.dist_loads,
            _ => &[],
        }
    }

    pub(crate) fn geometry(&self) -> Option<MemberGeometry> {
        match self {
            Element::Frame(m) => m.geometry,
            Element::Truss(m) => m.geometry,
            Element::Spring(m) => m.geometry,
        }
    }

    pub(crate) fn properties(&self) -> Option<MemberProps> {
        match self {
            Element::Frame(m) => m.props,
            Element::Truss(m) => m.props,
            Element::Spring(_) => None,
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.geometry().is_some()
    }

    pub(crate) fn set_geometry(&mut self, geometry: MemberGeometry) {
        match self {
            Element::Frame(m) => m.geometry = Some(geometry),
            Element::Truss(m) => m.geometry = Some(geometry),
            Element::Spring(m) => m.geometry = Some(geometry),
        }
    }

    pub(crate) fn set_props(&mut self, props: MemberProps) {
        match self {
            Element::Frame(m) => m.props = Some(props),
            Element::Truss(m) => m.props = Some(props),
            Element::Spring(_) => {}
        }
    }

    /// Local stiffness matrix, with end releases condensed out
    pub(crate) fn local_stiffness(&self) -> Mat6 {
        match self {
            Element::Frame(m) => {
                let k = self.unreleased_local_stiffness();
                if m.releases.any() {
                    math::apply_releases(&k, &m.releases.as_array())
                } else {
                    k
                }
            }
            Element::Truss(_) | Element::Spring(_) => self.unreleased_local_stiffness(),
        }
    }

    /// Local stiffness before release condensation
    pub(crate) fn unreleased_local_stiffness(&self) -> Mat6 {
        let geometry = self.geometry().unwrap();
        match self {
            Element::Frame(_) => {
                let props = self.properties().unwrap();
                math::frame_local_stiffness(props.e, props.a, props.i, geometry.length)
            }
            Element::Truss(_) => {
                let props = self.properties().unwrap();
                math::truss_local_stiffness(props.e, props.a, geometry.length)
            }
            Element::Spring(m) => math::spring_local_stiffness(m.stiffness),
        }
    }

    /// Global-to-local transformation matrix
    pub(crate) fn transformation(&self) -> Mat6 {
        let geometry = self.geometry().unwrap();
        math::member_transformation_matrix(geometry.cos, geometry.sin)
    }

    /// Shape function matrix at station `x`, for frame members
    ///
    /// The transverse rows switch to the reduced hinge interpolants when
    /// the member has end releases.
    pub fn shape_function_at(&self, x: f64) -> Option<ShapeMat> {
        match self {
            Element::Frame(m) => {
                let geometry = m.geometry?;
                Some(math::frame_shape_functions(
                    x,
                    geometry.length,
                    m.releases.start,
                    m.releases.end,
                ))
            }
            _ => None,
        }
    }

    /// Stored global fixed-end forces for a load case (zeros when the
    /// element carries no span loads in that case)
    pub(crate) fn global_end_forces(&self, case: &str) -> Vec6 {
        let stored = match self {
            Element::Frame(m) => m.end_forces.get(case),
            Element::Truss(m) => m.end_forces.get(case),
            Element::Spring(m) => m.end_forces.get(case),
        };
        stored
            .map(|f| Vec6::from_row_slice(f))
            .unwrap_or_else(Vec6::zeros)
    }

    pub(crate) fn set_global_end_forces(&mut self, case: &str, forces: Vec6) {
        let map = match self {
            Element::Frame(m) => &mut m.end_forces,
            Element::Truss(m) => &mut m.end_forces,
            Element::Spring(m) => &mut m.end_forces,
        };
        let mut array = [0.0; 6];
        array.copy_from_slice(forces.as_slice());
        map.insert(case.to_string(), array);
    }
}
