//! Node - a point in the plane carrying three degrees of freedom

use serde::{Deserialize, Serialize};

use crate::loads::{NodalLoad, SupportDisplacement};
use crate::math::{self, Mat3};
use super::support::Support;

/// A node in the planar model with (Ux, Uy, Rz) degrees of freedom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Orientation of the node-local frame (radians); local-direction
    /// nodal loads are expressed in this frame
    pub rotation: f64,
    /// Restraint conditions, if any
    pub support: Option<Support>,
    /// Elastic support: a 3x3 global spring stiffness matrix
    pub spring: Option<[[f64; 3]; 3]>,
    /// Loads applied directly to this node
    pub loads: Vec<NodalLoad>,
    /// Prescribed support displacements per load case
    pub settlements: Vec<SupportDisplacement>,

    /// DOF numbers (Ux, Uy, Rz) assigned before solving
    #[serde(skip)]
    pub(crate) dofs: Option<[usize; 3]>,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            support: None,
            spring: None,
            loads: Vec::new(),
            settlements: Vec::new(),
            dofs: None,
        }
    }

    /// Set the node-local frame orientation
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotation from global into the node-local frame
    pub fn transformation(&self) -> Mat3 {
        math::node_rotation_matrix(self.rotation)
    }

    /// Restraint flags (Ux, Uy, Rz)
    pub fn restraints(&self) -> [bool; 3] {
        self.support.map(|s| s.as_array()).unwrap_or([false; 3])
    }

    /// Count of free DOFs at this node
    pub fn free_count(&self) -> usize {
        self.restraints().iter().filter(|&&r| !r).count()
    }

    /// Spring stiffness as a matrix, if an elastic support is present
    pub fn spring_matrix(&self) -> Option<Mat3> {
        self.spring.map(|k| {
            Mat3::from_fn(|row, col| k[row][col])
        })
    }

    /// DOF numbers assigned by the numbering pass
    pub fn dof_numbers(&self) -> Option<[usize; 3]> {
        self.dofs
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
