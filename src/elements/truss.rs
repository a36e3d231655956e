//! Truss member - planar axial-only element

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A planar truss member carrying axial force only
///
/// The stiffness has no bending terms; nodes connected exclusively to
/// truss members need their rotations restrained for the model to be
/// solvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrussMember {
    /// Name of the start node
    pub i_node: String,
    /// Name of the end node
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,

    #[serde(skip)]
    pub(crate) geometry: Option<super::MemberGeometry>,
    #[serde(skip)]
    pub(crate) props: Option<super::MemberProps>,
    #[serde(skip)]
    pub(crate) end_forces: HashMap<String, [f64; 6]>,
}

impl TrussMember {
    /// Create a new truss member between two nodes
    pub fn new(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            geometry: None,
            props: None,
            end_forces: HashMap::new(),
        }
    }
}
