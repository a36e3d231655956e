//! Spring member - axial spring between two nodes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An axial spring connecting two nodes with a direct stiffness value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringMember {
    /// Name of the start node
    pub i_node: String,
    /// Name of the end node
    pub j_node: String,
    /// Axial stiffness (N/m)
    pub stiffness: f64,

    #[serde(skip)]
    pub(crate) geometry: Option<super::MemberGeometry>,
    #[serde(skip)]
    pub(crate) end_forces: HashMap<String, [f64; 6]>,
}

impl SpringMember {
    /// Create a new spring member between two nodes
    pub fn new(i_node: &str, j_node: &str, stiffness: f64) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            stiffness,
            geometry: None,
            end_forces: HashMap::new(),
        }
    }
}
