//! Frame member - planar beam-column element

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::loads::{DistributedLoad, PointLoad};

/// Moment releases at the ends of a frame member
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberReleases {
    /// Moment release (hinge) at the start node
    pub start: bool,
    /// Moment release (hinge) at the end node
    pub end: bool,
}

impl MemberReleases {
    /// No end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Hinge at the start node
    pub fn pin_start() -> Self {
        Self {
            start: true,
            end: false,
        }
    }

    /// Hinge at the end node
    pub fn pin_end() -> Self {
        Self {
            start: false,
            end: true,
        }
    }

    /// Hinges at both ends
    pub fn pin_both() -> Self {
        Self {
            start: true,
            end: true,
        }
    }

    /// Whether any end is released
    pub fn any(&self) -> bool {
        self.start || self.end
    }

    /// Releases as a 6-DOF boolean array (rotation slots only)
    pub fn as_array(&self) -> [bool; 6] {
        [false, false, self.start, false, false, self.end]
    }
}

/// A planar frame member (beam or column)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMember {
    /// Name of the start node
    pub i_node: String,
    /// Name of the end node
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,
    /// End releases
    pub releases: MemberReleases,
    /// Concentrated loads along the member
    pub point_loads: Vec<PointLoad>,
    /// Distributed loads along the member
    pub dist_loads: Vec<DistributedLoad>,

    /// Cached geometry, computed at registration
    #[serde(skip)]
    pub(crate) geometry: Option<super::MemberGeometry>,
    /// Cached material/section properties
    #[serde(skip)]
    pub(crate) props: Option<super::MemberProps>,
    /// Global fixed-end forces per load case, populated before assembly
    #[serde(skip)]
    pub(crate) end_forces: HashMap<String, [f64; 6]>,
}

impl FrameMember {
    /// Create a new frame member between two nodes
    pub fn new(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            releases: MemberReleases::none(),
            point_loads: Vec::new(),
            dist_loads: Vec::new(),
            geometry: None,
            props: None,
            end_forces: HashMap::new(),
        }
    }

    /// Set member end releases
    pub fn with_releases(mut self, releases: MemberReleases) -> Self {
        self.releases = releases;
        self
    }
}
