//! Section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties for planar frame elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Moment of inertia about the bending axis in m⁴
    pub i: f64,
    /// Depth of section (optional) in m
    pub depth: Option<f64>,
    /// Width of section (optional) in m
    pub width: Option<f64>,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, i: f64) -> Self {
        Self {
            a,
            i,
            depth: None,
            width: None,
        }
    }

    /// Create a rectangular section
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
            depth: Some(depth),
            width: Some(width),
        }
    }

    /// Create a circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: std::f64::consts::PI * r.powi(2),
            i: std::f64::consts::PI * r.powi(4) / 4.0,
            depth: Some(diameter),
            width: Some(diameter),
        }
    }
}
