//! Load cases

use serde::{Deserialize, Serialize};

/// Category of a load case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadCaseKind {
    Dead,
    Live,
    Wind,
    Snow,
    Seismic,
    Other,
}

/// A load case groups related loads under a common name
///
/// Load cases are compared by name; the kind is descriptive metadata used
/// when building code combinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    /// Name of the load case
    pub name: String,
    /// Category of the load case
    pub kind: LoadCaseKind,
}

impl LoadCase {
    /// Create a new load case of kind `Other`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: LoadCaseKind::Other,
        }
    }

    /// Create a load case with an explicit kind
    pub fn with_kind(name: &str, kind: LoadCaseKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    pub fn dead() -> Self {
        Self::with_kind("Dead", LoadCaseKind::Dead)
    }

    pub fn live() -> Self {
        Self::with_kind("Live", LoadCaseKind::Live)
    }

    pub fn wind() -> Self {
        Self::with_kind("Wind", LoadCaseKind::Wind)
    }

    pub fn snow() -> Self {
        Self::with_kind("Snow", LoadCaseKind::Snow)
    }

    pub fn seismic() -> Self {
        Self::with_kind("Seismic", LoadCaseKind::Seismic)
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::new("Case 1")
    }
}
