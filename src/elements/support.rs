//! Support conditions

use serde::{Deserialize, Serialize};

/// Restraint conditions at a node
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub ux: bool,
    /// Restrained in Y translation
    pub uy: bool,
    /// Restrained in Z rotation
    pub rz: bool,
}

impl Support {
    /// Create a support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self {
            ux: true,
            uy: true,
            rz: true,
        }
    }

    /// Pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self {
            ux: true,
            uy: true,
            rz: false,
        }
    }

    /// Roller restraining Y translation only
    pub fn roller_y() -> Self {
        Self {
            ux: false,
            uy: true,
            rz: false,
        }
    }

    /// Roller restraining X translation only
    pub fn roller_x() -> Self {
        Self {
            ux: true,
            uy: false,
            rz: false,
        }
    }

    /// Create a support with specific restraints
    pub fn with_restraints(ux: bool, uy: bool, rz: bool) -> Self {
        Self { ux, uy, rz }
    }

    /// Get the restraints as an array (Ux, Uy, Rz)
    pub fn as_array(&self) -> [bool; 3] {
        [self.ux, self.uy, self.rz]
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.ux || self.uy || self.rz
    }

    /// Count of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.as_array().iter().filter(|&&r| r).count()
    }
}
