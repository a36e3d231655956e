//! Degree-of-freedom numbering
//!
//! Assigns every node three equation numbers with all free DOFs numbered
//! before all restrained ones, so the leading block of the global system
//! is exactly the free-free partition.

use serde::{Deserialize, Serialize};

/// Equation numbers for a model, indexed by node position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DofMap {
    /// DOF numbers (Ux, Uy, Rz) per node, in node registration order
    pub node_dofs: Vec<[usize; 3]>,
    /// Count of free DOFs; free numbers are [0, n_free), restrained
    /// numbers are [n_free, 3 * node count)
    pub n_free: usize,
}

impl DofMap {
    /// Total number of DOFs in the model
    pub fn total(&self) -> usize {
        self.node_dofs.len() * 3
    }

    /// Whether the given equation number belongs to a free DOF
    pub fn is_free(&self, dof: usize) -> bool {
        dof < self.n_free
    }
}

/// Number all DOFs from per-node restraint flags
///
/// Nodes are visited in order of ascending restraint count (stable), so
/// the most-restrained nodes are numbered last. Each node's DOFs are
/// assigned in (Ux, Uy, Rz) order, drawing from two FIFO ranges: free
/// numbers starting at 0, restrained numbers starting at `n_free`.
pub fn number_dofs(restraints: &[[bool; 3]]) -> DofMap {
    let node_count = restraints.len();
    let n_free: usize = restraints
        .iter()
        .map(|r| r.iter().filter(|&&b| !b).count())
        .sum();

    let mut order: Vec<usize> = (0..node_count).collect();
    order.sort_by_key(|&node| restraints[node].iter().filter(|&&b| b).count());

    let mut next_free = 0;
    let mut next_restrained = n_free;
    let mut node_dofs = vec![[0usize; 3]; node_count];

    for &node in &order {
        for dof in 0..3 {
            if restraints[node][dof] {
                node_dofs[node][dof] = next_restrained;
                next_restrained += 1;
            } else {
                node_dofs[node][dof] = next_free;
                next_free += 1;
            }
        }
    }

    debug_assert_eq!(next_free, n_free);
    debug_assert_eq!(next_restrained, node_count * 3);

    DofMap { node_dofs, n_free }
}
