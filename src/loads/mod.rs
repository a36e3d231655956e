//! Load types, load cases and load combinations

mod distributed;
mod load_case;
mod load_combo;
mod node_load;
mod point_load;
mod support_displacement;

pub use distributed::DistributedLoad;
pub use load_case::{LoadCase, LoadCaseKind};
pub use load_combo::LoadCombination;
pub use node_load::NodalLoad;
pub use point_load::{LoadDirection, PointLoad};
pub use support_displacement::SupportDisplacement;
