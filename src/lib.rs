//! frame2d - planar frame and truss finite element analysis
//!
//! This library implements the linear assemble-solve-recover pipeline for
//! two-dimensional frame/truss structures:
//! - Frame, truss and spring elements with member end releases
//! - Nodal, point, uniform and trapezoidal loads plus support settlements
//! - Sparse symmetric assembly with a Cholesky factorization and a QR
//!   fallback for diagnosing under-restrained models
//! - Distributed internal force and displacement diagrams along members
//! - Load cases combined by linear superposition
//!
//! ## Example
//! ```rust
//! use frame2d::prelude::*;
//!
//! let mut model = Structure::new();
//!
//! model.add_material("Steel", Material::steel()).unwrap();
//! model.add_section("IPE200", Section::new(2.85e-3, 1.94e-5)).unwrap();
//!
//! model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
//! model.add_node("N2", Node::new(6.0, 0.0)).unwrap();
//!
//! model
//!     .add_element("Beam", FrameMember::new("N1", "N2", "Steel", "IPE200"))
//!     .unwrap();
//!
//! model.add_support("N1", Support::pinned()).unwrap();
//! model.add_support("N2", Support::roller_y()).unwrap();
//!
//! model
//!     .add_member_dist_load("Beam", DistributedLoad::uniform_downward(5.0e3, "Dead"))
//!     .unwrap();
//!
//! model.solve().unwrap();
//!
//! let results = PostProcessor::new(&model).unwrap();
//! let midspan = results
//!     .element_internal_forces_at("Beam", "Dead", 3.0)
//!     .unwrap()
//!     .unwrap();
//! assert!((midspan.mz.abs() - 22.5e3).abs() < 1.0);
//! ```

pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod numbering;
pub mod postprocess;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::elements::{
        Element, FrameMember, Material, MemberReleases, Node, Section, SpringMember, Support,
        TrussMember,
    };
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{
        DistributedLoad, LoadCase, LoadCaseKind, LoadCombination, LoadDirection, NodalLoad,
        PointLoad, SupportDisplacement,
    };
    pub use crate::model::{AnalysisOptions, AnalysisStatus, Structure};
    pub use crate::postprocess::PostProcessor;
    pub use crate::results::{
        AnalysisSummary, Displacement, InternalForces, MemberEndForces, MeshSegment, Reaction,
    };
}

pub use error::{FrameError, FrameResult};
pub use model::Structure;
pub use postprocess::PostProcessor;
