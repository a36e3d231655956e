//! Structural elements module

mod element;
mod material;
mod member;
mod node;
mod section;
mod spring;
mod support;
mod truss;

pub use element::{Element, MemberGeometry, MemberProps};
pub use material::Material;
pub use member::{FrameMember, MemberReleases};
pub use node::Node;
pub use section::Section;
pub use spring::SpringMember;
pub use support::Support;
pub use truss::TrussMember;
