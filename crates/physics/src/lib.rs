//! Static world geometry and sight queries using Rapier3D for OpenScrim.

pub mod collision;
pub mod raycast;
pub mod world;

pub use collision::*;
pub use raycast::*;
pub use world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, Group, RigidBodyHandle};
