//! Overhead nameplates for OpenScrim: name label + health bar floating over
//! named shapes.
//!
//! The heart of the crate is [`NameplateHud::evaluate`], a per-frame pass
//! that takes a camera snapshot and the frame's candidate shapes and decides
//! which of them get a plate, where on screen, and how opaque. Candidates
//! run through five filter stages in cheapest-first order: distance cull,
//! view-cone cull, occlusion (a sight ray against static world geometry),
//! screen projection, and distance fade. The surviving plates are plain
//! draw commands; [`NameplateHud::render`] emits them to any
//! [`DrawSurface`].
//!
//! The crate knows nothing about the ECS, the physics engine, or the
//! renderer: callers supply candidates through the [`LabelSource`] trait
//! and the world through the collaborator traits in [`query`].

pub mod config;
pub mod draw;
pub mod frame;
pub mod pipeline;
pub mod query;
pub mod target;

pub use config::*;
pub use draw::*;
pub use frame::*;
pub use pipeline::*;
pub use query::*;
pub use target::*;
