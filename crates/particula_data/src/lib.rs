//! Plain data types shared by the Particula kernel and its front ends.

pub mod data;

pub use data::interaction::InteractionTable;
pub use data::particle::{Particle, ParticleSet, Rgb};
pub use data::world::Bounds;
