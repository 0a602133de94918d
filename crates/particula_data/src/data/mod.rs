//! Core data structures for the Particula simulation.

pub mod interaction;
pub mod particle;
pub mod world;
