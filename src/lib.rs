//! Particula application layer: run loop, control surface and shutdown handling
//! around the `particula_core` kernel.

pub mod app;
