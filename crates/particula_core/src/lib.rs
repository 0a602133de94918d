//! # Particula Core
//!
//! The numeric kernel of Particula: typed point particles on a periodic 2D
//! plane, pushed around by per-type-pair attraction and repulsion.
//!
//! This crate contains:
//! - Scenario generation (particle set and interaction table)
//! - The pairwise force and collision solver
//! - The damping/advance/wrap integrator
//! - The `Simulation` owner that sequences ticks, resets and overrides
//! - Metrics collection and structured logging
//!
//! ## Example
//!
//! ```
//! use particula_core::config::AppConfig;
//! use particula_core::Simulation;
//!
//! let mut config = AppConfig::default();
//! config.world.num_particles = 50;
//! config.world.seed = Some(42);
//!
//! let mut sim = Simulation::new(config).expect("valid config");
//! let snapshot = sim.tick();
//! assert_eq!(snapshot.particles.len(), 50);
//! ```

/// Control-surface commands applied between ticks
pub mod command;
/// Configuration management for simulation parameters
pub mod config;
/// Kernel error type
pub mod error;
/// Performance metrics collection and logging
pub mod metrics;
/// Initial particle set and interaction table generation
pub mod scenario;
/// Scenario owner and tick sequencing
pub mod simulation;
/// Immutable per-tick views for renderers
pub mod snapshot;
/// Force solver and integrator
pub mod systems;

pub use command::ControlCommand;
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use simulation::Simulation;
pub use snapshot::WorldSnapshot;
