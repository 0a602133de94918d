//! Per-tick simulation systems: force solve, then integration.

pub mod integrator;
pub mod solver;

pub use integrator::integrate;
pub use solver::{solve_sequential, toroidal_delta, ForceSolver, SolverParams};
