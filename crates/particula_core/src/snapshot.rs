use particula_data::{Bounds, InteractionTable, Particle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Immutable view of one completed tick, handed to renderers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub bounds: Bounds,
    pub particles: Vec<Particle>,
    pub table: Arc<InteractionTable>,
}

impl WorldSnapshot {
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| 0.5 * p.speed_sq()).sum()
    }

    /// Particle count per type index.
    #[must_use]
    pub fn type_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.table.num_types()];
        for p in &self.particles {
            counts[p.kind as usize] += 1;
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
