use serde::{Deserialize, Serialize};

/// A change requested by the control surface, applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
    SetAmplifier(f64),
    SetCollisionDamping(f64),
    /// Takes effect at the next reset.
    SetForceRange(f64),
    /// Drag override: moves one particle, leaves its velocity alone.
    SetPosition { index: usize, x: f64, y: f64 },
    /// Regenerate the whole scenario.
    Reset,
}
