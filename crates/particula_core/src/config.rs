//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures that map to `config.toml`. Every section has a
//! `Default`, so a file only needs to name the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! target_tps = 1500
//!
//! [world]
//! num_types = 5
//! num_particles = 500
//! seed = 42
//!
//! [interaction]
//! force_range = 2.0
//! amplifier = 1.0
//! collision_damping = 0.5
//! damping = 0.98
//! interaction_radius = 150.0
//! collision_mode = "per_ordered_pair"
//!
//! [interaction.bounds]
//! width = 1200.0
//! height = 800.0
//! ```

use particula_data::Bounds;
use serde::{Deserialize, Serialize};

/// Scenario shape: how many particles of how many types, and the RNG seed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub num_types: usize,
    pub num_particles: usize,
    /// `None` draws the seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            num_types: 5,
            num_particles: 500,
            seed: None,
        }
    }
}

/// How often the separating impulse is applied to a colliding pair per tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Once for `(i, j)` and again for `(j, i)`: the pair is pushed apart twice.
    #[default]
    PerOrderedPair,
    /// Exactly once per unordered pair. Half the effective strength of
    /// `PerOrderedPair` for the same `collision_damping`.
    PerUnorderedPair,
}

impl CollisionMode {
    /// Multiplier on the per-pair impulse each particle receives.
    #[inline]
    #[must_use]
    pub fn impulse_multiplier(self) -> f64 {
        match self {
            Self::PerOrderedPair => 2.0,
            Self::PerUnorderedPair => 1.0,
        }
    }
}

/// Tunables read by the solver and integrator each tick.
///
/// `amplifier` and `collision_damping` may change between ticks. The rest stay
/// fixed for a scenario's lifetime; `force_range` only matters at generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Table coefficients are drawn from `[-force_range, force_range]`.
    pub force_range: f64,
    /// Global multiplier on long-range force magnitudes.
    pub amplifier: f64,
    /// Scale of the collision-separation impulse.
    pub collision_damping: f64,
    /// Per-tick velocity decay factor in `[0, 1)`.
    pub damping: f64,
    /// Pairs farther apart than this contribute nothing.
    pub interaction_radius: f64,
    pub particle_radius: f64,
    pub safety_margin: f64,
    pub collision_mode: CollisionMode,
    pub bounds: Bounds,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            force_range: 2.0,
            amplifier: 1.0,
            collision_damping: 0.5,
            damping: 0.98,
            interaction_radius: 150.0,
            particle_radius: 4.0,
            safety_margin: 2.0,
            collision_mode: CollisionMode::PerOrderedPair,
            bounds: Bounds::default(),
        }
    }
}

impl InteractionConfig {
    /// Minimum centre-to-centre distance before the separating impulse kicks in.
    #[inline]
    #[must_use]
    pub fn collision_threshold(&self) -> f64 {
        2.0 * (self.particle_radius + self.safety_margin)
    }
}

/// Upper limits of the live sliders. All lower limits are zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ControlConfig {
    pub force_range_max: f64,
    pub amplifier_max: f64,
    pub collision_damping_max: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            force_range_max: 10.0,
            amplifier_max: 10.0,
            collision_damping_max: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub interaction: InteractionConfig,
    pub controls: ControlConfig,
    /// Tick cadence used when the run loop paces itself.
    pub target_tps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            interaction: InteractionConfig::default(),
            controls: ControlConfig::default(),
            target_tps: 1500,
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let i = &self.interaction;
        let c = &self.controls;

        // World validation
        anyhow::ensure!(self.world.num_types > 0, "At least one particle type is required");
        anyhow::ensure!(
            self.world.num_types <= 256,
            "Too many particle types (max 256)"
        );
        anyhow::ensure!(
            self.world.num_particles <= 100_000,
            "Particle count too large (max 100000)"
        );
        anyhow::ensure!(
            i.bounds.width.is_finite() && i.bounds.width > 0.0,
            "World width must be positive"
        );
        anyhow::ensure!(
            i.bounds.height.is_finite() && i.bounds.height > 0.0,
            "World height must be positive"
        );
        anyhow::ensure!(
            i.bounds.width > 2.0 * i.particle_radius && i.bounds.height > 2.0 * i.particle_radius,
            "World must be larger than one particle diameter"
        );

        // Interaction validation
        anyhow::ensure!(
            (0.0..1.0).contains(&i.damping),
            "Damping must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            i.interaction_radius > 0.0,
            "Interaction radius must be positive"
        );
        anyhow::ensure!(
            i.particle_radius >= 0.0,
            "Particle radius must be non-negative"
        );
        anyhow::ensure!(i.safety_margin >= 0.0, "Safety margin must be non-negative");
        anyhow::ensure!(
            (0.0..=c.force_range_max).contains(&i.force_range),
            "Force range must be in [0.0, {}]",
            c.force_range_max
        );
        anyhow::ensure!(
            (0.0..=c.amplifier_max).contains(&i.amplifier),
            "Amplifier must be in [0.0, {}]",
            c.amplifier_max
        );
        anyhow::ensure!(
            (0.0..=c.collision_damping_max).contains(&i.collision_damping),
            "Collision damping must be in [0.0, {}]",
            c.collision_damping_max
        );

        // Target TPS validation
        anyhow::ensure!(self.target_tps > 0, "Target TPS must be positive");
        anyhow::ensure!(self.target_tps <= 10_000, "Target TPS too high (max 10000)");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of everything that shapes the physics, for correlating runs in logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.interaction).as_bytes());
        hex::encode(hasher.finalize())
    }
}
