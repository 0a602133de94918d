//! Owner of the live scenario and the per-tick pipeline.

use crate::command::ControlCommand;
use crate::config::{AppConfig, InteractionConfig};
use crate::error::{Result, SimError};
use crate::scenario::{self, Scenario, ScenarioParams};
use crate::snapshot::WorldSnapshot;
use crate::systems::{integrate, toroidal_delta, ForceSolver, SolverParams};
use particula_data::{InteractionTable, ParticleSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Particle state, interaction table and live configuration.
///
/// Every mutation goes through `&mut self`, so a tick, a reset and an external
/// override can never interleave.
pub struct Simulation {
    config: AppConfig,
    particles: ParticleSet,
    table: Arc<InteractionTable>,
    rng: ChaCha8Rng,
    solver: ForceSolver,
    tick: u64,
    latest: Arc<WorldSnapshot>,
}

impl Simulation {
    /// Validates `config` and generates the first scenario.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        tracing::debug!(fingerprint = %config.fingerprint(), "Creating simulation");
        let scenario = scenario::generate(&ScenarioParams::from_config(&config), &mut rng)?;
        Self::assemble(config, scenario, rng)
    }

    /// Starts from a prepared scenario instead of a generated one.
    ///
    /// Fails if any particle's type is not a row of the table.
    pub fn with_scenario(config: AppConfig, scenario: Scenario) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.world.seed.unwrap_or(0));
        Self::assemble(config, scenario, rng)
    }

    fn assemble(config: AppConfig, scenario: Scenario, rng: ChaCha8Rng) -> Result<Self> {
        let Scenario { particles, table } = scenario;
        let num_types = table.num_types();
        if let Some(bad) = particles.kind.iter().find(|&&k| k as usize >= num_types) {
            return Err(SimError::invalid(format!(
                "particle type {bad} has no row in a {num_types}-type table"
            )));
        }
        let table = Arc::new(table);
        let latest = Arc::new(WorldSnapshot {
            tick: 0,
            bounds: config.interaction.bounds,
            particles: particles.to_vec(),
            table: Arc::clone(&table),
        });
        Ok(Self {
            config,
            particles,
            table,
            rng,
            solver: ForceSolver::new(),
            tick: 0,
            latest,
        })
    }

    /// One fixed-size step: solve all velocities, then integrate.
    pub fn tick(&mut self) -> Arc<WorldSnapshot> {
        let interaction = &self.config.interaction;
        self.solver.solve(
            &mut self.particles,
            &self.table,
            &SolverParams::from_config(interaction),
        );
        integrate(&mut self.particles, interaction.damping, interaction.bounds);
        self.tick += 1;
        self.publish()
    }

    /// Replaces particles and table with a freshly generated scenario.
    ///
    /// On error the current scenario is kept.
    pub fn reset(&mut self) -> Result<Arc<WorldSnapshot>> {
        tracing::debug!(fingerprint = %self.config.fingerprint(), "Resetting simulation");
        let params = ScenarioParams::from_config(&self.config);
        let Scenario { particles, table } = scenario::generate(&params, &mut self.rng)?;
        self.particles = particles;
        self.table = Arc::new(table);
        self.tick = 0;
        tracing::info!(particles = self.particles.len(), "Scenario reset");
        Ok(self.publish())
    }

    /// Moves particle `index`, wrapping the point into the world. Velocity is untouched.
    pub fn set_position(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let len = self.particles.len();
        if index >= len {
            return Err(SimError::ParticleIndex { index, len });
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(SimError::NonFinite("position"));
        }
        let (x, y) = self.config.interaction.bounds.wrap(x, y);
        self.particles.x[index] = x;
        self.particles.y[index] = y;
        tracing::trace!(index, x, y, "Particle dragged");
        Ok(())
    }

    /// Index of the first particle whose centre lies within one radius of `(x, y)`.
    ///
    /// Distance is measured across the seams, like every other pair distance.
    #[must_use]
    pub fn particle_at(&self, x: f64, y: f64) -> Option<usize> {
        let radius = self.config.interaction.particle_radius;
        let bounds = self.config.interaction.bounds;
        (0..self.particles.len()).find(|&i| {
            let dx = toroidal_delta(x, self.particles.x[i], bounds.width);
            let dy = toroidal_delta(y, self.particles.y[i], bounds.height);
            dx.hypot(dy) <= radius
        })
    }

    pub fn set_amplifier(&mut self, value: f64) {
        self.config.interaction.amplifier = value;
    }

    pub fn set_collision_damping(&mut self, value: f64) {
        self.config.interaction.collision_damping = value;
    }

    /// Only consulted by the next reset.
    pub fn set_force_range(&mut self, value: f64) {
        self.config.interaction.force_range = value;
    }

    /// Applies one queued command. Must be called between ticks.
    pub fn apply(&mut self, command: ControlCommand) -> Result<()> {
        tracing::debug!(?command, "Applying control command");
        match command {
            ControlCommand::SetAmplifier(v) => self.set_amplifier(v),
            ControlCommand::SetCollisionDamping(v) => self.set_collision_damping(v),
            ControlCommand::SetForceRange(v) => self.set_force_range(v),
            ControlCommand::SetPosition { index, x, y } => {
                self.set_position(index, x, y)?;
                self.publish();
            }
            ControlCommand::Reset => {
                self.reset()?;
            }
        }
        Ok(())
    }

    fn publish(&mut self) -> Arc<WorldSnapshot> {
        self.latest = Arc::new(WorldSnapshot {
            tick: self.tick,
            bounds: self.config.interaction.bounds,
            particles: self.particles.to_vec(),
            table: Arc::clone(&self.table),
        });
        Arc::clone(&self.latest)
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        Arc::clone(&self.latest)
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    #[must_use]
    pub fn table(&self) -> &InteractionTable {
        &self.table
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionConfig {
        &self.config.interaction
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
