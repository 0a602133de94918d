use particula_core::config::AppConfig;
use particula_core::scenario::Scenario;
use particula_core::Simulation;
use particula_data::{Bounds, InteractionTable, Particle, ParticleSet, Rgb};

/// Builds a simulation from hand-placed particles and an explicit table.
pub struct ScenarioBuilder {
    config: AppConfig,
    particles: Vec<Particle>,
    rows: Vec<Vec<f64>>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(0);
        Self {
            config,
            particles: Vec::new(),
            rows: vec![vec![0.0]],
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.config.interaction.bounds = Bounds::new(width, height);
        self
    }

    /// Point particles: no collision threshold.
    pub fn without_collisions(mut self) -> Self {
        self.config.interaction.particle_radius = 0.0;
        self.config.interaction.safety_margin = 0.0;
        self
    }

    pub fn with_table(mut self, rows: &[&[f64]]) -> Self {
        self.rows = rows.iter().map(|r| r.to_vec()).collect();
        self.config.world.num_types = self.rows.len();
        self
    }

    pub fn with_particle(mut self, x: f64, y: f64, kind: u32) -> Self {
        self.particles.push(Particle::at(x, y, kind, Rgb::default()));
        self
    }

    pub fn with_moving_particle(mut self, x: f64, y: f64, vx: f64, vy: f64) -> Self {
        let mut p = Particle::at(x, y, 0, Rgb::default());
        p.vx = vx;
        p.vy = vy;
        self.particles.push(p);
        self
    }

    pub fn scenario(&self) -> Scenario {
        Scenario {
            particles: self.particles.iter().copied().collect::<ParticleSet>(),
            table: InteractionTable::from_rows(&self.rows).expect("square table"),
        }
    }

    pub fn build(self) -> Simulation {
        let scenario = self.scenario();
        Simulation::with_scenario(self.config, scenario).expect("valid scenario")
    }
}
