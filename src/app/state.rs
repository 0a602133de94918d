use crate::app::control::ControlSurface;
use crate::app::shutdown::ShutdownManager;
use anyhow::{Context, Result};
use particula_core::config::AppConfig;
use particula_core::{ControlCommand, Metrics, Simulation, WorldSnapshot};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

pub struct App {
    pub running: bool,
    pub sim: Simulation,
    pub controls: ControlSurface,
    commands: Receiver<ControlCommand>,
    pub metrics: Metrics,
    pub shutdown: ShutdownManager,
    pub config_path: Option<PathBuf>,
    config_last_modified: Option<SystemTime>,
}

impl App {
    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load_config(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        AppConfig::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Builds the simulation and control surface. `config_path` enables hot reload.
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Result<Self> {
        let sim = Simulation::new(config)?;
        let (tx, commands) = mpsc::channel();
        let controls = ControlSurface::new(&sim.config().controls, sim.interaction(), tx);
        let config_last_modified = config_path
            .as_deref()
            .and_then(|p| std::fs::metadata(p).ok())
            .and_then(|m| m.modified().ok());
        Ok(Self {
            running: true,
            sim,
            controls,
            commands,
            metrics: Metrics::new(),
            shutdown: ShutdownManager::new(),
            config_path,
            config_last_modified,
        })
    }

    /// Applies every queued control command. Returns how many were applied.
    ///
    /// A rejected command is logged and skipped; it never aborts the run.
    pub fn drain_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            match self.sim.apply(command) {
                Ok(()) => {
                    applied += 1;
                    if command == ControlCommand::Reset {
                        self.metrics.increment_counter("resets");
                    }
                }
                Err(e) => tracing::warn!(?command, error = %e, "Control command rejected"),
            }
        }
        applied
    }

    /// Pending commands, then one tick.
    pub fn step(&mut self) -> Arc<WorldSnapshot> {
        self.drain_commands();
        let started = Instant::now();
        let snapshot = self.sim.tick();
        self.metrics.record_tick(
            started.elapsed(),
            snapshot.particles.len(),
            snapshot.kinetic_energy(),
        );
        snapshot
    }

    /// Pointer pressed on the world: picks a particle to drag, if any.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<usize> {
        let hit = self.sim.particle_at(x, y)?;
        self.controls.begin_drag(hit);
        Some(hit)
    }

    /// Re-reads the config file if it changed and pushes the live-tunable values.
    ///
    /// Values fixed for a scenario's lifetime are ignored until restart.
    pub fn check_config_reload(&mut self) -> Result<bool> {
        let Some(path) = self.config_path.clone() else {
            return Ok(false);
        };
        let Ok(metadata) = std::fs::metadata(&path) else {
            return Ok(false);
        };
        let modified = metadata.modified()?;
        if Some(modified) == self.config_last_modified {
            return Ok(false);
        }
        self.config_last_modified = Some(modified);
        let reloaded = Self::load_config(&path)?;
        self.controls.apply_reloaded(&reloaded.interaction);
        tracing::info!(path = %path.display(), "Configuration reloaded");
        Ok(true)
    }
}
