pub mod control;
pub mod shutdown;
pub mod state;

pub use control::{ControlSurface, Slider, SliderKind};
pub use shutdown::ShutdownManager;
pub use state::App;

use anyhow::Result;
use particula_core::WorldSnapshot;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

const CONFIG_CHECK_INTERVAL: Duration = Duration::from_secs(2);

impl App {
    /// Runs until `max_ticks` ticks have completed, Ctrl+C, or `running` is cleared.
    ///
    /// With `realtime` the loop is paced at the configured `target_tps`;
    /// otherwise it ticks as fast as the solver allows.
    pub async fn run(&mut self, max_ticks: Option<u64>, realtime: bool) -> Result<Arc<WorldSnapshot>> {
        self.shutdown.listen_for_ctrl_c();

        let tick_rate = Duration::from_secs_f64(1.0 / self.sim.config().target_tps as f64);
        let mut pacer = tokio::time::interval(tick_rate);
        pacer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_config_check = Instant::now();
        let mut completed = 0u64;
        let mut latest = self.sim.snapshot();

        tracing::info!(
            particles = self.sim.particles().len(),
            types = self.sim.table().num_types(),
            realtime,
            "Simulation started"
        );

        while self.running && !self.shutdown.is_shutdown_requested() {
            if max_ticks.is_some_and(|max| completed >= max) {
                break;
            }

            if last_config_check.elapsed() >= CONFIG_CHECK_INTERVAL {
                if let Err(e) = self.check_config_reload() {
                    tracing::warn!(error = %e, "Config reload failed; keeping current values");
                }
                last_config_check = Instant::now();
            }

            if realtime {
                pacer.tick().await;
            } else if completed % 256 == 0 {
                // Let the signal task run on a busy runtime.
                tokio::task::yield_now().await;
            }

            latest = self.step();
            completed += 1;
        }

        tracing::info!(
            ticks = self.metrics.tick_count(),
            resets = self.metrics.counter("resets"),
            tps = self.metrics.ticks_per_second(),
            "Simulation finished"
        );
        Ok(latest)
    }
}
