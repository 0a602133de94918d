//! Scenario generation: the initial particle set and its interaction table.

use crate::config::AppConfig;
use crate::error::{Result, SimError};
use particula_data::{Bounds, InteractionTable, Particle, ParticleSet, Rgb};
use rand::Rng;

/// Inclusive channel band for generated type colours.
const COLOR_BAND: std::ops::RangeInclusive<u8> = 20..=200;

/// Particle set and interaction table, created and replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub particles: ParticleSet,
    pub table: InteractionTable,
}

/// Inputs to [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParams {
    pub num_types: usize,
    pub num_particles: usize,
    pub bounds: Bounds,
    pub force_range: f64,
    /// Particles spawn at least this far from every edge.
    pub spawn_margin: f64,
}

impl ScenarioParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            num_types: config.world.num_types,
            num_particles: config.world.num_particles,
            bounds: config.interaction.bounds,
            force_range: config.interaction.force_range,
            spawn_margin: config.interaction.particle_radius,
        }
    }
}

/// Generates a fresh scenario.
///
/// Random draws happen in a fixed order (type colours, table row by row, then
/// type and position per particle), so a seeded `rng` reproduces the scenario
/// exactly.
pub fn generate<R: Rng>(params: &ScenarioParams, rng: &mut R) -> Result<Scenario> {
    let ScenarioParams {
        num_types,
        num_particles,
        bounds,
        force_range,
        spawn_margin,
    } = *params;

    if num_types == 0 {
        return Err(SimError::invalid("num_types must be at least 1"));
    }
    if num_types > u32::MAX as usize {
        return Err(SimError::invalid("num_types does not fit a type index"));
    }
    if !force_range.is_finite() || force_range < 0.0 {
        return Err(SimError::invalid(
            "force_range must be finite and non-negative",
        ));
    }
    if !(spawn_margin >= 0.0
        && bounds.width - spawn_margin > spawn_margin
        && bounds.height - spawn_margin > spawn_margin)
    {
        return Err(SimError::invalid(format!(
            "bounds {}x{} leave no room to spawn with margin {}",
            bounds.width, bounds.height, spawn_margin
        )));
    }

    let palette: Vec<Rgb> = (0..num_types)
        .map(|_| {
            Rgb::new(
                rng.gen_range(COLOR_BAND),
                rng.gen_range(COLOR_BAND),
                rng.gen_range(COLOR_BAND),
            )
        })
        .collect();

    let mut table = InteractionTable::new(num_types);
    for a in 0..num_types {
        for b in 0..num_types {
            table.set(a, b, rng.gen_range(-force_range..=force_range));
        }
    }

    let mut particles = ParticleSet::with_capacity(num_particles);
    for _ in 0..num_particles {
        let kind = rng.gen_range(0..num_types);
        let x = rng.gen_range(spawn_margin..bounds.width - spawn_margin);
        let y = rng.gen_range(spawn_margin..bounds.height - spawn_margin);
        particles.push(Particle::at(x, y, kind as u32, palette[kind]));
    }

    tracing::info!(
        types = num_types,
        particles = num_particles,
        force_range = force_range,
        "Scenario generated"
    );
    for line in table.to_string().lines() {
        tracing::info!("{line}");
    }

    Ok(Scenario { particles, table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params() -> ScenarioParams {
        ScenarioParams {
            num_types: 4,
            num_particles: 300,
            bounds: Bounds::new(200.0, 100.0),
            force_range: 2.0,
            spawn_margin: 4.0,
        }
    }

    #[test]
    fn test_generated_values_respect_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let s = generate(&params(), &mut rng).expect("scenario");
        assert_eq!(s.particles.len(), 300);
        assert_eq!(s.table.num_types(), 4);
        assert!(s.table.max_abs() <= 2.0);
        for p in s.particles.iter() {
            assert!((4.0..196.0).contains(&p.x), "x = {}", p.x);
            assert!((4.0..96.0).contains(&p.y), "y = {}", p.y);
            assert!(p.kind < 4);
            assert_eq!((p.vx, p.vy), (0.0, 0.0));
            for c in [p.color.r, p.color.g, p.color.b] {
                assert!(COLOR_BAND.contains(&c));
            }
        }
    }

    #[test]
    fn test_same_type_shares_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let s = generate(&params(), &mut rng).expect("scenario");
        for a in s.particles.iter() {
            for b in s.particles.iter().filter(|b| b.kind == a.kind) {
                assert_eq!(a.color, b.color);
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate(&params(), &mut ChaCha8Rng::seed_from_u64(9)).expect("scenario");
        let b = generate(&params(), &mut ChaCha8Rng::seed_from_u64(9)).expect("scenario");
        assert_eq!(a, b);
        let c = generate(&params(), &mut ChaCha8Rng::seed_from_u64(10)).expect("scenario");
        assert_ne!(a.table, c.table);
    }

    #[test]
    fn test_zero_particles_and_zero_range() {
        let p = ScenarioParams {
            num_particles: 0,
            force_range: 0.0,
            ..params()
        };
        let s = generate(&p, &mut ChaCha8Rng::seed_from_u64(1)).expect("scenario");
        assert!(s.particles.is_empty());
        assert_eq!(s.table.max_abs(), 0.0);
    }

    #[test]
    fn test_zero_types_rejected() {
        let p = ScenarioParams {
            num_types: 0,
            ..params()
        };
        let err = generate(&p, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
    }

    #[test]
    fn test_world_smaller_than_margin_rejected() {
        let p = ScenarioParams {
            bounds: Bounds::new(8.0, 100.0),
            ..params()
        };
        assert!(generate(&p, &mut ChaCha8Rng::seed_from_u64(1)).is_err());
    }
}
