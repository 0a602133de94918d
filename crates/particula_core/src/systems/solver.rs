//! Pairwise force and collision solver.
//!
//! For every ordered pair `(i, j)` within `interaction_radius` under the
//! nearest-periodic-image metric, particle `i` accumulates
//! `table[kind_i][kind_j] / d^2 * amplifier` along the unit vector towards `j`,
//! and pairs closer than the collision threshold are pushed apart.
//!
//! The solve is two-phase: every particle first computes its own velocity
//! change while reading only shared state, then all changes are committed. A
//! particle's collision share is the sum of the impulses the sequential
//! immediate-write formulation would deliver to it, so the outcome matches
//! [`solve_sequential`] up to floating-point summation order.

use crate::config::{CollisionMode, InteractionConfig};
use particula_data::{Bounds, InteractionTable, ParticleSet};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-tick inputs of the solver, snapshotted from [`InteractionConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    pub amplifier: f64,
    pub collision_damping: f64,
    pub interaction_radius: f64,
    pub collision_threshold: f64,
    pub collision_mode: CollisionMode,
    pub bounds: Bounds,
}

impl SolverParams {
    #[must_use]
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            amplifier: config.amplifier,
            collision_damping: config.collision_damping,
            interaction_radius: config.interaction_radius,
            collision_threshold: config.collision_threshold(),
            collision_mode: config.collision_mode,
            bounds: config.bounds,
        }
    }
}

/// Separations below this are treated as coincident: no force, no impulse.
///
/// Keeps `1/d^2` and `1/d` finite when a drag lands a particle almost on another.
pub const MIN_SEPARATION: f64 = 1e-9;

/// Shortest signed displacement from `from` to `to` on a ring of length `extent`.
///
/// Ties at exactly half the extent round to even, so the sign for that case is
/// stable across platforms.
#[inline]
#[must_use]
pub fn toroidal_delta(from: f64, to: f64, extent: f64) -> f64 {
    let d = to - from;
    d - extent * (d / extent).round_ties_even()
}

/// Geometry of one ordered pair, or `None` past the cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairGeometry {
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
}

#[inline]
#[must_use]
pub fn pair_geometry(
    (xi, yi): (f64, f64),
    (xj, yj): (f64, f64),
    bounds: Bounds,
    interaction_radius: f64,
) -> Option<PairGeometry> {
    let dx = toroidal_delta(xi, xj, bounds.width);
    let dy = toroidal_delta(yi, yj, bounds.height);
    let distance = dx.hypot(dy);
    (distance <= interaction_radius).then_some(PairGeometry { dx, dy, distance })
}

/// Long-range force on `i` from `j`. Positive coefficients pull `i` towards `j`.
#[inline]
#[must_use]
pub fn long_range_force(coefficient: f64, g: &PairGeometry, amplifier: f64) -> (f64, f64) {
    if g.distance < MIN_SEPARATION {
        return (0.0, 0.0);
    }
    let f = coefficient / (g.distance * g.distance) * amplifier;
    (f * g.dx / g.distance, f * g.dy / g.distance)
}

/// Separating impulse for one ordering of a colliding pair, pointing from `i` to `j`.
///
/// The caller subtracts it from `i` and adds it to `j`.
#[inline]
#[must_use]
pub fn collision_impulse(g: &PairGeometry, threshold: f64, collision_damping: f64) -> (f64, f64) {
    if g.distance < MIN_SEPARATION || g.distance >= threshold {
        return (0.0, 0.0);
    }
    let overlap_fraction = (threshold - g.distance) / g.distance;
    let k = collision_damping * overlap_fraction;
    (k * g.dx / g.distance, k * g.dy / g.distance)
}

/// Velocity change of particle `i` for this tick.
#[inline]
fn velocity_delta(
    particles: &ParticleSet,
    table: &InteractionTable,
    params: &SolverParams,
    i: usize,
) -> [f64; 2] {
    let xi = particles.x[i];
    let yi = particles.y[i];
    let kind_i = particles.kind[i] as usize;
    debug_assert!(kind_i < table.num_types(), "type index out of range");
    let row = table.row(kind_i);
    let multiplier = params.collision_mode.impulse_multiplier();

    let (mut fx, mut fy) = (0.0, 0.0);
    let (mut cx, mut cy) = (0.0, 0.0);
    for j in 0..particles.len() {
        if i == j {
            continue;
        }
        let Some(g) = pair_geometry(
            (xi, yi),
            (particles.x[j], particles.y[j]),
            params.bounds,
            params.interaction_radius,
        ) else {
            continue;
        };
        let (lx, ly) = long_range_force(row[particles.kind[j] as usize], &g, params.amplifier);
        fx += lx;
        fy += ly;
        let (ix, iy) = collision_impulse(&g, params.collision_threshold, params.collision_damping);
        cx += ix;
        cy += iy;
    }
    [fx - multiplier * cx, fy - multiplier * cy]
}

/// Two-phase solver with a reusable per-particle accumulator buffer.
#[derive(Debug, Default)]
pub struct ForceSolver {
    deltas: Vec<[f64; 2]>,
}

impl ForceSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates velocities in place; positions are not touched.
    pub fn solve(
        &mut self,
        particles: &mut ParticleSet,
        table: &InteractionTable,
        params: &SolverParams,
    ) {
        let n = particles.len();
        if n == 0 {
            return;
        }
        self.deltas.clear();
        self.deltas.resize(n, [0.0; 2]);

        // Phase 1: each particle writes only its own accumulator.
        let shared: &ParticleSet = particles;
        #[cfg(feature = "parallel")]
        self.deltas
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, d)| *d = velocity_delta(shared, table, params, i));
        #[cfg(not(feature = "parallel"))]
        self.deltas
            .iter_mut()
            .enumerate()
            .for_each(|(i, d)| *d = velocity_delta(shared, table, params, i));

        // Phase 2: commit.
        for ((vx, vy), [dx, dy]) in particles
            .vx
            .iter_mut()
            .zip(particles.vy.iter_mut())
            .zip(&self.deltas)
        {
            *vx += dx;
            *vy += dy;
        }
    }
}

/// Reference solver with immediate collision writes, visiting pairs in index order.
///
/// Collision impulses go straight into both velocities as each pair is met;
/// long-range force is committed once per particle after its scan. Kept as the
/// ground truth the two-phase solver is checked against.
pub fn solve_sequential(
    particles: &mut ParticleSet,
    table: &InteractionTable,
    params: &SolverParams,
) {
    let n = particles.len();
    let once = params.collision_mode == CollisionMode::PerUnorderedPair;
    for i in 0..n {
        let row = table.row(particles.kind[i] as usize);
        let (mut fx, mut fy) = (0.0, 0.0);
        for j in 0..n {
            if i == j {
                continue;
            }
            let Some(g) = pair_geometry(
                (particles.x[i], particles.y[i]),
                (particles.x[j], particles.y[j]),
                params.bounds,
                params.interaction_radius,
            ) else {
                continue;
            };
            let (lx, ly) = long_range_force(row[particles.kind[j] as usize], &g, params.amplifier);
            fx += lx;
            fy += ly;

            if once && j < i {
                continue;
            }
            let (ix, iy) =
                collision_impulse(&g, params.collision_threshold, params.collision_damping);
            particles.vx[i] -= ix;
            particles.vy[i] -= iy;
            particles.vx[j] += ix;
            particles.vy[j] += iy;
        }
        particles.vx[i] += fx;
        particles.vy[i] += fy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particula_data::{Particle, Rgb};

    fn params(mode: CollisionMode) -> SolverParams {
        SolverParams {
            amplifier: 1.0,
            collision_damping: 0.5,
            interaction_radius: 150.0,
            collision_threshold: 12.0,
            collision_mode: mode,
            bounds: Bounds::new(100.0, 100.0),
        }
    }

    fn set(points: &[(f64, f64, u32)]) -> ParticleSet {
        points
            .iter()
            .map(|&(x, y, k)| Particle::at(x, y, k, Rgb::default()))
            .collect()
    }

    #[test]
    fn test_toroidal_delta_takes_short_way() {
        assert_eq!(toroidal_delta(1.0, 99.0, 100.0), -2.0);
        assert_eq!(toroidal_delta(99.0, 1.0, 100.0), 2.0);
        assert_eq!(toroidal_delta(10.0, 30.0, 100.0), 20.0);
    }

    #[test]
    fn test_toroidal_delta_half_extent_tie() {
        assert_eq!(toroidal_delta(0.0, 50.0, 100.0), 50.0);
        assert_eq!(toroidal_delta(50.0, 0.0, 100.0), -50.0);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let b = Bounds::new(1000.0, 1000.0);
        assert!(pair_geometry((0.0, 0.0), (150.0, 0.0), b, 150.0).is_some());
        assert!(pair_geometry((0.0, 0.0), (150.1, 0.0), b, 150.0).is_none());
    }

    #[test]
    fn test_attraction_towards_partner() {
        let table = InteractionTable::from_rows(&[vec![0.0, 2.0], vec![0.0, 0.0]]).expect("table");
        let mut p = set(&[(0.0, 0.0, 0), (10.0, 0.0, 1)]);
        let mut params = params(CollisionMode::PerOrderedPair);
        params.bounds = Bounds::new(1000.0, 1000.0);
        ForceSolver::new().solve(&mut p, &table, &params);
        assert!((p.vx[0] - 0.02).abs() < 1e-12);
        assert_eq!(p.vy[0], 0.0);
        assert_eq!((p.vx[1], p.vy[1]), (0.0, 0.0));
        assert_eq!((p.x[0], p.x[1]), (0.0, 10.0));
    }

    #[test]
    fn test_coincident_particles_are_skipped() {
        let table = InteractionTable::from_rows(&[vec![1.0]]).expect("table");
        let mut p = set(&[(5.0, 5.0, 0), (5.0, 5.0, 0)]);
        ForceSolver::new().solve(&mut p, &table, &params(CollisionMode::PerOrderedPair));
        assert_eq!(p.vx, vec![0.0, 0.0]);
        assert_eq!(p.vy, vec![0.0, 0.0]);
    }

    #[test]
    fn test_near_coincident_pair_is_skipped() {
        let g = PairGeometry {
            dx: 1e-170,
            dy: 0.0,
            distance: 1e-170,
        };
        assert_eq!(long_range_force(0.0, &g, 1.0), (0.0, 0.0));
        assert_eq!(long_range_force(2.0, &g, 1.0), (0.0, 0.0));
        assert_eq!(collision_impulse(&g, 12.0, 0.5), (0.0, 0.0));

        let g = PairGeometry {
            distance: MIN_SEPARATION,
            dx: MIN_SEPARATION,
            dy: 0.0,
        };
        let (fx, _) = long_range_force(2.0, &g, 1.0);
        let (ix, _) = collision_impulse(&g, 12.0, 0.5);
        assert!(fx.is_finite() && fx > 0.0);
        assert!(ix.is_finite() && ix > 0.0);
    }

    #[test]
    fn test_collision_pushes_apart_twice_per_ordered_pair() {
        let table = InteractionTable::new(1);
        let mut ordered = set(&[(10.0, 10.0, 0), (14.0, 10.0, 0)]);
        let mut unordered = ordered.clone();
        ForceSolver::new().solve(&mut ordered, &table, &params(CollisionMode::PerOrderedPair));
        ForceSolver::new().solve(
            &mut unordered,
            &table,
            &params(CollisionMode::PerUnorderedPair),
        );
        // overlap 8, fraction 2, impulse 0.5 * 2 = 1 along +x
        assert!((ordered.vx[0] + 2.0).abs() < 1e-12);
        assert!((ordered.vx[1] - 2.0).abs() < 1e-12);
        assert!((unordered.vx[0] + 1.0).abs() < 1e-12);
        assert!((unordered.vx[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_sequential_reference() {
        let table = InteractionTable::from_rows(&[
            vec![0.3, -1.2, 0.8],
            vec![1.5, -0.4, -2.0],
            vec![-0.7, 0.9, 0.1],
        ])
        .expect("table");
        let points: Vec<(f64, f64, u32)> = (0..40)
            .map(|i| {
                let t = i as f64;
                ((t * 7.3) % 100.0, (t * 13.1 + 3.0) % 100.0, i % 3)
            })
            .collect();
        for mode in [CollisionMode::PerOrderedPair, CollisionMode::PerUnorderedPair] {
            let mut two_phase = set(&points);
            let mut reference = two_phase.clone();
            ForceSolver::new().solve(&mut two_phase, &table, &params(mode));
            solve_sequential(&mut reference, &table, &params(mode));
            for i in 0..points.len() {
                assert!((two_phase.vx[i] - reference.vx[i]).abs() < 1e-9, "vx[{i}]");
                assert!((two_phase.vy[i] - reference.vy[i]).abs() < 1e-9, "vy[{i}]");
            }
        }
    }

    #[test]
    fn test_empty_set_is_noop() {
        let mut p = ParticleSet::default();
        ForceSolver::new().solve(
            &mut p,
            &InteractionTable::new(1),
            &params(CollisionMode::PerOrderedPair),
        );
        assert!(p.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn test_two_phase_agrees_with_reference_on_random_layouts(
            cells in proptest::collection::vec((0u32..50, 0u32..50, 0u32..2), 0..30),
            unordered in proptest::bool::ANY,
        ) {
            let table = InteractionTable::from_rows(&[vec![1.0, -0.5], vec![2.0, 0.25]])
                .expect("table");
            let mode = if unordered {
                CollisionMode::PerUnorderedPair
            } else {
                CollisionMode::PerOrderedPair
            };
            // Lattice spacing keeps pair forces bounded.
            let points: Vec<(f64, f64, u32)> = cells
                .iter()
                .map(|&(cx, cy, k)| (f64::from(cx) * 2.0, f64::from(cy) * 2.0, k))
                .collect();
            let mut two_phase = set(&points);
            let mut reference = two_phase.clone();
            ForceSolver::new().solve(&mut two_phase, &table, &params(mode));
            solve_sequential(&mut reference, &table, &params(mode));
            for i in 0..points.len() {
                proptest::prop_assert!((two_phase.vx[i] - reference.vx[i]).abs() < 1e-9);
                proptest::prop_assert!((two_phase.vy[i] - reference.vy[i]).abs() < 1e-9);
            }
        }
    }
}
