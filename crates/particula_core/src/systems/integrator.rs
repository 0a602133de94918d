//! Velocity damping, position advance and toroidal wrap.

use particula_data::{Bounds, ParticleSet};

/// Advances every particle by one step.
///
/// Velocities are multiplied by `damping` unconditionally, positions move by the
/// damped velocity, then wrap into `[0, width) x [0, height)`. Must run only
/// after the solver has finished the whole tick.
pub fn integrate(particles: &mut ParticleSet, damping: f64, bounds: Bounds) {
    let ParticleSet { x, y, vx, vy, .. } = particles;
    for (((x, y), vx), vy) in x.iter_mut().zip(y.iter_mut()).zip(vx.iter_mut()).zip(vy.iter_mut()) {
        *vx *= damping;
        *vy *= damping;
        *x = Bounds::wrap_coord(*x + *vx, bounds.width);
        *y = Bounds::wrap_coord(*y + *vy, bounds.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particula_data::{Particle, Rgb};

    #[test]
    fn test_damping_applies_before_move() {
        let mut p = Particle::at(10.0, 10.0, 0, Rgb::default());
        p.vx = 2.0;
        p.vy = -1.0;
        let mut set: ParticleSet = std::iter::once(p).collect();
        integrate(&mut set, 0.5, Bounds::new(100.0, 100.0));
        assert_eq!((set.vx[0], set.vy[0]), (1.0, -0.5));
        assert_eq!((set.x[0], set.y[0]), (11.0, 9.5));
    }

    #[test]
    fn test_exit_reenters_opposite_edge() {
        let mut p = Particle::at(99.5, 0.5, 0, Rgb::default());
        p.vx = 1.0;
        p.vy = -1.0;
        let mut set: ParticleSet = std::iter::once(p).collect();
        integrate(&mut set, 1.0 - f64::EPSILON, Bounds::new(100.0, 50.0));
        assert!((set.x[0] - 0.5).abs() < 1e-9);
        assert!((set.y[0] - 49.5).abs() < 1e-9);
    }

    #[test]
    fn test_resting_particle_stays_put() {
        let mut set: ParticleSet = std::iter::once(Particle::at(3.0, 4.0, 0, Rgb::default())).collect();
        integrate(&mut set, 0.98, Bounds::new(10.0, 10.0));
        assert_eq!((set.x[0], set.y[0]), (3.0, 4.0));
    }

    #[test]
    fn test_empty_set_is_noop() {
        let mut set = ParticleSet::default();
        integrate(&mut set, 0.98, Bounds::default());
        assert!(set.is_empty());
    }
}
