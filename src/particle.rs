//! A single candidate solution and its velocity-rule update.

use ndarray::Array1;
use rand::Rng;

use crate::bounds::Bounds;

/// One member of the swarm: current position and velocity plus the best
/// position this particle has ever occupied.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position, always inside the bounds after the first clamp.
    pub position: Array1<f64>,
    /// Current velocity. Unconstrained in magnitude; only positions are
    /// clamped.
    pub velocity: Array1<f64>,
    /// Position achieving the lowest fitness this particle has seen.
    pub best_position: Array1<f64>,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
}

impl Particle {
    /// Creates a particle at `position` with zero velocity, taking the
    /// initial evaluation as its personal best.
    pub(crate) fn at(position: Array1<f64>, fitness: f64) -> Self {
        let n = position.len();
        Self {
            best_position: position.clone(),
            position,
            velocity: Array1::zeros(n),
            best_fitness: fitness,
        }
    }

    /// Applies the classic inertia-weight velocity rule and moves the
    /// particle to its clamped new position.
    ///
    /// `r1` and `r2` are freshly drawn per dimension; they are not shared
    /// across dimensions or particles.
    pub(crate) fn advance<R: Rng + ?Sized>(
        &mut self,
        global_best: &Array1<f64>,
        inertia: f64,
        cognitive: f64,
        social: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) {
        for j in 0..self.position.len() {
            let r1: f64 = rng.random::<f64>();
            let r2: f64 = rng.random::<f64>();
            let v = inertia * self.velocity[j]
                + cognitive * r1 * (self.best_position[j] - self.position[j])
                + social * r2 * (global_best[j] - self.position[j]);
            self.velocity[j] = v;
            self.position[j] += v;
        }
        bounds.clamp(&mut self.position);
    }

    /// Records an evaluation at the current position, updating the
    /// personal best on strict improvement only. Returns `true` if the
    /// personal best changed.
    pub(crate) fn record(&mut self, fitness: f64) -> bool {
        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best_position.assign(&self.position);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    #[test]
    fn test_starts_with_zero_velocity() {
        let p = Particle::at(array![1.0, 2.0], 5.0);
        assert_eq!(p.velocity, array![0.0, 0.0]);
        assert_eq!(p.best_position, array![1.0, 2.0]);
        assert_eq!(p.best_fitness, 5.0);
    }

    #[test]
    fn test_record_requires_strict_improvement() {
        let mut p = Particle::at(array![1.0], 5.0);
        assert!(!p.record(5.0), "a tie must not update the personal best");
        assert!(!p.record(6.0));
        assert_eq!(p.best_fitness, 5.0);

        p.position = array![0.5];
        assert!(p.record(2.0));
        assert_eq!(p.best_fitness, 2.0);
        assert_eq!(p.best_position, array![0.5]);
    }

    #[test]
    fn test_personal_best_dominates_observations() {
        let mut p = Particle::at(array![1.0], 9.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for fitness in [7.0, 8.0, 3.0, 3.0, 4.0] {
            p.position = array![rng.random::<f64>()];
            p.record(fitness);
            assert!(p.best_fitness <= fitness);
        }
        assert_eq!(p.best_fitness, 3.0);
    }

    #[test]
    fn test_advance_clamps_overshoot() {
        let bounds = Bounds::from_pairs(&[(0.0, 1.0)]).unwrap();
        let mut p = Particle::at(array![0.9], 1.0);
        p.best_position = array![0.9];
        let gbest = array![0.9];
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        // Huge inertia on a nonzero velocity guarantees the raw update
        // leaves the box.
        p.velocity = array![50.0];
        p.advance(&gbest, 2.0, 0.0, 0.0, &bounds, &mut rng);
        assert_eq!(p.position[0], 1.0);
        // Velocity itself is never clamped.
        assert_eq!(p.velocity[0], 100.0);
    }

    #[test]
    fn test_advance_is_stationary_at_consensus() {
        // With position == personal best == global best and zero
        // velocity, the update has nothing to pull towards.
        let bounds = Bounds::from_pairs(&[(0.0, 10.0), (0.0, 10.0)]).unwrap();
        let mut p = Particle::at(array![4.0, 6.0], 1.0);
        let gbest = array![4.0, 6.0];
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        p.advance(&gbest, 0.4, 2.02, 2.02, &bounds, &mut rng);
        assert_eq!(p.position, array![4.0, 6.0]);
    }
}
