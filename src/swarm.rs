//! The particle collection and its shared global-best record.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::bounds::Bounds;
use crate::history::IterationSnapshot;
use crate::particle::Particle;
use crate::{EvalOutcome, Evaluation, FITNESS_CEILING};

/// Fixed-size collection of particles plus the global best seen by any of
/// them, with the auxiliary metrics attached to that best.
#[derive(Debug, Clone)]
pub struct Swarm {
    /// The particles, in a fixed order for the whole run.
    pub particles: Vec<Particle>,
    /// Best position observed by any particle so far.
    pub best_position: Array1<f64>,
    /// Fitness at `best_position`. Starts at [`FITNESS_CEILING`] so a
    /// failed evaluation can never masquerade as a legitimate best.
    pub best_fitness: f64,
    /// Auxiliary metrics reported alongside the current global best.
    pub best_metrics: BTreeMap<String, f64>,
}

impl Swarm {
    pub(crate) fn empty(dim: usize, pop: usize) -> Self {
        Self {
            particles: Vec::with_capacity(pop),
            best_position: Array1::zeros(dim),
            best_fitness: FITNESS_CEILING,
            best_metrics: BTreeMap::new(),
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if the swarm holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Folds one evaluation into the per-particle and global bests.
    /// Both updates require strict improvement; ties keep the first-found
    /// best. Returns `true` if the global best changed.
    pub(crate) fn absorb(&mut self, index: usize, eval: &Evaluation) -> bool {
        self.particles[index].record(eval.fitness);
        if eval.fitness < self.best_fitness {
            self.best_fitness = eval.fitness;
            self.best_position.assign(&self.particles[index].position);
            self.best_metrics = eval.metrics.clone();
            true
        } else {
            false
        }
    }

    /// Runs one PSO iteration: every particle advances via the velocity
    /// rule, is clamped, evaluated exactly once, and folded into the
    /// bests. The global best updates particle by particle, so later
    /// particles in the same iteration are pulled towards any improvement
    /// found earlier in it.
    ///
    /// Returns an immutable snapshot of the swarm after the iteration.
    pub(crate) fn iterate<F, R>(
        &mut self,
        func: &mut F,
        bounds: &Bounds,
        inertia: f64,
        cognitive: f64,
        social: f64,
        iter: usize,
        rng: &mut R,
    ) -> IterationSnapshot
    where
        F: FnMut(&Array1<f64>) -> EvalOutcome,
        R: Rng + ?Sized,
    {
        for i in 0..self.particles.len() {
            let global_best = self.best_position.clone();
            self.particles[i].advance(&global_best, inertia, cognitive, social, bounds, rng);
            let eval = evaluate_or_sentinel(func, &self.particles[i].position);
            self.absorb(i, &eval);
        }
        self.snapshot(iter)
    }

    pub(crate) fn snapshot(&self, iter: usize) -> IterationSnapshot {
        let dim = self.best_position.len();
        let mut positions = Array2::<f64>::zeros((self.particles.len(), dim));
        for (i, particle) in self.particles.iter().enumerate() {
            positions.row_mut(i).assign(&particle.position);
        }
        IterationSnapshot {
            iter,
            positions,
            best_position: self.best_position.clone(),
            best_fitness: self.best_fitness,
            best_metrics: self.best_metrics.clone(),
        }
    }
}

/// Invokes the objective once, mapping failures and degenerate numeric
/// results to the reserved fitness ceiling so a single bad configuration
/// cannot abort the search.
pub(crate) fn evaluate_or_sentinel<F>(func: &mut F, x: &Array1<f64>) -> Evaluation
where
    F: FnMut(&Array1<f64>) -> EvalOutcome,
{
    match func(x) {
        Ok(eval) if eval.fitness.is_finite() => eval,
        Ok(eval) => {
            log::warn!(
                "objective returned non-finite fitness {}; substituting fitness ceiling",
                eval.fitness
            );
            Evaluation::sentinel()
        }
        Err(failure) => {
            log::warn!("objective evaluation failed: {failure}; substituting fitness ceiling");
            Evaluation::sentinel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalFailure;
    use ndarray::array;

    #[test]
    fn test_absorb_strict_improvement_only() {
        let mut swarm = Swarm::empty(1, 2);
        swarm.particles.push(Particle::at(array![2.0], 4.0));
        swarm.particles.push(Particle::at(array![3.0], 9.0));
        swarm.best_position = array![2.0];
        swarm.best_fitness = 4.0;

        // A tie from another particle must not steal the global best.
        swarm.particles[1].position = array![-2.0];
        assert!(!swarm.absorb(1, &Evaluation::of(4.0)));
        assert_eq!(swarm.best_position, array![2.0]);

        swarm.particles[1].position = array![1.0];
        assert!(swarm.absorb(1, &Evaluation::of(1.0)));
        assert_eq!(swarm.best_position, array![1.0]);
        assert_eq!(swarm.best_fitness, 1.0);
    }

    #[test]
    fn test_absorb_keeps_metrics_of_best() {
        let mut swarm = Swarm::empty(1, 1);
        swarm.particles.push(Particle::at(array![2.0], FITNESS_CEILING));

        let eval = Evaluation::of(3.5).with_metric("ld", 14.2);
        swarm.absorb(0, &eval);
        assert_eq!(swarm.best_metrics.get("ld"), Some(&14.2));

        // A worse evaluation leaves the recorded metrics untouched.
        let worse = Evaluation::of(7.0).with_metric("ld", 2.0);
        swarm.absorb(0, &worse);
        assert_eq!(swarm.best_metrics.get("ld"), Some(&14.2));
    }

    #[test]
    fn test_sentinel_on_failure() {
        let mut failing = |_: &Array1<f64>| -> EvalOutcome {
            Err(EvalFailure::new("solver produced no history file"))
        };
        let eval = evaluate_or_sentinel(&mut failing, &array![1.0]);
        assert_eq!(eval.fitness, FITNESS_CEILING);
        assert!(eval.metrics.is_empty());
    }

    #[test]
    fn test_sentinel_on_non_finite_fitness() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut func = move |_: &Array1<f64>| -> EvalOutcome { Ok(Evaluation::of(bad)) };
            let eval = evaluate_or_sentinel(&mut func, &array![1.0]);
            assert_eq!(eval.fitness, FITNESS_CEILING);
        }
    }

    #[test]
    fn test_sentinel_never_beats_ceiling_start() {
        let mut swarm = Swarm::empty(1, 1);
        swarm.particles.push(Particle::at(array![2.0], FITNESS_CEILING));
        assert!(!swarm.absorb(0, &Evaluation::sentinel()));
        assert_eq!(swarm.best_fitness, FITNESS_CEILING);
    }
}
