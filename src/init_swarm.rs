use ndarray::Array1;
use rand::Rng;

use crate::bounds::Bounds;
use crate::particle::Particle;
use crate::swarm::{evaluate_or_sentinel, Swarm};
use crate::EvalOutcome;

/// Builds and evaluates the initial swarm.
///
/// Each particle starts at an independent uniform sample inside the
/// bounds with zero velocity; when `x0` is given, particle 0 starts at
/// that vector instead (clamped), so a known-good baseline design is
/// always evaluated first. Personal bests equal the initial evaluation;
/// the global best is folded in under the strict-improvement rule.
pub(crate) fn init_swarm<F, R>(
    func: &mut F,
    bounds: &Bounds,
    pop: usize,
    x0: Option<&Array1<f64>>,
    rng: &mut R,
) -> Swarm
where
    F: FnMut(&Array1<f64>) -> EvalOutcome,
    R: Rng + ?Sized,
{
    let mut swarm = Swarm::empty(bounds.len(), pop);
    for i in 0..pop {
        let position = match (i, x0) {
            (0, Some(seed)) => {
                let mut seeded = seed.clone();
                bounds.clamp(&mut seeded);
                seeded
            }
            _ => bounds.sample(rng),
        };
        let eval = evaluate_or_sentinel(func, &position);
        swarm.particles.push(Particle::at(position, eval.fitness));
        if i == 0 {
            // Placeholder until a real best is found; keeps the recorded
            // best position inside the bounds even if every evaluation
            // fails.
            swarm.best_position.assign(&swarm.particles[0].position);
        }
        swarm.absorb(i, &eval);
    }
    swarm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvalFailure, Evaluation, FITNESS_CEILING};
    use ndarray::array;
    use rand::SeedableRng;

    fn sphere_outcome(x: &Array1<f64>) -> EvalOutcome {
        Ok(Evaluation::of(x.iter().map(|&xi| xi * xi).sum()))
    }

    #[test]
    fn test_initial_swarm_shape() {
        let bounds = Bounds::from_pairs(&[(0.0, 10.0), (0.0, 10.0)]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let mut func = sphere_outcome;
        let swarm = init_swarm(&mut func, &bounds, 6, None, &mut rng);

        assert_eq!(swarm.len(), 6);
        for p in &swarm.particles {
            assert!(bounds.contains(&p.position));
            assert_eq!(p.velocity, array![0.0, 0.0]);
            assert_eq!(p.best_position, p.position);
        }
        assert!(swarm.best_fitness < FITNESS_CEILING);
    }

    #[test]
    fn test_seed_vector_pins_particle_zero() {
        let bounds = Bounds::from_pairs(&[(6.0, 10.0), (34.0, 38.0)]).unwrap();
        let baseline = array![7.5, 36.0];
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let mut func = sphere_outcome;
        let swarm = init_swarm(&mut func, &bounds, 3, Some(&baseline), &mut rng);

        assert_eq!(swarm.particles[0].position, baseline);
    }

    #[test]
    fn test_out_of_bounds_seed_is_clamped() {
        let bounds = Bounds::from_pairs(&[(0.0, 1.0)]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let mut func = sphere_outcome;
        let swarm = init_swarm(&mut func, &bounds, 1, Some(&array![5.0]), &mut rng);

        assert_eq!(swarm.particles[0].position, array![1.0]);
    }

    #[test]
    fn test_all_failures_leave_ceiling_best() {
        let bounds = Bounds::from_pairs(&[(0.0, 1.0)]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let mut func = |_: &Array1<f64>| -> EvalOutcome { Err(EvalFailure::new("boom")) };
        let swarm = init_swarm(&mut func, &bounds, 4, None, &mut rng);

        assert_eq!(swarm.best_fitness, FITNESS_CEILING);
        assert!(bounds.contains(&swarm.best_position));
        for p in &swarm.particles {
            assert_eq!(p.best_fitness, FITNESS_CEILING);
        }
    }
}
