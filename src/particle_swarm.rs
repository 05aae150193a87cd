use crate::{Bounds, EvalOutcome, Evaluation, ParticleSwarm, PsoConfig, PsoReport, Result};
use ndarray::Array1;

/// Runs Particle Swarm Optimization on a function.
///
/// This is a convenience function for plain scalar objectives. It wraps
/// the function into the structured evaluation contract (no auxiliary
/// metrics, no failure signalling), creates a PSO optimizer with the
/// given bounds and configuration, then runs the optimization to find
/// the minimum. Objectives that report auxiliary metrics or evaluation
/// failures should use [`ParticleSwarm`] directly.
///
/// # Arguments
///
/// * `func` - The objective function to minimize, mapping `&Array1<f64>` to `f64`
/// * `bounds` - Vector of (lower, upper) bound pairs for each dimension
/// * `config` - PSO configuration (use `PsoConfigBuilder` to construct)
///
/// # Returns
///
/// Returns `Ok(PsoReport)` containing the optimization result on success.
///
/// # Errors
///
/// Returns `PsoError::InvalidBounds` if any bound pair has upper < lower,
/// and the configuration errors documented on
/// [`ParticleSwarm::solve`](crate::ParticleSwarm::solve).
///
/// # Example
///
/// ```rust
/// use ::particle_swarm::{particle_swarm, PsoConfigBuilder};
///
/// let result = particle_swarm(
///     &|x| x[0].powi(2) + x[1].powi(2),
///     &[(-5.0, 5.0), (-5.0, 5.0)],
///     PsoConfigBuilder::new().maxiter(100).seed(42).build().unwrap(),
/// ).expect("optimization failed");
///
/// assert!(result.fun < 0.1);
/// ```
pub fn particle_swarm<F>(func: &F, bounds: &[(f64, f64)], config: PsoConfig) -> Result<PsoReport>
where
    F: Fn(&Array1<f64>) -> f64,
{
    let bounds = Bounds::from_pairs(bounds)?;
    let mut wrapped = |x: &Array1<f64>| -> EvalOutcome { Ok(Evaluation::of(func(x))) };
    let mut pso = ParticleSwarm::new(&mut wrapped, bounds);
    *pso.config_mut() = config;
    pso.solve()
}
