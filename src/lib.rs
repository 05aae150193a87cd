//! Particle Swarm Optimization library.
//!
//! This crate provides a Rust implementation of the classic
//! inertia-weight Particle Swarm Optimization (PSO) algorithm for
//! bounded continuous minimization. It is built for objectives that are
//! expensive, opaque black boxes (typically an external simulation tool
//! invoked behind the objective closure) and therefore evaluates
//! strictly sequentially, tolerates evaluation failures, and records the
//! full run history for downstream reporting.
//!
//! # Features
//!
//! - Classic velocity rule with fixed inertia, cognitive and social
//!   weights and fresh per-dimension random draws
//! - Saturating position clamp into the search box before every
//!   objective call
//! - Structured evaluation results: fitness plus auxiliary named metrics
//! - Reserved fitness ceiling substituted for failed or non-finite
//!   evaluations; the run never aborts mid-search
//! - Optional seed vector pinning particle 0 to a baseline design
//! - Stopping on iteration cap or plateau of the global-best trajectory
//! - Per-iteration history (all positions + global-best trajectory)
//!   returned with the result
//!
//! # Example
//!
//! ```rust
//! use ::particle_swarm::{particle_swarm, PsoConfigBuilder};
//!
//! // Minimize the sphere function: f(x) = sum(x_i^2)
//! let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
//! let config = PsoConfigBuilder::new()
//!     .pop(20)
//!     .maxiter(200)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let report = particle_swarm(
//!     &|x| x.iter().map(|&xi| xi * xi).sum(),
//!     &bounds,
//!     config,
//! ).expect("optimization should succeed");
//!
//! assert!(report.fun < 0.1);
//! ```
#![doc = include_str!("../README.md")]
#![doc = include_str!("../REFERENCES.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{PsoError, Result};

use std::collections::BTreeMap;
use std::fmt;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Search-space box and clamp policy.
pub mod bounds;
/// One candidate solution and its velocity-rule update.
pub mod particle;
/// The particle collection and global-best bookkeeping.
pub mod swarm;
/// Per-iteration run history returned with the result.
pub mod history;

/// Initial swarm construction and seeding policy.
mod init_swarm;
/// Plateau detection over the global-best trajectory.
mod plateau;

/// Registry of standard test functions for benchmarking.
pub mod function_registry;
/// SciPy-flavored convenience entry point.
pub mod particle_swarm;

pub use bounds::Bounds;
pub use history::{IterationSnapshot, RunHistory};
pub use particle::Particle;
pub use particle_swarm::particle_swarm;
pub use swarm::Swarm;

/// Reserved fitness ceiling substituted for failed or non-finite
/// evaluations.
///
/// The global best starts at this value, and best updates require strict
/// improvement, so a sentinel evaluation can never be mistaken for a
/// legitimate best. Objectives must return fitness values below this
/// ceiling.
pub const FITNESS_CEILING: f64 = 1e30;

/// Result of one objective evaluation: a scalar fitness (lower is
/// better) plus auxiliary named metrics attached to that evaluation.
///
/// The metrics map is opaque to the engine; it is carried along with the
/// global best so the caller can inspect domain quantities (lift/drag
/// ratios, angles, ...) for the best design without re-evaluating.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Scalar fitness, lower is better. Must be finite and below
    /// [`FITNESS_CEILING`] to be considered for best-tracking.
    pub fitness: f64,
    /// Open-ended auxiliary metrics associated with this evaluation.
    pub metrics: BTreeMap<String, f64>,
}

impl Evaluation {
    /// An evaluation carrying only a fitness value.
    pub fn of(fitness: f64) -> Self {
        Self {
            fitness,
            metrics: BTreeMap::new(),
        }
    }

    /// Attaches a named metric, builder style.
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub(crate) fn sentinel() -> Self {
        Self::of(FITNESS_CEILING)
    }
}

/// Signalled by the objective when the underlying evaluator could not
/// produce a result. Recovered by the engine, never fatal.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct EvalFailure {
    /// Human-readable description of what went wrong.
    pub reason: String,
}

impl EvalFailure {
    /// Creates a failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of a single objective call.
pub type EvalOutcome = std::result::Result<Evaluation, EvalFailure>;

/// Configuration for the Particle Swarm optimizer.
///
/// All coefficients are fixed for the whole run. Defaults follow the
/// usual aggressive-exploration setup: `inertia = 0.4`,
/// `cognitive = social = 2.02`.
#[derive(Debug, Clone)]
pub struct PsoConfig {
    /// Number of particles (fixed for the run, must be >= 1).
    pub pop: usize,
    /// Maximum number of iterations. At least one iteration always runs.
    pub maxiter: usize,
    /// Inertia weight applied to the previous velocity.
    pub inertia: f64,
    /// Cognitive weight pulling towards the particle's personal best.
    pub cognitive: f64,
    /// Social weight pulling towards the swarm's global best.
    pub social: f64,
    /// Window size `W` for plateau detection; the means of the last `W`
    /// and the preceding `W` iterations are compared. `0` disables the
    /// check.
    pub plateau_window: usize,
    /// Absolute tolerance on the window-mean difference below which the
    /// swarm is considered stagnant.
    pub plateau_tol: f64,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Optional starting position for particle 0, used to guarantee a
    /// known-good baseline design is always evaluated first.
    pub x0: Option<Array1<f64>>,
    /// Print per-iteration progress to stderr.
    pub disp: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            pop: 20,
            maxiter: 100,
            inertia: 0.4,
            cognitive: 2.02,
            social: 2.02,
            plateau_window: 5,
            plateau_tol: 1e-4,
            seed: None,
            x0: None,
            disp: false,
        }
    }
}

/// Fluent builder for [`PsoConfig`].
///
/// # Example
///
/// ```rust
/// use particle_swarm::PsoConfigBuilder;
///
/// let config = PsoConfigBuilder::new()
///     .pop(30)
///     .maxiter(50)
///     .inertia(0.4)
///     .cognitive(2.02)
///     .social(2.02)
///     .plateau_window(5)
///     .plateau_tol(1e-4)
///     .seed(4)
///     .build()
///     .expect("invalid config");
/// assert_eq!(config.pop, 30);
/// ```
pub struct PsoConfigBuilder {
    cfg: PsoConfig,
}

impl Default for PsoConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PsoConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: PsoConfig::default(),
        }
    }
    /// Sets the number of particles.
    pub fn pop(mut self, v: usize) -> Self {
        self.cfg.pop = v;
        self
    }
    /// Sets the maximum number of iterations.
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    /// Sets the inertia weight.
    pub fn inertia(mut self, v: f64) -> Self {
        self.cfg.inertia = v;
        self
    }
    /// Sets the cognitive weight.
    pub fn cognitive(mut self, v: f64) -> Self {
        self.cfg.cognitive = v;
        self
    }
    /// Sets the social weight.
    pub fn social(mut self, v: f64) -> Self {
        self.cfg.social = v;
        self
    }
    /// Sets the plateau detection window size.
    pub fn plateau_window(mut self, v: usize) -> Self {
        self.cfg.plateau_window = v;
        self
    }
    /// Sets the plateau detection tolerance.
    pub fn plateau_tol(mut self, v: f64) -> Self {
        self.cfg.plateau_tol = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Sets the starting position for particle 0.
    pub fn x0(mut self, v: Array1<f64>) -> Self {
        self.cfg.x0 = Some(v);
        self
    }
    /// Enables/disables progress display.
    pub fn disp(mut self, v: bool) -> Self {
        self.cfg.disp = v;
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PsoError::PopulationTooSmall` if `pop < 1`.
    pub fn build(self) -> Result<PsoConfig> {
        if self.cfg.pop < 1 {
            return Err(PsoError::PopulationTooSmall {
                pop_size: self.cfg.pop,
            });
        }
        Ok(self.cfg)
    }
}

/// Result/report of a PSO run.
///
/// The run always completes with a well-formed report; the only hard
/// failures are configuration errors raised before any iteration begins.
#[derive(Clone)]
pub struct PsoReport {
    /// The best position found.
    pub x: Array1<f64>,
    /// The fitness at the best position.
    pub fun: f64,
    /// Auxiliary metrics recorded when the best was set.
    pub metrics: BTreeMap<String, f64>,
    /// Whether the run stopped on plateau detection (as opposed to the
    /// iteration cap).
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Number of iterations performed.
    pub nit: usize,
    /// Number of objective evaluations performed (including
    /// initialization).
    pub nfev: usize,
    /// Full per-iteration history of the run.
    pub history: RunHistory,
}

impl fmt::Debug for PsoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PsoReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("metrics", &self.metrics)
            .field("success", &self.success)
            .field("message", &self.message)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field("history", &format!("{} iterations", self.history.len()))
            .finish()
    }
}

/// Particle Swarm optimizer.
///
/// A population-based stochastic optimizer for bounded continuous
/// functions with expensive, possibly failing objectives. Use
/// [`ParticleSwarm::new`] to create an instance, configure with
/// [`config_mut`](Self::config_mut), then call [`solve`](Self::solve).
///
/// Evaluations are dispatched one at a time on the calling thread: the
/// objective is assumed to wrap an external evaluator holding exclusive,
/// non-reentrant state, so no two evaluations ever overlap.
pub struct ParticleSwarm<'a, F>
where
    F: FnMut(&Array1<f64>) -> EvalOutcome,
{
    func: &'a mut F,
    bounds: Bounds,
    config: PsoConfig,
}

impl<'a, F> ParticleSwarm<'a, F>
where
    F: FnMut(&Array1<f64>) -> EvalOutcome,
{
    /// Creates a new PSO optimizer with objective `func` searching inside
    /// `bounds`.
    pub fn new(func: &'a mut F, bounds: Bounds) -> Self {
        Self {
            func,
            bounds,
            config: PsoConfig::default(),
        }
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut PsoConfig {
        &mut self.config
    }

    /// Runs the optimization and returns a report.
    ///
    /// # Errors
    ///
    /// Returns `PsoError::PopulationTooSmall` or
    /// `PsoError::SeedDimensionMismatch` before any objective evaluation
    /// is dispatched. Once the run has started it always completes.
    pub fn solve(&mut self) -> Result<PsoReport> {
        let n = self.bounds.len();

        if self.config.pop < 1 {
            return Err(PsoError::PopulationTooSmall {
                pop_size: self.config.pop,
            });
        }
        if let Some(x0) = &self.config.x0 {
            if x0.len() != n {
                return Err(PsoError::SeedDimensionMismatch {
                    expected: n,
                    got: x0.len(),
                });
            }
        }

        let mut rng: StdRng = match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        if self.config.disp {
            eprintln!(
                "PSO init: {} dimensions, population={}, maxiter={}",
                n, self.config.pop, self.config.maxiter
            );
            eprintln!(
                "  inertia={:.3}, cognitive={:.3}, social={:.3}",
                self.config.inertia, self.config.cognitive, self.config.social
            );
            eprintln!(
                "  plateau: window={}, tol={:.2e}",
                self.config.plateau_window, self.config.plateau_tol
            );
        }

        let mut swarm = init_swarm::init_swarm(
            self.func,
            &self.bounds,
            self.config.pop,
            self.config.x0.as_ref(),
            &mut rng,
        );
        let mut nfev = self.config.pop;

        if self.config.disp {
            eprintln!("  initial best: fitness={:.6e}", swarm.best_fitness);
        }

        let mut history = RunHistory::new();
        let mut trajectory: Vec<f64> = Vec::new();
        let mut success = false;
        let mut message = String::new();
        let mut nit = 0;

        // At least one full iteration always runs, so a degenerate cap
        // cannot produce an empty history.
        loop {
            let iter = nit + 1;
            let snapshot = swarm.iterate(
                self.func,
                &self.bounds,
                self.config.inertia,
                self.config.cognitive,
                self.config.social,
                iter,
                &mut rng,
            );
            nfev += swarm.len();
            nit = iter;

            if self.config.disp {
                eprintln!("PSO iter {:4}  gbest={:.6e}", iter, snapshot.best_fitness);
            }

            trajectory.push(snapshot.best_fitness);
            history.push(snapshot);

            if plateau::plateau_reached(
                &trajectory,
                self.config.plateau_window,
                self.config.plateau_tol,
            ) {
                success = true;
                message = format!(
                    "Converged: global best stagnant over {} iterations (tol={:.2e})",
                    2 * self.config.plateau_window,
                    self.config.plateau_tol
                );
                break;
            }
            if nit >= self.config.maxiter {
                message = format!("Maximum iterations reached: {}", self.config.maxiter);
                break;
            }
        }

        if self.config.disp {
            eprintln!("PSO finished: {}", message);
        }

        Ok(PsoReport {
            x: swarm.best_position.clone(),
            fun: swarm.best_fitness,
            metrics: swarm.best_metrics.clone(),
            success,
            message,
            nit,
            nfev,
            history,
        })
    }
}
