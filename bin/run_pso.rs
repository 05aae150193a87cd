use clap::Parser;
use ::particle_swarm::function_registry::{create_function_registry, default_domain};
use ::particle_swarm::{particle_swarm, PsoConfigBuilder};
use std::fmt::Write as FmtWrite;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_pso",
    about = "Optimize a selected benchmark function with Particle Swarm Optimization"
)]
struct Cli {
    /// Name of the benchmark function to optimize (use --list-functions to see available options)
    #[arg(long)]
    function: Option<String>,

    /// Dimensionality of the problem
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// Number of particles
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Maximum number of iterations for the optimizer
    #[arg(long, default_value_t = 100)]
    maxiter: usize,

    /// Inertia weight applied to the previous velocity
    #[arg(long, default_value_t = 0.4)]
    inertia: f64,

    /// Cognitive weight pulling towards each particle's personal best
    #[arg(long, default_value_t = 2.02)]
    cognitive: f64,

    /// Social weight pulling towards the global best
    #[arg(long, default_value_t = 2.02)]
    social: f64,

    /// Plateau detection window size (0 disables the check)
    #[arg(long, default_value_t = 5)]
    plateau_window: usize,

    /// Plateau detection tolerance on the window-mean difference
    #[arg(long, default_value_t = 1e-4)]
    plateau_tol: f64,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Print per-iteration progress
    #[arg(long)]
    disp: bool,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    let registry = create_function_registry();

    if args.list_functions {
        let mut names: Vec<&&str> = registry.keys().collect();
        names.sort();
        println!("Available test functions ({}):", names.len());
        for name in names {
            let (lo, hi) = default_domain(name).unwrap_or((-5.0, 5.0));
            println!("- {name} (domain [{lo}, {hi}])");
        }
        return;
    }

    let Some(function_name) = args.function.as_deref() else {
        eprintln!("Error: --function must be provided unless --list-functions is used.");
        process::exit(2);
    };

    let Some(func) = registry.get(function_name) else {
        eprintln!(
            "Error: unknown function '{}'. Use --list-functions to see available options.",
            function_name
        );
        process::exit(2);
    };

    if args.dim == 0 {
        eprintln!("Error: problem dimension must be greater than zero.");
        process::exit(2);
    }

    let (lo, hi) = default_domain(function_name).unwrap_or((-5.0, 5.0));
    let bounds = vec![(lo, hi); args.dim];

    let mut builder = PsoConfigBuilder::new()
        .pop(args.population)
        .maxiter(args.maxiter)
        .inertia(args.inertia)
        .cognitive(args.cognitive)
        .social(args.social)
        .plateau_window(args.plateau_window)
        .plateau_tol(args.plateau_tol)
        .disp(args.disp);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let config = match builder.build() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    };

    println!(
        "Optimizing '{}' in {} dimensions over [{}, {}] with {} particles",
        function_name, args.dim, lo, hi, args.population
    );

    let start = Instant::now();
    let report = match particle_swarm(func, &bounds, config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: optimization failed: {}", err);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    println!("\nOptimization completed in {:.2?}", elapsed);
    println!("Status: {}", report.message);
    println!(
        "Iterations: {} ({} objective evaluations)",
        report.nit, report.nfev
    );
    println!("Best objective: {:.6e}", report.fun);

    let mut best_vector = String::new();
    for (i, value) in report.x.iter().enumerate() {
        if i > 0 {
            best_vector.push_str(", ");
        }
        let _ = write!(best_vector, "{value:.6}");
    }
    println!("Best parameters: [{}]", best_vector);

    let trajectory = report.history.best_fitness_trajectory();
    let tail = trajectory.len().saturating_sub(10);
    println!("Global-best trajectory (last {} iters):", trajectory.len() - tail);
    for (offset, value) in trajectory[tail..].iter().enumerate() {
        println!("  iter {:4}  gbest={:.6e}", tail + offset + 1, value);
    }
}
