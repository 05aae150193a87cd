//! Shared registry of benchmark functions for the demo runner and tests.

use ndarray::Array1;
use std::collections::HashMap;

/// Test function type definition
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Sphere function: f(x) = sum(x_i^2), global minimum 0 at the origin.
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Rosenbrock function, global minimum 0 at (1, ..., 1).
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    let mut total = 0.0;
    for i in 0..x.len().saturating_sub(1) {
        total += 100.0 * (x[i + 1] - x[i] * x[i]).powi(2) + (1.0 - x[i]).powi(2);
    }
    total
}

/// Rastrigin function, highly multimodal, global minimum 0 at the origin.
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    a * x.len() as f64
        + x.iter()
            .map(|&xi| xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function (2D form generalized to n dimensions), global minimum
/// 0 at the origin.
pub fn ackley(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let s = x.iter().map(|&xi| xi * xi).sum::<f64>() / n;
    let c = x
        .iter()
        .map(|&xi| (2.0 * std::f64::consts::PI * xi).cos())
        .sum::<f64>()
        / n;
    -20.0 * (-0.2 * s.sqrt()).exp() - c.exp() + 20.0 + std::f64::consts::E
}

/// Function registry mapping names to function pointers.
pub fn create_function_registry() -> HashMap<&'static str, TestFunction> {
    let mut registry: HashMap<&'static str, TestFunction> = HashMap::new();
    registry.insert("sphere", sphere);
    registry.insert("rosenbrock", rosenbrock);
    registry.insert("rastrigin", rastrigin);
    registry.insert("ackley", ackley);
    registry
}

/// Canonical per-dimension search interval for a registered function.
pub fn default_domain(name: &str) -> Option<(f64, f64)> {
    match name {
        "sphere" => Some((-5.0, 5.0)),
        "rosenbrock" => Some((-2.048, 2.048)),
        "rastrigin" => Some((-5.12, 5.12)),
        "ackley" => Some((-5.0, 5.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_known_minima() {
        assert_eq!(sphere(&array![0.0, 0.0]), 0.0);
        assert_eq!(rosenbrock(&array![1.0, 1.0]), 0.0);
        assert!(rastrigin(&array![0.0, 0.0]).abs() < 1e-12);
        assert!(ackley(&array![0.0, 0.0]).abs() < 1e-12);
    }

    #[test]
    fn test_registry_covers_domains() {
        let registry = create_function_registry();
        for name in registry.keys() {
            assert!(
                default_domain(name).is_some(),
                "no domain registered for {name}"
            );
        }
        assert!(default_domain("no_such_function").is_none());
    }
}
