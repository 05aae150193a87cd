/// Stagnation check over the global-best trajectory.
///
/// Compares the mean over the most recent `window` iterations against the
/// mean over the `window` iterations immediately before them (the windows
/// do not overlap). Returns `true` once the absolute difference drops
/// below `tol`. Needs at least `2 * window` recorded iterations.
pub(crate) fn plateau_reached(trajectory: &[f64], window: usize, tol: f64) -> bool {
    if window == 0 {
        return false;
    }
    let n = trajectory.len();
    if n < 2 * window {
        return false;
    }
    let prev = mean(&trajectory[n - 2 * window..n - window]);
    let curr = mean(&trajectory[n - window..]);
    (curr - prev).abs() < tol
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
