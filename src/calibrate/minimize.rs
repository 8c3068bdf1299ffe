//! Derivative-free 1-D minimization over an interval.

use crate::core::error::{Result, TailError};

/// Find the minimum of a function believed continuous and unimodal on
/// `[lo, hi]`.
///
/// Probes two interior points `m1 = lo + d`, `m2 = hi − d` with
/// `d = (hi − lo)/2.1`, discards the side with the larger probe value and
/// repeats until the interval width is at most `epsilon` or `max_iter`
/// iterations have run; returns the midpoint of the final interval.
///
/// # Precondition
/// If `f` is not unimodal on the interval, the result is an unspecified
/// local minimum. This is documented behavior, not an error: the caller
/// owns the shape assumption.
pub fn find_min<F>(mut f: F, lo: f64, hi: f64, epsilon: f64, max_iter: usize) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(TailError::invalid_parameter(format!(
            "search interval must satisfy lo < hi (finite), got [{lo}, {hi}]"
        )));
    }
    if !(epsilon > 0.0) {
        return Err(TailError::invalid_parameter(format!(
            "epsilon must be positive, got {epsilon}"
        )));
    }
    if max_iter == 0 {
        return Err(TailError::invalid_parameter("max_iter must be at least 1"));
    }

    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..max_iter {
        if hi - lo <= epsilon {
            break;
        }
        let d = (hi - lo) / 2.1;
        let m1 = lo + d;
        let m2 = hi - d;
        if f(m1) > f(m2) {
            lo = m1;
        } else {
            hi = m2;
        }
    }
    Ok(0.5 * (lo + hi))
}
