//! Log-density kernels for the supported likelihood families.
//!
//! These are plain log densities; likelihood-ratio scoring composes them.
//! Out-of-support points return `NEG_INFINITY` (log of a zero density);
//! nonsensical inputs (NaN, non-positive dispersion or rate) return NaN so
//! callers can reject them instead of folding garbage into a statistic.

const LOG_SQRT_2PI: f64 = 0.918_938_533_204_672_8; // 0.5 * ln(2*pi)

/// Log-density of Exponential(rate) at `x`: `ln(rate) - rate * x`.
///
/// Support is `x >= 0`. Returns NaN for a NaN `x` or a rate outside
/// `(0, inf)`.
pub fn exponential_log_pdf(x: f64, rate: f64) -> f64 {
    if x.is_nan() || rate.is_nan() || rate <= 0.0 || rate.is_infinite() {
        return f64::NAN;
    }
    if x < 0.0 {
        return f64::NEG_INFINITY;
    }
    rate.ln() - rate * x
}

/// Log-density of Normal(loc, sigma) at `x`.
///
/// Returns NaN for a NaN `x`/`loc` or a dispersion outside `(0, inf)`.
pub fn normal_log_pdf(x: f64, loc: f64, sigma: f64) -> f64 {
    if x.is_nan() || loc.is_nan() || sigma.is_nan() || sigma <= 0.0 || sigma.is_infinite() {
        return f64::NAN;
    }
    let z = (x - loc) / sigma;
    -sigma.ln() - LOG_SQRT_2PI - 0.5 * z * z
}
