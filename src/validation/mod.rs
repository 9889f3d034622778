// src/validation/mod.rs

//! Sanity checks on statevectors.

use crate::core::{NORM_TOLERANCE, QcoinError, Result, Statevector};

/// `| sum |a_i|^2 - 1 |`; NaN if any amplitude is non-finite.
pub fn normalization_drift(state: &Statevector) -> f64 {
    (state.norm_sqr() - 1.0).abs()
}

/// Checks that the state is normalized.
///
/// # Arguments
/// * `state` - The `Statevector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to [`NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QcoinError::Incoherence)` otherwise, including when the norm is NaN or infinite.
pub fn check_normalization(state: &Statevector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if !norm_sqr.is_finite() || (norm_sqr - 1.0).abs() > effective_tolerance {
        Err(QcoinError::Incoherence { norm_sqr })
    } else {
        Ok(())
    }
}

/// Full validation: every amplitude finite and the norm within tolerance.
pub fn validate_state(state: &Statevector, norm_tolerance: Option<f64>) -> Result<()> {
    if state.amplitudes().iter().any(|a| !a.re.is_finite() || !a.im.is_finite()) {
        return Err(QcoinError::Incoherence {
            norm_sqr: state.norm_sqr(),
        });
    }
    check_normalization(state, norm_tolerance)
}
