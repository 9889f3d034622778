// src/core/state.rs

use super::constants::sim_constants::MAX_QUBITS;
use super::error::{QcoinError, Result};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// Pure state of an n-qubit register as 2^n complex amplitudes.
///
/// Basis index `i` is read as an n-bit number whose most-significant bit is
/// qubit 0. A fresh state is |0...0>; the engine replaces it wholesale after
/// each gate, so a `Statevector` is never observed half-updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Creates |0...0> over `num_qubits` qubits.
    ///
    /// # Errors
    /// `InvalidQubitCount` if `num_qubits` is zero or above [`MAX_QUBITS`].
    pub fn zero(num_qubits: usize) -> Result<Self> {
        check_qubit_count(num_qubits, MAX_QUBITS)?;
        let mut amplitudes = vec![Complex64::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes, num_qubits })
    }

    /// Wraps an explicit amplitude vector. The length must be a power of two
    /// of at least 2. Normalization is not checked here; see
    /// [`crate::validation::check_normalization`].
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let dim = amplitudes.len();
        if dim < 2 || !dim.is_power_of_two() {
            return Err(QcoinError::DimensionMismatch {
                expected: dim.max(2).next_power_of_two(),
                found: dim,
            });
        }
        let num_qubits = dim.trailing_zeros() as usize;
        check_qubit_count(num_qubits, MAX_QUBITS)?;
        Ok(Self { amplitudes, num_qubits })
    }

    /// Engine-internal constructor; the caller guarantees `amplitudes.len() == 2^num_qubits`.
    pub(crate) fn from_parts(num_qubits: usize, amplitudes: Vec<Complex64>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { amplitudes, num_qubits }
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state, `None` if out of range.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// `|a_i|^2` for every basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Statevector, tolerance: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm_sqr() < tolerance * tolerance)
    }
}

impl fmt::Display for Statevector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Statevector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Formats a basis index as an `n_qubits`-wide bitstring, qubit 0 first.
pub fn basis_label(index: usize, n_qubits: usize) -> String {
    format!("{:0width$b}", index, width = n_qubits)
}

pub(crate) fn check_qubit_count(num_qubits: usize, max: usize) -> Result<()> {
    if num_qubits == 0 || num_qubits > max {
        return Err(QcoinError::InvalidQubitCount {
            n_qubits: i64::try_from(num_qubits).unwrap_or(i64::MAX),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_has_unit_amplitude_at_index_zero() {
        let sv = Statevector::zero(3).unwrap();
        assert_eq!(sv.dim(), 8);
        assert_eq!(sv.amplitude(0), Some(Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes()[1..].iter().all(|a| a.is_zero()));
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_qubits_rejected() {
        assert!(matches!(
            Statevector::zero(0),
            Err(QcoinError::InvalidQubitCount { n_qubits: 0, .. })
        ));
    }

    #[test]
    fn too_many_qubits_rejected() {
        assert!(matches!(
            Statevector::zero(MAX_QUBITS + 1),
            Err(QcoinError::InvalidQubitCount { .. })
        ));
    }

    #[test]
    fn from_amplitudes_requires_power_of_two() {
        let amps = vec![Complex64::new(1.0, 0.0); 3];
        assert!(matches!(
            Statevector::from_amplitudes(amps),
            Err(QcoinError::DimensionMismatch { expected: 4, found: 3 })
        ));
        let sv = Statevector::from_amplitudes(vec![Complex64::zero(); 8]).unwrap();
        assert_eq!(sv.num_qubits(), 3);
    }

    #[test]
    fn basis_label_is_msb_first() {
        assert_eq!(basis_label(1, 3), "001");
        assert_eq!(basis_label(4, 3), "100");
        assert_eq!(basis_label(0, 1), "0");
    }
}
