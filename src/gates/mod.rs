// src/gates/mod.rs

//! Fixed 2x2 unitaries for the standard single-qubit gates, the `RY`
//! rotation, and the index permutation implementing CNOT.
//!
//! Matrices are row-major: `m[row][col]`, acting on the column vector
//! `(amp|0>, amp|1>)` of the target qubit.

use crate::core::{QcoinError, QubitId};
use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

/// A 2x2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Identity.
pub fn identity() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::one()],
    ]
}

/// Hadamard.
pub fn h() -> Matrix2 {
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[s, s], [s, -s]]
}

/// Pauli X (bit flip).
pub fn x() -> Matrix2 {
    [
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()],
    ]
}

/// Pauli Y.
pub fn y() -> Matrix2 {
    [
        [Complex64::zero(), -Complex64::i()],
        [Complex64::i(), Complex64::zero()],
    ]
}

/// Pauli Z (phase flip).
pub fn z() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), -Complex64::one()],
    ]
}

/// Phase gate, `diag(1, i)`.
pub fn s() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::i()],
    ]
}

/// π/8 gate, `diag(1, e^{iπ/4})`.
pub fn t() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, FRAC_PI_4)],
    ]
}

/// Rotation about the Y axis.
///
/// ```text
/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
/// ```
///
/// A non-finite angle yields NaN entries; the engine does not guard against it.
pub fn ry(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_a, 0.0), Complex64::new(-sin_a, 0.0)],
        [Complex64::new(sin_a, 0.0), Complex64::new(cos_a, 0.0)],
    ]
}

/// The fixed (parameter-free) single-qubit gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedGate {
    /// Hadamard.
    H,
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z.
    Z,
    /// Phase (√Z).
    S,
    /// π/8 (√S).
    T,
}

impl FixedGate {
    /// All fixed gates, in library order.
    pub const ALL: [FixedGate; 6] = [
        FixedGate::H,
        FixedGate::X,
        FixedGate::Y,
        FixedGate::Z,
        FixedGate::S,
        FixedGate::T,
    ];

    /// The gate's unitary.
    pub fn matrix(self) -> Matrix2 {
        match self {
            FixedGate::H => h(),
            FixedGate::X => x(),
            FixedGate::Y => y(),
            FixedGate::Z => z(),
            FixedGate::S => s(),
            FixedGate::T => t(),
        }
    }

    /// One-letter tag, also used by circuit diagrams.
    pub fn symbol(self) -> &'static str {
        match self {
            FixedGate::H => "H",
            FixedGate::X => "X",
            FixedGate::Y => "Y",
            FixedGate::Z => "Z",
            FixedGate::S => "S",
            FixedGate::T => "T",
        }
    }
}

impl fmt::Display for FixedGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FixedGate {
    type Err = QcoinError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(FixedGate::H),
            "X" => Ok(FixedGate::X),
            "Y" => Ok(FixedGate::Y),
            "Z" => Ok(FixedGate::Z),
            "S" => Ok(FixedGate::S),
            "T" => Ok(FixedGate::T),
            _ => Err(QcoinError::UnknownGate { tag: tag.to_string() }),
        }
    }
}

/// Destination of basis index `index` under CNOT(control, target) on an
/// `n_qubits` register: the target bit flips iff the control bit is 1.
pub fn cnot_permute(index: usize, control: QubitId, target: QubitId, n_qubits: usize) -> usize {
    let control_mask = 1usize << control.bit_position(n_qubits);
    let target_mask = 1usize << target.bit_position(n_qubits);
    if index & control_mask != 0 {
        index ^ target_mask
    } else {
        index
    }
}

/// Checks `M^† M = I` within `tolerance`.
pub fn is_unitary(m: &Matrix2, tolerance: f64) -> bool {
    for row in 0..2 {
        for col in 0..2 {
            let entry: Complex64 = (0..2).map(|k| m[k][row].conj() * m[k][col]).sum();
            let expected = if row == col { Complex64::one() } else { Complex64::zero() };
            if (entry - expected).norm() > tolerance {
                return false;
            }
        }
    }
    true
}

/// Kronecker product of two row-major square matrices given as flat vectors.
pub fn kron(a: &[Complex64], a_dim: usize, b: &[Complex64], b_dim: usize) -> Vec<Complex64> {
    let dim = a_dim * b_dim;
    let mut out = vec![Complex64::zero(); dim * dim];
    for ar in 0..a_dim {
        for ac in 0..a_dim {
            let av = a[ar * a_dim + ac];
            if av.is_zero() {
                continue;
            }
            for br in 0..b_dim {
                for bc in 0..b_dim {
                    let row = ar * b_dim + br;
                    let col = ac * b_dim + bc;
                    out[row * dim + col] = av * b[br * b_dim + bc];
                }
            }
        }
    }
    out
}

/// `m_0 ⊗ m_1 ⊗ ... ⊗ m_{n-1}` as a flat row-major 2^n x 2^n matrix.
/// The first factor is the most-significant one.
pub fn kron_n(factors: &[Matrix2]) -> Vec<Complex64> {
    let mut acc = vec![Complex64::one()];
    let mut dim = 1;
    for m in factors {
        let flat = [m[0][0], m[0][1], m[1][0], m[1][1]];
        acc = kron(&acc, dim, &flat, 2);
        dim *= 2;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-12;

    #[test]
    fn fixed_gates_are_unitary() {
        for gate in FixedGate::ALL {
            assert!(is_unitary(&gate.matrix(), TOL), "{} is not unitary", gate);
        }
    }

    #[test]
    fn ry_is_unitary_for_several_angles() {
        for theta in [0.0, 0.9, PI / 3.0, PI, -2.5, 7.0] {
            assert!(is_unitary(&ry(theta), TOL), "RY({}) is not unitary", theta);
        }
    }

    #[test]
    fn ry_pi_maps_zero_to_one() {
        let m = ry(PI);
        assert!(m[0][0].norm() < TOL);
        assert!((m[1][0] - Complex64::one()).norm() < TOL);
    }

    #[test]
    fn t_squared_is_s() {
        let t = t();
        let t2 = t[1][1] * t[1][1];
        assert!((t2 - s()[1][1]).norm() < TOL);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!("h".parse::<FixedGate>().unwrap(), FixedGate::H);
        match "Q".parse::<FixedGate>() {
            Err(QcoinError::UnknownGate { tag }) => assert_eq!(tag, "Q"),
            other => panic!("expected UnknownGate, got {:?}", other),
        }
    }

    #[test]
    fn cnot_permutation_uses_msb_first_ordering() {
        // |10> (index 2) -> |11> (index 3) with control 0, target 1
        assert_eq!(cnot_permute(2, QubitId(0), QubitId(1), 2), 3);
        assert_eq!(cnot_permute(3, QubitId(0), QubitId(1), 2), 2);
        // control clear: untouched
        assert_eq!(cnot_permute(1, QubitId(0), QubitId(1), 2), 1);
    }

    #[test]
    fn kron_n_places_first_factor_most_significant() {
        // X ⊗ I maps |00> (col 0) to |10> (row 2)
        let m = kron_n(&[x(), identity()]);
        assert_eq!(m.len(), 16);
        assert_eq!(m[2 * 4], Complex64::one());
        assert_eq!(m[0], Complex64::zero());
    }
}
