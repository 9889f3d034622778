// src/core/qubit.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position of a qubit inside a register.
///
/// Qubit 0 occupies the left-most (most-significant) tensor factor, so it is
/// also the first character of every bitstring the crate produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Bit position of this qubit inside a basis index of an `n_qubits` register,
    /// counted from the least-significant end.
    pub(crate) fn bit_position(self, n_qubits: usize) -> usize {
        n_qubits - 1 - self.0
    }
}

impl From<usize> for QubitId {
    fn from(index: usize) -> Self {
        QubitId(index)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
