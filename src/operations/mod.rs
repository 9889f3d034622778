// src/operations/mod.rs

//! Gate operations a circuit is made of.
//!
//! Each kind carries exactly the payload it needs, so a rotation can never be
//! confused with a controlled gate. Loosely typed `(tag, operands)` input is
//! converted once, at the boundary, by [`Operation::from_tag`].

use crate::core::{QcoinError, QubitId, Result};
use crate::gates::{self, FixedGate, Matrix2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// A fixed single-qubit gate (H, X, Y, Z, S, T) on `target`.
    Gate {
        /// Which gate.
        gate: FixedGate,
        /// Qubit it acts on.
        target: QubitId,
    },

    /// `RY(theta)` on `target`.
    Rotation {
        /// Rotation angle in radians.
        theta: f64,
        /// Qubit it acts on.
        target: QubitId,
    },

    /// Controlled-NOT: flips `target` on the basis states where `control` is 1.
    ControlledNot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
}

impl Operation {
    /// Shorthand for a fixed gate.
    pub fn gate(gate: FixedGate, target: usize) -> Self {
        Operation::Gate { gate, target: QubitId(target) }
    }

    /// Shorthand for `RY(theta)`.
    pub fn ry(theta: f64, target: usize) -> Self {
        Operation::Rotation { theta, target: QubitId(target) }
    }

    /// Shorthand for CNOT.
    pub fn cnot(control: usize, target: usize) -> Self {
        Operation::ControlledNot {
            control: QubitId(control),
            target: QubitId(target),
        }
    }

    /// Builds an operation from a textual gate tag.
    ///
    /// Tags are case-insensitive: `H X Y Z S T` take one qubit; `RY` takes
    /// one parameter and an optional qubit (qubit 0 when omitted); `CNOT`/`CX`
    /// take control then target. Indices are checked later, against a register.
    ///
    /// # Errors
    /// `UnknownGate` for any other tag, `MissingOperand` when qubits or the
    /// angle are absent.
    pub fn from_tag(tag: &str, qubits: &[usize], params: &[f64]) -> Result<Self> {
        let upper = tag.trim().to_ascii_uppercase();
        match upper.as_str() {
            "RY" => {
                let theta = *params.first().ok_or_else(|| missing(tag, 1, 0))?;
                let target = qubits.first().copied().unwrap_or(0);
                Ok(Operation::ry(theta, target))
            }
            "CNOT" | "CX" => match qubits {
                [control, target, ..] => Ok(Operation::cnot(*control, *target)),
                _ => Err(missing(tag, 2, qubits.len())),
            },
            _ => {
                let gate: FixedGate = tag.parse()?;
                let target = *qubits.first().ok_or_else(|| missing(tag, 1, 0))?;
                Ok(Operation::gate(gate, target))
            }
        }
    }

    /// Every qubit the operation names, control first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } | Operation::Rotation { target, .. } => vec![*target],
            Operation::ControlledNot { control, target } => vec![*control, *target],
        }
    }

    /// The 2x2 unitary for single-qubit kinds, `None` for CNOT.
    pub fn single_qubit_matrix(&self) -> Option<(QubitId, Matrix2)> {
        match self {
            Operation::Gate { gate, target } => Some((*target, gate.matrix())),
            Operation::Rotation { theta, target } => Some((*target, gates::ry(*theta))),
            Operation::ControlledNot { .. } => None,
        }
    }

    /// Checks every operand against an `n_qubits` register.
    ///
    /// # Errors
    /// `InvalidOperandIndex` for an index `>= n_qubits`, `CoincidentOperands`
    /// when a CNOT names one qubit twice.
    pub fn validate(&self, n_qubits: usize) -> Result<()> {
        for q in self.qubits() {
            if q.index() >= n_qubits {
                return Err(QcoinError::InvalidOperandIndex {
                    qubit: i64::try_from(q.index()).unwrap_or(i64::MAX),
                    n_qubits,
                });
            }
        }
        if let Operation::ControlledNot { control, target } = self {
            if control == target {
                return Err(QcoinError::CoincidentOperands { qubit: control.index() });
            }
        }
        Ok(())
    }
}

fn missing(tag: &str, expected: usize, found: usize) -> QcoinError {
    QcoinError::MissingOperand {
        tag: tag.to_string(),
        expected,
        found,
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { gate, target } => write!(f, "{} {}", gate, target),
            Operation::Rotation { theta, target } => write!(f, "RY({:.4}) {}", theta, target),
            Operation::ControlledNot { control, target } => write!(f, "CNOT {} -> {}", control, target),
        }
    }
}
