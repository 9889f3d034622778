// src/algorithms/mod.rs

//! Ready-made textbook circuits built only from the gate library.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{QcoinError, Result};
use serde::{Deserialize, Serialize};

/// Two-qubit Bell pair `(|00> + |11>)/√2`, measured.
pub fn bell_pair() -> Result<Circuit> {
    CircuitBuilder::new(2).h(0).cnot(0, 1).build()
}

/// Oracles for the single-qubit Deutsch–Jozsa demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DjOracle {
    /// f(x) = 0; the circuit always measures "0".
    ConstantZero,
    /// f(x) = x, applied as the phase oracle `Z`; the circuit always measures "1".
    BalancedParity,
}

/// `H, [Z], H` on one qubit. The balanced oracle kicks back a phase of
/// `(-1)^x`, which the second H turns into a flip, so the outcome tells the
/// oracle kind apart in one shot.
pub fn deutsch_jozsa(oracle: DjOracle) -> Result<Circuit> {
    let builder = CircuitBuilder::new(1).h(0);
    let builder = match oracle {
        DjOracle::ConstantZero => builder,
        DjOracle::BalancedParity => builder.z(0),
    };
    builder.h(0).build()
}

/// One Grover iteration over two qubits marking `marked` ("00", "01", "10"
/// or "11", qubit 0 first). The marked string is measured with probability 1.
///
/// # Errors
/// `Config` if `marked` is not a two-character bitstring.
pub fn grover_two_qubit(marked: &str) -> Result<Circuit> {
    let bits: Vec<bool> = marked
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(QcoinError::Config(format!("marked state must be a bitstring, got {:?}", marked))),
        })
        .collect::<Result<_>>()?;
    if bits.len() != 2 {
        return Err(QcoinError::Config(format!("marked state must have 2 bits, got {:?}", marked)));
    }

    let flip_zeros = |mut b: CircuitBuilder| {
        for (q, bit) in bits.iter().enumerate() {
            if !bit {
                b = b.x(q);
            }
        }
        b
    };

    // oracle: phase-flip the marked state
    let builder = flip_zeros(CircuitBuilder::new(2).h(0).h(1));
    let builder = flip_zeros(builder.cz(0, 1));

    // diffusion about the uniform superposition
    builder
        .h(0)
        .h(1)
        .x(0)
        .x(1)
        .cz(0, 1)
        .x(0)
        .x(1)
        .h(0)
        .h(1)
        .build()
}

/// Single-qubit states that [`teleportation`] can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeleportPrep {
    Zero,
    One,
    Plus,
    Minus,
}

impl TeleportPrep {
    fn prepare(self, builder: CircuitBuilder, target: usize) -> CircuitBuilder {
        match self {
            TeleportPrep::Zero => builder,
            TeleportPrep::One => builder.x(target),
            TeleportPrep::Plus => builder.h(target),
            TeleportPrep::Minus => builder.x(target).h(target),
        }
    }
}

/// Three-qubit teleportation of `prep` from qubit 0 to qubit 2.
///
/// The classically controlled corrections are replaced by their quantum
/// counterparts, `CNOT(1, 2)` and `CZ(0, 2)`, so no mid-circuit measurement
/// is needed. Afterwards qubit 2 holds the prepared state and qubits 0 and 1
/// are each left in |+>.
pub fn teleportation(prep: TeleportPrep) -> Result<Circuit> {
    let builder = prep.prepare(CircuitBuilder::new(3), 0);
    builder
        // shared Bell pair between qubits 1 and 2
        .h(1)
        .cnot(1, 2)
        // Bell-basis rotation on the sender side
        .cnot(0, 1)
        .h(0)
        // corrections
        .cnot(1, 2)
        .cz(0, 2)
        .build()
}
