// src/lib.rs

//! `qcoin` - a small statevector quantum simulator
//!
//! Circuits of single-qubit gates (H, X, Y, Z, S, T, RY) and CNOT run on a
//! dense vector of 2^n complex amplitudes, then are measured either by
//! sampling shots or as exact expected counts. Qubit 0 is the most
//! significant bit of a basis index and the first character of a bitstring.

pub mod algorithms;
pub mod circuits;
pub mod config;
pub mod core;
pub mod gates;
pub mod goals;
pub mod operations;
pub mod progress;
pub mod request;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use config::SimulatorConfig;
pub use crate::core::{QcoinError, QubitId, Result, Statevector};
pub use gates::FixedGate;
pub use goals::{Goal, GoalOutcome, Level};
pub use operations::Operation;
pub use progress::ProgressRecord;
pub use request::{CircuitRequest, Step};
pub use simulation::{Counts, MeasurementMode, RunResult, Simulator, StatevectorEngine};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell pair
// H on qubit 0 then CNOT 0 -> 1; only the correlated outcomes appear.
/// ```
/// use qcoin::{CircuitBuilder, QcoinError, Simulator, SimulatorConfig};
///
/// let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build()?;
/// let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(7))?;
///
/// let result = simulator.run(&circuit, 1000)?;
/// println!("Circuit:\n{}", circuit);
/// println!("{}", result);
///
/// assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
/// assert_eq!(result.counts.get("01") + result.counts.get("10"), 0);
/// # Ok::<(), QcoinError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Tagged steps from a host
// Loosely typed input is validated into a circuit; bad tags are rejected.
/// ```
/// use qcoin::{CircuitRequest, QcoinError, Simulator};
///
/// let request = CircuitRequest::from_json(
///     r#"{"n_qubits": 1, "steps": [{"gate": "RY", "qubits": [0], "params": [3.141592653589793]}],
///         "shots": 100, "mode": "exact"}"#,
/// )?;
/// let result = request.run(&Simulator::new())?;
/// assert_eq!(result.counts.get("1"), 100);
///
/// let bad = CircuitRequest::from_json(r#"{"n_qubits": 1, "steps": [{"gate": "Q", "qubits": [0]}]}"#)?;
/// assert!(matches!(bad.into_circuit(), Err(QcoinError::UnknownGate { .. })));
/// # Ok::<(), QcoinError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
