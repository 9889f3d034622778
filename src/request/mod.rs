// src/request/mod.rs

//! Loosely typed circuit requests, as a host UI or a JSON file sends them,
//! and their conversion into a validated [`Circuit`].
//!
//! Integers arrive signed so that negative counts and indices can be
//! reported as such instead of failing in the deserializer.

use crate::circuits::Circuit;
use crate::core::{MAX_QUBITS, QcoinError, Result};
use crate::operations::Operation;
use crate::simulation::{MeasurementMode, RunResult, Simulator};
use serde::{Deserialize, Serialize};

/// One step: a gate tag with its qubit operands and numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub gate: String,
    #[serde(default)]
    pub qubits: Vec<i64>,
    #[serde(default)]
    pub params: Vec<f64>,
}

impl Step {
    pub fn new(gate: impl Into<String>, qubits: Vec<i64>, params: Vec<f64>) -> Self {
        Self {
            gate: gate.into(),
            qubits,
            params,
        }
    }
}

/// `(n_qubits, steps, shots, measure)` plus the counting mode. A missing
/// `shots` falls back to the simulator's configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRequest {
    pub n_qubits: i64,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub shots: Option<i64>,
    #[serde(default = "default_true")]
    pub measure: bool,
    #[serde(default)]
    pub mode: MeasurementMode,
}

fn default_true() -> bool {
    true
}

impl CircuitRequest {
    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The requested shot count, or `default_shots` when none was given.
    ///
    /// # Errors
    /// `InvalidShotCount` if negative or above `u32::MAX`.
    pub fn resolve_shots(&self, default_shots: u32) -> Result<u32> {
        match self.shots {
            Some(shots) => u32::try_from(shots).map_err(|_| QcoinError::InvalidShotCount(shots)),
            None => Ok(default_shots),
        }
    }

    /// Converts every step into a typed [`Operation`] and validates the result.
    ///
    /// # Errors
    /// `InvalidQubitCount`, `InvalidOperandIndex` (negative or out of range),
    /// `UnknownGate`, `MissingOperand` or `CoincidentOperands`, whichever the
    /// first offending step raises.
    pub fn into_circuit(&self) -> Result<Circuit> {
        let n_qubits = usize::try_from(self.n_qubits)
            .ok()
            .filter(|n| (1..=MAX_QUBITS).contains(n))
            .ok_or(QcoinError::InvalidQubitCount {
                n_qubits: self.n_qubits,
                max: MAX_QUBITS,
            })?;

        let operations = self
            .steps
            .iter()
            .map(|step| {
                let qubits = step
                    .qubits
                    .iter()
                    .map(|&q| {
                        usize::try_from(q).map_err(|_| QcoinError::InvalidOperandIndex { qubit: q, n_qubits })
                    })
                    .collect::<Result<Vec<usize>>>()?;
                Operation::from_tag(&step.gate, &qubits, &step.params)
            })
            .collect::<Result<Vec<Operation>>>()?;

        Circuit::new(n_qubits, operations, self.measure)
    }

    /// Validates the request and runs it on `simulator`, taking the shot
    /// count from the simulator's configuration when the request has none.
    pub fn run(&self, simulator: &Simulator) -> Result<RunResult> {
        let shots = self.resolve_shots(simulator.config().default_shots)?;
        let circuit = self.into_circuit()?;
        simulator.run_mode(&circuit, shots, self.mode)
    }
}
