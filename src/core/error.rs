//! Error handling logic

use thiserror::Error;

/// Errors raised while building, simulating or persisting circuits.
///
/// Every failure aborts the circuit run that raised it; no partially
/// evolved state is ever handed back alongside an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QcoinError {
    /// The qubit count is zero, negative or above the supported maximum.
    #[error("invalid qubit count {n_qubits}: expected 1..={max}")]
    InvalidQubitCount {
        /// The requested qubit count.
        n_qubits: i64,
        /// The largest qubit count accepted in this context.
        max: usize,
    },

    /// An operation references a qubit outside `0..n_qubits`.
    #[error("qubit index {qubit} out of range for a {n_qubits}-qubit register")]
    InvalidOperandIndex {
        /// The offending qubit index.
        qubit: i64,
        /// Width of the register.
        n_qubits: usize,
    },

    /// A gate tag is not one of the recognised kinds.
    #[error("unknown gate '{tag}'")]
    UnknownGate {
        /// The tag as supplied by the caller.
        tag: String,
    },

    /// Shot counts must be non-negative.
    #[error("invalid shot count {0}: must be >= 0")]
    InvalidShotCount(i64),

    /// A two-qubit operation names the same qubit twice.
    #[error("control and target both refer to qubit {qubit}")]
    CoincidentOperands {
        /// The qubit named twice.
        qubit: usize,
    },

    /// A tagged step carries fewer operands or parameters than its gate needs.
    #[error("gate '{tag}' expects {expected} operand(s), found {found}")]
    MissingOperand {
        /// Gate tag of the step.
        tag: String,
        /// Operands required.
        expected: usize,
        /// Operands present.
        found: usize,
    },

    /// A state vector does not have the dimension its register implies.
    #[error("state dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected number of amplitudes.
        expected: usize,
        /// Actual number of amplitudes.
        found: usize,
    },

    /// Sum of squared amplitudes drifted away from 1.
    #[error("state vector is not normalized: sum |a|^2 = {norm_sqr}")]
    Incoherence {
        /// The measured squared norm.
        norm_sqr: f64,
    },

    /// The sampler rejected the probability vector (NaN, negative or all zero).
    #[error("cannot sample from probability distribution: {0}")]
    InvalidDistribution(String),

    /// Configuration could not be read or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A progress or request document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Persistence(#[from] serde_json::Error),

    /// Filesystem failure while saving or loading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QcoinError>;
