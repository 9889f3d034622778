// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

pub use error::{QcoinError, Result};
pub use qubit::QubitId;
pub use state::Statevector;

pub mod constants;
pub use constants::sim_constants::{DEFAULT_SHOTS, MAX_NORM_DRIFT, MAX_QUBITS, NORM_TOLERANCE};
