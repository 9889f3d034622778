// src/simulation/engine.rs
use crate::core::state::{basis_label, check_qubit_count};
use crate::core::{MAX_NORM_DRIFT, MAX_QUBITS, NORM_TOLERANCE, QcoinError, QubitId, Result, Statevector};
use crate::gates::{self, Matrix2};
use crate::operations::Operation;
use crate::simulation::Counts;
use crate::validation;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use tracing::{debug, trace, warn};

/// Evolves statevectors gate by gate and turns them into measurement counts.
///
/// The engine itself is stateless apart from its limits: every call takes the
/// current state by reference and returns a fresh one, so independent
/// circuits can share one engine across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatevectorEngine {
    max_qubits: usize,
    norm_tolerance: f64,
}

impl Default for StatevectorEngine {
    fn default() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
            norm_tolerance: MAX_NORM_DRIFT,
        }
    }
}

impl StatevectorEngine {
    /// Engine with the crate-wide limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an explicit register ceiling and normalization tolerance.
    /// `max_qubits` is clamped to [`MAX_QUBITS`].
    pub fn with_limits(max_qubits: usize, norm_tolerance: f64) -> Self {
        Self {
            max_qubits: max_qubits.min(MAX_QUBITS),
            norm_tolerance,
        }
    }

    /// Largest register this engine will allocate.
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Returns |0...0> over `n_qubits` qubits.
    ///
    /// # Errors
    /// `InvalidQubitCount` if `n_qubits` is 0 or above [`Self::max_qubits`].
    pub fn initialize(&self, n_qubits: usize) -> Result<Statevector> {
        check_qubit_count(n_qubits, self.max_qubits)?;
        Statevector::zero(n_qubits)
    }

    /// Applies one operation and returns the new state. `state` is left as is,
    /// so a failure never leaks a partially transformed vector.
    pub fn apply(&self, state: &Statevector, op: &Operation) -> Result<Statevector> {
        op.validate(state.num_qubits())?;
        trace!(%op, "applying operation");
        let next = match op {
            Operation::ControlledNot { control, target } => apply_cnot(state, *control, *target),
            _ => {
                // validate() succeeded and the op is not CNOT, so it has a 2x2 matrix
                let (target, matrix) = op
                    .single_qubit_matrix()
                    .ok_or_else(|| QcoinError::UnknownGate { tag: op.to_string() })?;
                apply_single(state, target, &matrix)
            }
        };
        Ok(next)
    }

    /// Parses a textual gate tag and applies it.
    ///
    /// # Errors
    /// `UnknownGate` for an unrecognised tag, plus anything [`Self::apply`] raises.
    pub fn apply_tagged(
        &self,
        state: &Statevector,
        tag: &str,
        qubits: &[usize],
        params: &[f64],
    ) -> Result<Statevector> {
        let op = Operation::from_tag(tag, qubits, params)?;
        self.apply(state, &op)
    }

    /// Folds [`Self::apply`] over `ops`, left to right.
    pub fn apply_sequence(&self, state: &Statevector, ops: &[Operation]) -> Result<Statevector> {
        ops.iter()
            .try_fold(state.clone(), |current, op| self.apply(&current, op))
    }

    /// Draws `shots` independent samples from `|a_i|^2` and tallies them by
    /// bitstring. Only observed outcomes appear; `shots == 0` gives an empty map.
    ///
    /// # Errors
    /// `Incoherence` if the state's norm drifted beyond the engine tolerance,
    /// `InvalidDistribution` if the probabilities cannot be sampled (e.g. NaN).
    pub fn measure<R: Rng + ?Sized>(&self, state: &Statevector, shots: u32, rng: &mut R) -> Result<Counts> {
        self.check_drift(state)?;
        let mut counts = Counts::new();
        if shots == 0 {
            return Ok(counts);
        }

        let probs = state.probabilities();
        let dist = WeightedIndex::new(&probs).map_err(|e| QcoinError::InvalidDistribution(e.to_string()))?;

        let n = state.num_qubits();
        let mut tally = vec![0u64; probs.len()];
        for _ in 0..shots {
            tally[dist.sample(&mut *rng)] += 1;
        }
        for (index, hits) in tally.into_iter().enumerate().filter(|(_, hits)| *hits > 0) {
            counts.insert(basis_label(index, n), hits);
        }
        debug!(shots, outcomes = counts.len(), "sampled measurement counts");
        Ok(counts)
    }

    /// Exact expected counts: `p_i * shots` rounded half-to-even for every
    /// basis index. All 2^n bitstrings are present, zero counts included, and
    /// the values need not add up to `shots`.
    pub fn expected_counts(&self, state: &Statevector, shots: u32) -> Result<Counts> {
        self.check_drift(state)?;
        let n = state.num_qubits();
        let shots = f64::from(shots);
        let counts = state
            .probabilities()
            .into_iter()
            .enumerate()
            .map(|(index, p)| (basis_label(index, n), (p * shots).round_ties_even() as u64))
            .collect();
        Ok(counts)
    }

    /// The full 2^n x 2^n operator of `op`, row-major.
    ///
    /// Single-qubit gates are expanded as `I ⊗ .. ⊗ U ⊗ .. ⊗ I` with the gate
    /// in tensor slot `target`; CNOT is written out as its permutation matrix.
    /// Memory is O(4^n), so this is meant for small registers and cross-checks.
    pub fn dense_operator(&self, op: &Operation, n_qubits: usize) -> Result<Vec<Complex64>> {
        check_qubit_count(n_qubits, self.max_qubits)?;
        op.validate(n_qubits)?;
        let dim = 1usize << n_qubits;
        match op {
            Operation::ControlledNot { control, target } => {
                let mut u = vec![Complex64::zero(); dim * dim];
                for col in 0..dim {
                    let row = gates::cnot_permute(col, *control, *target, n_qubits);
                    u[row * dim + col] = Complex64::one();
                }
                Ok(u)
            }
            _ => {
                let (target, matrix) = op
                    .single_qubit_matrix()
                    .ok_or_else(|| QcoinError::UnknownGate { tag: op.to_string() })?;
                let mut factors = vec![gates::identity(); n_qubits];
                factors[target.index()] = matrix;
                Ok(gates::kron_n(&factors))
            }
        }
    }

    fn check_drift(&self, state: &Statevector) -> Result<()> {
        validation::check_normalization(state, Some(self.norm_tolerance))?;
        let drift = validation::normalization_drift(state);
        if drift > NORM_TOLERANCE {
            warn!(drift, "statevector norm drifted; sampling without renormalizing");
        }
        Ok(())
    }
}

/// Applies a 2x2 matrix to one qubit. Pairs of basis states that differ only
/// in the target bit are mixed, which is exactly `I ⊗ .. ⊗ U ⊗ .. ⊗ I`.
fn apply_single(state: &Statevector, target: QubitId, matrix: &Matrix2) -> Statevector {
    let n = state.num_qubits();
    let k_mask = 1usize << target.bit_position(n);
    let lower_mask = k_mask - 1;
    let upper_mask = !lower_mask;

    let amps = state.amplitudes();
    let mut new_vec = vec![Complex64::zero(); amps.len()];
    for i in 0..amps.len() / 2 {
        // insert a 0 at the target bit position
        let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
        let i1 = i0 | k_mask;

        let psi_0 = amps[i0];
        let psi_1 = amps[i1];
        new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }
    Statevector::from_parts(n, new_vec)
}

/// Routes each amplitude to its CNOT image.
fn apply_cnot(state: &Statevector, control: QubitId, target: QubitId) -> Statevector {
    let n = state.num_qubits();
    let amps = state.amplitudes();
    let mut new_vec = vec![Complex64::zero(); amps.len()];
    for (index, amp) in amps.iter().enumerate() {
        new_vec[gates::cnot_permute(index, control, target, n)] = *amp;
    }
    Statevector::from_parts(n, new_vec)
}
