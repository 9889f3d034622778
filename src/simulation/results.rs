// src/simulation/results.rs
use crate::core::{QcoinError, QubitId, Result, Statevector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How counts are produced from a final state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMode {
    /// Independent random shots.
    #[default]
    Sampled,
    /// Deterministic `round(p * shots)` for every basis string.
    Exact,
}

/// Outcome of running a circuit: the final state and its counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// State after the last operation.
    pub state: Statevector,
    /// Sampled counts for a measured circuit, exact expected counts otherwise.
    pub counts: Counts,
    /// How `counts` was produced.
    pub mode: MeasurementMode,
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final {}", self.state)?;
        writeln!(f, "Mode: {:?}", self.mode)?;
        write!(f, "{}", self.counts)
    }
}

/// Measurement tallies keyed by n-character bitstrings, qubit 0 first.
///
/// Backed by a `BTreeMap`, so iteration and serialization are in
/// lexicographic bitstring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    outcomes: BTreeMap<String, u64>,
}

impl Counts {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hits` to `bitstring`. (Internal visibility)
    pub(crate) fn insert(&mut self, bitstring: String, hits: u64) {
        *self.outcomes.entry(bitstring).or_insert(0) += hits;
    }

    /// Count for `bitstring`, 0 when it never occurred.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.outcomes.get(bitstring).copied().unwrap_or(0)
    }

    /// Whether `bitstring` has an entry (possibly with count 0).
    pub fn contains(&self, bitstring: &str) -> bool {
        self.outcomes.contains_key(bitstring)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.outcomes.values().sum()
    }

    /// Number of distinct bitstrings recorded.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Observed frequency of `bitstring`; 0.0 for an empty tally.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / total as f64
        }
    }

    /// The most frequent outcome. Ties go to the lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.outcomes
            .iter()
            .fold(None, |best: Option<(&str, u64)>, (k, &v)| match best {
                Some((_, best_v)) if best_v >= v => best,
                _ => Some((k.as_str(), v)),
            })
    }

    /// Largest single count, 0 for an empty tally.
    pub fn max_count(&self) -> u64 {
        self.outcomes.values().copied().max().unwrap_or(0)
    }

    /// Iterates `(bitstring, count)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.outcomes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Read-only view of the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.outcomes
    }

    /// Tallies restricted to `qubits`, in the order given. The key for each
    /// outcome is built from the listed qubits' characters, so
    /// `marginal(&[QubitId(2)])` on `{"001": 5}` yields `{"1": 5}`.
    ///
    /// # Errors
    /// `InvalidOperandIndex` if a qubit is past the bitstring width.
    pub fn marginal(&self, qubits: &[QubitId]) -> Result<Counts> {
        let mut out = Counts::new();
        for (bits, hits) in &self.outcomes {
            let bytes = bits.as_bytes();
            let mut key = String::with_capacity(qubits.len());
            for q in qubits {
                let bit = bytes.get(q.index()).ok_or_else(|| QcoinError::InvalidOperandIndex {
                    qubit: i64::try_from(q.index()).unwrap_or(i64::MAX),
                    n_qubits: bytes.len(),
                })?;
                key.push(char::from(*bit));
            }
            out.insert(key, *hits);
        }
        Ok(out)
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bits, hits) in iter {
            counts.insert(bits, hits);
        }
        counts
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts:")?;
        if self.outcomes.is_empty() {
            return writeln!(f, "  No shots recorded.");
        }
        let total = self.total();
        for (bits, hits) in &self.outcomes {
            let pct = if total == 0 { 0.0 } else { 100.0 * *hits as f64 / total as f64 };
            writeln!(f, "  |{}>: {} ({:.1}%)", bits, hits, pct)?;
        }
        Ok(())
    }
}
