// src/simulation/mod.rs

//! Runs `qcoin::circuits::Circuit`s on a dense statevector.
//! `Simulator` is the entry point; `StatevectorEngine` does the state
//! evolution and measurement underneath it.

mod engine;
mod results;

pub use engine::StatevectorEngine;
pub use results::{Counts, MeasurementMode, RunResult};

use crate::circuits::Circuit;
use crate::config::SimulatorConfig;
use crate::core::{Result, Statevector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Runs circuits under one [`SimulatorConfig`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    engine: StatevectorEngine,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator honouring `config`.
    ///
    /// # Errors
    /// `Config` if the configuration does not validate.
    pub fn with_config(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let engine = StatevectorEngine::with_limits(config.max_qubits, config.norm_tolerance);
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn engine(&self) -> &StatevectorEngine {
        &self.engine
    }

    /// Evolves |0...0> through every operation of `circuit`.
    pub fn final_state(&self, circuit: &Circuit) -> Result<Statevector> {
        let initial = self.engine.initialize(circuit.num_qubits())?;
        self.engine.apply_sequence(&initial, circuit.operations())
    }

    /// Runs `circuit` and samples `shots` measurements. An unmeasured circuit
    /// reports exact expected counts instead.
    ///
    /// Uses a `StdRng` seeded from the configuration when a seed is set, so
    /// repeated runs agree; otherwise the thread-local RNG.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> Result<RunResult> {
        match self.config.seed {
            Some(seed) => self.run_with_rng(circuit, shots, &mut StdRng::seed_from_u64(seed)),
            None => self.run_with_rng(circuit, shots, &mut rand::rng()),
        }
    }

    /// [`Self::run`] with a caller-supplied random source.
    #[instrument(skip(self, circuit, rng), fields(n_qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn run_with_rng<R: Rng + ?Sized>(&self, circuit: &Circuit, shots: u32, rng: &mut R) -> Result<RunResult> {
        debug!(shots, measure = circuit.measure(), "starting sampled run");
        let state = self.final_state(circuit)?;
        if !circuit.measure() {
            let counts = self.engine.expected_counts(&state, shots)?;
            return Ok(RunResult { state, counts, mode: MeasurementMode::Exact });
        }
        let counts = self.engine.measure(&state, shots, rng)?;
        Ok(RunResult { state, counts, mode: MeasurementMode::Sampled })
    }

    /// Runs `circuit` and reports exact expected counts instead of samples,
    /// whether or not it is measured.
    #[instrument(skip(self, circuit), fields(n_qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn run_exact(&self, circuit: &Circuit, shots: u32) -> Result<RunResult> {
        debug!(shots, measure = circuit.measure(), "starting exact run");
        let state = self.final_state(circuit)?;
        let counts = self.engine.expected_counts(&state, shots)?;
        Ok(RunResult { state, counts, mode: MeasurementMode::Exact })
    }

    /// Dispatches on `mode`.
    pub fn run_mode(&self, circuit: &Circuit, shots: u32, mode: MeasurementMode) -> Result<RunResult> {
        match mode {
            MeasurementMode::Sampled => self.run(circuit, shots),
            MeasurementMode::Exact => self.run_exact(circuit, shots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::QcoinError;
    use num_complex::Complex64;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    /// Asserts that two complex state vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(actual: &[Complex64], expected: &[Complex64], tolerance: f64, context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < tolerance * tolerance,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i,
                actual[i],
                expected[i],
                dist_sq,
                context
            );
        }
    }

    fn seeded(seed: u64) -> Simulator {
        Simulator::with_config(SimulatorConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_unmeasured_circuit_reports_expected_counts() -> Result<()> {
        let circuit = CircuitBuilder::new(1).h(0).measure(false).build()?;
        let result = seeded(5).run(&circuit, 100)?;
        assert_eq!(result.mode, MeasurementMode::Exact);
        assert_eq!(result.counts.get("0"), 50);
        assert_eq!(result.counts.get("1"), 50);
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert_complex_vec_approx_equal(result.state.amplitudes(), &[s, s], TEST_TOLERANCE, "H|0>");
        Ok(())
    }

    #[test]
    fn test_seeded_runs_repeat() -> Result<()> {
        let circuit = CircuitBuilder::new(2).h(0).h(1).build()?;
        let a = seeded(11).run(&circuit, 200)?;
        let b = seeded(11).run(&circuit, 200)?;
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.counts.total(), 200);
        assert_eq!(a.mode, MeasurementMode::Sampled);
        Ok(())
    }

    #[test]
    fn test_exact_mode_is_deterministic() -> Result<()> {
        let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build()?;
        let sim = Simulator::new();
        let a = sim.run_exact(&circuit, 1000)?;
        let b = sim.run_mode(&circuit, 1000, MeasurementMode::Exact)?;
        assert_eq!(a.counts, b.counts);
        let counts = a.counts;
        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("11"), 500);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.len(), 4);
        Ok(())
    }

    #[test]
    fn test_config_limit_applies_to_circuits() -> Result<()> {
        let config = SimulatorConfig {
            max_qubits: 2,
            ..Default::default()
        };
        let sim = Simulator::with_config(config)?;
        let circuit = CircuitBuilder::new(3).h(2).build()?;
        assert!(matches!(
            sim.run(&circuit, 10),
            Err(QcoinError::InvalidQubitCount { n_qubits: 3, max: 2 })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulatorConfig {
            norm_tolerance: -1.0,
            ..Default::default()
        };
        assert!(Simulator::with_config(config).is_err());
    }
}
