// tests/simulation_tests.rs

use qcoin::algorithms::{self, DjOracle, TeleportPrep};
use qcoin::{
    CircuitBuilder, CircuitRequest, Counts, FixedGate, MeasurementMode, Operation, ProgressRecord, QcoinError, QubitId,
    Simulator, SimulatorConfig, StatevectorEngine,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const TEST_TOLERANCE: f64 = 1e-9;

fn seeded_simulator(seed: u64) -> Simulator {
    Simulator::with_config(SimulatorConfig::default().with_seed(seed)).expect("default config is valid")
}

fn frequency(counts: &Counts, bits: &str) -> f64 {
    counts.get(bits) as f64 / counts.total() as f64
}

#[test]
fn test_initial_state_measures_all_zeros() -> Result<(), QcoinError> {
    let circuit = CircuitBuilder::new(3).build()?;
    let result = Simulator::new().run(&circuit, 64)?;
    let counts = result.counts;
    assert_eq!(counts.get("000"), 64);
    assert_eq!(counts.len(), 1);
    Ok(())
}

#[test]
fn test_gate_order_matters() -> Result<(), QcoinError> {
    let sim = Simulator::new();

    let h_then_x = CircuitBuilder::new(1).h(0).x(0).build()?;
    let state = sim.final_state(&h_then_x)?;
    assert!((state.amplitudes()[0].re - FRAC_1_SQRT_2).abs() < TEST_TOLERANCE);
    assert!((state.amplitudes()[1].re - FRAC_1_SQRT_2).abs() < TEST_TOLERANCE);

    let x_then_h = CircuitBuilder::new(1).x(0).h(0).build()?;
    let state = sim.final_state(&x_then_h)?;
    assert!((state.amplitudes()[0].re - FRAC_1_SQRT_2).abs() < TEST_TOLERANCE);
    assert!((state.amplitudes()[1].re + FRAC_1_SQRT_2).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_hadamard_sampling_converges() -> Result<(), QcoinError> {
    let circuit = CircuitBuilder::new(1).h(0).build()?;
    let counts = seeded_simulator(2024).run(&circuit, 100_000)?.counts;
    assert_eq!(counts.total(), 100_000);
    assert!((frequency(&counts, "0") - 0.5).abs() < 0.02);
    assert!((frequency(&counts, "1") - 0.5).abs() < 0.02);
    Ok(())
}

#[test]
fn test_bell_pair_is_correlated() -> Result<(), QcoinError> {
    let circuit = algorithms::bell_pair()?;
    let counts = seeded_simulator(99).run(&circuit, 1000)?.counts;
    assert_eq!(counts.get("01"), 0);
    assert_eq!(counts.get("10"), 0);
    assert_eq!(counts.get("00") + counts.get("11"), 1000);
    assert!((frequency(&counts, "00") - 0.5).abs() < 0.06);
    Ok(())
}

#[test]
fn test_ry_pi_is_a_flip() -> Result<(), QcoinError> {
    let circuit = CircuitBuilder::new(1).ry(PI, 0).build()?;
    let counts = Simulator::new().run_exact(&circuit, 512)?.counts;
    assert_eq!(counts.get("1"), 512);
    assert_eq!(counts.get("0"), 0);
    Ok(())
}

#[test]
fn test_exact_mode_is_repeatable() -> Result<(), QcoinError> {
    let circuit = CircuitBuilder::new(3).ry(0.3, 0).h(1).cnot(1, 2).t(2).build()?;
    let sim = Simulator::new();
    let first = sim.run_exact(&circuit, 777)?;
    let second = sim.run_exact(&circuit, 777)?;
    assert_eq!(first.counts, second.counts);
    assert_eq!(first.counts.len(), 8);
    Ok(())
}

#[test]
fn test_unknown_gate_leaves_state_untouched() -> Result<(), QcoinError> {
    let engine = StatevectorEngine::new();
    let state = engine.apply(&engine.initialize(2)?, &Operation::gate(FixedGate::H, 0))?;
    let snapshot = state.clone();

    let err = engine.apply_tagged(&state, "Q", &[0], &[]);
    assert!(matches!(err, Err(QcoinError::UnknownGate { ref tag }) if tag == "Q"));
    assert_eq!(state, snapshot);
    Ok(())
}

#[test]
fn test_injected_rng_reproduces_counts() -> Result<(), QcoinError> {
    let engine = StatevectorEngine::new();
    let state = engine.apply_sequence(
        &engine.initialize(2)?,
        &[Operation::ry(1.1, 0), Operation::ry(0.4, 1), Operation::cnot(0, 1)],
    )?;
    let a = engine.measure(&state, 500, &mut StdRng::seed_from_u64(5))?;
    let b = engine.measure(&state, 500, &mut StdRng::seed_from_u64(5))?;
    assert_eq!(a, b);
    assert_eq!(a.total(), 500);
    Ok(())
}

#[test]
fn test_teleportation_moves_superpositions() -> Result<(), QcoinError> {
    let sim = Simulator::new();
    let amp = 0.5 * FRAC_1_SQRT_2;

    // qubits 0 and 1 end in |+>, so every amplitude has magnitude 1/(2√2)
    let plus = sim.final_state(&algorithms::teleportation(TeleportPrep::Plus)?)?;
    for a in plus.amplitudes() {
        assert!((a.re - amp).abs() < TEST_TOLERANCE && a.im.abs() < TEST_TOLERANCE);
    }

    let minus = sim.final_state(&algorithms::teleportation(TeleportPrep::Minus)?)?;
    for (i, a) in minus.amplitudes().iter().enumerate() {
        let expected = if i % 2 == 0 { amp } else { -amp };
        assert!((a.re - expected).abs() < TEST_TOLERANCE, "index {}: {}", i, a);
    }
    Ok(())
}

#[test]
fn test_teleportation_marginal_for_basis_states() -> Result<(), QcoinError> {
    let sim = seeded_simulator(3);
    let counts = sim.run(&algorithms::teleportation(TeleportPrep::One)?, 300)?.counts;
    let received = counts.marginal(&[QubitId(2)])?;
    assert_eq!(received.get("1"), 300);
    Ok(())
}

#[test]
fn test_progress_round_trip() -> Result<(), QcoinError> {
    let mut record = ProgressRecord::new();
    record.award_xp(80);
    record.award_badge("Bell Buddy");
    record.complete_level(1, 8);
    assert_eq!(record.campaign_progress, 2);

    let path = std::env::temp_dir().join(format!("qcoin-progress-{}.json", std::process::id()));
    record.save(&path)?;
    let loaded = ProgressRecord::load(&path)?;
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, record);
    assert_eq!(loaded.xp, 80);
    assert_eq!(loaded.badges, vec!["Bell Buddy".to_string()]);

    let json: serde_json::Value = serde_json::from_str(&record.to_json()?)?;
    assert_eq!(
        json,
        serde_json::json!({"xp": 80, "badges": ["Bell Buddy"], "campaign_progress": 2})
    );
    Ok(())
}

#[test]
fn test_campaign_level_checks() -> Result<(), QcoinError> {
    let levels = qcoin::goals::campaign();
    let sim = Simulator::new();

    let flipped = CircuitBuilder::new(1).x(0).build()?;
    let counts = sim.run_exact(&flipped, 100)?.counts;
    assert!(levels[0].check(1, &counts).is_met());
    assert!(!levels[1].check(1, &counts).is_met());

    let bell = sim.run_exact(&algorithms::bell_pair()?, 100)?.counts;
    assert!(levels[3].check(2, &bell).is_met());
    Ok(())
}

#[test]
fn test_unmeasured_request_reports_expected_counts() -> Result<(), QcoinError> {
    let request = CircuitRequest::from_json(
        r#"{"n_qubits": 1, "steps": [{"gate": "H", "qubits": [0]}], "shots": 100, "measure": false}"#,
    )?;
    let result = request.run(&seeded_simulator(8))?;
    assert_eq!(result.mode, MeasurementMode::Exact);
    assert_eq!(result.counts.get("0"), 50);
    assert_eq!(result.counts.get("1"), 50);
    Ok(())
}

#[test]
fn test_deutsch_jozsa_single_shot() -> Result<(), QcoinError> {
    let sim = seeded_simulator(17);
    let constant = sim.run(&algorithms::deutsch_jozsa(DjOracle::ConstantZero)?, 50)?.counts;
    assert_eq!(constant.get("0"), 50);
    let balanced = sim.run(&algorithms::deutsch_jozsa(DjOracle::BalancedParity)?, 50)?.counts;
    assert_eq!(balanced.get("1"), 50);
    assert_eq!(balanced.get("0"), 0);
    Ok(())
}

#[test]
fn test_campaign_session_tracks_xp() -> Result<(), QcoinError> {
    let levels = qcoin::goals::campaign();
    let sim = Simulator::new();
    let mut record = ProgressRecord::new();

    // a miss on level 1, then a hit
    for circuit in [CircuitBuilder::new(1).build()?, CircuitBuilder::new(1).x(0).build()?] {
        let counts = sim.run_exact(&circuit, 100)?.counts;
        record.record_run();
        if levels[0].check(1, &counts).is_met() {
            record.record_level_success(0, levels[0].name, levels.len());
        }
    }
    assert_eq!(record.xp, 2 * qcoin::progress::XP_PER_RUN + qcoin::progress::XP_PER_LEVEL);
    assert!(record.is_unlocked(1));
    Ok(())
}
