//! Teleports each of |0>, |1>, |+> and |-> from qubit 0 to qubit 2

use qcoin::algorithms::{self, TeleportPrep};
use qcoin::{QcoinError, QubitId, Simulator, SimulatorConfig};

fn main() {
    let simulator = match Simulator::with_config(SimulatorConfig::default().with_seed(42)) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    for prep in [TeleportPrep::Zero, TeleportPrep::One, TeleportPrep::Plus, TeleportPrep::Minus] {
        println!("\n=== Teleporting {:?} ===", prep);
        if let Err(e) = teleport(&simulator, prep) {
            eprintln!("\n--- Simulation Failed ---");
            eprintln!("Error: {}", e);
        }
    }
}

fn teleport(simulator: &Simulator, prep: TeleportPrep) -> Result<(), QcoinError> {
    let circuit = algorithms::teleportation(prep)?;
    println!("{}", circuit);

    let result = simulator.run(&circuit, 512)?;
    println!("Final {}", result.state);

    println!("{}", result.counts);
    // qubit 2 is Bob's; qubits 0 and 1 carry the would-be classical message
    let bob = result.counts.marginal(&[QubitId(2)])?;
    let message = result.counts.marginal(&[QubitId(0), QubitId(1)])?;
    println!("Bob's qubit: {}", bob);
    println!("Message bits: {}", message);
    if matches!(prep, TeleportPrep::Plus | TeleportPrep::Minus) {
        println!("(|+> and |-> differ only in phase; compare the signs of the odd amplitudes above.)");
    }
    Ok(())
}
