//! Builds a Bell pair, samples it, then shows the exact expected counts

use qcoin::{CircuitBuilder, MeasurementMode, QcoinError, Simulator};

fn main() -> Result<(), QcoinError> {
    let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build()?;
    println!("Bell pair circuit:\n{}", circuit);

    let simulator = Simulator::new();
    for mode in [MeasurementMode::Sampled, MeasurementMode::Exact] {
        let result = simulator.run_mode(&circuit, 1000, mode)?;
        println!("--- {:?} ---", mode);
        println!("{}", result);
    }
    Ok(())
}
