// src/circuits/mod.rs

//! Ordered gate sequences over a fixed-width register.
//!
//! A `Circuit` is validated once, when it is built: every operand is in range
//! and no CNOT names the same qubit twice. After that it is read-only.

use crate::core::state::check_qubit_count;
use crate::core::{MAX_QUBITS, Result};
use crate::gates::FixedGate;
use crate::operations::Operation;
use std::fmt;

/// A register width, an ordered list of operations, and whether the run
/// ends in measurement.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
    measure: bool,
}

impl Circuit {
    /// Validates `operations` against an `num_qubits` register.
    ///
    /// # Errors
    /// `InvalidQubitCount` for a register outside `1..=MAX_QUBITS`, otherwise
    /// the first error [`Operation::validate`] reports.
    pub fn new(num_qubits: usize, operations: Vec<Operation>, measure: bool) -> Result<Self> {
        check_qubit_count(num_qubits, MAX_QUBITS)?;
        for op in &operations {
            op.validate(num_qubits)?;
        }
        Ok(Self {
            num_qubits,
            operations,
            measure,
        })
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Whether running the circuit samples counts.
    pub fn measure(&self) -> bool {
        self.measure
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chained construction of a [`Circuit`]. Nothing is checked until [`CircuitBuilder::build`].
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    num_qubits: usize,
    operations: Vec<Operation>,
    measure: bool,
}

impl CircuitBuilder {
    /// Builder for an `num_qubits` register. Measurement is on by default.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
            measure: true,
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    pub fn h(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::H, target))
    }

    pub fn x(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::X, target))
    }

    pub fn y(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::Y, target))
    }

    pub fn z(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::Z, target))
    }

    pub fn s(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::S, target))
    }

    pub fn t(self, target: usize) -> Self {
        self.add_op(Operation::gate(FixedGate::T, target))
    }

    pub fn ry(self, theta: f64, target: usize) -> Self {
        self.add_op(Operation::ry(theta, target))
    }

    pub fn cnot(self, control: usize, target: usize) -> Self {
        self.add_op(Operation::cnot(control, target))
    }

    /// Controlled-Z, expanded as `H(target) CNOT(control, target) H(target)`.
    pub fn cz(self, control: usize, target: usize) -> Self {
        self.h(target).cnot(control, target).h(target)
    }

    /// Sets the measurement flag.
    pub fn measure(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    /// Finalizes and validates the circuit.
    pub fn build(self) -> Result<Circuit> {
        Circuit::new(self.num_qubits, self.operations, self.measure)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.measure { ", measured" } else { "" };
        writeln!(
            f,
            "qcoin::Circuit[{} operations on {} qubits{}]",
            self.operations.len(),
            self.num_qubits,
            suffix
        )?;

        let num_rows = self.num_qubits;
        let num_cols = self.operations.len() + usize::from(self.measure);
        if num_cols == 0 {
            return Ok(());
        }

        let max_label_width = format!("q{}", num_rows - 1).len();
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the wire segment, v_connect[row][time] the connector below it
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_cols]; num_rows];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_cols]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in self.operations.iter().enumerate() {
            match op {
                Operation::Gate { gate, target } => {
                    op_grid[target.index()][t] = format_gate(gate.symbol());
                }
                Operation::Rotation { target, .. } => {
                    op_grid[target.index()][t] = format_gate("RY");
                }
                Operation::ControlledNot { control, target } => {
                    let (r_ctrl, r_tgt) = (control.index(), target.index());
                    op_grid[r_ctrl][t] = format_gate("@");
                    op_grid[r_tgt][t] = format_gate("X");
                    let r_min = r_ctrl.min(r_tgt);
                    let r_max = r_ctrl.max(r_tgt);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
            }
        }
        if self.measure {
            for row in op_grid.iter_mut() {
                row[num_cols - 1] = format_gate("M");
            }
        }

        for r in 0..num_rows {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_cols {
                    let padding_needed = GATE_WIDTH - 1;
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
