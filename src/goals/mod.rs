// src/goals/mod.rs

//! Puzzle goals evaluated over measurement counts, and the built-in
//! campaign of levels.

use crate::simulation::Counts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate over a tally. Probabilities are observed frequencies, so an
/// empty tally has probability 0 for every outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Goal {
    /// `P(outcome) > threshold`.
    ProbabilityAbove { outcome: String, threshold: f64 },
    /// `|P(outcome) - target| < tolerance`.
    ProbabilityNear { outcome: String, target: f64, tolerance: f64 },
    /// At least one of `outcomes` was observed.
    AnyPositive { outcomes: Vec<String> },
    /// Every one of `outcomes` was observed.
    AllPositive { outcomes: Vec<String> },
    /// Some outcome has a positive count.
    AnyObserved,
    /// Always met; used by demo levels.
    Always,
}

impl Goal {
    pub fn is_met(&self, counts: &Counts) -> bool {
        match self {
            Goal::ProbabilityAbove { outcome, threshold } => counts.probability(outcome) > *threshold,
            Goal::ProbabilityNear {
                outcome,
                target,
                tolerance,
            } => (counts.probability(outcome) - target).abs() < *tolerance,
            Goal::AnyPositive { outcomes } => outcomes.iter().any(|o| counts.get(o) > 0),
            Goal::AllPositive { outcomes } => outcomes.iter().all(|o| counts.get(o) > 0),
            Goal::AnyObserved => counts.max_count() > 0,
            Goal::Always => true,
        }
    }
}

/// One puzzle level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: &'static str,
    /// Register width the level is designed for.
    pub qubits: usize,
    pub goal: Goal,
    /// What the player is asked to do.
    pub explain: &'static str,
    pub story: &'static str,
    pub hint: &'static str,
}

/// Result of checking a run against a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalOutcome {
    Met,
    /// The run used a different number of qubits than the level expects.
    WrongQubitCount { expected: usize },
    NotMet { hint: &'static str },
}

impl GoalOutcome {
    pub fn is_met(&self) -> bool {
        matches!(self, GoalOutcome::Met)
    }
}

impl fmt::Display for GoalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalOutcome::Met => write!(f, "Nice! You met the puzzle goal."),
            GoalOutcome::WrongQubitCount { expected } => write!(f, "This puzzle expects {} coin(s).", expected),
            GoalOutcome::NotMet { hint } => write!(f, "Try again. Hint: {}", hint),
        }
    }
}

impl Level {
    /// Checks a run of `n_qubits` qubits that produced `counts`.
    pub fn check(&self, n_qubits: usize, counts: &Counts) -> GoalOutcome {
        if n_qubits != self.qubits {
            GoalOutcome::WrongQubitCount { expected: self.qubits }
        } else if self.goal.is_met(counts) {
            GoalOutcome::Met
        } else {
            GoalOutcome::NotMet { hint: self.hint }
        }
    }
}

fn outcomes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// The eight campaign levels, in play order.
pub fn campaign() -> Vec<Level> {
    vec![
        Level {
            name: "Level 1 - Spinny Warmup",
            qubits: 1,
            goal: Goal::ProbabilityAbove {
                outcome: "1".into(),
                threshold: 0.8,
            },
            explain: "Spinny likes tails. Make the coin land on TAILS (1) more than 80% of the time.",
            story: "Spinny is sleepy and prefers tails. Use the Flip spell to help him.",
            hint: "Try X (Flip) or RY (Tilt)",
        },
        Level {
            name: "Level 2 - Flip Mountain",
            qubits: 1,
            goal: Goal::ProbabilityAbove {
                outcome: "0".into(),
                threshold: 0.8,
            },
            explain: "Make Spinny love HEADS (0) most of the time. X flips the coin.",
            story: "The mountain winds push Spinny to heads. Use a quick Flip!",
            hint: "Try X",
        },
        Level {
            name: "Level 3 - Superposition Hill",
            qubits: 1,
            goal: Goal::ProbabilityNear {
                outcome: "0".into(),
                target: 0.5,
                tolerance: 0.15,
            },
            explain: "Make the coin be BOTH heads and tails equally. Use the Spin spell (H).",
            story: "Spinny loves to dance between both sides, so spin him!",
            hint: "Try H",
        },
        Level {
            name: "Level 4 - Bell Buddies",
            qubits: 2,
            goal: Goal::AnyPositive {
                outcomes: outcomes(&["00", "11"]),
            },
            explain: "Make two coins be best buddies so they always match (00 or 11). Use H then CNOT.",
            story: "Twinny and Bubby want to match no matter how far apart they are.",
            hint: "H on coin 0, then CNOT 0->1",
        },
        Level {
            name: "Level 5 - Teleportation Tunnel (Full Demo)",
            qubits: 3,
            goal: Goal::Always,
            explain: "Teleportation moves a coin state using entanglement and some magic messages. Press Auto-Demo to see it work.",
            story: "A friendly wizard wants to send Spinny to a faraway place without moving him. Entangle and send the message!",
            hint: "Use Auto-Demo to see teleportation with corrections",
        },
        Level {
            name: "Level 6 - Deutsch-Jozsa Detective",
            qubits: 1,
            goal: Goal::Always,
            explain: "Discover if a secret machine is always the same or sometimes different. Quantum magic can do it in one check!",
            story: "Detective Qubit needs to know if the candy machine is fair. Use DJ magic.",
            hint: "Try Auto-Solve DJ to learn",
        },
        Level {
            name: "Level 7 - Grover's Golden Search",
            qubits: 2,
            goal: Goal::AnyObserved,
            explain: "Find the golden chest faster using Grover magic.",
            story: "A golden chocolate hides among dull ones. Amplify its sparkle!",
            hint: "Try Auto-Solve Grover (2-qubit demo)",
        },
        Level {
            name: "Level 8 - Error Detective (Bit-flip demo)",
            qubits: 1,
            goal: Goal::Always,
            explain: "Sometimes coins get noisy. This level shows how repetition helps detect errors.",
            story: "Sometimes Spinny trips and flips himself. Run many shots to spot the problem.",
            hint: "Run multiple shots and compare counts",
        },
    ]
}

/// Looks a level up by its exact name.
pub fn find_level(name: &str) -> Option<Level> {
    campaign().into_iter().find(|level| level.name == name)
}
