//! Numeric limits and defaults shared by the engine and its callers.

/// Limits and defaults for statevector simulation.
pub mod sim_constants {
    /// Hard ceiling on register width. 2^24 amplitudes of 16 bytes is 256 MiB.
    pub const MAX_QUBITS: usize = 24;
    /// Shots used when the caller does not ask for a specific number.
    pub const DEFAULT_SHOTS: u32 = 512;
    /// Tolerance for the normalization invariant in checks and tests.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Drift beyond this is refused at measurement time.
    pub const MAX_NORM_DRIFT: f64 = 1e-6;
}
