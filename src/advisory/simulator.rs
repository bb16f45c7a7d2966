//! Scenario simulator
//!
//! Produces a decorative numeric vector that may be attached to results.
//! Nothing in the lifecycle reads it.

/// Source of scenario sample vectors
pub trait ScenarioSimulator: Send + Sync {
    fn sample(&self) -> Vec<f64>;
}

/// Amplitudes of a single qubit after a Hadamard gate: `[1/√2, 1/√2]`
#[derive(Debug, Clone, Copy, Default)]
pub struct HadamardSimulator;

impl ScenarioSimulator for HadamardSimulator {
    fn sample(&self) -> Vec<f64> {
        vec![std::f64::consts::FRAC_1_SQRT_2; 2]
    }
}
