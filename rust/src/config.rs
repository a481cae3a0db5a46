//! Configuration types for the simulation.

use crate::models::Ticks;
use crate::scheduler::SchedulerError;

/// Default round-robin time slice.
pub const DEFAULT_QUANTUM: Ticks = 4;

/// Layout of the rendered trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// Byte-for-byte the historic layout, per-algorithm quirks included.
    #[default]
    Legacy,
    /// Uniform layout: same separators and waiting-time lines in every block,
    /// averages always with two decimals.
    Normalized,
}

/// Configuration for the engines and the trace writer.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Round-robin time slice (must be positive)
    pub quantum: Ticks,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    pub verbosity: u8,
    /// Output layout
    pub trace_format: TraceFormat,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            verbosity: 0,
            trace_format: TraceFormat::Legacy,
        }
    }
}

impl SimulationConfig {
    /// Build a config, falling back to defaults for anything not given.
    pub fn new(
        quantum: Option<Ticks>,
        verbosity: Option<u8>,
        trace_format: Option<TraceFormat>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            quantum: quantum.unwrap_or(defaults.quantum),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            trace_format: trace_format.unwrap_or(defaults.trace_format),
        }
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.quantum <= 0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "quantum must be positive, got {}",
                self.quantum
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.quantum, 4);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.trace_format, TraceFormat::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_overrides() {
        let config = SimulationConfig::new(Some(2), None, Some(TraceFormat::Normalized));
        assert_eq!(config.quantum, 2);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.trace_format, TraceFormat::Normalized);
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let config = SimulationConfig::new(Some(0), None, None);
        assert!(matches!(
            config.validate(),
            Err(SchedulerError::InvalidConfig(_))
        ));
    }
}
