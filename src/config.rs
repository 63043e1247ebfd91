//! Validates a [`SimConfig`] before it is handed to the engine.

use crate::domain::SimConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("runways list must not be empty")]
    NoRunways,
    #[error("closure {index} references runway {runway_index}, but only {runway_count} runway(s) are configured")]
    ClosureRunwayOutOfRange {
        index: usize,
        runway_index: usize,
        runway_count: usize,
    },
    #[error("closure {index} has start_time ({start_time}) >= end_time ({end_time})")]
    ClosureWindowInverted {
        index: usize,
        start_time: f64,
        end_time: f64,
    },
    #[error("closure {index} window [{start_time}, {end_time}] is outside [0, sim_duration={sim_duration}]")]
    ClosureWindowOutOfBounds {
        index: usize,
        start_time: f64,
        end_time: f64,
        sim_duration: f64,
    },
    #[error("inbound_flow must be >= 0, got {0}")]
    NegativeInboundFlow(f64),
    #[error("outbound_flow must be >= 0, got {0}")]
    NegativeOutboundFlow(f64),
    #[error("max_wait_time must be >= 0, got {0}")]
    NegativeMaxWaitTime(f64),
    #[error("sim_duration must be > 0, got {0}")]
    NonPositiveSimDuration(f64),
}

/// A [`SimConfig`] that has passed validation and is safe to hand to
/// [`crate::sim::Simulation::new`].
#[derive(Debug, Clone)]
pub struct Validated(SimConfig);

impl Validated {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        if config.runways.is_empty() {
            return Err(ConfigError::NoRunways);
        }
        if config.inbound_flow < 0.0 {
            return Err(ConfigError::NegativeInboundFlow(config.inbound_flow));
        }
        if config.outbound_flow < 0.0 {
            return Err(ConfigError::NegativeOutboundFlow(config.outbound_flow));
        }
        if config.max_wait_time < 0.0 {
            return Err(ConfigError::NegativeMaxWaitTime(config.max_wait_time));
        }
        if config.sim_duration <= 0.0 {
            return Err(ConfigError::NonPositiveSimDuration(config.sim_duration));
        }
        for (index, closure) in config.closures.iter().enumerate() {
            if closure.runway_index >= config.runways.len() {
                return Err(ConfigError::ClosureRunwayOutOfRange {
                    index,
                    runway_index: closure.runway_index,
                    runway_count: config.runways.len(),
                });
            }
            if closure.start_time >= closure.end_time {
                return Err(ConfigError::ClosureWindowInverted {
                    index,
                    start_time: closure.start_time,
                    end_time: closure.end_time,
                });
            }
            if closure.start_time < 0.0 || closure.end_time > config.sim_duration {
                return Err(ConfigError::ClosureWindowOutOfBounds {
                    index,
                    start_time: closure.start_time,
                    end_time: closure.end_time,
                    sim_duration: config.sim_duration,
                });
            }
        }
        Ok(Self(config))
    }

    pub fn into_inner(self) -> SimConfig {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunwayClosure, RunwayConfig};

    #[test]
    fn rejects_empty_runways() {
        let config = SimConfig {
            runways: vec![],
            ..Default::default()
        };
        assert_eq!(Validated::new(config), Err(ConfigError::NoRunways));
    }

    #[test]
    fn rejects_closure_out_of_range() {
        let config = SimConfig {
            runways: vec![RunwayConfig::default()],
            closures: vec![RunwayClosure {
                runway_index: 3,
                start_time: 0.0,
                end_time: 10.0,
                reason: Default::default(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            Validated::new(config),
            Err(ConfigError::ClosureRunwayOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_closure_window() {
        let config = SimConfig {
            runways: vec![RunwayConfig::default()],
            closures: vec![RunwayClosure {
                runway_index: 0,
                start_time: 10.0,
                end_time: 5.0,
                reason: Default::default(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            Validated::new(config),
            Err(ConfigError::ClosureWindowInverted { .. })
        ));
    }

    #[test]
    fn accepts_default_config() {
        assert!(Validated::new(SimConfig::default()).is_ok());
    }
}
