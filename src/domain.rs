//! Wire-shaped configuration and result types.
//!
//! These are the values that cross the boundary between a transport (out of
//! scope for this crate) and the simulation engine in [`crate::sim`]. They
//! are plain serde-derived data, not engine state.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbound => write!(f, "inbound"),
            Self::Outbound => write!(f, "outbound"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emergency {
    #[default]
    None,
    Fuel,
    Mechanical,
    PassengerHealth,
}

impl fmt::Display for Emergency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Fuel => write!(f, "fuel"),
            Self::Mechanical => write!(f, "mechanical"),
            Self::PassengerHealth => write!(f, "passenger_health"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayMode {
    #[default]
    Landing,
    Takeoff,
    Mixed,
}

impl RunwayMode {
    pub fn serves(self, needed: RunwayMode) -> bool {
        self == needed || self == RunwayMode::Mixed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayStatus {
    #[default]
    Available,
    Inspection,
    Snow,
    EquipmentFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Landed,
    Departed,
    Diverted,
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landed => write!(f, "landed"),
            Self::Departed => write!(f, "departed"),
            Self::Diverted => write!(f, "diverted"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Immutable once constructed by a generator; see the crate's spec §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub callsign: String,
    pub operator: String,
    pub origin: String,
    pub destination: String,
    pub direction: Direction,
    pub scheduled_time: f64,
    pub fuel_remaining: f64,
    pub emergency: Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Tick,
    Done,
}

/// One streaming message: either a `tick` taken mid-run or the final
/// `done` message, both carrying the same compiled aggregate fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "type")]
    pub kind: SnapshotKind,
    pub sim_time: f64,
    pub sim_duration: f64,
    #[serde(flatten)]
    pub results: SimResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunwayConfig {
    pub number: String,
    pub length: f64,
    pub bearing: f64,
    pub mode: RunwayMode,
    pub status: RunwayStatus,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            number: "01".to_string(),
            length: 3000.0,
            bearing: 90.0,
            mode: RunwayMode::default(),
            status: RunwayStatus::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayClosure {
    pub runway_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default = "default_closure_reason")]
    pub reason: RunwayStatus,
}

fn default_closure_reason() -> RunwayStatus {
    RunwayStatus::Inspection
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub runways: Vec<RunwayConfig>,
    pub inbound_flow: f64,
    pub outbound_flow: f64,
    pub max_wait_time: f64,
    pub sim_duration: f64,
    pub closures: Vec<RunwayClosure>,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runways: vec![RunwayConfig::default()],
            inbound_flow: 15.0,
            outbound_flow: 15.0,
            max_wait_time: 30.0,
            sim_duration: 120.0,
            closures: Vec::new(),
            seed: None,
        }
    }
}

/// One record per completed aircraft lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftLog {
    pub callsign: String,
    pub operator: String,
    pub origin: String,
    pub destination: String,
    pub direction: Direction,
    pub scheduled_time: f64,
    pub entry_time: f64,
    pub exit_time: f64,
    pub wait_time: f64,
    pub delay: f64,
    pub emergency: Emergency,
    pub fuel_at_entry: f64,
    pub outcome: Outcome,
}

/// A `(sim_time, queue_size)` sample of a queue time series.
pub type QueueSample = (f64, u32);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimResults {
    // Departures
    pub total_departures: usize,
    pub total_cancellations: usize,
    pub max_takeoff_queue_size: u32,
    pub avg_takeoff_wait: f64,
    pub max_takeoff_delay: f64,
    pub avg_takeoff_delay: f64,
    // Arrivals
    pub total_arrivals: usize,
    pub total_diversions: usize,
    pub max_holding_size: u32,
    pub avg_holding_time: f64,
    pub max_arrival_delay: f64,
    pub avg_arrival_delay: f64,
    // Time series for charts
    pub takeoff_queue_over_time: Vec<QueueSample>,
    pub holding_size_over_time: Vec<QueueSample>,
    // Per-aircraft logs
    pub landed_aircraft: Vec<AircraftLog>,
    pub departed_aircraft: Vec<AircraftLog>,
    pub diverted_aircraft: Vec<AircraftLog>,
    pub cancelled_aircraft: Vec<AircraftLog>,
}
