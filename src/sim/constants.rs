//! Constants the core must honour bit-exactly for reproducibility.

pub const LANDING_DURATION: f64 = 2.0;
pub const TAKEOFF_DURATION: f64 = 2.0;
pub const SAMPLE_INTERVAL: f64 = 1.0;

pub const TIME_STDDEV: f64 = 5.0;
pub const TIME_TRUNCATE: f64 = 15.0;

pub const FUEL_MIN: f64 = 20.0;
pub const FUEL_MAX: f64 = 60.0;
pub const FUEL_RESERVE: f64 = 10.0;

pub const EMERGENCY_MECHANICAL_PROB: f64 = 0.01;
pub const EMERGENCY_PASSENGER_PROB: f64 = 0.01;
pub const EMERGENCY_FUEL_PROB: f64 = 0.005;
