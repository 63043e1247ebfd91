//! An append-only sink for per-aircraft logs and time-series samples,
//! with a pure `compile()` that aggregates metrics at any point in time.

use crate::domain::{AircraftLog, QueueSample, SimResults};

#[derive(Default)]
pub struct StatisticsCollector {
    landed: Vec<AircraftLog>,
    departed: Vec<AircraftLog>,
    diverted: Vec<AircraftLog>,
    cancelled: Vec<AircraftLog>,

    holding_samples: Vec<QueueSample>,
    takeoff_samples: Vec<QueueSample>,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_landing(&mut self, log: AircraftLog) {
        self.landed.push(log);
    }

    pub fn record_departure(&mut self, log: AircraftLog) {
        self.departed.push(log);
    }

    pub fn record_diversion(&mut self, log: AircraftLog) {
        self.diverted.push(log);
    }

    pub fn record_cancellation(&mut self, log: AircraftLog) {
        self.cancelled.push(log);
    }

    pub fn sample_queues(&mut self, sim_time: f64, holding_count: u32, takeoff_count: u32) {
        self.holding_samples.push((sim_time, holding_count));
        self.takeoff_samples.push((sim_time, takeoff_count));
    }

    pub fn compile(&self) -> SimResults {
        let landed_waits: Vec<f64> = self.landed.iter().map(|a| a.wait_time).collect();
        let landed_delays: Vec<f64> = self.landed.iter().map(|a| a.delay).collect();
        let holding_sizes = self.holding_samples.iter().map(|s| s.1);

        let departed_waits: Vec<f64> = self.departed.iter().map(|a| a.wait_time).collect();
        let departed_delays: Vec<f64> = self.departed.iter().map(|a| a.delay).collect();
        let takeoff_sizes = self.takeoff_samples.iter().map(|s| s.1);

        SimResults {
            total_departures: self.departed.len(),
            total_cancellations: self.cancelled.len(),
            max_takeoff_queue_size: takeoff_sizes.max().unwrap_or(0),
            avg_takeoff_wait: average(&departed_waits),
            max_takeoff_delay: max_of(&departed_delays),
            avg_takeoff_delay: average(&departed_delays),

            total_arrivals: self.landed.len(),
            total_diversions: self.diverted.len(),
            max_holding_size: holding_sizes.max().unwrap_or(0),
            avg_holding_time: average(&landed_waits),
            max_arrival_delay: max_of(&landed_delays),
            avg_arrival_delay: average(&landed_delays),

            takeoff_queue_over_time: self.takeoff_samples.clone(),
            holding_size_over_time: self.holding_samples.clone(),

            landed_aircraft: self.landed.clone(),
            departed_aircraft: self.departed.clone(),
            diverted_aircraft: self.diverted.clone(),
            cancelled_aircraft: self.cancelled.clone(),
        }
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Emergency, Outcome};

    fn log(outcome: Outcome, wait_time: f64, delay: f64) -> AircraftLog {
        AircraftLog {
            callsign: "ARR0001".into(),
            operator: "SIM-AIR".into(),
            origin: "ORIG".into(),
            destination: "HERE".into(),
            direction: Direction::Inbound,
            scheduled_time: 0.0,
            entry_time: 0.0,
            exit_time: wait_time,
            wait_time,
            delay,
            emergency: Emergency::None,
            fuel_at_entry: 40.0,
            outcome,
        }
    }

    #[test]
    fn compile_on_empty_collector_is_all_zero() {
        let c = StatisticsCollector::new();
        let r = c.compile();
        assert_eq!(r.total_arrivals, 0);
        assert_eq!(r.avg_holding_time, 0.0);
        assert_eq!(r.max_holding_size, 0);
    }

    #[test]
    fn compile_aggregates_landed_metrics() {
        let mut c = StatisticsCollector::new();
        c.record_landing(log(Outcome::Landed, 2.0, 1.0));
        c.record_landing(log(Outcome::Landed, 4.0, 3.0));
        c.sample_queues(0.0, 3, 0);
        c.sample_queues(1.0, 5, 0);
        let r = c.compile();
        assert_eq!(r.total_arrivals, 2);
        assert_eq!(r.avg_holding_time, 3.0);
        assert_eq!(r.max_arrival_delay, 3.0);
        assert_eq!(r.max_holding_size, 5);
    }

    #[test]
    fn max_delay_stays_negative_when_every_delay_is_early() {
        let mut c = StatisticsCollector::new();
        c.record_landing(log(Outcome::Landed, 0.0, -4.0));
        c.record_landing(log(Outcome::Landed, 0.0, -1.5));
        let r = c.compile();
        assert_eq!(r.max_arrival_delay, -1.5);
    }

    #[test]
    fn compile_is_side_effect_free_and_repeatable() {
        let mut c = StatisticsCollector::new();
        c.record_departure(log(Outcome::Departed, 1.0, 1.0));
        let first = c.compile();
        let second = c.compile();
        assert_eq!(first.total_departures, second.total_departures);
        assert_eq!(first.avg_takeoff_wait, second.avg_takeoff_wait);
    }
}
