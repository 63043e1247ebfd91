//! The streaming driver described in the crate's spec §6: an external
//! caller advances the simulation in fixed-size wall-clock-independent
//! ticks and reads back a [`Snapshot`] after each one, with a final
//! `done` message once `sim_duration` is reached. The transport that
//! would push these over a WebSocket is out of scope for this crate —
//! this is the loop shape it would drive.

use crate::domain::{Snapshot, SnapshotKind};
use crate::sim::Simulation;

/// Drives a [`Simulation`] forward in steps of `tick_size` simulated
/// minutes, yielding one [`Snapshot`] per step. Calls `setup()` on
/// construction; the final item produced has `kind == SnapshotKind::Done`.
pub struct TickStream<'a> {
    sim: &'a mut Simulation,
    tick_size: f64,
    finished: bool,
}

impl<'a> TickStream<'a> {
    pub fn new(sim: &'a mut Simulation, tick_size: f64) -> Self {
        assert!(tick_size > 0.0, "tick_size must be positive");
        sim.setup();
        Self {
            sim,
            tick_size,
            finished: false,
        }
    }
}

impl<'a> Iterator for TickStream<'a> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.finished {
            return None;
        }
        let duration = self.sim.duration();
        let now = self.sim.now();
        if now >= duration {
            self.finished = true;
            return Some(Snapshot {
                kind: SnapshotKind::Done,
                sim_time: round1(duration),
                sim_duration: duration,
                results: self.sim.compile(),
            });
        }
        let until = (now + self.tick_size).min(duration);
        self.sim.step(until);
        Some(self.sim.snapshot())
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validated;
    use crate::domain::{RunwayConfig, RunwayMode, SimConfig};

    fn config() -> SimConfig {
        SimConfig {
            runways: vec![
                RunwayConfig {
                    mode: RunwayMode::Mixed,
                    ..Default::default()
                },
            ],
            inbound_flow: 15.0,
            outbound_flow: 15.0,
            sim_duration: 10.0,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn last_item_is_done_and_matches_final_compile() {
        let mut sim = Simulation::new(Validated::new(config()).unwrap());
        let snapshots: Vec<Snapshot> = TickStream::new(&mut sim, 2.5).collect();
        let last = snapshots.last().expect("at least one snapshot");
        assert_eq!(last.kind, SnapshotKind::Done);
        assert_eq!(last.sim_time, 10.0);

        let ticks_before_done = snapshots.len() - 1;
        assert!(ticks_before_done >= 4);
        for s in &snapshots[..ticks_before_done] {
            assert_eq!(s.kind, SnapshotKind::Tick);
        }
    }

    #[test]
    fn sim_time_is_nondecreasing_across_ticks() {
        let mut sim = Simulation::new(Validated::new(config()).unwrap());
        let snapshots: Vec<Snapshot> = TickStream::new(&mut sim, 3.0).collect();
        let mut last_time = -1.0;
        for s in &snapshots {
            assert!(s.sim_time >= last_time);
            last_time = s.sim_time;
        }
    }
}
