//! Pure helpers shared by the arrival and departure lifecycles in
//! `sim::mod`: priority-tuple derivation and log assembly. The lifecycle
//! state machines themselves live in the facade because they need
//! mutable access to runways, the scheduler, and the live counters.

use crate::domain::{Aircraft, AircraftLog, Outcome};

/// `(priority_class, fifo_seq)` for a runway request. Emergencies and
/// closures aside, all traffic is class 1; inbound aircraft with a
/// declared emergency preempt to class 0. `order` is the per-direction
/// counter taken at lifecycle entry (crate spec §4.4-4.6).
pub fn priority_for(aircraft: &Aircraft, order: u64) -> (i32, u64) {
    use crate::domain::{Direction, Emergency};
    let class = match aircraft.direction {
        Direction::Outbound => 1,
        Direction::Inbound if aircraft.emergency != Emergency::None => 0,
        Direction::Inbound => 1,
    };
    (class, order)
}

/// Assemble a completed lifecycle record. `wait_time` is clamped to
/// `>= 0` per the crate's spec §3 invariant (ii); `delay` is left at
/// whatever the caller passes (0.0 for the "unset" diversion/cancellation
/// cases, matching the reference implementation's default).
#[allow(clippy::too_many_arguments)]
pub fn make_log(
    aircraft: &Aircraft,
    entry_time: f64,
    exit_time: f64,
    wait_time: f64,
    delay: f64,
    outcome: Outcome,
) -> AircraftLog {
    AircraftLog {
        callsign: aircraft.callsign.clone(),
        operator: aircraft.operator.clone(),
        origin: aircraft.origin.clone(),
        destination: aircraft.destination.clone(),
        direction: aircraft.direction,
        scheduled_time: aircraft.scheduled_time,
        entry_time,
        exit_time,
        wait_time: wait_time.max(0.0),
        delay,
        emergency: aircraft.emergency,
        fuel_at_entry: aircraft.fuel_remaining,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Emergency};

    fn aircraft(direction: Direction, emergency: Emergency) -> Aircraft {
        Aircraft {
            callsign: "ARR0001".into(),
            operator: "SIM-AIR".into(),
            origin: "ORIG".into(),
            destination: "HERE".into(),
            direction,
            scheduled_time: 0.0,
            fuel_remaining: 40.0,
            emergency,
        }
    }

    #[test]
    fn emergency_inbound_gets_priority_class_zero() {
        let a = aircraft(Direction::Inbound, Emergency::Mechanical);
        assert_eq!(priority_for(&a, 5), (0, 5));
    }

    #[test]
    fn normal_inbound_and_all_outbound_are_class_one() {
        let a = aircraft(Direction::Inbound, Emergency::None);
        assert_eq!(priority_for(&a, 3), (1, 3));
        let b = aircraft(Direction::Outbound, Emergency::None);
        assert_eq!(priority_for(&b, 3), (1, 3));
    }

    #[test]
    fn wait_time_is_clamped_nonnegative() {
        let a = aircraft(Direction::Inbound, Emergency::None);
        let log = make_log(&a, 10.0, 10.0, -0.5, 0.0, Outcome::Diverted);
        assert_eq!(log.wait_time, 0.0);
    }
}
