//! Aircraft generators: Poisson-like inter-arrival scheduling with
//! truncated-normal jitter, plus the per-aircraft attribute rolls
//! (fuel, emergency status) that happen at lifecycle entry.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::constants::*;
use crate::domain::{Aircraft, Direction, Emergency};

/// Per-direction scheduling state owned by the facade. Tracks the next
/// `scheduled_time` a generator will draw an aircraft for; the actual
/// entry time is that value jittered by [`sample_offset`].
pub struct GeneratorState {
    pub direction: Direction,
    pub interval: f64,
    pub scheduled: f64,
}

impl GeneratorState {
    pub fn new(direction: Direction, flow_per_hour: f64) -> Self {
        Self {
            direction,
            interval: 60.0 / flow_per_hour,
            scheduled: 0.0,
        }
    }

    /// Advance `scheduled` by one inter-arrival interval and return the
    /// value that was current before advancing.
    pub fn advance(&mut self) -> f64 {
        let current = self.scheduled;
        self.scheduled += self.interval;
        current
    }
}

/// `Normal(0, TIME_STDDEV)` clamped to `[-TIME_TRUNCATE, TIME_TRUNCATE]`.
pub fn sample_offset(rng: &mut impl Rng) -> f64 {
    let normal = Normal::new(0.0, TIME_STDDEV).expect("TIME_STDDEV is a valid std-dev");
    normal.sample(rng).clamp(-TIME_TRUNCATE, TIME_TRUNCATE)
}

/// The actual entry time for an aircraft scheduled at `scheduled_time`,
/// drawing one jitter sample.
pub fn actual_entry(scheduled_time: f64, rng: &mut impl Rng) -> f64 {
    (scheduled_time + sample_offset(rng)).max(0.0)
}

fn sample_fuel(rng: &mut impl Rng) -> f64 {
    rng.gen_range(FUEL_MIN..=FUEL_MAX)
}

/// Roll emergency status and fuel for an inbound aircraft. A fuel
/// emergency resamples fuel down into `[FUEL_RESERVE+1, FUEL_RESERVE+10]`
/// per the crate's spec §4.4 — despite its priority-0 standing, such an
/// aircraft can still lose its own fuel race (see `sim::mod` tests).
fn roll_inbound(rng: &mut impl Rng) -> (Emergency, f64) {
    let fuel = sample_fuel(rng);
    let roll: f64 = rng.gen_range(0.0..1.0);
    if roll < EMERGENCY_MECHANICAL_PROB {
        (Emergency::Mechanical, fuel)
    } else if roll < EMERGENCY_MECHANICAL_PROB + EMERGENCY_PASSENGER_PROB {
        (Emergency::PassengerHealth, fuel)
    } else if roll < EMERGENCY_MECHANICAL_PROB + EMERGENCY_PASSENGER_PROB + EMERGENCY_FUEL_PROB {
        let fuel = rng.gen_range((FUEL_RESERVE + 1.0)..=(FUEL_RESERVE + 10.0));
        (Emergency::Fuel, fuel)
    } else {
        (Emergency::None, fuel)
    }
}

/// Build the aircraft entering its lifecycle right now. `callsign` is
/// assigned by the caller from the per-direction counter at the moment
/// of entry (crate spec §4.4).
pub fn make_aircraft(
    direction: Direction,
    scheduled_time: f64,
    callsign: String,
    rng: &mut impl Rng,
) -> Aircraft {
    match direction {
        Direction::Inbound => {
            let (emergency, fuel_remaining) = roll_inbound(rng);
            Aircraft {
                callsign,
                operator: "SIM-AIR".into(),
                origin: "ORIG".into(),
                destination: "HERE".into(),
                direction,
                scheduled_time,
                fuel_remaining,
                emergency,
            }
        }
        Direction::Outbound => Aircraft {
            callsign,
            operator: "SIM-AIR".into(),
            origin: "HERE".into(),
            destination: "DEST".into(),
            direction,
            scheduled_time,
            fuel_remaining: sample_fuel(rng),
            emergency: Emergency::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn offset_is_always_within_truncation_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let o = sample_offset(&mut rng);
            assert!((-TIME_TRUNCATE..=TIME_TRUNCATE).contains(&o));
        }
    }

    #[test]
    fn generator_state_advances_by_interval() {
        let mut gen = GeneratorState::new(Direction::Inbound, 30.0);
        assert_eq!(gen.interval, 2.0);
        assert_eq!(gen.advance(), 0.0);
        assert_eq!(gen.advance(), 2.0);
        assert_eq!(gen.scheduled, 4.0);
    }

    #[test]
    fn fuel_emergency_resamples_low_fuel() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut saw_fuel_emergency = false;
        for _ in 0..20_000 {
            let (emergency, fuel) = roll_inbound(&mut rng);
            if emergency == Emergency::Fuel {
                saw_fuel_emergency = true;
                assert!(fuel > FUEL_RESERVE && fuel <= FUEL_RESERVE + 10.0);
            }
        }
        assert!(saw_fuel_emergency, "expected at least one fuel emergency in 20k rolls");
    }
}
