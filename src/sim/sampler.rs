//! The queue sampler: a time-driven (not event-driven) process that
//! records holding-pattern and takeoff-queue sizes every
//! [`SAMPLE_INTERVAL`](super::constants::SAMPLE_INTERVAL) simulated
//! minutes, independent of traffic volume (crate spec §4.7).

use super::constants::SAMPLE_INTERVAL;

/// The next instant the sampler should fire, given it just fired at
/// `now`. The facade schedules its own recurring `SamplerTick` event
/// using this, rather than the sampler owning a scheduler handle.
pub fn next_tick(now: f64) -> f64 {
    now + SAMPLE_INTERVAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_evenly_spaced() {
        let mut t = 0.0;
        for _ in 0..5 {
            t = next_tick(t);
        }
        assert_eq!(t, 5.0 * SAMPLE_INTERVAL);
    }
}
