//! The simulation facade: owns the scheduler, runways, RNG, and the
//! statistics collector; wires together the generators, aircraft
//! lifecycles, closures, and the queue sampler described in the crate's
//! spec §4.

pub mod aircraft;
pub mod constants;
pub mod generator;
pub mod resource;
pub mod runway;
pub mod sampler;
pub mod scheduler;
pub mod stats;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::config::Validated;
use crate::domain::{Aircraft, Direction, Outcome, RunwayMode, Snapshot, SnapshotKind};
use constants::*;
use generator::GeneratorState;
use resource::{RequestHandle, RequestOutcome};
use runway::Runway;
use scheduler::Scheduler;
use stats::StatisticsCollector;

type AircraftId = u64;

#[derive(Debug, Clone, Copy)]
enum Event {
    GeneratorTick {
        direction: Direction,
        scheduled_time: f64,
    },
    SamplerTick,
    ClosureStart(usize),
    ClosureRelease(usize),
    /// The losing branch of an arrival/departure's `select`: fires at
    /// fuel exhaustion (inbound) or `max_wait_time` (outbound).
    RaceTimeout(AircraftId),
    /// The winning branch: the aircraft has been granted its runway and
    /// is occupying it for the service duration.
    ServiceComplete(AircraftId),
}

/// Who is waiting on a not-yet-granted handle to a given runway's
/// resource. Looked up when that resource is released, so the grant can
/// be resolved regardless of whether the waiter is an aircraft or a
/// closure process.
#[derive(Debug, Clone, Copy)]
enum Owner {
    Aircraft(AircraftId),
    Closure(usize),
}

struct InFlight {
    aircraft: Aircraft,
    entry_time: f64,
    runway_idx: usize,
    handle: RequestHandle,
    /// True once the request has been granted (either immediately, or
    /// later via `resolve_grant`). A `RaceTimeout` that finds this true
    /// is the loser of an already-decided race and is a no-op — this is
    /// how the "request wins same-instant ties" rule in the crate's spec
    /// §9 falls out of the implementation without extra bookkeeping.
    resolved: bool,
}

/// Owns everything a run needs: the event scheduler, runway resources, a
/// seeded RNG, and the append-only statistics collector. Constructed
/// from a [`Validated`] config; [`setup`](Self::setup) registers
/// processes, [`step`](Self::step) advances time, [`snapshot`](Self::snapshot)
/// and [`run`](Self::run) read results.
pub struct Simulation {
    config: crate::domain::SimConfig,
    scheduler: Scheduler<Event>,
    runways: Vec<Runway>,
    rng: StdRng,
    collector: StatisticsCollector,

    holding_count: u32,
    takeoff_count: u32,
    arrival_counter: u32,
    departure_counter: u32,
    next_aircraft_id: AircraftId,

    in_flight: HashMap<AircraftId, InFlight>,
    pending_grants: HashMap<(usize, RequestHandle), Owner>,

    inbound_gen: Option<GeneratorState>,
    outbound_gen: Option<GeneratorState>,

    setup_done: bool,
}

impl Simulation {
    pub fn new(validated: Validated) -> Self {
        let config = validated.into_inner();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let runways = config
            .runways
            .iter()
            .cloned()
            .map(Runway::new)
            .collect();
        let inbound_gen = (config.inbound_flow > 0.0)
            .then(|| GeneratorState::new(Direction::Inbound, config.inbound_flow));
        let outbound_gen = (config.outbound_flow > 0.0)
            .then(|| GeneratorState::new(Direction::Outbound, config.outbound_flow));

        Self {
            config,
            scheduler: Scheduler::new(),
            runways,
            rng,
            collector: StatisticsCollector::new(),
            holding_count: 0,
            takeoff_count: 0,
            arrival_counter: 0,
            departure_counter: 0,
            next_aircraft_id: 0,
            in_flight: HashMap::new(),
            pending_grants: HashMap::new(),
            inbound_gen,
            outbound_gen,
            setup_done: false,
        }
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn duration(&self) -> f64 {
        self.config.sim_duration
    }

    /// Registers generators (only for directions with positive flow),
    /// one closure process per configured closure, and the queue
    /// sampler. May be called at most once.
    pub fn setup(&mut self) {
        assert!(!self.setup_done, "Simulation::setup called more than once");
        self.setup_done = true;

        if self.inbound_gen.is_some() {
            self.schedule_next_tick(Direction::Inbound);
        }
        if self.outbound_gen.is_some() {
            self.schedule_next_tick(Direction::Outbound);
        }
        for idx in 0..self.config.closures.len() {
            let start = self.config.closures[idx].start_time;
            self.scheduler.schedule_at(start, Event::ClosureStart(idx));
        }
        self.scheduler
            .schedule_after(SAMPLE_INTERVAL, Event::SamplerTick);

        debug!(
            runways = self.runways.len(),
            closures = self.config.closures.len(),
            "simulation set up"
        );
    }

    /// Advances the clock to `until`, processing every event strictly
    /// before it. Idempotent if `until <= now`.
    pub fn step(&mut self, until: f64) {
        if until <= self.scheduler.now() {
            return;
        }
        while let Some(event) = self.scheduler.pop_due(until) {
            self.dispatch(event);
        }
        self.scheduler.fast_forward(until);
    }

    /// A lightweight read of current state, suitable for streaming.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            kind: SnapshotKind::Tick,
            sim_time: round1(self.scheduler.now()),
            sim_duration: self.config.sim_duration,
            results: self.collector.compile(),
        }
    }

    /// `setup(); step(sim_duration); compile()`.
    pub fn run(&mut self) -> crate::domain::SimResults {
        self.setup();
        self.step(self.config.sim_duration);
        self.collector.compile()
    }

    pub fn compile(&self) -> crate::domain::SimResults {
        self.collector.compile()
    }

    // -- Event dispatch --

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::GeneratorTick {
                direction,
                scheduled_time,
            } => self.on_generator_tick(direction, scheduled_time),
            Event::SamplerTick => self.on_sampler_tick(),
            Event::ClosureStart(idx) => self.on_closure_start(idx),
            Event::ClosureRelease(idx) => self.on_closure_release(idx),
            Event::RaceTimeout(id) => self.on_race_timeout(id),
            Event::ServiceComplete(id) => self.on_service_complete(id),
        }
    }

    fn schedule_next_tick(&mut self, direction: Direction) {
        let gen = match direction {
            Direction::Inbound => self.inbound_gen.as_mut().expect("inbound generator active"),
            Direction::Outbound => self.outbound_gen.as_mut().expect("outbound generator active"),
        };
        let scheduled_time = gen.advance();
        let entry = generator::actual_entry(scheduled_time, &mut self.rng);
        let now = self.scheduler.now();
        let delay = (entry - now).max(0.0);
        self.scheduler.schedule_after(
            delay,
            Event::GeneratorTick {
                direction,
                scheduled_time,
            },
        );
    }

    fn on_generator_tick(&mut self, direction: Direction, scheduled_time: f64) {
        let counter = match direction {
            Direction::Inbound => {
                self.arrival_counter += 1;
                self.arrival_counter
            }
            Direction::Outbound => {
                self.departure_counter += 1;
                self.departure_counter
            }
        };
        let prefix = match direction {
            Direction::Inbound => "ARR",
            Direction::Outbound => "DEP",
        };
        let callsign = format!("{prefix}{counter:04}");
        let aircraft = generator::make_aircraft(direction, scheduled_time, callsign, &mut self.rng);

        let id = self.next_aircraft_id;
        self.next_aircraft_id += 1;
        self.begin_lifecycle(id, aircraft, counter as u64);

        // Next aircraft for this direction — the draw happens eagerly,
        // before any further suspension, so event order mirrors draw
        // order (crate spec §4.1).
        self.schedule_next_tick(direction);
    }

    fn begin_lifecycle(&mut self, id: AircraftId, aircraft: Aircraft, order: u64) {
        let now = self.scheduler.now();
        let entry_time = now;
        let direction = aircraft.direction;
        let needed_mode = match direction {
            Direction::Inbound => RunwayMode::Landing,
            Direction::Outbound => RunwayMode::Takeoff,
        };
        match direction {
            Direction::Inbound => self.holding_count += 1,
            Direction::Outbound => self.takeoff_count += 1,
        }

        let Some(runway_idx) = self.find_runway(needed_mode) else {
            match direction {
                Direction::Inbound => self.holding_count -= 1,
                Direction::Outbound => self.takeoff_count -= 1,
            }
            let outcome = match direction {
                Direction::Inbound => Outcome::Diverted,
                Direction::Outbound => Outcome::Cancelled,
            };
            let log = aircraft::make_log(&aircraft, entry_time, entry_time, 0.0, 0.0, outcome);
            trace!(callsign = %log.callsign, "no runway available, immediate bad outcome");
            self.record(direction, true, log);
            return;
        };

        let (priority_class, fifo_seq) = aircraft::priority_for(&aircraft, order);
        let race_timeout_delay = match direction {
            Direction::Inbound => aircraft.fuel_remaining - FUEL_RESERVE,
            Direction::Outbound => self.config.max_wait_time,
        };

        match self.runways[runway_idx]
            .resource
            .request(priority_class, fifo_seq)
        {
            RequestOutcome::Granted(handle) => {
                match direction {
                    Direction::Inbound => self.holding_count -= 1,
                    Direction::Outbound => self.takeoff_count -= 1,
                }
                let duration = service_duration(direction);
                self.in_flight.insert(
                    id,
                    InFlight {
                        aircraft,
                        entry_time,
                        runway_idx,
                        handle,
                        resolved: true,
                    },
                );
                self.scheduler
                    .schedule_after(duration, Event::ServiceComplete(id));
            }
            RequestOutcome::Queued(handle) => {
                self.in_flight.insert(
                    id,
                    InFlight {
                        aircraft,
                        entry_time,
                        runway_idx,
                        handle,
                        resolved: false,
                    },
                );
                self.pending_grants
                    .insert((runway_idx, handle), Owner::Aircraft(id));
                self.scheduler
                    .schedule_after(race_timeout_delay, Event::RaceTimeout(id));
            }
        }
    }

    fn on_race_timeout(&mut self, id: AircraftId) {
        let Some(flight) = self.in_flight.get(&id) else {
            return;
        };
        if flight.resolved {
            // The request already won this race (see `InFlight::resolved`).
            return;
        }
        let InFlight {
            aircraft,
            entry_time,
            runway_idx,
            handle,
            ..
        } = self.in_flight.remove(&id).expect("checked Some above");
        self.pending_grants.remove(&(runway_idx, handle));
        self.runways[runway_idx].resource.cancel(handle);

        let direction = aircraft.direction;
        match direction {
            Direction::Inbound => self.holding_count -= 1,
            Direction::Outbound => self.takeoff_count -= 1,
        }
        let now = self.scheduler.now();
        let outcome = match direction {
            Direction::Inbound => Outcome::Diverted,
            Direction::Outbound => Outcome::Cancelled,
        };
        let log = aircraft::make_log(&aircraft, entry_time, now, now - entry_time, 0.0, outcome);
        trace!(callsign = %log.callsign, outcome = %log.outcome, "race lost to timeout");
        self.record(direction, true, log);
    }

    fn on_service_complete(&mut self, id: AircraftId) {
        let InFlight {
            aircraft,
            entry_time,
            runway_idx,
            ..
        } = self
            .in_flight
            .remove(&id)
            .expect("ServiceComplete fired for an unknown aircraft");
        let now = self.scheduler.now();
        let direction = aircraft.direction;
        let duration = service_duration(direction);

        let wait_time = now - entry_time - duration;
        let delay = now - duration - aircraft.scheduled_time;
        let outcome = match direction {
            Direction::Inbound => Outcome::Landed,
            Direction::Outbound => Outcome::Departed,
        };
        let log = aircraft::make_log(&aircraft, entry_time, now, wait_time, delay, outcome);
        trace!(callsign = %log.callsign, outcome = %log.outcome, "service complete");
        self.record(direction, false, log);

        if let Some(granted_handle) = self.runways[runway_idx].resource.release() {
            self.resolve_grant(runway_idx, granted_handle);
        }
    }

    fn on_closure_start(&mut self, idx: usize) {
        let runway_idx = self.config.closures[idx].runway_index;
        match self.runways[runway_idx].resource.request(-1, 0) {
            RequestOutcome::Granted(_handle) => {
                let closure = &self.config.closures[idx];
                let duration = closure.end_time - closure.start_time;
                self.scheduler
                    .schedule_after(duration, Event::ClosureRelease(idx));
            }
            RequestOutcome::Queued(handle) => {
                self.pending_grants
                    .insert((runway_idx, handle), Owner::Closure(idx));
            }
        }
    }

    fn on_closure_release(&mut self, idx: usize) {
        let runway_idx = self.config.closures[idx].runway_index;
        if let Some(granted_handle) = self.runways[runway_idx].resource.release() {
            self.resolve_grant(runway_idx, granted_handle);
        }
    }

    /// Called whenever a runway's `release()` hands the resource to a
    /// waiter. Looks up who was waiting and either arms the aircraft's
    /// service timer or the closure's hold timer.
    fn resolve_grant(&mut self, runway_idx: usize, handle: RequestHandle) {
        let Some(owner) = self.pending_grants.remove(&(runway_idx, handle)) else {
            return;
        };
        match owner {
            Owner::Aircraft(id) => {
                let direction = {
                    let flight = self
                        .in_flight
                        .get_mut(&id)
                        .expect("pending grant for an unknown aircraft");
                    flight.resolved = true;
                    flight.aircraft.direction
                };
                match direction {
                    Direction::Inbound => self.holding_count -= 1,
                    Direction::Outbound => self.takeoff_count -= 1,
                }
                let duration = service_duration(direction);
                self.scheduler
                    .schedule_after(duration, Event::ServiceComplete(id));
            }
            Owner::Closure(idx) => {
                let closure = &self.config.closures[idx];
                let duration = closure.end_time - closure.start_time;
                self.scheduler
                    .schedule_after(duration, Event::ClosureRelease(idx));
            }
        }
    }

    fn on_sampler_tick(&mut self) {
        let now = self.scheduler.now();
        self.collector
            .sample_queues(now, self.holding_count, self.takeoff_count);
        self.scheduler
            .schedule_at(sampler::next_tick(now), Event::SamplerTick);
    }

    /// Among runways whose advisory status is `Available` and whose
    /// mode serves `needed`, the one with the shortest wait queue. Ties
    /// resolve to the first such runway in config order (crate spec §5).
    fn find_runway(&self, needed: RunwayMode) -> Option<usize> {
        self.runways
            .iter()
            .enumerate()
            .filter(|(_, rw)| rw.serves(needed))
            .min_by_key(|(_, rw)| rw.resource.queue_len())
            .map(|(idx, _)| idx)
    }

    fn record(&mut self, direction: Direction, bad_outcome: bool, log: crate::domain::AircraftLog) {
        match (direction, bad_outcome) {
            (Direction::Inbound, false) => self.collector.record_landing(log),
            (Direction::Inbound, true) => self.collector.record_diversion(log),
            (Direction::Outbound, false) => self.collector.record_departure(log),
            (Direction::Outbound, true) => self.collector.record_cancellation(log),
        }
    }
}

fn service_duration(direction: Direction) -> f64 {
    match direction {
        Direction::Inbound => LANDING_DURATION,
        Direction::Outbound => TAKEOFF_DURATION,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
