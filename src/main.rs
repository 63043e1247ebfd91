use runway_sim::config::Validated;
use runway_sim::domain::{RunwayClosure, RunwayConfig, RunwayMode, RunwayStatus, SimConfig};
use runway_sim::sim::Simulation;
use runway_sim::stream::TickStream;

fn baseline_scenario() -> SimConfig {
    SimConfig {
        runways: vec![
            RunwayConfig {
                number: "09L".into(),
                mode: RunwayMode::Landing,
                ..Default::default()
            },
            RunwayConfig {
                number: "09R".into(),
                mode: RunwayMode::Takeoff,
                ..Default::default()
            },
            RunwayConfig {
                number: "27".into(),
                mode: RunwayMode::Mixed,
                status: RunwayStatus::Available,
                ..Default::default()
            },
        ],
        inbound_flow: 22.0,
        outbound_flow: 22.0,
        max_wait_time: 25.0,
        sim_duration: 180.0,
        closures: vec![RunwayClosure {
            runway_index: 1,
            start_time: 60.0,
            end_time: 90.0,
            reason: RunwayStatus::Inspection,
        }],
        seed: Some(42),
    }
}

fn run_demo() {
    println!();
    println!("=====================================================================");
    println!("  Airport Runway Simulator -- Demo Run");
    println!("=====================================================================");

    let config = baseline_scenario();
    let validated = Validated::new(config).expect("demo scenario is valid");
    let mut sim = Simulation::new(validated);
    let results = sim.run();

    println!("\n--- Arrivals ---\n");
    println!("  landed:     {}", results.total_arrivals);
    println!("  diverted:   {}", results.total_diversions);
    println!("  max holding: {}", results.max_holding_size);
    println!("  avg holding wait: {:.2} min", results.avg_holding_time);
    println!("  avg arrival delay: {:.2} min", results.avg_arrival_delay);

    println!("\n--- Departures ---\n");
    println!("  departed:   {}", results.total_departures);
    println!("  cancelled:  {}", results.total_cancellations);
    println!("  max takeoff queue: {}", results.max_takeoff_queue_size);
    println!("  avg takeoff wait: {:.2} min", results.avg_takeoff_wait);
    println!("  avg takeoff delay: {:.2} min", results.avg_takeoff_delay);

    println!("\n--- Simulation Complete ---\n");
}

fn run_stream() {
    println!();
    println!("=====================================================================");
    println!("  Airport Runway Simulator -- Streaming Ticks");
    println!("=====================================================================\n");

    let validated = Validated::new(baseline_scenario()).expect("demo scenario is valid");
    let mut sim = Simulation::new(validated);
    for snapshot in TickStream::new(&mut sim, 15.0) {
        println!(
            "  [{:?}] t={:>6.1} / {:>6.1}  holding_max={:<3} takeoff_max={:<3} arrivals={:<3} departures={:<3} diversions={:<3} cancellations={:<3}",
            snapshot.kind,
            snapshot.sim_time,
            snapshot.sim_duration,
            snapshot.results.max_holding_size,
            snapshot.results.max_takeoff_queue_size,
            snapshot.results.total_arrivals,
            snapshot.results.total_departures,
            snapshot.results.total_diversions,
            snapshot.results.total_cancellations,
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "demo".into());
    match mode.as_str() {
        "demo" => run_demo(),
        "stream" => run_stream(),
        other => {
            eprintln!("Unknown mode: '{other}'. Use 'demo' or 'stream'.");
            std::process::exit(1);
        }
    }
}
