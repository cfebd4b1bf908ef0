//! NBL Trainer entry point
//!
//! In the browser this only installs logging; the page drives `NblGame`.
//! Natively it runs a headless autopilot session and prints the debrief.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("NBL Trainer ready");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use nbl_trainer::consts::SIM_DT;
    use nbl_trainer::settings::Settings;
    use nbl_trainer::sim::{BallastDrill, GameEvent, SessionPhase, autopilot};
    use nbl_trainer::telemetry::TelemetryFeed;
    use nbl_trainer::{BestRuns, Simulator};

    env_logger::init();
    log::info!("NBL Trainer (native) starting headless autopilot demo...");

    // Pre-dive trim: add weight until the suit sinks, then work the surface checklist
    let mut drill = BallastDrill::new();
    let mut weight = 0;
    while !drill.on_surface {
        weight += 5;
        let level = drill.set_weight(weight);
        println!("Trim {weight} kg: {}", level.label());
    }
    for event in [
        drill.toggle_hatch(),
        drill.collect_rock(),
        drill.collect_rock(),
        drill.collect_rock(),
        drill.use_tool(),
        drill.reach_handle(),
    ] {
        println!("{}", event.message());
    }
    log::info!("Surface checklist: {:?}", drill.objectives());

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(12345);
    let settings = Settings::default();
    let mut telemetry = TelemetryFeed::new(seed, settings.telemetry_refresh_secs);
    let mut sim = Simulator::new(seed, settings);
    let mut best_runs = BestRuns::new();

    sim.start(None);
    while sim.phase() == SessionPhase::Running {
        if let Some(command) = autopilot(sim.state()) {
            sim.apply(command);
        }
        sim.tick(SIM_DT);

        if let Some(reading) = telemetry.update(SIM_DT) {
            log::info!(
                "ISS telemetry: {}, {}, orbit {}",
                reading.altitude_label(),
                reading.speed_label(),
                reading.orbit_label()
            );
        }

        for event in sim.drain_events() {
            match &event {
                GameEvent::MoveRejected { .. } | GameEvent::ObstacleHit { .. } => {
                    log::debug!("{event:?}")
                }
                other => {
                    if let Some(status) = other.status() {
                        println!("[{:>6.2}s] {}", sim.state().elapsed_secs, status.text);
                    }
                }
            }
        }
    }

    if let Some(debrief) = sim.debrief() {
        println!("\n{}", debrief.summary());
        if let Some(rank) = best_runs.record(debrief) {
            println!("Best runs rank: #{rank}");
        }
        if let Some(top) = best_runs.top_score() {
            log::info!("Top score: {top}");
        }
    }
}
