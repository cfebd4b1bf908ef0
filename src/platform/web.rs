//! wasm-bindgen facade for the browser shell
//!
//! The shell calls commands, advances once per animation frame, and reads
//! JSON snapshots/events back out. All rendering stays in JS.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::debrief::BestRuns;
use crate::settings::{Settings, parse_weight_kg};
use crate::sim::{BallastDrill, Command, Direction, SessionPhase};
use crate::simulator::Simulator;
use crate::telemetry::TelemetryFeed;

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Serialization failed: {e}");
        String::from("null")
    })
}

/// Training game handle owned by the page
#[wasm_bindgen]
pub struct NblGame {
    sim: Simulator,
    best_runs: BestRuns,
    telemetry: TelemetryFeed,
    drill: BallastDrill,
    // Track phase for recording finished runs
    last_phase: SessionPhase,
}

#[wasm_bindgen]
impl NblGame {
    /// Create a game; `settings_json` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<NblGame, JsValue> {
        let settings = match settings_json {
            Some(json) => {
                Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Settings::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("NBL game created with seed: {seed}");
        Ok(Self {
            telemetry: TelemetryFeed::new(seed, settings.telemetry_refresh_secs),
            sim: Simulator::new(seed, settings),
            best_runs: BestRuns::new(),
            drill: BallastDrill::new(),
            last_phase: SessionPhase::Idle,
        })
    }

    /// Start with the raw contents of the weight field
    pub fn start(&mut self, weight_input: Option<String>) {
        let weight = weight_input.as_deref().and_then(parse_weight_kg);
        self.sim.start(weight);
    }

    pub fn restart(&mut self) {
        self.sim.restart();
    }

    #[wasm_bindgen(js_name = addWeight)]
    pub fn add_weight(&mut self) {
        self.sim.add_weight();
    }

    #[wasm_bindgen(js_name = addFloat)]
    pub fn add_float(&mut self) {
        self.sim.add_float();
    }

    #[wasm_bindgen(js_name = resetBuoyancy)]
    pub fn reset_buoyancy(&mut self) {
        self.sim.reset_buoyancy();
    }

    /// Move by direction name (`up`, `down`, `left`, `right`); `magnitude`
    /// defaults to the standard impulse
    #[wasm_bindgen(js_name = moveAstronaut)]
    pub fn move_astronaut(&mut self, direction: &str, magnitude: Option<f32>) -> bool {
        let direction = match direction.to_lowercase().as_str() {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            other => {
                log::warn!("Unknown direction: {other}");
                return false;
            }
        };
        match magnitude {
            Some(magnitude) => self.sim.move_with(direction, magnitude),
            None => self.sim.move_astronaut(direction),
        }
    }

    /// Handle a keydown; returns true if the key was consumed
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        match Command::from_key(&event.key()) {
            Some(command) => {
                if !matches!(command, Command::Move(_)) {
                    event.prevent_default();
                }
                match command {
                    Command::Restart => self.sim.restart(),
                    Command::Start { weight_kg } => self.sim.start(weight_kg),
                    other => self.sim.apply(other),
                }
                true
            }
            None => false,
        }
    }

    /// Advance by a frame time in seconds; returns fixed steps taken
    pub fn frame(&mut self, dt_secs: f32) -> u32 {
        self.telemetry.update(dt_secs);
        let steps = self.sim.advance(dt_secs);

        let current_phase = self.sim.phase();
        if current_phase != self.last_phase {
            if let Some(debrief) = self.sim.debrief() {
                self.best_runs.record(debrief);
            }
            self.last_phase = current_phase;
        }
        steps
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        to_json(&self.sim.snapshot())
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> String {
        to_json(&self.sim.drain_events())
    }

    #[wasm_bindgen(js_name = debriefJson)]
    pub fn debrief_json(&self) -> String {
        to_json(&self.sim.debrief())
    }

    #[wasm_bindgen(js_name = bestRunsJson)]
    pub fn best_runs_json(&self) -> String {
        to_json(&self.best_runs)
    }

    /// Rank the running score would earn if the session ended now
    #[wasm_bindgen(js_name = potentialRank)]
    pub fn potential_rank(&self) -> Option<u32> {
        self.best_runs
            .potential_rank(self.sim.state().score)
            .map(|rank| rank as u32)
    }

    #[wasm_bindgen(js_name = topScore)]
    pub fn top_score(&self) -> Option<f64> {
        self.best_runs.top_score().map(|score| score as f64)
    }

    // === Ballast drill ===

    /// Set suit weight; returns the buoyancy label
    #[wasm_bindgen(js_name = setDrillWeight)]
    pub fn set_drill_weight(&mut self, weight_kg: u32) -> String {
        self.drill.set_weight(weight_kg).label().to_string()
    }

    /// Set floatie count; returns the buoyancy label
    #[wasm_bindgen(js_name = setDrillFloaties)]
    pub fn set_drill_floaties(&mut self, floaties: u32) -> String {
        self.drill.set_floaties(floaties).label().to_string()
    }

    #[wasm_bindgen(js_name = toggleHatch)]
    pub fn toggle_hatch(&mut self) -> String {
        self.drill.toggle_hatch().message()
    }

    #[wasm_bindgen(js_name = collectRock)]
    pub fn collect_rock(&mut self) -> String {
        self.drill.collect_rock().message()
    }

    #[wasm_bindgen(js_name = useSurfaceTool)]
    pub fn use_surface_tool(&mut self) -> String {
        self.drill.use_tool().message()
    }

    #[wasm_bindgen(js_name = reachHandle)]
    pub fn reach_handle(&mut self) -> String {
        self.drill.reach_handle().message()
    }

    /// Drill state plus checklist, as JSON
    #[wasm_bindgen(js_name = drillJson)]
    pub fn drill_json(&self) -> String {
        to_json(&(&self.drill, self.drill.objectives()))
    }

    #[wasm_bindgen(js_name = telemetryJson)]
    pub fn telemetry_json(&self) -> String {
        to_json(&self.telemetry.latest())
    }
}
