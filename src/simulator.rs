//! Buoyancy training simulator facade
//!
//! Owns one session, runs fixed steps from variable frame times, and hands the
//! shell snapshots and drained events.

use crate::consts::*;
use crate::debrief::Debrief;
use crate::settings::Settings;
use crate::sim::{
    Command, Direction, GameEvent, SessionPhase, SessionState, Snapshot, apply, move_astronaut,
    tick,
};

/// Most frame time one `advance` call accepts; below `MAX_SUBSTEPS * SIM_DT`
/// so every call drains its own frame
const MAX_FRAME_DT: f32 = 0.1;

/// Single-session simulator driven by the UI shell
#[derive(Debug, Clone)]
pub struct Simulator {
    state: SessionState,
    accumulator: f32,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(0, Settings::default())
    }
}

impl Simulator {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: SessionState::new(seed, settings),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn start(&mut self, weight_kg: Option<i64>) {
        self.apply(Command::Start { weight_kg });
    }

    pub fn restart(&mut self) {
        self.apply(Command::Restart);
    }

    pub fn add_weight(&mut self) {
        self.apply(Command::AddWeight);
    }

    pub fn add_float(&mut self) {
        self.apply(Command::AddFloat);
    }

    pub fn adjust_buoyancy(&mut self, delta: f32) {
        self.apply(Command::AdjustBuoyancy(delta));
    }

    pub fn reset_buoyancy(&mut self) {
        self.apply(Command::ResetBuoyancy);
    }

    /// Move with the standard impulse; false if not running or rejected
    pub fn move_astronaut(&mut self, direction: Direction) -> bool {
        move_astronaut(&mut self.state, direction, MOVE_IMPULSE)
    }

    /// Move with a custom impulse
    pub fn move_with(&mut self, direction: Direction, magnitude: f32) -> bool {
        move_astronaut(&mut self.state, direction, magnitude)
    }

    pub fn apply(&mut self, command: Command) {
        // A fresh session never inherits frame time from the last one
        if matches!(command, Command::Start { .. } | Command::Restart) {
            self.accumulator = 0.0;
        }
        apply(&mut self.state, command);
    }

    /// Advance exactly one fixed step
    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.state, dt);
    }

    /// Run as many fixed steps as `frame_dt` covers; returns steps taken
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !self.state.is_running() {
            self.accumulator = 0.0;
            return 0;
        }

        // Long stalls (tab hidden) are dropped rather than replayed
        if frame_dt.is_finite() {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        }

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.state.is_running() {
            tick(&mut self.state, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Debrief for an ended session
    pub fn debrief(&self) -> Option<Debrief> {
        self.state
            .final_stats()
            .map(|stats| Debrief::new(&stats, self.state.samples.len(), self.state.tools.len()))
    }
}
