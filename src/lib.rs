//! NBL Trainer - Neutral buoyancy astronaut training mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (buoyancy physics, collisions, session state)
//! - `simulator`: Command/tick facade consumed by the UI shell
//! - `settings`: Data-driven session configuration
//! - `debrief`: End-of-session stats and best runs
//! - `telemetry`: Simulated ISS readouts
//! - `platform`: Browser bindings

pub mod debrief;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod simulator;
pub mod telemetry;

pub use debrief::{BestRuns, Debrief};
pub use settings::{Difficulty, Settings};
pub use simulator::Simulator;

use glam::Vec2;

/// Game configuration constants
///
/// Physics constants are tuned per tick at `TICK_RATE`; changing the rate
/// without rescaling them changes how the pool feels.
pub mod consts {
    /// Fixed simulation rate (steps per simulated second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area defaults (screen space, y grows downward)
    pub const PLAY_AREA_WIDTH: f32 = 800.0;
    pub const PLAY_AREA_HEIGHT: f32 = 500.0;
    /// Extra clearance from the walls on top of the actor size
    pub const WALL_MARGIN: f32 = 10.0;

    /// Astronaut defaults
    pub const ASTRONAUT_SPAWN: (f32, f32) = (100.0, 250.0);
    pub const ASTRONAUT_SIZE: f32 = 30.0;
    pub const MAX_OXYGEN: f32 = 100.0;
    pub const DEFAULT_WEIGHT_KG: u32 = 70;

    /// Fraction of the target/current buoyancy gap closed each tick
    pub const BUOYANCY_SMOOTHING: f32 = 0.05;
    /// Vertical acceleration per unit of buoyancy
    pub const BUOYANCY_FORCE_SCALE: f32 = 0.08;
    /// Constant downward bias (reduced gravity in water)
    pub const GRAVITY_BIAS: f32 = 0.15;
    /// Velocity retained per tick
    pub const WATER_DRAG: f32 = 0.92;
    /// Buoyancy step for add weight / add float
    pub const BUOYANCY_STEP: f32 = 5.0;
    /// Movement is only possible while |current buoyancy| <= this
    pub const BUOYANCY_GATE: f32 = 20.0;
    /// Velocity impulse per move command
    pub const MOVE_IMPULSE: f32 = 2.5;

    /// Seconds of oxygen at rest
    pub const OXYGEN_BUDGET_SECS: f32 = 30.0;
    /// Oxygen lost per obstacle overlap per tick
    pub const OBSTACLE_OXYGEN_PENALTY: f32 = 5.0;
    /// Velocity multiplier on obstacle contact (reverse and halve)
    pub const OBSTACLE_BOUNCE: f32 = -0.5;

    /// Objective rewards
    pub const SAMPLE_SCORE: u64 = 100;
    pub const TOOL_SCORE: u64 = 150;
    pub const STATION_SCORE: u64 = 500;
    /// Reach radius added to the actor size for the repair station
    pub const STATION_REACH: f32 = 30.0;

    /// Seconds between reaching the station and the session ending
    pub const MISSION_GRACE_SECS: f32 = 2.0;

    pub const SAMPLE_SIZE: f32 = 15.0;
    pub const TOOL_SIZE: f32 = 20.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Format whole seconds as `MM:SS`
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "60:00");
    }
}
