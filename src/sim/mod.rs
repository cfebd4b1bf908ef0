//! Deterministic simulation module
//!
//! All training logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only for visuals)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod ballast;
pub mod bubbles;
pub mod collision;
pub mod command;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot, next_objective};
pub use ballast::{BallastDrill, BallastLevel, SurfaceEvent, SurfaceObjectives, classify};
pub use bubbles::Bubble;
pub use collision::{Rect, circles_overlap, clamp_to_area, within_reach_of};
pub use command::{Command, adjust_buoyancy, apply, move_astronaut, reset_buoyancy};
pub use state::{
    Astronaut, Direction, FinalStats, GameEvent, Obstacle, Outcome, RepairStation, Sample,
    SessionPhase, SessionState, Snapshot, StatusKind, StatusMessage, Tool,
};
pub use tick::{step, tick};
