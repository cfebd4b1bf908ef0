//! Session state and core simulation types
//!
//! The simulator owns everything here; the shell only ever sees a `Snapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubbles::{Bubble, spawn_bubbles};
use super::collision::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Oxygen reached zero
    OxygenDepleted,
    /// Repair station reached and grace period elapsed
    MissionComplete,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::MissionComplete)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::OxygenDepleted => "Oxygen depleted! Mission failed.",
            Outcome::MissionComplete => "Mission completed successfully!",
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session started yet
    Idle,
    /// Active training
    Running,
    /// Terminal; only `start`/`restart` leaves it
    Ended(Outcome),
}

/// Movement direction (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// The trainee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronaut {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius (and side of the obstacle footprint)
    pub size: f32,
    pub oxygen: f32,
    pub max_oxygen: f32,
    /// Set instantly by buoyancy commands; positive is ballast
    pub target_buoyancy: f32,
    /// Lags `target_buoyancy` to simulate water inertia
    pub current_buoyancy: f32,
}

impl Default for Astronaut {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ASTRONAUT_SPAWN.0, ASTRONAUT_SPAWN.1),
            vel: Vec2::ZERO,
            size: ASTRONAUT_SIZE,
            oxygen: MAX_OXYGEN,
            max_oxygen: MAX_OXYGEN,
            target_buoyancy: 0.0,
            current_buoyancy: 0.0,
        }
    }
}

impl Astronaut {
    /// Square footprint used for obstacle contact, anchored at the position
    pub fn footprint(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Whether buoyancy is balanced enough to swim
    pub fn can_move(&self) -> bool {
        (-BUOYANCY_GATE..=BUOYANCY_GATE).contains(&self.current_buoyancy)
    }

    pub fn oxygen_fraction(&self) -> f32 {
        if self.max_oxygen > 0.0 {
            self.oxygen / self.max_oxygen
        } else {
            0.0
        }
    }
}

/// A rock sample to collect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

/// A tool to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub used: bool,
}

/// The mission goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairStation {
    pub rect: Rect,
    pub reached: bool,
}

/// A collision hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Message for the shell's status bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Stats exposed when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub outcome: Outcome,
    pub score: u64,
    pub elapsed_secs: f32,
    pub samples_collected: u32,
    pub tools_used: u32,
}

/// Outbound events, one per state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { weight_kg: u32 },
    BuoyancyAdjusted { delta: f32, target: f32 },
    BuoyancyReset,
    SampleCollected { id: u32, collected: u32, total: u32 },
    ToolUsed { id: u32, used: u32, total: u32 },
    StationReached,
    ObstacleHit { oxygen_lost: f32 },
    /// Move ignored because buoyancy is outside the swim band
    MoveRejected { current_buoyancy: f32 },
    SessionEnded(FinalStats),
}

impl GameEvent {
    /// Status line the shell shows for this event (None = leave as is)
    pub fn status(&self) -> Option<StatusMessage> {
        use StatusKind::*;
        let msg = match self {
            GameEvent::SessionStarted { .. } => StatusMessage::new(
                "Game started! Adjust your buoyancy to move freely.",
                Success,
            ),
            GameEvent::BuoyancyAdjusted { delta, target } if *delta >= 0.0 => {
                StatusMessage::new(format!("Weight added! Target buoyancy: {target}"), Info)
            }
            GameEvent::BuoyancyAdjusted { target, .. } => {
                StatusMessage::new(format!("Floatie added! Target buoyancy: {target}"), Info)
            }
            GameEvent::BuoyancyReset => StatusMessage::new("Buoyancy reset to neutral!", Info),
            GameEvent::SampleCollected {
                collected, total, ..
            } => StatusMessage::new(format!("Sample collected! ({collected}/{total})"), Success),
            GameEvent::ToolUsed { used, total, .. } => {
                StatusMessage::new(format!("Tool used! ({used}/{total})"), Success)
            }
            GameEvent::StationReached => StatusMessage::new(
                "Mission Complete! You reached the repair station!",
                Success,
            ),
            GameEvent::ObstacleHit { .. } => return None,
            GameEvent::MoveRejected { .. } => StatusMessage::new(
                format!(
                    "Adjust buoyancy to move! (Keep between -{BUOYANCY_GATE} and +{BUOYANCY_GATE})"
                ),
                Error,
            ),
            GameEvent::SessionEnded(stats) => StatusMessage::new(
                stats.outcome.message(),
                if stats.outcome.is_success() {
                    Success
                } else {
                    Error
                },
            ),
        };
        Some(msg)
    }
}

/// Read-only view handed to the renderer after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub weight_kg: u32,
    pub astronaut: Astronaut,
    /// Buoyancy inside the swim band
    pub buoyancy_ok: bool,
    /// Oxygen gauge fill in `[0, 1]`
    pub oxygen_fraction: f32,
    pub samples: Vec<Sample>,
    pub tools: Vec<Tool>,
    pub station: RepairStation,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub elapsed_secs: f32,
    pub samples_collected: u32,
    pub tools_used: u32,
    pub status: Option<StatusMessage>,
    pub bubbles: Vec<Bubble>,
}

/// Complete session state (deterministic given seed and command stream)
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Seed for decorative randomness
    pub seed: u64,
    pub settings: Settings,
    pub phase: SessionPhase,
    pub weight_kg: u32,
    pub astronaut: Astronaut,
    /// Sorted by id
    pub samples: Vec<Sample>,
    /// Sorted by id
    pub tools: Vec<Tool>,
    pub station: RepairStation,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    pub elapsed_secs: f32,
    pub samples_collected: u32,
    pub tools_used: u32,
    /// Ticks left before a reached station ends the session
    pub grace_ticks: Option<u32>,
    pub status: Option<StatusMessage>,
    /// Undrained outbound events
    pub events: Vec<GameEvent>,
    /// Visual only, never read by gameplay
    pub bubbles: Vec<Bubble>,
    pub(crate) rng: Pcg32,
}

impl SessionState {
    /// Create an idle state with the standard pool layout
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            weight_kg: settings.default_weight_kg,
            settings,
            phase: SessionPhase::Idle,
            astronaut: Astronaut::default(),
            samples: Vec::new(),
            tools: Vec::new(),
            station: RepairStation {
                rect: Rect::new(Vec2::ZERO, Vec2::ZERO),
                reached: false,
            },
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            elapsed_secs: 0.0,
            samples_collected: 0,
            tools_used: 0,
            grace_ticks: None,
            status: None,
            events: Vec::new(),
            bubbles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_layout();
        state
    }

    /// Begin a fresh session, discarding all prior entity state
    pub fn start(&mut self, weight_kg: Option<i64>) {
        self.weight_kg = self.settings.normalize_weight(weight_kg);
        self.reset_layout();
        self.score = 0;
        self.time_ticks = 0;
        self.elapsed_secs = 0.0;
        self.samples_collected = 0;
        self.tools_used = 0;
        self.grace_ticks = None;
        self.status = None;
        self.events.clear();
        self.phase = SessionPhase::Running;

        log::info!("Training session started ({} kg)", self.weight_kg);
        self.push_event(GameEvent::SessionStarted {
            weight_kg: self.weight_kg,
        });
    }

    /// Place the actor and every mission object at their start positions
    fn reset_layout(&mut self) {
        self.astronaut = Astronaut::default();

        self.samples = [(200.0, 150.0), (400.0, 100.0), (600.0, 300.0)]
            .into_iter()
            .zip(1..)
            .map(|((x, y), id)| Sample {
                id,
                pos: Vec2::new(x, y),
                size: SAMPLE_SIZE,
                collected: false,
            })
            .collect();

        self.tools = [(300.0, 400.0), (500.0, 350.0)]
            .into_iter()
            .zip(1..)
            .map(|((x, y), id)| Tool {
                id,
                pos: Vec2::new(x, y),
                size: TOOL_SIZE,
                used: false,
            })
            .collect();

        self.station = RepairStation {
            rect: Rect::new(Vec2::new(700.0, 200.0), Vec2::splat(60.0)),
            reached: false,
        };

        self.obstacles = [(250.0, 200.0), (450.0, 250.0), (350.0, 150.0)]
            .into_iter()
            .map(|(x, y)| Obstacle {
                rect: Rect::new(Vec2::new(x, y), Vec2::splat(30.0)),
            })
            .collect();

        let area = self.play_area();
        let count = self.settings.effective_bubble_count();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.bubbles = spawn_bubbles(&mut self.rng, count, area);
    }

    pub fn play_area(&self) -> Vec2 {
        Vec2::new(self.settings.play_area_width, self.settings.play_area_height)
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Record an event and mirror its status line
    pub fn push_event(&mut self, event: GameEvent) {
        log::debug!("{event:?}");
        if let Some(status) = event.status() {
            self.status = Some(status);
        }
        self.events.push(event);
    }

    /// Transition to `Ended`; a second call is ignored
    pub fn end(&mut self, outcome: Outcome) {
        if !self.is_running() {
            return;
        }
        self.phase = SessionPhase::Ended(outcome);
        self.grace_ticks = None;
        let stats = self.stats(outcome);
        log::info!(
            "Training session ended: {:?} (score {}, {:.1}s, samples {}/{}, tools {}/{})",
            outcome,
            stats.score,
            stats.elapsed_secs,
            stats.samples_collected,
            self.samples.len(),
            stats.tools_used,
            self.tools.len()
        );
        self.push_event(GameEvent::SessionEnded(stats));
    }

    fn stats(&self, outcome: Outcome) -> FinalStats {
        FinalStats {
            outcome,
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            samples_collected: self.samples_collected,
            tools_used: self.tools_used,
        }
    }

    /// Final stats once the session has ended
    pub fn final_stats(&self) -> Option<FinalStats> {
        match self.phase {
            SessionPhase::Ended(outcome) => Some(self.stats(outcome)),
            _ => None,
        }
    }

    /// Objective counters agree with the entity flags
    pub fn counters_consistent(&self) -> bool {
        let collected = self.samples.iter().filter(|s| s.collected).count();
        let used = self.tools.iter().filter(|t| t.used).count();
        self.samples_collected as usize == collected && self.tools_used as usize == used
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            weight_kg: self.weight_kg,
            astronaut: self.astronaut.clone(),
            buoyancy_ok: self.astronaut.can_move(),
            oxygen_fraction: self.astronaut.oxygen_fraction(),
            samples: self.samples.clone(),
            tools: self.tools.clone(),
            station: self.station.clone(),
            obstacles: self.obstacles.clone(),
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            samples_collected: self.samples_collected,
            tools_used: self.tools_used,
            status: self.status.clone(),
            bubbles: self.bubbles.clone(),
        }
    }
}
