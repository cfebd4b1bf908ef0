//! Ballast trim drill
//!
//! The pre-dive exercise: pick suit weights and floaties, see whether the
//! astronaut sinks to the mock lunar surface, then work the surface checklist.
//! Rocks and tools can only be handled on the surface; the hatch and the
//! handrail handles work from anywhere.

use serde::{Deserialize, Serialize};

/// Lift provided by each floatie, in kg
pub const FLOATIE_LIFT_KG: i64 = 2;
/// Net weight above this sinks
pub const SINK_THRESHOLD_KG: i64 = 10;
/// Net weight below this floats up
pub const FLOAT_THRESHOLD_KG: i64 = -5;

pub const SURFACE_ROCKS: u32 = 3;
pub const SURFACE_TOOLS: u32 = 2;
pub const SURFACE_HANDLES: u32 = 4;

/// Buoyancy class from the trim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BallastLevel {
    Sinking,
    #[default]
    Neutral,
    Floating,
}

impl BallastLevel {
    pub fn label(&self) -> &'static str {
        match self {
            BallastLevel::Sinking => "Sinking",
            BallastLevel::Neutral => "Neutral",
            BallastLevel::Floating => "Floating",
        }
    }
}

/// Net weight once floatie lift is subtracted
pub fn net_weight_kg(weight_kg: u32, floaties: u32) -> i64 {
    i64::from(weight_kg) - i64::from(floaties) * FLOATIE_LIFT_KG
}

/// Classify a trim: above +10 kg sinks, below -5 kg floats, otherwise neutral
pub fn classify(weight_kg: u32, floaties: u32) -> BallastLevel {
    let net = net_weight_kg(weight_kg, floaties);
    if net > SINK_THRESHOLD_KG {
        BallastLevel::Sinking
    } else if net < FLOAT_THRESHOLD_KG {
        BallastLevel::Floating
    } else {
        BallastLevel::Neutral
    }
}

/// Feedback for a checklist action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    HatchToggled { open: bool },
    RockCollected { collected: u32, total: u32 },
    ToolUsed { used: u32, total: u32 },
    HandleReached { handle: u32 },
    AllRocksCollected,
    AllToolsUsed,
    AllHandlesReached,
    /// Rocks and tools need the surface
    NotOnSurface,
}

impl SurfaceEvent {
    pub fn message(&self) -> String {
        match self {
            SurfaceEvent::HatchToggled { open } => format!(
                "Hatch {} successfully!",
                if *open { "opened" } else { "closed" }
            ),
            SurfaceEvent::RockCollected { collected, total } => {
                format!("Rock sample collected! ({collected}/{total})")
            }
            SurfaceEvent::ToolUsed { used, total } => format!("Tool used! ({used}/{total})"),
            SurfaceEvent::HandleReached { handle } => format!("Handle {handle} reached!"),
            SurfaceEvent::AllRocksCollected => "All rock samples have been collected!".into(),
            SurfaceEvent::AllToolsUsed => "All tools have been used!".into(),
            SurfaceEvent::AllHandlesReached => "All handles have been reached!".into(),
            SurfaceEvent::NotOnSurface => {
                "You need to descend to the lunar surface first!".into()
            }
        }
    }
}

/// Checklist progress shown next to the drill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceObjectives {
    pub descended: bool,
    pub rocks_done: bool,
    pub tools_done: bool,
}

/// Ballast drill state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BallastDrill {
    pub weight_kg: u32,
    pub floaties: u32,
    pub level: BallastLevel,
    /// Latched by sinking, cleared by floating; neutral keeps it
    pub on_surface: bool,
    pub hatch_open: bool,
    pub rocks_collected: u32,
    pub tools_used: u32,
    pub handles_reached: u32,
}

impl BallastDrill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_weight(&mut self, weight_kg: u32) -> BallastLevel {
        self.weight_kg = weight_kg;
        self.retrim()
    }

    pub fn set_floaties(&mut self, floaties: u32) -> BallastLevel {
        self.floaties = floaties;
        self.retrim()
    }

    fn retrim(&mut self) -> BallastLevel {
        self.level = classify(self.weight_kg, self.floaties);
        match self.level {
            BallastLevel::Sinking => self.on_surface = true,
            BallastLevel::Floating => self.on_surface = false,
            BallastLevel::Neutral => {}
        }
        log::debug!(
            "Ballast {} kg / {} floaties: {} (net {} kg)",
            self.weight_kg,
            self.floaties,
            self.level.label(),
            self.net_weight_kg()
        );
        self.level
    }

    pub fn net_weight_kg(&self) -> i64 {
        net_weight_kg(self.weight_kg, self.floaties)
    }

    pub fn toggle_hatch(&mut self) -> SurfaceEvent {
        self.hatch_open = !self.hatch_open;
        SurfaceEvent::HatchToggled {
            open: self.hatch_open,
        }
    }

    pub fn collect_rock(&mut self) -> SurfaceEvent {
        if !self.on_surface {
            return SurfaceEvent::NotOnSurface;
        }
        if self.rocks_collected >= SURFACE_ROCKS {
            return SurfaceEvent::AllRocksCollected;
        }
        self.rocks_collected += 1;
        SurfaceEvent::RockCollected {
            collected: self.rocks_collected,
            total: SURFACE_ROCKS,
        }
    }

    pub fn use_tool(&mut self) -> SurfaceEvent {
        if !self.on_surface {
            return SurfaceEvent::NotOnSurface;
        }
        if self.tools_used >= SURFACE_TOOLS {
            return SurfaceEvent::AllToolsUsed;
        }
        self.tools_used += 1;
        SurfaceEvent::ToolUsed {
            used: self.tools_used,
            total: SURFACE_TOOLS,
        }
    }

    pub fn reach_handle(&mut self) -> SurfaceEvent {
        if self.handles_reached >= SURFACE_HANDLES {
            return SurfaceEvent::AllHandlesReached;
        }
        self.handles_reached += 1;
        SurfaceEvent::HandleReached {
            handle: self.handles_reached,
        }
    }

    pub fn objectives(&self) -> SurfaceObjectives {
        SurfaceObjectives {
            descended: self.on_surface,
            rocks_done: self.rocks_collected >= SURFACE_ROCKS,
            tools_done: self.tools_used > 0,
        }
    }
}
