//! Training session settings
//!
//! Supplied by the UI shell as JSON. Defaults reproduce the pool as tuned.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound on decorative bubbles regardless of what the shell asks for
pub const MAX_BUBBLES: usize = 200;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Cadet,
    #[default]
    Standard,
    Veteran,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Cadet => "Cadet",
            Difficulty::Standard => "Standard",
            Difficulty::Veteran => "Veteran",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cadet" | "easy" => Some(Difficulty::Cadet),
            "standard" | "normal" => Some(Difficulty::Standard),
            "veteran" | "hard" => Some(Difficulty::Veteran),
            _ => None,
        }
    }

    /// Seconds of oxygen for this preset
    pub fn oxygen_budget_secs(&self) -> f32 {
        match self {
            Difficulty::Cadet => 45.0,
            Difficulty::Standard => OXYGEN_BUDGET_SECS,
            Difficulty::Veteran => 20.0,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset (last applied)
    pub difficulty: Difficulty,

    // === Pool ===
    pub play_area_width: f32,
    pub play_area_height: f32,

    // === Session ===
    /// Used when the shell passes no weight or an invalid one
    pub default_weight_kg: u32,
    /// Seconds until oxygen runs out with no obstacle hits
    pub oxygen_budget_secs: f32,
    /// Delay between reaching the station and the session ending
    pub mission_grace_secs: f32,

    // === Visuals ===
    pub bubble_count: usize,
    /// Reduced motion (no bubbles)
    pub reduced_motion: bool,

    // === Telemetry ===
    pub telemetry_refresh_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Standard,

            play_area_width: PLAY_AREA_WIDTH,
            play_area_height: PLAY_AREA_HEIGHT,

            default_weight_kg: DEFAULT_WEIGHT_KG,
            oxygen_budget_secs: OXYGEN_BUDGET_SECS,
            mission_grace_secs: MISSION_GRACE_SECS,

            bubble_count: 20,
            reduced_motion: false,

            telemetry_refresh_secs: 5.0,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset (updates the oxygen budget)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.oxygen_budget_secs = difficulty.oxygen_budget_secs();
        log::info!(
            "Difficulty {}: {} s of oxygen",
            difficulty.as_str(),
            self.oxygen_budget_secs
        );
    }

    /// Parse settings sent by the shell; missing fields take defaults.
    /// A difficulty without an explicit oxygen budget applies its preset budget.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let explicit_budget = value.get("oxygen_budget_secs").is_some();
        let mut settings: Self = serde_json::from_value(value)?;
        if !explicit_budget {
            settings.apply_difficulty(settings.difficulty);
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Oxygen lost per tick at rest
    pub fn oxygen_drain_per_tick(&self) -> f32 {
        let budget_ticks = self.oxygen_budget_secs.max(SIM_DT) * TICK_RATE as f32;
        MAX_OXYGEN / budget_ticks
    }

    /// Ticks between reaching the station and the session ending
    pub fn grace_ticks(&self) -> u32 {
        (self.mission_grace_secs.max(0.0) * TICK_RATE as f32).round() as u32
    }

    /// Effective bubble count (respects reduced_motion)
    pub fn effective_bubble_count(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.bubble_count.min(MAX_BUBBLES)
        }
    }

    /// Normalize a weight supplied by the shell (non-positive or absent -> default)
    pub fn normalize_weight(&self, weight_kg: Option<i64>) -> u32 {
        match weight_kg {
            Some(w) if w > 0 => u32::try_from(w).unwrap_or(u32::MAX),
            Some(w) => {
                log::warn!("Invalid weight {w} kg, using {} kg", self.default_weight_kg);
                self.default_weight_kg
            }
            None => self.default_weight_kg,
        }
    }
}

/// Parse a raw weight field the way a form input reads: leading integer, rest ignored
pub fn parse_weight_kg(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
