//! Inbound commands from the UI shell
//!
//! Commands other than `Start`/`Restart` only act on a running session.

use serde::{Deserialize, Serialize};

use super::state::{Direction, GameEvent, SessionState};
use crate::consts::*;

/// A discrete player or shell command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a session; weight is normalized, never rejected
    Start { weight_kg: Option<i64> },
    /// Begin again with the current weight
    Restart,
    /// Add ballast (`+BUOYANCY_STEP`)
    AddWeight,
    /// Add a floatie (`-BUOYANCY_STEP`)
    AddFloat,
    AdjustBuoyancy(f32),
    ResetBuoyancy,
    Move(Direction),
}

impl Command {
    /// Keyboard mapping used by the shell
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowUp" => Command::Move(Direction::Up),
            "ArrowDown" => Command::Move(Direction::Down),
            "ArrowLeft" => Command::Move(Direction::Left),
            "ArrowRight" => Command::Move(Direction::Right),
            _ => match key.to_lowercase().as_str() {
                "f" => Command::AddWeight,
                "w" => Command::AddFloat,
                "q" => Command::ResetBuoyancy,
                "r" => Command::Restart,
                _ => return None,
            },
        };
        Some(command)
    }
}

/// Apply a command to the session
pub fn apply(state: &mut SessionState, command: Command) {
    match command {
        Command::Start { weight_kg } => state.start(weight_kg),
        Command::Restart => {
            let weight = i64::from(state.weight_kg);
            state.start(Some(weight));
        }
        Command::AddWeight => adjust_buoyancy(state, BUOYANCY_STEP),
        Command::AddFloat => adjust_buoyancy(state, -BUOYANCY_STEP),
        Command::AdjustBuoyancy(delta) => adjust_buoyancy(state, delta),
        Command::ResetBuoyancy => reset_buoyancy(state),
        Command::Move(direction) => {
            move_astronaut(state, direction, MOVE_IMPULSE);
        }
    }
}

/// Shift the buoyancy target; the target is deliberately unbounded
pub fn adjust_buoyancy(state: &mut SessionState, delta: f32) {
    if !state.is_running() || !delta.is_finite() {
        return;
    }
    state.astronaut.target_buoyancy += delta;
    let target = state.astronaut.target_buoyancy;
    state.push_event(GameEvent::BuoyancyAdjusted { delta, target });
}

pub fn reset_buoyancy(state: &mut SessionState) {
    if !state.is_running() {
        return;
    }
    state.astronaut.target_buoyancy = 0.0;
    state.push_event(GameEvent::BuoyancyReset);
}

/// Push the astronaut if buoyancy is inside the swim band
///
/// Returns whether the impulse was applied. Out-of-band attempts emit
/// `MoveRejected` and leave velocity untouched.
pub fn move_astronaut(state: &mut SessionState, direction: Direction, magnitude: f32) -> bool {
    if !state.is_running() {
        return false;
    }
    if !state.astronaut.can_move() {
        let current_buoyancy = state.astronaut.current_buoyancy;
        state.push_event(GameEvent::MoveRejected { current_buoyancy });
        return false;
    }
    if magnitude.is_finite() {
        state.astronaut.vel += direction.unit() * magnitude;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::SessionPhase;
    use glam::Vec2;

    fn running() -> SessionState {
        let mut state = SessionState::new(1, Settings::default());
        state.start(None);
        state.events.clear();
        state
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Command::from_key("ArrowLeft"),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(Command::from_key("F"), Some(Command::AddWeight));
        assert_eq!(Command::from_key("w"), Some(Command::AddFloat));
        assert_eq!(Command::from_key("q"), Some(Command::ResetBuoyancy));
        assert_eq!(Command::from_key("R"), Some(Command::Restart));
        assert_eq!(Command::from_key("Enter"), None);
    }

    #[test]
    fn test_commands_ignored_when_idle() {
        let mut state = SessionState::new(1, Settings::default());
        apply(&mut state, Command::AddWeight);
        apply(&mut state, Command::Move(Direction::Right));
        assert_eq!(state.astronaut.target_buoyancy, 0.0);
        assert_eq!(state.astronaut.vel, Vec2::ZERO);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_buoyancy_target_unbounded() {
        let mut state = running();
        for _ in 0..30 {
            apply(&mut state, Command::AddWeight);
        }
        assert_eq!(state.astronaut.target_buoyancy, 150.0);
        apply(&mut state, Command::AddFloat);
        assert_eq!(state.astronaut.target_buoyancy, 145.0);
        apply(&mut state, Command::ResetBuoyancy);
        assert_eq!(state.astronaut.target_buoyancy, 0.0);
        assert_eq!(state.events.last(), Some(&GameEvent::BuoyancyReset));
    }

    #[test]
    fn test_move_applies_impulse_in_band() {
        let mut state = running();
        apply(&mut state, Command::Move(Direction::Up));
        assert_eq!(state.astronaut.vel, Vec2::new(0.0, -MOVE_IMPULSE));
        apply(&mut state, Command::Move(Direction::Right));
        assert_eq!(state.astronaut.vel, Vec2::new(MOVE_IMPULSE, -MOVE_IMPULSE));
    }

    #[test]
    fn test_move_rejected_out_of_band() {
        let mut state = running();
        state.astronaut.current_buoyancy = -20.5;
        for direction in Direction::ALL {
            assert!(!move_astronaut(&mut state, direction, MOVE_IMPULSE));
        }
        assert_eq!(state.astronaut.vel, Vec2::ZERO);
        assert_eq!(state.events.len(), 4);
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("Adjust buoyancy to move! (Keep between -20 and +20)")
        );
    }

    #[test]
    fn test_restart_keeps_weight() {
        let mut state = running();
        apply(&mut state, Command::Start { weight_kg: Some(90) });
        state.score = 250;
        apply(&mut state, Command::Restart);
        assert_eq!(state.weight_kg, 90);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, SessionPhase::Running);
    }
}
