//! Demo autopilot
//!
//! Drives a session for attract mode and the headless demo: neutralize
//! buoyancy, then swim toward the next incomplete objective.

use glam::Vec2;

use super::command::Command;
use super::state::{Direction, SessionState};
use crate::consts::*;

/// Preferred swim speed in pixels per tick
const CRUISE_SPEED: f32 = 2.0;
/// Slow down within this many pixels per unit of speed
const APPROACH_GAIN: f32 = 0.1;

/// Next objective position: samples, then tools, then the repair station
pub fn next_objective(state: &SessionState) -> Option<Vec2> {
    if let Some(sample) = state.samples.iter().find(|s| !s.collected) {
        return Some(sample.pos);
    }
    if let Some(tool) = state.tools.iter().find(|t| !t.used) {
        return Some(tool.pos);
    }
    (!state.station.reached).then(|| state.station.rect.center())
}

/// Pick at most one command for this tick
pub fn autopilot(state: &SessionState) -> Option<Command> {
    if !state.is_running() {
        return None;
    }

    let astronaut = &state.astronaut;
    if astronaut.target_buoyancy != 0.0 {
        return Some(Command::ResetBuoyancy);
    }
    // Wait for the buoyancy to settle back into the swim band
    if !astronaut.can_move() {
        return None;
    }

    let to_target = next_objective(state)? - astronaut.pos;
    let dist = to_target.length();
    if dist < 1.0 {
        return None;
    }

    let desired = to_target / dist * CRUISE_SPEED.min(dist * APPROACH_GAIN);
    let error = desired - astronaut.vel;
    let threshold = MOVE_IMPULSE * 0.5;

    let direction = if error.x.abs() >= error.y.abs() {
        if error.x > threshold {
            Direction::Right
        } else if error.x < -threshold {
            Direction::Left
        } else {
            return None;
        }
    } else if error.y > threshold {
        Direction::Down
    } else if error.y < -threshold {
        Direction::Up
    } else {
        return None;
    };

    Some(Command::Move(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::{apply, tick};

    fn running() -> SessionState {
        let mut state = SessionState::new(9, Settings::default());
        state.start(None);
        state
    }

    #[test]
    fn test_idle_does_nothing() {
        let state = SessionState::new(9, Settings::default());
        assert_eq!(autopilot(&state), None);
    }

    #[test]
    fn test_resets_buoyancy_first() {
        let mut state = running();
        state.astronaut.target_buoyancy = 25.0;
        assert_eq!(autopilot(&state), Some(Command::ResetBuoyancy));
    }

    #[test]
    fn test_waits_while_out_of_band() {
        let mut state = running();
        state.astronaut.current_buoyancy = 30.0;
        assert_eq!(autopilot(&state), None);
    }

    #[test]
    fn test_objective_order() {
        let mut state = running();
        assert_eq!(next_objective(&state), Some(state.samples[0].pos));
        for sample in &mut state.samples {
            sample.collected = true;
        }
        assert_eq!(next_objective(&state), Some(state.tools[0].pos));
        for tool in &mut state.tools {
            tool.used = true;
        }
        assert_eq!(next_objective(&state), Some(state.station.rect.center()));
        state.station.reached = true;
        assert_eq!(next_objective(&state), None);
    }

    #[test]
    fn test_reaches_first_sample() {
        let mut state = running();
        for _ in 0..600 {
            if let Some(command) = autopilot(&state) {
                apply(&mut state, command);
            }
            tick(&mut state, SIM_DT);
            if state.samples[0].collected {
                break;
            }
        }
        assert!(state.samples[0].collected);
        assert!(state.counters_consistent());
    }
}
