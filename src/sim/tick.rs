//! Fixed timestep simulation tick
//!
//! Core training loop that advances the session deterministically. The step
//! order below is part of the contract: replays depend on it.

use super::bubbles::update_bubbles;
use super::collision::{circles_overlap, clamp_to_area, within_reach_of};
use super::state::{GameEvent, Outcome, SessionState};
use crate::consts::*;

/// Advance the session by one fixed step
///
/// Physics constants are per step; `dt` only feeds the elapsed clock. Safe to
/// call in any phase: outside `Running` it does nothing.
pub fn tick(state: &mut SessionState, dt: f32) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_secs += dt.max(0.0);

    apply_buoyancy_physics(state);
    drain_oxygen(state);
    resolve_collisions(state);

    let time_secs = state.time_ticks as f32 * SIM_DT;
    let area = state.play_area();
    update_bubbles(&mut state.bubbles, &mut state.rng, time_secs, area);

    evaluate_terminal(state);
}

/// Pure form of [`tick`]: returns the next state, leaving `state` untouched
pub fn step(state: &SessionState, dt: f32) -> SessionState {
    let mut next = state.clone();
    tick(&mut next, dt);
    next
}

/// Steps 1-6: smooth buoyancy, forces, drag, integrate, clamp
fn apply_buoyancy_physics(state: &mut SessionState) {
    let area = state.play_area();
    let astronaut = &mut state.astronaut;

    astronaut.current_buoyancy +=
        (astronaut.target_buoyancy - astronaut.current_buoyancy) * BUOYANCY_SMOOTHING;

    // Positive buoyancy is ballast and screen y grows downward, so ballast
    // accelerates toward the floor and floaties toward the surface.
    astronaut.vel.y += astronaut.current_buoyancy * BUOYANCY_FORCE_SCALE;
    astronaut.vel.y += GRAVITY_BIAS;

    astronaut.vel *= WATER_DRAG;
    astronaut.pos += astronaut.vel;

    let margin = astronaut.size + WALL_MARGIN;
    astronaut.pos = clamp_to_area(astronaut.pos, area, margin);
}

/// Step 7
fn drain_oxygen(state: &mut SessionState) {
    let drain = state.settings.oxygen_drain_per_tick();
    let astronaut = &mut state.astronaut;
    astronaut.oxygen = (astronaut.oxygen - drain).max(0.0);
}

/// Step 8: samples, tools, station, then obstacles
///
/// Every independent trigger registers this tick; order only decides which
/// event comes first.
fn resolve_collisions(state: &mut SessionState) {
    let pos = state.astronaut.pos;
    let size = state.astronaut.size;
    let mut events = Vec::new();

    let total_samples = state.samples.len() as u32;
    for sample in state.samples.iter_mut().filter(|s| !s.collected) {
        if circles_overlap(pos, size, sample.pos, sample.size) {
            sample.collected = true;
            state.samples_collected += 1;
            state.score += SAMPLE_SCORE;
            events.push(GameEvent::SampleCollected {
                id: sample.id,
                collected: state.samples_collected,
                total: total_samples,
            });
        }
    }

    let total_tools = state.tools.len() as u32;
    for tool in state.tools.iter_mut().filter(|t| !t.used) {
        if circles_overlap(pos, size, tool.pos, tool.size) {
            tool.used = true;
            state.tools_used += 1;
            state.score += TOOL_SCORE;
            events.push(GameEvent::ToolUsed {
                id: tool.id,
                used: state.tools_used,
                total: total_tools,
            });
        }
    }

    if !state.station.reached && within_reach_of(pos, &state.station.rect, size + STATION_REACH) {
        state.station.reached = true;
        state.score += STATION_SCORE;
        state.grace_ticks = Some(state.settings.grace_ticks());
        events.push(GameEvent::StationReached);
    }

    // Each overlapping obstacle applies its own bounce and penalty
    let footprint = state.astronaut.footprint();
    for obstacle in &state.obstacles {
        if footprint.overlaps(&obstacle.rect) {
            let astronaut = &mut state.astronaut;
            astronaut.vel *= OBSTACLE_BOUNCE;
            let before = astronaut.oxygen;
            astronaut.oxygen = (astronaut.oxygen - OBSTACLE_OXYGEN_PENALTY).max(0.0);
            events.push(GameEvent::ObstacleHit {
                oxygen_lost: before - astronaut.oxygen,
            });
        }
    }

    for event in events {
        state.push_event(event);
    }
}

/// Step 9: oxygen failure wins over a pending mission completion
fn evaluate_terminal(state: &mut SessionState) {
    if state.astronaut.oxygen <= 0.0 {
        state.end(Outcome::OxygenDepleted);
        return;
    }

    match state.grace_ticks {
        Some(0) => state.end(Outcome::MissionComplete),
        Some(remaining) => state.grace_ticks = Some(remaining - 1),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::SessionPhase;
    use glam::Vec2;

    fn running() -> SessionState {
        let mut state = SessionState::new(12345, Settings::default());
        state.start(None);
        state.events.clear();
        state
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut state = SessionState::new(12345, Settings::default());
        let before = state.astronaut.clone();
        tick(&mut state, SIM_DT);
        assert_eq!(state.astronaut, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_buoyancy_smoothing() {
        let mut state = running();
        state.astronaut.target_buoyancy = 10.0;
        tick(&mut state, SIM_DT);
        assert!((state.astronaut.current_buoyancy - 0.5).abs() < 1e-6);
        tick(&mut state, SIM_DT);
        assert!((state.astronaut.current_buoyancy - 0.975).abs() < 1e-6);
    }

    #[test]
    fn test_first_tick_physics() {
        let mut state = running();
        tick(&mut state, SIM_DT);
        // Neutral buoyancy: only gravity bias, then drag
        let expected_vy = GRAVITY_BIAS * WATER_DRAG;
        assert!((state.astronaut.vel.y - expected_vy).abs() < 1e-6);
        assert!((state.astronaut.pos.y - (250.0 + expected_vy)).abs() < 1e-4);
        assert_eq!(state.astronaut.pos.x, 100.0);
    }

    #[test]
    fn test_position_clamped_to_pool() {
        let mut state = running();
        state.astronaut.pos = Vec2::new(5.0, 495.0);
        state.astronaut.vel = Vec2::new(-20.0, 20.0);
        tick(&mut state, SIM_DT);
        assert_eq!(state.astronaut.pos, Vec2::new(40.0, 460.0));
    }

    #[test]
    fn test_collect_sample_on_contact() {
        let mut state = running();
        state.astronaut.pos = state.samples[1].pos;
        tick(&mut state, SIM_DT);
        assert!(state.samples[1].collected);
        assert_eq!(state.samples_collected, 1);
        assert_eq!(state.score, SAMPLE_SCORE);
        assert_eq!(
            state.events,
            vec![GameEvent::SampleCollected {
                id: 2,
                collected: 1,
                total: 3
            }]
        );

        // Staying on it does not collect twice
        tick(&mut state, SIM_DT);
        assert_eq!(state.samples_collected, 1);
        assert_eq!(state.score, SAMPLE_SCORE);
    }

    #[test]
    fn test_use_tool_on_contact() {
        let mut state = running();
        state.astronaut.pos = state.tools[0].pos;
        tick(&mut state, SIM_DT);
        assert!(state.tools[0].used);
        assert_eq!(state.tools_used, 1);
        assert_eq!(state.score, TOOL_SCORE);
        assert!(state.counters_consistent());
    }

    #[test]
    fn test_obstacle_bounces_and_costs_oxygen() {
        let mut state = running();
        state.astronaut.pos = Vec2::new(240.0, 190.0);
        state.astronaut.vel = Vec2::ZERO;
        let drain = state.settings.oxygen_drain_per_tick();
        tick(&mut state, SIM_DT);
        let expected = MAX_OXYGEN - drain - OBSTACLE_OXYGEN_PENALTY;
        assert!((state.astronaut.oxygen - expected).abs() < 1e-4);
        // Downward drift reversed and halved
        assert!(state.astronaut.vel.y < 0.0);
        assert!(matches!(state.events[0], GameEvent::ObstacleHit { .. }));
    }

    #[test]
    fn test_station_grace_period() {
        let mut state = running();
        state.astronaut.pos = state.station.rect.center();
        tick(&mut state, SIM_DT);
        assert!(state.station.reached);
        assert_eq!(state.score, STATION_SCORE);
        assert_eq!(state.phase, SessionPhase::Running);

        let grace = state.settings.grace_ticks();
        for _ in 0..grace - 1 {
            tick(&mut state, SIM_DT);
            assert_eq!(state.phase, SessionPhase::Running);
        }
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, SessionPhase::Ended(Outcome::MissionComplete));
    }

    #[test]
    fn test_oxygen_failure_beats_pending_success() {
        let mut state = running();
        state.astronaut.pos = state.station.rect.center();
        state.astronaut.oxygen = 0.01;
        tick(&mut state, SIM_DT);
        assert!(state.station.reached);
        assert_eq!(state.phase, SessionPhase::Ended(Outcome::OxygenDepleted));
    }

    #[test]
    fn test_step_is_pure_and_deterministic() {
        let mut state = running();
        state.astronaut.target_buoyancy = -15.0;
        let a = step(&state, SIM_DT);
        let b = step(&state, SIM_DT);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(a.astronaut, b.astronaut);
        assert_eq!(a.bubbles, b.bubbles);
    }

    #[test]
    fn test_zero_and_negative_dt_are_safe() {
        let mut state = running();
        tick(&mut state, 0.0);
        tick(&mut state, -1.0);
        tick(&mut state, f32::NAN);
        assert_eq!(state.time_ticks, 3);
        assert_eq!(state.elapsed_secs, 0.0);
    }
}
