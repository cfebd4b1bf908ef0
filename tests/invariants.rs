//! Property tests for session invariants under random command streams

use glam::Vec2;
use proptest::prelude::*;

use nbl_trainer::consts::*;
use nbl_trainer::settings::Settings;
use nbl_trainer::sim::{
    Command, Direction, GameEvent, SessionState, apply, move_astronaut, tick,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Command(Command),
    Tick,
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Tick),
        1 => Just(Op::Command(Command::AddWeight)),
        1 => Just(Op::Command(Command::AddFloat)),
        1 => Just(Op::Command(Command::ResetBuoyancy)),
        3 => arb_direction().prop_map(|d| Op::Command(Command::Move(d))),
    ]
}

fn flags(state: &SessionState) -> (Vec<bool>, Vec<bool>, bool) {
    (
        state.samples.iter().map(|s| s.collected).collect(),
        state.tools.iter().map(|t| t.used).collect(),
        state.station.reached,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counters_match_flags_and_flags_never_revert(
        seed in any::<u64>(),
        start_x in 40.0f32..760.0,
        start_y in 40.0f32..460.0,
        ops in prop::collection::vec(arb_op(), 0..600),
    ) {
        let mut state = SessionState::new(seed, Settings::default());
        state.start(None);
        state.astronaut.pos = Vec2::new(start_x, start_y);

        let mut previous = flags(&state);
        for op in ops {
            match op {
                Op::Command(command) => apply(&mut state, command),
                Op::Tick => tick(&mut state, SIM_DT),
            }

            prop_assert!(state.counters_consistent());

            let current = flags(&state);
            for (before, after) in previous.0.iter().zip(&current.0) {
                prop_assert!(!before || *after, "sample un-collected");
            }
            for (before, after) in previous.1.iter().zip(&current.1) {
                prop_assert!(!before || *after, "tool un-used");
            }
            prop_assert!(!previous.2 || current.2, "station un-reached");
            previous = current;

            let expected_score = SAMPLE_SCORE * state.samples_collected as u64
                + TOOL_SCORE * state.tools_used as u64
                + if state.station.reached { STATION_SCORE } else { 0 };
            prop_assert_eq!(state.score, expected_score);

            let oxygen = state.astronaut.oxygen;
            prop_assert!((0.0..=MAX_OXYGEN).contains(&oxygen));
        }
    }

    #[test]
    fn moves_outside_the_band_never_change_velocity(
        magnitude in 20.001f32..500.0,
        negative in any::<bool>(),
        direction in arb_direction(),
        vx in -10.0f32..10.0,
        vy in -10.0f32..10.0,
    ) {
        let mut state = SessionState::new(3, Settings::default());
        state.start(None);
        state.events.clear();
        state.astronaut.current_buoyancy = if negative { -magnitude } else { magnitude };
        state.astronaut.vel = Vec2::new(vx, vy);

        let applied = move_astronaut(&mut state, direction, MOVE_IMPULSE);

        prop_assert!(!applied);
        prop_assert_eq!(state.astronaut.vel, Vec2::new(vx, vy));
        let rejected = matches!(state.events.as_slice(), [GameEvent::MoveRejected { .. }]);
        prop_assert!(rejected);
    }

    #[test]
    fn moves_inside_the_band_apply_the_impulse(
        buoyancy in -20.0f32..=20.0,
        direction in arb_direction(),
    ) {
        let mut state = SessionState::new(3, Settings::default());
        state.start(None);
        state.astronaut.current_buoyancy = buoyancy;

        prop_assert!(move_astronaut(&mut state, direction, MOVE_IMPULSE));
        prop_assert_eq!(state.astronaut.vel, direction.unit() * MOVE_IMPULSE);
    }

    #[test]
    fn position_stays_inside_the_pool(
        ops in prop::collection::vec(arb_op(), 0..400),
    ) {
        let mut state = SessionState::new(11, Settings::default());
        state.start(None);
        let margin = state.astronaut.size + WALL_MARGIN;

        for op in ops {
            match op {
                Op::Command(command) => apply(&mut state, command),
                Op::Tick => tick(&mut state, SIM_DT),
            }
            let pos = state.astronaut.pos;
            prop_assert!(pos.x >= margin && pos.x <= PLAY_AREA_WIDTH - margin);
            prop_assert!(pos.y >= margin && pos.y <= PLAY_AREA_HEIGHT - margin);
        }
    }
}
