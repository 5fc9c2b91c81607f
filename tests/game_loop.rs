//! Whole-game runs through the public API: clock, ticks, autosave, reload.

use balls_game::GameConfig;
use balls_game::persistence::{MemorySlot, SaveData, SaveSlot, autosave, load_game};
use balls_game::platform::TickClock;
use balls_game::sim::{GameEvent, LaunchVector, RunState, TickInput};

const FRAME_MS: f64 = 16.0;

fn throw(dx: f32, dy: f32) -> TickInput {
    TickInput {
        launch: Some(LaunchVector::new(dx, dy)),
        ..Default::default()
    }
}

/// Play one launch to completion, autosaving along the way
fn play_round(
    state: &mut balls_game::sim::GameState,
    clock: &mut TickClock,
    slot: &mut MemorySlot,
    mut input: TickInput,
) -> Vec<GameEvent> {
    let mut all = Vec::new();
    for _ in 0..100_000 {
        let events = clock.frame(state, &mut input, FRAME_MS);
        autosave(slot, state, &events).unwrap();
        all.extend(events);
        if input.launch.is_none() && !state.round.is_running() {
            return all;
        }
    }
    panic!("round never settled");
}

#[test]
fn test_round_cycle_saves_and_reloads() {
    let config = GameConfig::default();
    let mut slot = MemorySlot::default();
    let mut state = load_game(&slot, config, 2024);
    let mut clock = TickClock::default();
    assert_eq!(state.level, 1);

    let events = play_round(&mut state, &mut clock, &mut slot, throw(25.0, 100.0));

    assert_eq!(
        events.first(),
        Some(&GameEvent::RunningStateChanged(RunState::Running))
    );
    let stopped = events
        .iter()
        .position(|e| *e == GameEvent::RunningStateChanged(RunState::Stopped))
        .unwrap();
    let finished = events
        .iter()
        .position(|e| *e == GameEvent::RoundFinished)
        .unwrap();
    assert!(stopped < finished);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Landed { ball: 0, .. })));
    assert!(events.contains(&GameEvent::LevelAdvanced { level: 2 }));

    // Launcher follows the first landing and stays on the field
    let x = state.round.launcher_x();
    assert!((0.0..=config.field.width - config.field.ball_size).contains(&x));

    // Save matches the live game and reloads into the same position
    let saved = SaveData::from_json(&slot.read().unwrap().unwrap()).unwrap();
    assert_eq!(saved, SaveData::capture(&state));

    let reloaded = load_game(&slot, config, 1);
    assert_eq!(reloaded.level, state.level);
    assert_eq!(reloaded.board, state.board);
    assert_eq!(reloaded.round.launcher_x(), state.round.launcher_x());
    assert_eq!(reloaded.round.ball_count(), state.round.ball_count());
}

#[test]
fn test_play_until_game_over_clears_save() {
    let config = GameConfig::default();
    let mut slot = MemorySlot::default();
    let mut state = load_game(&slot, config, 7);
    let mut clock = TickClock::default();

    // Straight up every time: blocks pile up until the board overflows
    let mut rounds = 0;
    while !state.is_game_over() {
        let events = play_round(&mut state, &mut clock, &mut slot, throw(0.0, 100.0));
        assert!(events.contains(&GameEvent::RoundFinished));
        rounds += 1;
        assert!(rounds < 1_000, "game never ended");

        if !state.is_game_over() {
            assert!(slot.read().unwrap().is_some());
        }
    }

    assert_eq!(slot.read().unwrap(), None);
    assert!(state.board.is_overflowed());

    // Game over is terminal until restart
    let mut input = throw(0.0, 100.0);
    assert!(clock.frame(&mut state, &mut input, 100.0).is_empty());

    let mut input = TickInput {
        restart: true,
        ..Default::default()
    };
    let events = clock.frame(&mut state, &mut input, FRAME_MS);
    autosave(&mut slot, &state, &events).unwrap();
    assert_eq!(events, vec![GameEvent::Restarted]);
    assert_eq!(state.level, 1);
    assert_eq!(state.round.ball_count(), 1);

    let saved = SaveData::from_json(&slot.read().unwrap().unwrap()).unwrap();
    assert_eq!(saved.level, 1);
    assert_eq!(saved.ball_count, 1);
}

#[test]
fn test_skip_and_fast_forward_inputs() {
    let config = GameConfig::default();
    let mut slot = MemorySlot::default();
    let mut state = load_game(&slot, config, 31);
    let mut clock = TickClock::default();

    // Fast-forward shortens the round in wall time
    let mut input = throw(-30.0, 100.0);
    clock.frame(&mut state, &mut input, FRAME_MS);
    assert!(state.round.is_running());
    let mut input = TickInput {
        fast_forward: true,
        ..Default::default()
    };
    clock.frame(&mut state, &mut input, FRAME_MS);
    assert_eq!(state.round.pace(), config.fast_pace);
    play_round(&mut state, &mut clock, &mut slot, TickInput::default());
    assert_eq!(state.round.pace(), config.normal_pace);
    assert_eq!(state.level, 2);

    // Skip settles at once
    let mut input = throw(30.0, 100.0);
    clock.frame(&mut state, &mut input, FRAME_MS);
    assert!(state.round.is_running());
    let mut input = TickInput {
        skip: true,
        ..Default::default()
    };
    let events = clock.frame(&mut state, &mut input, FRAME_MS);
    autosave(&mut slot, &state, &events).unwrap();
    assert!(!state.round.is_running());
    assert!(events.contains(&GameEvent::RoundFinished));
    if !state.is_game_over() {
        assert_eq!(state.level, 3);
        assert_eq!(SaveData::from_json(&slot.read().unwrap().unwrap()).unwrap().level, 3);
    }
}
