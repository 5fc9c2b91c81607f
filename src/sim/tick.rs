//! Fixed-step simulation tick
//!
//! The single entry point a host timer calls. Inputs are applied first, then
//! the round advances by one pace increment.

use super::round::{LaunchVector, RoundControl};
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Completed drag gesture, if one ended since the last tick
    pub launch: Option<LaunchVector>,
    /// Switch the running round to the fast pace
    pub fast_forward: bool,
    /// End the running round immediately
    pub skip: bool,
    /// Push the next row without playing (between rounds only)
    pub advance_line: bool,
    /// Start a new game
    pub restart: bool,
}

/// Advance the game by one tick, returning everything that happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if input.restart {
        state.cancel_all();
    }

    // Nothing moves once the game is over
    if state.is_game_over() {
        return state.drain_events();
    }

    if let Some(vector) = input.launch {
        state.launch(vector);
    }
    if input.fast_forward {
        state.fast_forward();
    }
    if input.skip {
        state.skip();
    }
    if input.advance_line {
        state.advance_line();
    }

    state.step_round();
    state.drain_events()
}
