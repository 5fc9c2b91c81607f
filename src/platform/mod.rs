//! Platform abstraction layer
//!
//! The core never owns a timer. A host measures wall time however it likes
//! (requestAnimationFrame, a native loop, a test) and feeds the elapsed
//! milliseconds to a [`TickClock`], which runs as many ticks as the round's
//! current pace says are due.

use crate::consts::MAX_TICKS_PER_FRAME;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Longest frame gap honoured; anything longer is treated as this
const MAX_FRAME_MS: f64 = 100.0;

/// Fixed-cadence tick accumulator
#[derive(Debug, Clone)]
pub struct TickClock {
    accumulator_ms: f64,
    max_ticks: u32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(MAX_TICKS_PER_FRAME)
    }
}

impl TickClock {
    pub fn new(max_ticks: u32) -> Self {
        Self {
            accumulator_ms: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    /// Drop any banked time (e.g. when the page was hidden)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    /// Run every tick due after `elapsed_ms` of wall time.
    ///
    /// The cadence is re-read from the round before each tick, so a
    /// fast-forward takes effect within the same frame. One-shot inputs are
    /// consumed by the first tick that runs.
    pub fn frame(
        &mut self,
        state: &mut GameState,
        input: &mut TickInput,
        elapsed_ms: f64,
    ) -> Vec<GameEvent> {
        self.accumulator_ms += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut events = Vec::new();
        let mut ticks = 0;
        loop {
            let cadence = f64::from(state.round.pace().cadence_ms.max(1));
            if self.accumulator_ms < cadence || ticks >= self.max_ticks {
                break;
            }
            events.extend(tick(state, input));
            *input = TickInput::default();
            self.accumulator_ms -= cadence;
            ticks += 1;
        }
        events
    }
}
