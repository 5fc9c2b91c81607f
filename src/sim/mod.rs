//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer clock only
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod board;
pub mod field;
pub mod line;
pub mod round;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallPhase, StepEvents};
pub use board::{Board, CellKind, EMPTY, POWER_UP, Row};
pub use field::{Field, GridPos};
pub use line::{generate_line, initial_board};
pub use round::{
    LaunchVector, Pace, Round, RoundControl, RoundEvent, RoundState, RunState,
};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
