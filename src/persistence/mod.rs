//! Single-slot save/load
//!
//! Features:
//! - Flat JSON layout `{level, board, ballCount, launcherX}`
//! - Pluggable storage (memory, file, browser LocalStorage)
//! - Malformed or inconsistent saves are discarded, never fatal

mod slot;

pub use slot::{MemorySlot, SaveSlot};
#[cfg(not(target_arch = "wasm32"))]
pub use slot::FileSlot;
#[cfg(target_arch = "wasm32")]
pub use slot::LocalStorageSlot;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::settings::GameConfig;
use crate::sim::{Board, GameEvent, GameState, Round, Row};

/// Storage key of the single save slot
pub const SAVE_KEY: &str = "balls_game_save";

/// Everything needed to continue a game between rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub level: u32,
    pub board: Vec<Row>,
    pub ball_count: u32,
    pub launcher_x: f32,
}

impl SaveData {
    /// Snapshot a game (meant to be taken between rounds)
    pub fn capture(state: &GameState) -> Self {
        Self {
            level: state.level,
            board: state.board.rows().to_vec(),
            ball_count: state.round.ball_count(),
            launcher_x: state.round.launcher_x(),
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild a game from this save, checking it fits `config`
    pub fn restore(self, config: GameConfig, seed: u64) -> Result<GameState, GameError> {
        if self.level == 0 {
            return Err(GameError::InvalidSave {
                reason: "level must be at least 1".into(),
            });
        }
        if self.ball_count == 0 {
            return Err(GameError::InvalidSave {
                reason: "ball count must be at least 1".into(),
            });
        }
        if !(self.launcher_x.is_finite() && (0.0..=config.field.width).contains(&self.launcher_x)) {
            return Err(GameError::InvalidSave {
                reason: format!("launcher x {} outside the field", self.launcher_x),
            });
        }
        if self.board.len() != config.field.rows {
            return Err(GameError::RowCount {
                expected: config.field.rows,
                got: self.board.len(),
            });
        }

        let board = Board::from_rows(self.board, config.field.cols)?;
        let round = Round::restored(config, self.launcher_x, self.ball_count);
        Ok(GameState::from_parts(config, seed, self.level, board, round))
    }
}

/// Continue the saved game, or start a new one if there is no usable save
pub fn load_game(slot: &impl SaveSlot, config: GameConfig, seed: u64) -> GameState {
    let json = match slot.read() {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No save found, starting fresh");
            return GameState::new(config, seed);
        }
        Err(err) => {
            log::warn!("Could not read save: {}", err);
            return GameState::new(config, seed);
        }
    };

    match SaveData::from_json(&json).and_then(|save| save.restore(config, seed)) {
        Ok(state) => {
            log::info!(
                "Loaded save: level {}, {} balls",
                state.level,
                state.round.ball_count()
            );
            state
        }
        Err(err) => {
            log::warn!("Discarding save: {}", err);
            GameState::new(config, seed)
        }
    }
}

/// Keep the slot in step with the game: clear it on game over, overwrite it
/// after every settled round or restart.
pub fn autosave(
    slot: &mut impl SaveSlot,
    state: &GameState,
    events: &[GameEvent],
) -> Result<(), GameError> {
    if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
        slot.clear()?;
        log::info!("Save cleared");
        return Ok(());
    }

    let settled = events.iter().any(|e| {
        matches!(
            e,
            GameEvent::RoundFinished | GameEvent::LevelAdvanced { .. } | GameEvent::Restarted
        )
    });
    if settled {
        slot.write(&SaveData::capture(state).to_json()?)?;
        log::debug!("Game saved at level {}", state.level);
    }
    Ok(())
}
