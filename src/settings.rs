//! Game configuration
//!
//! Field geometry, round timing and gesture thresholds. Every field has a
//! default from [`crate::consts`], so a JSON file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{Field, Pace};

/// Complete configuration of one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Field size, grid and ball diameter
    pub field: Field,
    /// Launcher ("big ball") diameter
    pub launcher_size: f32,
    /// Clock units between consecutive balls of a volley
    pub stagger: u32,
    /// Timer pace while a round plays normally
    pub normal_pace: Pace,
    /// Timer pace after fast-forward
    pub fast_pace: Pace,
    /// Shortest drag that counts as a throw
    pub min_drag_distance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field {
                width: FIELD_WIDTH,
                height: FIELD_HEIGHT,
                cols: COLS,
                rows: ROWS,
                ball_size: BALL_SIZE,
            },
            launcher_size: LAUNCHER_SIZE,
            stagger: STAGGER,
            normal_pace: Pace {
                increment: NORMAL_INCREMENT,
                cadence_ms: NORMAL_CADENCE_MS,
            },
            fast_pace: Pace {
                increment: FAST_INCREMENT,
                cadence_ms: FAST_CADENCE_MS,
            },
            min_drag_distance: MIN_DRAG_DISTANCE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config: {}x{} grid on {}x{} field",
            config.field.cols,
            config.field.rows,
            config.field.width,
            config.field.height
        );
        Ok(config)
    }

    /// Check every value is in a range the simulation can run with
    pub fn validate(&self) -> Result<(), GameError> {
        let f = &self.field;

        // Line generation places up to 3 blocks plus a power-up in distinct columns
        if f.cols < 4 {
            return Err(GameError::InvalidConfig {
                name: "field.cols",
                expected: ">= 4",
            });
        }
        if f.rows < 3 {
            return Err(GameError::InvalidConfig {
                name: "field.rows",
                expected: ">= 3",
            });
        }
        if !(f.width.is_finite() && f.width > 0.0) {
            return Err(GameError::InvalidConfig {
                name: "field.width",
                expected: "finite and > 0",
            });
        }
        if !(f.height.is_finite() && f.height > 0.0) {
            return Err(GameError::InvalidConfig {
                name: "field.height",
                expected: "finite and > 0",
            });
        }
        if !(f.ball_size > 0.0 && f.ball_size < f.cell_width() && f.ball_size < f.cell_height()) {
            return Err(GameError::InvalidConfig {
                name: "field.ball_size",
                expected: "> 0 and smaller than one cell",
            });
        }
        if !(self.launcher_size >= 0.0 && self.launcher_size < f.width) {
            return Err(GameError::InvalidConfig {
                name: "launcher_size",
                expected: ">= 0 and narrower than the field",
            });
        }
        for (name, pace) in [("normal_pace", self.normal_pace), ("fast_pace", self.fast_pace)] {
            if pace.increment == 0 || pace.cadence_ms == 0 {
                return Err(GameError::InvalidConfig {
                    name,
                    expected: "increment and cadence_ms > 0",
                });
            }
        }
        if !(self.min_drag_distance >= 0.0) {
            return Err(GameError::InvalidConfig {
                name: "min_drag_distance",
                expected: ">= 0",
            });
        }
        Ok(())
    }
}
