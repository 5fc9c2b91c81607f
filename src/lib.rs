//! Balls Game - round simulation core for a falling-blocks ball swarm game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, ball kinematics, round lifecycle)
//! - `settings`: Field geometry, timing and gesture thresholds
//! - `persistence`: Single-slot save/load
//! - `platform`: Wall-clock to tick conversion for host loops

pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::GameConfig;

/// Game configuration defaults
pub mod consts {
    /// Board columns
    pub const COLS: usize = 7;
    /// Board rows (visible height of the grid)
    pub const ROWS: usize = 10;

    /// Field dimensions in pixel units
    pub const FIELD_WIDTH: f32 = 350.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Ball diameter
    pub const BALL_SIZE: f32 = 10.0;
    /// Launcher ("big ball") diameter
    pub const LAUNCHER_SIZE: f32 = 20.0;
    /// Launch height of every ball
    pub const SPAWN_Y: f32 = 1.0;

    /// Clock units between consecutive balls leaving the launcher
    pub const STAGGER: u32 = 50;

    /// Normal pace: clock units per tick and tick cadence
    pub const NORMAL_INCREMENT: u32 = 5;
    pub const NORMAL_CADENCE_MS: u32 = 10;
    /// Fast-forward pace
    pub const FAST_INCREMENT: u32 = 7;
    pub const FAST_CADENCE_MS: u32 = 2;

    /// Shortest drag that counts as a throw
    pub const MIN_DRAG_DISTANCE: f32 = 10.0;

    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 16;
}

/// Install the platform logger.
///
/// Native builds log through `env_logger` (honours `RUST_LOG`); wasm builds
/// log to the browser console. Safe to call more than once.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}
