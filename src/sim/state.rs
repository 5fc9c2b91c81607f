//! Game session state
//!
//! Owns the board and the round, applies queued round events to the board
//! between ticks, and runs the level advance / game-over check when a round
//! settles. Everything a save needs is reachable from here.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::Board;
use super::line::{generate_line, initial_board};
use super::round::{LaunchVector, Round, RoundControl, RoundEvent, RunState};
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Rounds can be played
    Playing,
    /// A block reached the launcher row; terminal until restart
    GameOver,
}

/// Notifications for the host shell, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A ball hit a cell; `value` is the cell after the hit
    Collision { col: usize, row: usize, value: i32 },
    PowerUpCollected { col: usize, row: usize },
    Landed { ball: u32, x: f32 },
    RunningStateChanged(RunState),
    RoundFinished,
    /// A new row entered the board
    LevelAdvanced { level: u32 },
    GameOver { level: u32 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Difficulty level (hit points of the newest row)
    pub level: u32,
    pub board: Board,
    pub round: Round,
    pub phase: GamePhase,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game at level 1
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = initial_board(config.field.cols, config.field.rows, &mut rng);
        Self {
            config,
            seed,
            rng,
            level: 1,
            board,
            round: Round::new(config),
            phase: GamePhase::Playing,
            events: Vec::new(),
        }
    }

    /// Game assembled from restored parts
    pub fn from_parts(config: GameConfig, seed: u64, level: u32, board: Board, round: Round) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: level.max(1),
            board,
            round,
            phase: GamePhase::Playing,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take every event since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one round tick and apply what it produced
    pub fn step_round(&mut self) {
        self.round.tick(&self.board);
        self.apply_round_events();
    }

    /// Push a new row without playing a round (only between rounds)
    pub fn advance_line(&mut self) {
        if self.round.is_running() || self.is_game_over() {
            return;
        }
        self.advance_level();
    }

    /// Apply queued round events to the board, in order
    fn apply_round_events(&mut self) {
        for event in self.round.drain_events() {
            match event {
                RoundEvent::Collision { col, row } => {
                    // Out-of-range hits are dropped by the board
                    if let Some(value) = self.board.apply_hit(col, row) {
                        self.events.push(GameEvent::Collision { col, row, value });
                    }
                }
                RoundEvent::PowerUpCollected { col, row } => {
                    self.events.push(GameEvent::PowerUpCollected { col, row });
                }
                RoundEvent::Landed { ball, x } => self.events.push(GameEvent::Landed { ball, x }),
                RoundEvent::RunningStateChanged(run) => {
                    self.events.push(GameEvent::RunningStateChanged(run));
                }
                RoundEvent::RoundFinished => {
                    self.events.push(GameEvent::RoundFinished);
                    self.advance_level();
                }
            }
        }
    }

    /// Next level: reject the shift and end the game if the row about to
    /// reach the launcher still holds a block.
    fn advance_level(&mut self) {
        if self.is_game_over() {
            return;
        }
        if self.board.is_overflowed() {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { level: self.level });
            log::info!("Game over at level {}", self.level);
            return;
        }

        let level = self.level + 1;
        let line = generate_line(level, self.config.field.cols, &mut self.rng);
        match self.board.shift_and_prepend(line) {
            Ok(()) => {
                self.level = level;
                self.events.push(GameEvent::LevelAdvanced { level });
                log::info!("Level {}: {} blocks on board", level, self.board.blocks_remaining());
            }
            Err(err) => log::error!("Level advance failed: {}", err),
        }
    }
}

impl RoundControl for GameState {
    fn launch(&mut self, vector: LaunchVector) -> bool {
        if self.is_game_over() {
            return false;
        }
        let launched = self.round.launch_balls(vector, self.round.ball_count());
        self.apply_round_events();
        launched
    }

    fn fast_forward(&mut self) {
        self.round.fast_forward();
    }

    fn skip(&mut self) {
        self.round.skip();
        self.apply_round_events();
    }

    /// Restart: new board at level 1, one ball, launcher recentred
    fn cancel_all(&mut self) {
        self.round.cancel_all();
        self.apply_round_events();
        self.board = initial_board(self.config.field.cols, self.config.field.rows, &mut self.rng);
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::POWER_UP;
    use crate::sim::round::RoundState;

    fn board_with(cells: &[(usize, usize, i32)]) -> Board {
        let c = GameConfig::default();
        let mut rows = vec![vec![0; c.field.cols]; c.field.rows];
        for &(col, row, value) in cells {
            rows[row][col] = value;
        }
        Board::from_rows(rows, c.field.cols).unwrap()
    }

    fn game_with(cells: &[(usize, usize, i32)]) -> GameState {
        let config = GameConfig::default();
        GameState::from_parts(config, 1, 1, board_with(cells), Round::new(config))
    }

    fn play_out(state: &mut GameState) -> Vec<GameEvent> {
        let mut events = state.drain_events();
        for _ in 0..10_000 {
            if !state.round.is_running() {
                return events;
            }
            state.step_round();
            events.extend(state.drain_events());
        }
        panic!("round never settled");
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(GameConfig::default(), 12345);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.round.ball_count(), 1);
        assert_eq!(state.round.launcher_x(), 175.0);
        assert_eq!(state.board.height(), 10);
        assert!(state.board.blocks_remaining() >= 2);
    }

    #[test]
    fn test_hits_applied_and_level_advances() {
        // Column 3 is straight above the launcher; row 5 spans y in [200, 250)
        let mut state = game_with(&[(3, 5, 2)]);
        assert!(state.launch(LaunchVector::new(0.0, 100.0)));

        let events = play_out(&mut state);
        assert!(events.contains(&GameEvent::Collision { col: 3, row: 5, value: 1 }));
        assert!(events.contains(&GameEvent::RoundFinished));
        assert!(events.contains(&GameEvent::LevelAdvanced { level: 2 }));

        assert_eq!(state.level, 2);
        // Damaged block moved down one row, new level-2 row on top
        assert_eq!(state.board.get(3, 6), Some(1));
        let top = state.board.row(0).unwrap();
        assert!(top.iter().any(|&c| c == 2));
        assert_eq!(top.iter().filter(|&&c| c == POWER_UP).count(), 1);
    }

    #[test]
    fn test_power_up_adds_ball_next_round() {
        let mut state = game_with(&[(3, 5, POWER_UP)]);
        assert!(state.launch(LaunchVector::new(0.0, 100.0)));
        assert_eq!(state.round.balls().len(), 1);

        let events = play_out(&mut state);
        assert!(events.contains(&GameEvent::PowerUpCollected { col: 3, row: 5 }));
        assert!(events.contains(&GameEvent::Collision { col: 3, row: 5, value: 0 }));
        assert_eq!(state.round.ball_count(), 2);

        assert!(state.launch(LaunchVector::new(0.0, 100.0)));
        assert_eq!(state.round.balls().len(), 2);
    }

    #[test]
    fn test_overflow_rejects_shift_and_ends_game() {
        let mut state = game_with(&[(0, 8, 3), (5, 0, 1)]);
        let before = state.board.clone();

        assert!(state.launch(LaunchVector::new(0.0, 100.0)));
        state.skip();

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::RoundFinished));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { level: 1 }));
        assert!(state.is_game_over());
        assert_eq!(state.board, before);
        assert_eq!(state.level, 1);

        // Terminal: no more launches or line advances
        assert!(!state.launch(LaunchVector::new(0.0, 100.0)));
        state.advance_line();
        assert_eq!(state.board, before);
    }

    #[test]
    fn test_advance_line_only_between_rounds() {
        let mut state = game_with(&[]);
        state.advance_line();
        assert_eq!(state.level, 2);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelAdvanced { level: 2 }]);

        assert!(state.launch(LaunchVector::new(0.0, 100.0)));
        state.advance_line();
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_cancel_all_restarts_game() {
        let mut state = game_with(&[(0, 8, 3)]);
        assert!(state.launch(LaunchVector::new(10.0, 100.0)));
        state.skip();
        assert!(state.is_game_over());
        state.drain_events();

        state.cancel_all();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.round.state(), RoundState::Ready);
        assert_eq!(state.round.ball_count(), 1);
        assert!(!state.board.is_overflowed());
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_cancel_mid_round_drops_balls() {
        let mut state = game_with(&[]);
        assert!(state.launch(LaunchVector::new(0.0, 100.0)));
        for _ in 0..30 {
            state.step_round();
        }
        state.drain_events();

        state.cancel_all();
        assert!(state.round.balls().is_empty());
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::RunningStateChanged(RunState::Stopped),
                GameEvent::Restarted
            ]
        );
    }
}
