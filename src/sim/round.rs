//! Round lifecycle: launch, simulate, settle
//!
//! A round owns the volley of balls, the shared clock and the launcher. It
//! reads the board each tick but never writes it: collisions are queued as
//! [`RoundEvent`]s in ball order and applied by the owner between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::board::{Board, POWER_UP};
use crate::consts::SPAWN_Y;
use crate::settings::GameConfig;

/// Clock advance per timer tick and the tick cadence a host should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    /// Clock units added per tick
    pub increment: u32,
    /// Milliseconds between ticks
    pub cadence_ms: u32,
}

/// Raw throw vector from a drag gesture, y pointing up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchVector {
    pub dx: f32,
    pub dy: f32,
}

impl LaunchVector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Vector from a drag between two screen points (screen y grows downward)
    pub fn from_drag(start: Vec2, end: Vec2) -> Self {
        Self {
            dx: end.x - start.x,
            dy: -(end.y - start.y),
        }
    }

    pub fn length(&self) -> f32 {
        Vec2::new(self.dx, self.dy).length()
    }

    /// Long enough and pointing upward
    pub fn is_valid(&self, min_distance: f32) -> bool {
        self.length() >= min_distance && self.dy > 0.0
    }

    /// Unit direction shared by every ball of the volley
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy).normalize_or_zero()
    }
}

/// Round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// No clock, no balls; waiting for a throw
    Ready,
    /// Balls in flight
    Playing,
    /// Fast-forward requested; the next tick switches the timer and returns
    /// to `Playing`
    FastForward,
}

/// Whether the round timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Stopped,
}

/// Outbound notifications, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// A ball touched a block or power-up; the owner applies the hit
    Collision { col: usize, row: usize },
    /// A power-up was touched; the next volley has one more ball
    PowerUpCollected { col: usize, row: usize },
    /// A ball reached the bottom edge
    Landed { ball: u32, x: f32 },
    /// Timer started or stopped
    RunningStateChanged(RunState),
    /// Every ball is down (or the round was skipped)
    RoundFinished,
}

/// The controls a host shell needs for a round
pub trait RoundControl {
    /// Throw the volley. Returns false when the gesture was ignored.
    fn launch(&mut self, vector: LaunchVector) -> bool;
    /// Switch the running round to the fast pace
    fn fast_forward(&mut self);
    /// End the running round now, without waiting for landings
    fn skip(&mut self);
    /// Drop everything and return to the initial state
    fn cancel_all(&mut self);
}

/// One launch-to-settle cycle and the launcher state carried between cycles
#[derive(Debug, Clone)]
pub struct Round {
    config: GameConfig,
    state: RoundState,
    clock: u32,
    pace: Pace,
    /// Volley in launch order; index == ball id
    balls: Vec<Ball>,
    landed: u32,
    launcher_x: f32,
    /// First landing of this round, applied when the round settles
    pending_launcher_x: Option<f32>,
    /// Balls in the next volley
    ball_count: u32,
    events: Vec<RoundEvent>,
}

impl Round {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: RoundState::Ready,
            clock: 0,
            pace: config.normal_pace,
            balls: Vec::new(),
            landed: 0,
            launcher_x: config.field.width / 2.0,
            pending_launcher_x: None,
            ball_count: 1,
            events: Vec::new(),
        }
    }

    /// Round restored from saved launcher position and ball count
    pub fn restored(config: GameConfig, launcher_x: f32, ball_count: u32) -> Self {
        let mut round = Self::new(config);
        round.launcher_x = launcher_x.clamp(0.0, config.field.width);
        round.ball_count = ball_count.max(1);
        round
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != RoundState::Ready
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    /// Pace the host timer should run at
    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn active_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.is_moving()).count()
    }

    pub fn launcher_x(&self) -> f32 {
        self.launcher_x
    }

    pub fn pending_launcher_x(&self) -> Option<f32> {
        self.pending_launcher_x
    }

    pub fn ball_count(&self) -> u32 {
        self.ball_count
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Throw `ball_count` balls along `vector`.
    ///
    /// Ignored (returns false) unless the round is ready and the gesture is
    /// long enough and upward.
    pub fn launch_balls(&mut self, vector: LaunchVector, ball_count: u32) -> bool {
        if self.state != RoundState::Ready {
            log::debug!("Launch ignored: round already running");
            return false;
        }
        if !vector.is_valid(self.config.min_drag_distance) {
            log::debug!("Launch ignored: gesture ({}, {}) too short or not upward", vector.dx, vector.dy);
            return false;
        }
        if ball_count == 0 {
            return false;
        }

        let dir = vector.direction();
        let spawn = Vec2::new(self.launcher_x - self.config.launcher_size / 2.0, SPAWN_Y);
        self.balls = (0..ball_count)
            .map(|i| Ball::new(i, spawn, dir, i.saturating_mul(self.config.stagger)))
            .collect();
        self.landed = 0;
        self.pending_launcher_x = None;
        self.clock = 0;
        self.pace = self.config.normal_pace;
        self.state = RoundState::Playing;
        self.events.push(RoundEvent::RunningStateChanged(RunState::Running));

        log::info!(
            "Round started: {} balls from x={:.1} toward ({:.2}, {:.2})",
            ball_count,
            self.launcher_x,
            dir.x,
            dir.y
        );
        true
    }

    /// Advance the clock by one pace increment and step every ball
    pub fn tick(&mut self, board: &Board) {
        let next = self.clock.saturating_add(self.pace.increment);
        self.tick_at(next, board);
    }

    /// Set the clock to `clock` and step every ball against `board`.
    ///
    /// Balls are stepped in launch order with the same clock, so events from
    /// one tick always come out in ball order.
    pub fn tick_at(&mut self, clock: u32, board: &Board) {
        match self.state {
            RoundState::Ready => return,
            RoundState::FastForward => self.state = RoundState::Playing,
            RoundState::Playing => {}
        }
        self.clock = clock;

        let field = self.config.field;
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for ball in self.balls.iter_mut() {
            if !ball.is_moving() {
                continue;
            }
            let step = ball.step(clock, board, &field);

            if let Some((col, row)) = step.collision {
                // One extra ball per power-up cell, however many balls cross it this tick
                if board.get(col, row) == Some(POWER_UP) && !claimed.contains(&(col, row)) {
                    claimed.push((col, row));
                    self.ball_count += 1;
                    self.events.push(RoundEvent::PowerUpCollected { col, row });
                }
                log::debug!("Ball {} hit cell ({}, {})", ball.id, col, row);
                self.events.push(RoundEvent::Collision { col, row });
            }

            if let Some(pos) = step.landed {
                self.landed += 1;
                if self.landed == 1 {
                    let d = field.ball_size;
                    self.pending_launcher_x = Some((pos.x + d / 2.0).min(field.width - d));
                }
                self.events.push(RoundEvent::Landed { ball: ball.id, x: pos.x });
            }
        }

        if self.balls.iter().all(|b| !b.is_moving()) {
            self.settle();
        }
    }

    /// Stop the timer, move the launcher and announce the end of the round
    fn settle(&mut self) {
        self.balls.clear();
        self.clock = 0;
        self.pace = self.config.normal_pace;
        self.state = RoundState::Ready;
        if let Some(x) = self.pending_launcher_x.take() {
            self.launcher_x = x;
        }
        self.events.push(RoundEvent::RunningStateChanged(RunState::Stopped));
        self.events.push(RoundEvent::RoundFinished);

        log::info!(
            "Round finished: launcher at x={:.1}, next volley {} balls",
            self.launcher_x,
            self.ball_count
        );
    }
}

impl RoundControl for Round {
    fn launch(&mut self, vector: LaunchVector) -> bool {
        self.launch_balls(vector, self.ball_count)
    }

    fn fast_forward(&mut self) {
        if self.state == RoundState::Playing {
            self.pace = self.config.fast_pace;
            self.state = RoundState::FastForward;
            log::info!("Fast forward: +{} every {} ms", self.pace.increment, self.pace.cadence_ms);
        }
    }

    fn skip(&mut self) {
        if !self.is_running() {
            return;
        }
        for ball in self.balls.iter_mut() {
            ball.stop();
        }
        log::info!("Round skipped");
        self.settle();
    }

    fn cancel_all(&mut self) {
        let was_running = self.is_running();
        *self = Self::new(self.config);
        if was_running {
            self.events.push(RoundEvent::RunningStateChanged(RunState::Stopped));
        }
        log::info!("Round cancelled");
    }
}
