//! Per-ball kinematics and grid collision
//!
//! The tricky part of the game: a ball moves a whole clock delta per step, so
//! it must detect the cell boundary it crossed, push itself back onto the
//! near face of the block it entered, and flip only the axis that hit.
//!
//! A ball only ever reads the board. The collision it reports is turned into a
//! board mutation by the round's owner after the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::{Board, CellKind};
use super::field::{Field, GridPos};

/// Lifecycle of a single ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Spawned, waiting for its stagger delay or first clock sample
    Launched,
    /// Integrating every tick
    Moving,
    /// Landed on the bottom edge (or force-stopped); terminal
    Stopped,
}

/// Things that happened to a ball during one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepEvents {
    /// Board cell (col, row) the ball touched, at most one per step
    pub collision: Option<(usize, usize)>,
    /// Landing position, reported once when the ball stops
    pub landed: Option<Vec2>,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Bottom-left corner of the ball's bounding square
    pub pos: Vec2,
    /// Unit direction; speed is one pixel unit per clock unit
    pub dir: Vec2,
    /// Round clock value this ball waits for before it starts moving
    pub start_after: u32,
    /// Last clock value this ball observed (0 = not yet started)
    clock: u32,
    moving: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, dir: Vec2, start_after: u32) -> Self {
        Self {
            id,
            pos,
            dir,
            start_after,
            clock: 0,
            moving: true,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn phase(&self) -> BallPhase {
        if !self.moving {
            BallPhase::Stopped
        } else if self.clock == 0 {
            BallPhase::Launched
        } else {
            BallPhase::Moving
        }
    }

    /// Last clock sample this ball integrated up to
    pub fn clock(&self) -> u32 {
        self.clock
    }

    /// Clock value the ball sees: the round clock once its delay has passed,
    /// zero before that.
    #[inline]
    pub fn local_clock(&self, round_clock: u32) -> u32 {
        if round_clock > self.start_after {
            round_clock
        } else {
            0
        }
    }

    /// Force the ball out of play without a landing event
    pub fn stop(&mut self) {
        self.moving = false;
    }

    /// Advance the ball to `round_clock`.
    ///
    /// The first non-zero clock sample only primes the cursor; movement starts
    /// on the following step. A step with a non-positive delta (clock reset)
    /// or on a stopped ball does nothing beyond recording the sample.
    pub fn step(&mut self, round_clock: u32, board: &Board, field: &Field) -> StepEvents {
        let mut events = StepEvents::default();

        let now = self.local_clock(round_clock);
        let previous = std::mem::replace(&mut self.clock, now);
        if previous == 0 || !self.moving {
            return events;
        }
        let dt = match now.checked_sub(previous) {
            Some(dt) if dt > 0 => dt as f32,
            _ => return events,
        };

        let mut next = self.pos + self.dir * dt;

        let offset = field.leading_edge(self.dir);
        let here = field.cell_of(self.pos, offset);
        let there = field.cell_of(next, offset);

        if here != there {
            if let Some((col, row)) = there.on_board(board.width(), board.height()) {
                match board.kind(col, row) {
                    Some(CellKind::Block { .. }) => {
                        self.deflect(here, there, &mut next, field);
                        events.collision = Some((col, row));
                    }
                    // Power-ups are collected without deflecting
                    Some(CellKind::PowerUp) => events.collision = Some((col, row)),
                    _ => {}
                }
            }
        }

        self.pos = next;
        self.contain(field);

        if self.pos.y <= 0.0 && self.moving {
            self.moving = false;
            events.landed = Some(self.pos);
        }

        events
    }

    /// Snap `next` onto the face of the block cell it entered and flip the
    /// crossing axes. Each axis is resolved independently.
    fn deflect(&mut self, here: GridPos, there: GridPos, next: &mut Vec2, field: &Field) {
        if here.col < there.col {
            next.x = field.col_left(there.col) - field.ball_size;
            self.dir.x = -self.dir.x;
        } else if here.col > there.col {
            next.x = field.col_right(there.col);
            self.dir.x = -self.dir.x;
        }

        if here.row > there.row {
            // Moving up into the block's bottom face
            next.y = field.row_bottom(there.row) - field.ball_size;
            self.dir.y = -self.dir.y;
        } else if here.row < there.row {
            // Moving down onto the block's top face
            next.y = field.row_top(there.row);
            self.dir.y = -self.dir.y;
        }
    }

    /// Bounce off the field walls. X is checked first; Y only when X is fine.
    fn contain(&mut self, field: &Field) {
        let max_x = field.max_x();
        let max_y = field.max_y();

        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.dir.x = -self.dir.x;
            self.pos.x = self.pos.x.clamp(0.0, max_x);
        } else if self.pos.y < 0.0 || self.pos.y > max_y {
            self.dir.y = -self.dir.y;
            self.pos.y = self.pos.y.clamp(0.0, max_y);
        }
    }
}
