//! Game state and core simulation types
//!
//! Everything needed to snapshot and resume a match lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Tuning;

/// Current phase of the match state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Round start: ball glued to the paddle, waiting for the serve
    Serve,
    /// Ball served and free-moving
    Playing,
    /// Timed pause after a lost ball; input is ignored until it expires
    RoundEnd { remaining: f32 },
    /// Lives exhausted; only a reset is accepted
    GameOver,
}

/// Sound cues emitted by the core; the shell maps them to playback
/// (and may no-op).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Paddle ran into the left or right court wall
    PaddleWallBump,
    /// Ball bounced off a side wall
    BallWallBounce,
    /// Ball bounced off the ceiling
    BallCeilingBounce,
    /// Ball deflected by the paddle
    BallPaddleHit,
    /// Ball fell through the open bottom
    BallLost,
    /// Last life spent
    GameOver,
    /// Ball served
    Serve,
}

/// The rectangular playfield. Left/right/top walls reflect the ball;
/// the bottom is open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Court {
    pub width: f32,
    pub height: f32,
}

/// The player's paddle: a flat bar whose ends are semicircular caps of
/// radius `height / 2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (px/s); zeroed when a court wall is reached
    pub vel_x: f32,
}

impl Paddle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    /// Whether the current velocity can actually move the paddle, i.e.
    /// it is nonzero and not pressing against a court wall.
    pub fn can_move(&self, court: &Court) -> bool {
        (self.vel_x > 0.0 && self.right() < court.width)
            || (self.vel_x < 0.0 && self.left() > 0.0)
    }

    /// Sprite-bounds overlap test against the ball. Edge contact does not
    /// count, so a ball resting on the paddle top at round start is clear.
    pub fn overlaps(&self, ball: &Ball) -> bool {
        ball.right() > self.left()
            && ball.left() < self.right()
            && ball.top() > self.bottom()
            && ball.bottom() < self.top()
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
    /// Velocity (px/s); while glued the x component mirrors the paddle's
    pub vel: Vec2,
}

impl Ball {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub court: Court,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Lives remaining; the game ends when this reaches zero
    pub lives: u8,
    /// Hit count; drives the periodic speed-up rule
    pub score: u32,
    pub phase: GamePhase,
    /// Debounces velocity recomputation while a paddle overlap persists
    /// across frames
    pub in_collision: bool,
    /// Active balance values
    pub tuning: Tuning,
    /// Pending sound cues, drained by the shell each frame
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh match with the given tuning
    pub fn new(tuning: Tuning) -> Self {
        let court = Court {
            width: tuning.court_width,
            height: tuning.court_height,
        };
        let mut state = Self {
            court,
            paddle: Paddle {
                pos: Vec2::ZERO,
                width: tuning.paddle_width,
                height: tuning.paddle_height,
                vel_x: 0.0,
            },
            ball: Ball {
                pos: Vec2::ZERO,
                radius: tuning.ball_radius,
                vel: Vec2::ZERO,
            },
            lives: tuning.lives_per_game,
            score: 0,
            phase: GamePhase::Serve,
            in_collision: false,
            tuning,
            events: Vec::new(),
        };
        state.setup_round();
        state
    }

    /// Reset lives and score to their starting values
    pub fn setup_game(&mut self) {
        self.lives = self.tuning.lives_per_game;
        self.score = 0;
        log::info!("new game: {} lives", self.lives);
    }

    /// Place paddle and ball in the canonical round-start layout and
    /// enter the serve phase.
    pub fn setup_round(&mut self) {
        self.paddle.pos = Vec2::new(self.court.width / 2.0, self.court.height / 5.0);
        self.paddle.vel_x = 0.0;

        // Ball rests on the paddle top, offset slightly right of center
        self.ball.pos = Vec2::new(
            self.paddle.pos.x + self.paddle.width / 10.0,
            self.paddle.top() + self.ball.radius,
        );
        self.ball.vel = Vec2::ZERO;

        self.in_collision = false;
        self.phase = GamePhase::Serve;
        log::debug!("round start: {} lives left, score {}", self.lives, self.score);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all sound cues accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
