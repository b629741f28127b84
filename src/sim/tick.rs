//! Round/match state machine and per-frame update
//!
//! The shell delivers discrete [`InputAction`]s and calls [`tick`] once per
//! frame with the elapsed time. Everything here is deterministic; the
//! round-end pause is a timed sub-state, never a blocking sleep.

use glam::Vec2;

use super::reflect::reflect_off_paddle;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete input events from the shell's key mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeftStart,
    MoveLeftEnd,
    MoveRightStart,
    MoveRightEnd,
    /// Launch the glued ball (round start only)
    Serve,
    /// Start a new game (game over only)
    Reset,
}

impl GameState {
    /// Apply a discrete input event.
    ///
    /// Movement and serve are ignored once the game is over and during
    /// the round-end pause; reset is ignored everywhere else.
    pub fn handle_input(&mut self, action: InputAction) {
        match self.phase {
            GamePhase::RoundEnd { .. } => return,
            GamePhase::GameOver => {
                if action == InputAction::Reset {
                    self.setup_game();
                    self.setup_round();
                }
                return;
            }
            _ => {}
        }

        match action {
            InputAction::MoveLeftStart => self.paddle.vel_x = -self.tuning.paddle_speed,
            InputAction::MoveRightStart => self.paddle.vel_x = self.tuning.paddle_speed,
            InputAction::MoveLeftEnd | InputAction::MoveRightEnd => self.paddle.vel_x = 0.0,
            InputAction::Serve => {
                if self.phase == GamePhase::Serve {
                    self.ball.vel =
                        Vec2::new(self.tuning.serve_velocity_x, self.tuning.serve_velocity_y);
                    self.phase = GamePhase::Playing;
                    self.push_event(GameEvent::Serve);
                    log::debug!("serve: ball velocity {:?}", self.ball.vel);
                }
            }
            InputAction::Reset => {}
        }

        // Before the serve the ball is glued to the paddle and moves with it
        if self.phase == GamePhase::Serve {
            self.ball.vel.x = self.paddle.vel_x;
        }
    }
}

/// Advance the match by one frame
pub fn tick(state: &mut GameState, dt: f32) {
    match state.phase {
        // Frozen at the final miss until a reset comes in
        GamePhase::GameOver => return,

        GamePhase::RoundEnd { remaining } => {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                state.phase = GamePhase::RoundEnd { remaining };
            } else if state.lives > 0 {
                state.setup_round();
            } else {
                state.phase = GamePhase::GameOver;
            }
            return;
        }

        GamePhase::Serve | GamePhase::Playing => {}
    }

    if state.phase == GamePhase::Playing {
        // Miss comes first: the ball has fully crossed the open bottom
        if state.ball.top() <= 0.0 {
            state.lives = state.lives.saturating_sub(1);
            state.push_event(GameEvent::BallLost);
            if state.lives == 0 {
                // The game-over cue fires with the final miss; the phase
                // switch itself waits for the pause to run out
                state.push_event(GameEvent::GameOver);
                log::info!("game over: final score {}", state.score);
            } else {
                log::info!("ball lost: {} lives left", state.lives);
            }
            state.phase = GamePhase::RoundEnd {
                remaining: state.tuning.round_end_pause_secs,
            };
            return;
        }

        // Paddle contact, debounced while the overlap persists
        if state.paddle.overlaps(&state.ball) {
            if !state.in_collision {
                state.in_collision = true;
                state.score += 1;
                state.push_event(GameEvent::BallPaddleHit);
                state.ball.vel = reflect_off_paddle(
                    state.ball.pos,
                    state.paddle.pos,
                    state.paddle.width,
                    state.paddle.height,
                    state.ball.vel,
                    state.paddle.vel_x,
                    state.score,
                    &state.tuning,
                );
                log::debug!("hit {}: ball velocity {:?}", state.score, state.ball.vel);
            }
        } else {
            state.in_collision = false;
        }
    }

    if state.phase == GamePhase::Playing {
        update_ball(state, dt);
    }

    update_paddle(state, dt);
}

/// Wall/ceiling bounces and position integration for a served ball
fn update_ball(state: &mut GameState, dt: f32) {
    let ball = &state.ball;
    let hit_wall = (ball.right() >= state.court.width && ball.vel.x > 0.0)
        || (ball.left() <= 0.0 && ball.vel.x < 0.0);
    let hit_ceiling = ball.top() >= state.court.height && ball.vel.y > 0.0;

    if hit_wall {
        state.ball.vel.x = -state.ball.vel.x;
        state.push_event(GameEvent::BallWallBounce);
    }
    if hit_ceiling {
        state.ball.vel.y = -state.ball.vel.y;
        state.push_event(GameEvent::BallCeilingBounce);
    }

    let vel = state.ball.vel;
    state.ball.pos += vel * dt;
}

/// Position integration for the paddle, clamped at the court edges.
/// Before the serve the glued ball rides along with the paddle's actual
/// displacement, so the attachment never drags it through a wall.
fn update_paddle(state: &mut GameState, dt: f32) {
    if state.paddle.can_move(&state.court) {
        let half = state.paddle.width / 2.0;
        let old_x = state.paddle.pos.x;
        let x = (old_x + state.paddle.vel_x * dt).clamp(half, state.court.width - half);
        state.paddle.pos.x = x;
        if state.phase == GamePhase::Serve {
            state.ball.pos.x += x - old_x;
        }
    } else if state.paddle.vel_x != 0.0 {
        // Reached a wall: stop, and notify the shell once
        state.paddle.vel_x = 0.0;
        state.push_event(GameEvent::PaddleWallBump);
        if state.phase == GamePhase::Serve {
            state.ball.vel.x = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;

    fn new_state() -> GameState {
        GameState::new(Tuning::default())
    }

    fn serve(state: &mut GameState) {
        state.handle_input(InputAction::Serve);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    /// Tick through a full round-end pause plus one settling frame
    fn run_out_pause(state: &mut GameState) {
        let frames = (state.tuning.round_end_pause_secs / SIM_DT).ceil() as u32 + 1;
        for _ in 0..frames {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_serve_starts_play() {
        let mut state = new_state();
        serve(&mut state);
        assert_eq!(
            state.ball.vel,
            Vec2::new(state.tuning.serve_velocity_x, state.tuning.serve_velocity_y)
        );
        assert!(state.drain_events().contains(&GameEvent::Serve));
    }

    #[test]
    fn test_serve_ignored_while_playing() {
        let mut state = new_state();
        serve(&mut state);
        tick(&mut state, SIM_DT);
        let vel = state.ball.vel;
        state.drain_events();

        state.handle_input(InputAction::Serve);
        assert_eq!(state.ball.vel, vel);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_attached_ball_follows_paddle() {
        let mut state = new_state();
        let offset = state.ball.pos.x - state.paddle.pos.x;

        state.handle_input(InputAction::MoveRightStart);
        for _ in 0..10 {
            tick(&mut state, SIM_DT);
        }
        assert!(state.paddle.pos.x > state.court.width / 2.0);
        assert!((state.ball.pos.x - state.paddle.pos.x - offset).abs() < 1e-3);
    }

    #[test]
    fn test_attached_ball_stops_at_wall_with_paddle() {
        let mut state = new_state();
        state.handle_input(InputAction::MoveLeftStart);

        // Long enough to cross the whole court
        for _ in 0..600 {
            tick(&mut state, SIM_DT);
        }
        assert!((state.paddle.left() - 0.0).abs() < 1e-3);
        assert_eq!(state.paddle.vel_x, 0.0);
        assert!(state.drain_events().contains(&GameEvent::PaddleWallBump));

        // Ball kept its offset instead of sliding off through the wall
        let offset = state.ball.pos.x - state.paddle.pos.x;
        assert!((offset - state.paddle.width / 10.0).abs() < 1.0);
    }

    #[test]
    fn test_side_wall_bounce() {
        let mut state = new_state();
        serve(&mut state);
        state.drain_events();

        state.ball.pos = Vec2::new(state.court.width - state.ball.radius, 300.0);
        state.ball.vel = Vec2::new(200.0, 50.0);
        tick(&mut state, SIM_DT);

        assert!(state.ball.vel.x < 0.0);
        assert!(state.drain_events().contains(&GameEvent::BallWallBounce));
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = new_state();
        serve(&mut state);
        state.drain_events();

        state.ball.pos = Vec2::new(400.0, state.court.height - state.ball.radius);
        state.ball.vel = Vec2::new(50.0, 200.0);
        tick(&mut state, SIM_DT);

        assert!(state.ball.vel.y < 0.0);
        assert!(state.drain_events().contains(&GameEvent::BallCeilingBounce));
    }

    #[test]
    fn test_miss_decrements_lives_and_pauses() {
        let mut state = new_state();
        serve(&mut state);
        state.drain_events();

        state.ball.pos = Vec2::new(400.0, -2.0 * state.ball.radius);
        state.ball.vel = Vec2::new(0.0, -200.0);
        tick(&mut state, SIM_DT);

        assert_eq!(state.lives, state.tuning.lives_per_game - 1);
        assert!(matches!(state.phase, GamePhase::RoundEnd { .. }));
        assert!(state.drain_events().contains(&GameEvent::BallLost));
    }

    #[test]
    fn test_round_end_pause_freezes_and_ignores_input() {
        let mut state = new_state();
        serve(&mut state);
        state.ball.pos = Vec2::new(400.0, -2.0 * state.ball.radius);
        tick(&mut state, SIM_DT);
        assert!(matches!(state.phase, GamePhase::RoundEnd { .. }));

        let ball_pos = state.ball.pos;
        let paddle_pos = state.paddle.pos;
        state.handle_input(InputAction::MoveRightStart);
        state.handle_input(InputAction::Serve);
        tick(&mut state, SIM_DT);

        assert_eq!(state.paddle.vel_x, 0.0);
        assert!(matches!(state.phase, GamePhase::RoundEnd { .. }));
        assert_eq!(state.ball.pos, ball_pos);
        assert_eq!(state.paddle.pos, paddle_pos);
    }

    #[test]
    fn test_pause_expiry_starts_next_round() {
        let mut state = new_state();
        serve(&mut state);
        state.ball.pos = Vec2::new(123.0, -2.0 * state.ball.radius);
        tick(&mut state, SIM_DT);

        run_out_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Serve);
        // Canonical round-start layout restored
        assert!((state.paddle.pos.x - state.court.width / 2.0).abs() < 1e-3);
        assert!((state.ball.bottom() - state.paddle.top()).abs() < 1e-3);
    }

    #[test]
    fn test_last_life_game_over_and_freeze() {
        let mut state = new_state();
        state.lives = 1;
        serve(&mut state);
        state.drain_events();

        state.ball.pos = Vec2::new(250.0, -2.0 * state.ball.radius);
        tick(&mut state, SIM_DT);
        assert_eq!(state.lives, 0);

        // The final miss announces both cues together, before the pause
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BallLost));
        assert!(events.contains(&GameEvent::GameOver));

        run_out_pause(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen at the miss: nothing moves on further frames
        let ball_pos = state.ball.pos;
        let paddle_pos = state.paddle.pos;
        state.handle_input(InputAction::MoveLeftStart);
        state.handle_input(InputAction::Serve);
        tick(&mut state, SIM_DT);
        assert_eq!(state.ball.pos, ball_pos);
        assert_eq!(state.paddle.pos, paddle_pos);
    }

    #[test]
    fn test_reset_restores_game() {
        let mut state = new_state();
        state.lives = 1;
        state.score = 17;
        serve(&mut state);
        state.ball.pos = Vec2::new(250.0, -2.0 * state.ball.radius);
        tick(&mut state, SIM_DT);
        run_out_pause(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.handle_input(InputAction::Reset);
        assert_eq!(state.phase, GamePhase::Serve);
        assert_eq!(state.lives, state.tuning.lives_per_game);
        assert_eq!(state.score, 0);
        assert!((state.paddle.pos.x - state.court.width / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_ignored_while_playing() {
        let mut state = new_state();
        serve(&mut state);
        state.score = 3;
        state.handle_input(InputAction::Reset);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_overlap_debounce_scores_once() {
        let mut state = new_state();
        serve(&mut state);

        // Bury the ball a little into the paddle so the overlap survives
        // one frame of rebound movement
        state.ball.pos = Vec2::new(state.paddle.pos.x, state.paddle.top() - 2.0);
        state.ball.vel = Vec2::new(0.0, -200.0);

        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 1);
        assert!(state.in_collision);
        assert!(state.paddle.overlaps(&state.ball), "overlap should persist");

        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 1, "second overlapping frame must not re-score");
    }

    #[test]
    fn test_debounce_clears_after_separation() {
        let mut state = new_state();
        serve(&mut state);

        state.ball.pos = Vec2::new(state.paddle.pos.x, state.paddle.top() - 2.0);
        state.ball.vel = Vec2::new(0.0, -200.0);
        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 1);

        // Let the rebound carry the ball clear of the paddle
        for _ in 0..60 {
            tick(&mut state, SIM_DT);
        }
        assert!(!state.in_collision);

        // A fresh contact scores again
        state.ball.pos = Vec2::new(state.paddle.pos.x, state.paddle.top() - 2.0);
        state.ball.vel = Vec2::new(0.0, -200.0);
        tick(&mut state, SIM_DT);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_full_round_to_game_over() {
        let mut state = new_state();
        state.lives = 1;
        serve(&mut state);

        // Park the paddle out of the ball's path and let it drop out
        state.ball.pos = Vec2::new(100.0, 300.0);
        state.ball.vel = Vec2::new(0.0, -400.0);
        state.paddle.pos.x = 700.0;

        let mut frames = 0;
        while state.phase != GamePhase::GameOver && frames < 1000 {
            tick(&mut state, SIM_DT);
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 0);
    }
}
