//! Cap Pong - a paddle-and-ball arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, reflection, match state)
//! - `tuning`: Data-driven game balance
//!
//! The presentation shell (window, sprites, audio, key mapping) is external:
//! it feeds [`sim::InputAction`]s and elapsed time in, reads the public
//! fields of [`sim::GameState`] for rendering, and drains
//! [`sim::GameEvent`]s for sound playback.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 600.0;

    /// Paddle defaults - a flat bar with semicircular end caps
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 18.0;
    /// Paddle movement speed while a direction key is held (px/s)
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Serve velocity (px/s): up and slightly to the right
    pub const SERVE_VELOCITY_X: f32 = 120.0;
    pub const SERVE_VELOCITY_Y: f32 = 240.0;

    /// Lives per game
    pub const LIVES_PER_GAME: u8 = 3;

    /// Fraction of the paddle velocity added to the ball's horizontal
    /// rebound velocity
    pub const PADDLE_COUPLING: f32 = 0.2;

    /// Speed-up rule: every `ACCEL_EVERY`th hit scales the rebound speed
    /// by `1 + ACCEL_FRACTION`
    pub const ACCEL_EVERY: u32 = 5;
    pub const ACCEL_FRACTION: f32 = 0.2;

    /// Minimum deviation of a cap rebound from the horizontal/vertical
    /// axes (15 degrees)
    pub const MIN_REFLECT_DEVIATION: f32 = PI / 12.0;

    /// Pause between losing a ball and the next round (seconds)
    pub const ROUND_END_PAUSE_SECS: f32 = 3.0;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Build a velocity vector from speed and direction
#[inline]
pub fn vec_from_angle(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Direction of a velocity vector (atan2, in (-π, π])
#[inline]
pub fn velocity_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(0.0)).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI)).abs() < 1e-6);
        assert!((normalize_angle(-PI / 4.0) - (-PI / 4.0)).abs() < 1e-6);

        // 3π reduces to an angle congruent to -π; rounding may leave the
        // result one ulp below +π, so compare the distance modulo 2π
        // instead of the raw values at the branch cut.
        let a = normalize_angle(3.0 * PI);
        assert!((-PI..PI).contains(&a));
        assert!(normalize_angle(a - (-PI)).abs() < 1e-5);
    }

    #[test]
    fn test_vec_angle_round_trip() {
        let v = vec_from_angle(5.0, 1.1);
        assert!((velocity_angle(v) - 1.1).abs() < 1e-5);
        assert!((v.length() - 5.0).abs() < 1e-5);
    }
}
