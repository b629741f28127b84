//! Reflection response for ball-paddle contacts
//!
//! Given the contact geometry, the incoming ball velocity, the paddle
//! velocity and the current score, computes the outgoing velocity vector.
//! The flat surface is a plain vertical mirror; the caps reflect about the
//! contact normal with the incidence law `angle_r = 2*angle_n - angle_i`,
//! where `angle_i` is the direction the ball came FROM (the reverse of its
//! velocity). Speed magnitude is preserved except for the periodic
//! acceleration rule.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::collision::{Surface, classify, normal_angle};
use crate::{Tuning, normalize_angle, vec_from_angle, velocity_angle};

/// Speed multiplier for the current hit. Recomputed from the score on
/// every collision, so it only fires on hits landing exactly on a
/// threshold multiple.
#[inline]
pub fn acceleration_coefficient(score: u32, tuning: &Tuning) -> f32 {
    if score > 0 && score.is_multiple_of(tuning.accel_every) {
        1.0 + tuning.accel_fraction
    } else {
        1.0
    }
}

/// Push a reflected angle out of the forbidden bands around the
/// horizontal and vertical axes, away from the axis it is near.
fn clamp_away_from_axes(angle: f32, min_dev: f32) -> f32 {
    let a = normalize_angle(angle);
    for axis in [-PI, -FRAC_PI_2, 0.0, FRAC_PI_2, PI] {
        let delta = a - axis;
        if delta.abs() < min_dev {
            return if delta >= 0.0 {
                axis + min_dev
            } else {
                axis - min_dev
            };
        }
    }
    a
}

/// Compute the ball's post-contact velocity.
///
/// Precondition: the ball has been served (`ball_vel` is nonzero); the
/// state machine never invokes this on a glued ball.
pub fn reflect_off_paddle(
    ball_center: Vec2,
    paddle_center: Vec2,
    paddle_width: f32,
    paddle_height: f32,
    ball_vel: Vec2,
    paddle_vel_x: f32,
    score: u32,
    tuning: &Tuning,
) -> Vec2 {
    debug_assert!(
        ball_vel.length_squared() > 0.0,
        "reflection requires a moving ball"
    );

    let k = acceleration_coefficient(score, tuning);
    let surface = classify(ball_center, paddle_center, paddle_width, paddle_height);

    if surface == Surface::Flat {
        // Vertical mirror plus a share of the paddle's motion
        return Vec2::new(
            k * (ball_vel.x + tuning.paddle_coupling * paddle_vel_x),
            k * -ball_vel.y,
        );
    }

    // Direction the ball came from: reverse of the velocity, flipped into
    // the upper half-plane (a ball descending on the paddle always has a
    // downward component, so the raw atan2 is negative).
    let mut angle_i = velocity_angle(ball_vel);
    if angle_i < 0.0 {
        angle_i += PI;
    }

    let angle_n = normal_angle(surface, ball_center, paddle_center, paddle_width, paddle_height);

    if (angle_i - angle_n).abs() < FRAC_PI_2 {
        // Impact within the cap's reflecting arc
        let speed = ball_vel.length();
        let angle_r =
            clamp_away_from_axes(2.0 * angle_n - angle_i, tuning.min_reflect_deviation);
        let mut out = vec_from_angle(k * speed, angle_r);
        out.x += k * tuning.paddle_coupling * paddle_vel_x;
        log::trace!(
            "cap reflection: normal {angle_n:.3}, incoming {angle_i:.3}, out {angle_r:.3}"
        );
        out
    } else {
        // Grazing/obtuse impact at a cap edge: the ball skims past
        // without changing course.
        ball_vel
    }
}
