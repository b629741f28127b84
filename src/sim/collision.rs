//! Collision classification for the capsule-shaped paddle
//!
//! The paddle's colliding surface is a horizontal flat segment flanked by
//! two semicircular end caps of radius `height / 2`, centered at
//! `(center.x ± (width/2 - height/2), center.y)`. The classifier decides
//! which of the three surfaces a ball contact belongs to and produces the
//! outward surface normal angle. Pure functions over geometry snapshots.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Which part of the paddle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The flat top segment between the two cap centers
    Flat,
    /// The left semicircular cap
    LeftCap,
    /// The right semicircular cap
    RightCap,
}

/// Centers of the left and right end caps
#[inline]
pub fn cap_centers(paddle_center: Vec2, paddle_width: f32, paddle_height: f32) -> (Vec2, Vec2) {
    let half_span = paddle_width / 2.0 - paddle_height / 2.0;
    (
        Vec2::new(paddle_center.x - half_span, paddle_center.y),
        Vec2::new(paddle_center.x + half_span, paddle_center.y),
    )
}

/// Classify a ball contact against the paddle surface.
///
/// Boundaries are inclusive: a ball exactly above a cap center counts as a
/// flat hit, which also keeps the normal well-defined when the ball center
/// coincides with a cap center.
pub fn classify(
    ball_center: Vec2,
    paddle_center: Vec2,
    paddle_width: f32,
    paddle_height: f32,
) -> Surface {
    let (left_cap, right_cap) = cap_centers(paddle_center, paddle_width, paddle_height);

    if ball_center.x >= left_cap.x && ball_center.x <= right_cap.x {
        Surface::Flat
    } else if ball_center.x > right_cap.x {
        Surface::RightCap
    } else {
        Surface::LeftCap
    }
}

/// Outward surface normal angle at the contact.
///
/// - Flat: straight up.
/// - Right cap: direction from the right cap center to the ball center,
///   which lands in the first or fourth quadrant.
/// - Left cap: same direction from the left cap center, shifted into
///   [0, 2π) so it faces away from the paddle body (second/third
///   quadrant).
pub fn normal_angle(
    surface: Surface,
    ball_center: Vec2,
    paddle_center: Vec2,
    paddle_width: f32,
    paddle_height: f32,
) -> f32 {
    let (left_cap, right_cap) = cap_centers(paddle_center, paddle_width, paddle_height);

    match surface {
        Surface::Flat => FRAC_PI_2,
        Surface::RightCap => {
            let d = ball_center - right_cap;
            d.y.atan2(d.x)
        }
        Surface::LeftCap => {
            let d = ball_center - left_cap;
            let angle = d.y.atan2(d.x);
            if angle < 0.0 { angle + TAU } else { angle }
        }
    }
}
