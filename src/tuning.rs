//! Data-driven game balance
//!
//! All constants the shell may want to tune live here. A `Tuning` can be
//! loaded from a JSON file (partial files fall back to defaults per
//! field), validated, and embedded in the game state snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::consts;

/// Tunable balance values; defaults mirror [`crate::consts`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Court dimensions (px)
    pub court_width: f32,
    pub court_height: f32,

    /// Paddle geometry and movement speed
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    /// Ball geometry and serve vector
    pub ball_radius: f32,
    pub serve_velocity_x: f32,
    pub serve_velocity_y: f32,

    /// Lives at the start of a game
    pub lives_per_game: u8,

    /// Fraction of the paddle velocity transferred to the ball on a hit
    pub paddle_coupling: f32,

    /// Every `accel_every`th hit multiplies the rebound speed by
    /// `1 + accel_fraction`
    pub accel_every: u32,
    pub accel_fraction: f32,

    /// Minimum angular distance of a cap rebound from the axes (radians)
    pub min_reflect_deviation: f32,

    /// Duration of the round-end pause after a lost ball (seconds)
    pub round_end_pause_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            court_width: consts::COURT_WIDTH,
            court_height: consts::COURT_HEIGHT,
            paddle_width: consts::PADDLE_WIDTH,
            paddle_height: consts::PADDLE_HEIGHT,
            paddle_speed: consts::PADDLE_SPEED,
            ball_radius: consts::BALL_RADIUS,
            serve_velocity_x: consts::SERVE_VELOCITY_X,
            serve_velocity_y: consts::SERVE_VELOCITY_Y,
            lives_per_game: consts::LIVES_PER_GAME,
            paddle_coupling: consts::PADDLE_COUPLING,
            accel_every: consts::ACCEL_EVERY,
            accel_fraction: consts::ACCEL_FRACTION,
            min_reflect_deviation: consts::MIN_REFLECT_DEVIATION,
            round_end_pause_secs: consts::ROUND_END_PAUSE_SECS,
        }
    }
}

/// Failure to load or validate a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "tuning file i/o error: {e}"),
            TuningError::Parse(e) => write!(f, "tuning file parse error: {e}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Load and validate a tuning file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Write the tuning as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("saved tuning to {}", path.display());
        Ok(())
    }

    /// Reject geometrically or numerically nonsensical configurations
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(name: &str, v: f32) -> Result<(), TuningError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive, got {v}")))
            }
        }

        positive("court_width", self.court_width)?;
        positive("court_height", self.court_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("round_end_pause_secs", self.round_end_pause_secs)?;

        if self.paddle_height >= self.paddle_width {
            return Err(TuningError::Invalid(
                "paddle_height must be smaller than paddle_width (cap geometry)".into(),
            ));
        }
        if self.lives_per_game == 0 {
            return Err(TuningError::Invalid("lives_per_game must be at least 1".into()));
        }
        if self.accel_every == 0 {
            return Err(TuningError::Invalid("accel_every must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.paddle_coupling) {
            return Err(TuningError::Invalid(format!(
                "paddle_coupling must be in [0, 1], got {}",
                self.paddle_coupling
            )));
        }
        if !(0.0..1.0).contains(&self.accel_fraction) {
            return Err(TuningError::Invalid(format!(
                "accel_fraction must be in [0, 1), got {}",
                self.accel_fraction
            )));
        }
        if !(0.0..std::f32::consts::FRAC_PI_4).contains(&self.min_reflect_deviation) {
            return Err(TuningError::Invalid(format!(
                "min_reflect_deviation must be in [0, π/4), got {}",
                self.min_reflect_deviation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.court_width, tuning.court_width);
        assert_eq!(back.accel_every, tuning.accel_every);
        assert_eq!(back.min_reflect_deviation, tuning.min_reflect_deviation);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"lives_per_game": 5}"#).unwrap();
        assert_eq!(t.lives_per_game, 5);
        assert_eq!(t.court_width, consts::COURT_WIDTH);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut t = Tuning::default();
        t.court_width = 0.0;
        assert!(t.validate().is_err());

        let mut t = Tuning::default();
        t.paddle_height = t.paddle_width;
        assert!(t.validate().is_err());

        let mut t = Tuning::default();
        t.accel_every = 0;
        assert!(t.validate().is_err());

        let mut t = Tuning::default();
        t.paddle_coupling = 1.5;
        assert!(t.validate().is_err());
    }
}
