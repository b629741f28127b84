//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed or host-supplied timestep, no real-time waits
//! - No rendering or platform dependencies
//! - Input only through [`GameState::handle_input`], mutation only
//!   through [`tick`]

pub mod collision;
pub mod reflect;
pub mod state;
pub mod tick;

pub use collision::{Surface, cap_centers, classify, normal_angle};
pub use reflect::{acceleration_coefficient, reflect_off_paddle};
pub use state::{Ball, Court, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{InputAction, tick};
