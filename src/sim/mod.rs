//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, threaded through the session
//! - No rendering or platform dependencies outside the narrow `gfx` traits

pub mod entity;
pub mod ephemeral;
pub mod geometry;
pub mod player;
pub mod policy;
pub mod session;

pub use entity::{Boxes, Collider, Entity, ScreenBounds};
pub use ephemeral::{Bonus, Chronos, MultiText, Text, TimerEvent};
pub use geometry::{BoundingBox, intersects};
pub use player::{Direction, Player};
pub use policy::{Enemy, MotionPolicy};
pub use session::{Phase, Session};
