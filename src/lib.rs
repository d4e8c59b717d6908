//! Lane Hopper - a lane-crossing arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion policies, AABB collision, session loop)
//! - `gfx`: Narrow rendering/sprite collaborator traits (real frontends live outside)
//! - `platform`: Keyboard-code to logical-direction input mapping
//! - `settings`: Data-driven game tuning

pub mod gfx;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; the external frame source ticks us)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: f32 = 505.0;
    pub const ARENA_HEIGHT: f32 = 606.0;
    /// Background tile grid
    pub const TILE_WIDTH: f32 = 101.0;
    pub const ROW_HEIGHT: f32 = 83.0;

    /// Vertical anchor of each enemy lane, top to bottom. Rows below the last
    /// lane are a safety margin enemies never enter.
    pub const ENEMY_ROWS: [f32; 3] = [63.0, 146.0, 229.0];

    /// Player spawn tile (column 2, bottom walkable row)
    pub const PLAYER_START_X: f32 = 202.0;
    pub const PLAYER_START_Y: f32 = 405.0;
    /// A tight top edge above this y counts as having reached the goal row
    pub const GOAL_Y: f32 = -10.0;

    /// Enemy speed clamp, pixels/second
    pub const ENEMY_MIN_SPEED: f32 = 100.0;
    pub const ENEMY_MAX_SPEED: f32 = 1000.0;
    /// Wild policy: seconds between random decisions, speed step per decision
    pub const WILD_DECISION_SECS: f32 = 2.0;
    pub const WILD_SPEED_STEP: f32 = 100.0;

    /// Sprite keys understood by the sprite store
    pub const SPRITE_ENEMY: &str = "enemy-bug";
    pub const SPRITE_PLAYER: &str = "char-boy";
    pub const SPRITE_GEM: &str = "gem-orange";
}
