//! Data-driven game tuning
//!
//! Gameplay knobs that are reasonable to adjust without touching code.
//! Geometry (arena, tiles, lanes) stays in `consts`; it is coupled to the
//! sprite sheet and not meaningfully tunable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Enemies spawned per reset
    pub enemy_count: usize,
    /// Countdown before a forced reset, seconds
    pub countdown_secs: f32,
    /// Enemy speed range rolled at spawn (the wild policy can later push
    /// speed up to the hard clamp in `consts`)
    pub enemy_spawn_speed_min: f32,
    pub enemy_spawn_speed_max: f32,
    /// Player speed, pixels/second
    pub player_speed: f32,
    /// Bonus fall speed and the speed multiplier it grants
    pub bonus_fall_speed: f32,
    pub bonus_boost: f32,
    /// Stroke collision boxes during render
    pub debug_boxes: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_count: 3,
            countdown_secs: 30.0,
            enemy_spawn_speed_min: 100.0,
            enemy_spawn_speed_max: 400.0,
            player_speed: 200.0,
            bonus_fall_speed: 120.0,
            bonus_boost: 2.0,
            debug_boxes: false,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; missing fields keep their defaults. Callers fall
    /// back to `Tuning::default()` on error.
    pub fn load_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
