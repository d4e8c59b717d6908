//! Rendering and sprite collaborators
//!
//! The sim never draws or decodes images itself; real frontends (canvas, GPU,
//! terminal) implement these traits outside the crate. `FixedSprites` and
//! `NullCanvas` back tests and the headless demo binary.

use std::collections::HashMap;

use crate::sim::geometry::BoundingBox;

/// Pixel dimensions of a loaded sprite, read once at entity construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

/// Provider of sprite dimensions keyed by name
pub trait SpriteStore {
    /// Dimensions of a loaded sprite, or None if the key was never loaded
    fn sprite(&self, key: &str) -> Option<SpriteSize>;
    /// Request the given keys be made available
    fn preload(&mut self, keys: &[&str]);
    /// True once every preloaded key can be queried
    fn ready(&self) -> bool;
}

/// An sRGB color for text rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(220, 40, 40);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Drawing surface the sim renders onto. Only called from render paths,
/// never from update.
pub trait Canvas {
    /// Arena pixel dimensions
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn draw_image(&mut self, key: &str, x: f32, y: f32);
    /// Draw the sprite mirrored around its vertical center line
    fn draw_image_flipped(&mut self, key: &str, x: f32, y: f32);
    /// Debug outline of a collision box
    fn stroke_rect(&mut self, rect: &BoundingBox);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, px: f32, color: Color);
    fn measure_text(&self, text: &str, px: f32) -> f32;
    /// Paint the tiled background; drawn first every frame
    fn draw_background(&mut self);
}

/// Sprite store backed by a fixed dimension table
#[derive(Debug, Default)]
pub struct FixedSprites {
    sizes: HashMap<String, SpriteSize>,
}

impl FixedSprites {
    /// Table covering the game's stock sprite sheet (all cells share one size)
    pub fn stock() -> Self {
        let mut sprites = Self::default();
        let cell = SpriteSize {
            width: 101.0,
            height: 171.0,
        };
        for key in [
            crate::consts::SPRITE_ENEMY,
            crate::consts::SPRITE_PLAYER,
            crate::consts::SPRITE_GEM,
        ] {
            sprites.sizes.insert(key.to_string(), cell);
        }
        sprites
    }

    pub fn insert(&mut self, key: &str, size: SpriteSize) {
        self.sizes.insert(key.to_string(), size);
    }
}

impl SpriteStore for FixedSprites {
    fn sprite(&self, key: &str) -> Option<SpriteSize> {
        self.sizes.get(key).copied()
    }

    fn preload(&mut self, _keys: &[&str]) {}

    fn ready(&self) -> bool {
        true
    }
}

/// Canvas that draws nothing; backs the headless demo and tests
#[derive(Debug)]
pub struct NullCanvas {
    width: f32,
    height: f32,
}

impl NullCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for NullCanvas {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}

impl Canvas for NullCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn draw_image(&mut self, _key: &str, _x: f32, _y: f32) {}
    fn draw_image_flipped(&mut self, _key: &str, _x: f32, _y: f32) {}
    fn stroke_rect(&mut self, _rect: &BoundingBox) {}
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _px: f32, _color: Color) {}

    fn measure_text(&self, text: &str, px: f32) -> f32 {
        // Rough monospace estimate, good enough for layout in headless runs
        text.chars().count() as f32 * px * 0.55
    }

    fn draw_background(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_sprites_cover_game_keys() {
        let sprites = FixedSprites::stock();
        for key in [
            crate::consts::SPRITE_ENEMY,
            crate::consts::SPRITE_PLAYER,
            crate::consts::SPRITE_GEM,
        ] {
            let size = sprites.sprite(key).unwrap();
            assert_eq!(size.width, 101.0);
            assert_eq!(size.height, 171.0);
        }
        assert!(sprites.ready());
        assert!(sprites.sprite("missing").is_none());
    }
}
