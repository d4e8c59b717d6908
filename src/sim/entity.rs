//! The shared entity record and the collision contract
//!
//! Every mobile game object (enemy, player, bonus) is one concrete `Entity`
//! plus behavior layered on top; there is no inheritance chain. Collision
//! boxes are recomputed from current position on every query.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, intersects};
use crate::gfx::{Canvas, SpriteSize};

/// The rectangular region an entity is confined to or measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Up to two boxes without heap allocation; two only while a wrapping entity
/// straddles the arena seam
#[derive(Debug, Clone, Copy)]
pub struct Boxes {
    items: [BoundingBox; 2],
    len: usize,
}

impl Boxes {
    pub fn one(a: BoundingBox) -> Self {
        Self {
            items: [a, a],
            len: 1,
        }
    }

    pub fn two(a: BoundingBox, b: BoundingBox) -> Self {
        Self { items: [a, b], len: 2 }
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.items[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Base record for all mobile game objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left anchor of the full sprite rectangle
    pub pos: Vec2,
    /// Full sprite rectangle, read once from the sprite store
    pub size: Vec2,
    /// Offsets from `pos` defining the tight collision box (sprites carry
    /// transparent padding the box must exclude)
    pub local_bounds: BoundingBox,
    /// Movement arena for this entity
    pub screen_bounds: ScreenBounds,
    /// Pixels per second
    pub speed: f32,
    hit: bool,
    /// Sprite store key
    pub sprite: String,
}

impl Entity {
    pub fn new(
        sprite: &str,
        size: SpriteSize,
        local_bounds: BoundingBox,
        screen_bounds: ScreenBounds,
    ) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(size.width, size.height),
            local_bounds,
            screen_bounds,
            speed: 0.0,
            hit: false,
            sprite: sprite.to_string(),
        }
    }

    /// The tight collision box at the current position
    pub fn tight_box(&self) -> BoundingBox {
        self.local_bounds.shifted(self.pos.x, self.pos.y)
    }

    pub fn hit(&mut self) {
        self.hit = true;
    }

    pub fn unhit(&mut self) {
        self.hit = false;
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Draw the sprite at the current position, optionally mirrored
    pub fn draw_sprite(&self, canvas: &mut dyn Canvas, mirrored: bool) {
        if mirrored {
            canvas.draw_image_flipped(&self.sprite, self.pos.x, self.pos.y);
        } else {
            canvas.draw_image(&self.sprite, self.pos.x, self.pos.y);
        }
    }

    /// Debug outlines for the given boxes
    pub fn draw_outlines(&self, canvas: &mut dyn Canvas, boxes: &Boxes) {
        for b in boxes.iter() {
            canvas.stroke_rect(b);
        }
    }
}

/// Hit-flag collision contract shared by enemies, the player, and the bonus
pub trait Collider {
    /// At least one box; more only for wrap-in-transition states
    fn bounding_boxes(&self) -> Boxes;
    fn mark_hit(&mut self);
    fn clear_hit(&mut self);
    fn is_hit(&self) -> bool;

    /// Cross both box lists (own boxes outer); the first intersecting pair
    /// marks both sides hit and stops the scan. One boolean per entity per
    /// tick is all collision resolution needs.
    fn collide(&mut self, other: &mut dyn Collider) {
        let mine = self.bounding_boxes();
        let theirs = other.bounding_boxes();
        for a in mine.iter() {
            for b in theirs.iter() {
                if intersects(a, b) {
                    self.mark_hit();
                    other.mark_hit();
                    return;
                }
            }
        }
    }
}
