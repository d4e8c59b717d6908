//! The input-driven player
//!
//! Unlike the enemies, the player has no autonomous policy: four independent
//! direction flags drive it, and diagonal movement is the plain vector sum
//! (faster than a single axis; observable gameplay behavior, kept as-is).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Boxes, Collider, Entity};
use crate::consts::GOAL_Y;
use crate::gfx::Canvas;

/// Logical movement direction, as delivered by the platform input mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
    moving_left: bool,
    moving_right: bool,
    moving_up: bool,
    moving_down: bool,
}

impl Player {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            moving_left: false,
            moving_right: false,
            moving_up: false,
            moving_down: false,
        }
    }

    /// Set or clear one direction flag; several may be active at once
    pub fn handle_input(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.moving_left = pressed,
            Direction::Right => self.moving_right = pressed,
            Direction::Up => self.moving_up = pressed,
            Direction::Down => self.moving_down = pressed,
        }
    }

    /// Apply active flags (unrounded displacement), then clamp the tight box
    /// into the arena edge by edge. Later checks win if two ever conflict.
    pub fn update(&mut self, dt: f32) {
        let step = self.entity.speed * dt;
        let mut delta = Vec2::ZERO;
        if self.moving_left {
            delta.x -= step;
        }
        if self.moving_right {
            delta.x += step;
        }
        if self.moving_up {
            delta.y -= step;
        }
        if self.moving_down {
            delta.y += step;
        }
        self.entity.pos += delta;

        let bounds = self.entity.screen_bounds;
        let local = self.entity.local_bounds;
        if self.entity.pos.x + local.left < bounds.x {
            self.entity.pos.x = bounds.x - local.left;
        }
        if self.entity.pos.y + local.top < bounds.y {
            self.entity.pos.y = bounds.y - local.top;
        }
        if self.entity.pos.x + local.right > bounds.width {
            self.entity.pos.x = bounds.width - local.right;
        }
        if self.entity.pos.y + local.bottom > bounds.height {
            self.entity.pos.y = bounds.height - local.bottom;
        }
    }

    /// True once the anchor has crossed into the goal row at the top
    pub fn reached_goal(&self) -> bool {
        self.entity.pos.y < GOAL_Y
    }

    pub fn render(&self, canvas: &mut dyn Canvas, debug_boxes: bool) {
        self.entity.draw_sprite(canvas, false);
        if debug_boxes {
            self.entity.draw_outlines(canvas, &self.bounding_boxes());
        }
    }
}

impl Collider for Player {
    fn bounding_boxes(&self) -> Boxes {
        Boxes::one(self.entity.tight_box())
    }

    fn mark_hit(&mut self) {
        self.entity.hit();
    }

    fn clear_hit(&mut self) {
        self.entity.unhit();
    }

    fn is_hit(&self) -> bool {
        self.entity.is_hit()
    }
}
