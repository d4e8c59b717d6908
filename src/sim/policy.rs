//! Enemy motion policies
//!
//! A closed set of behaviors layered on the shared `Entity` record. Enemy
//! displacement is pixel-snapped (`floor(speed * dt)`); the player moves
//! unrounded. The asymmetry is intentional and visible on screen.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Boxes, Collider, Entity};
use crate::consts::{ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, WILD_DECISION_SECS, WILD_SPEED_STEP};
use crate::gfx::Canvas;

/// How an enemy moves. States live in the variant fields, not a separate
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPolicy {
    /// Does not move; the shared base, never spawned alone
    Straight,
    /// Rightward motion that teleports to x=0 past the far edge
    Wrapping,
    /// Reverses and clamps at the arena edges
    Bouncing { going_right: bool },
    /// Bouncing plus a periodic random speed/direction decision
    Wild {
        going_right: bool,
        decision_clock: f32,
    },
}

/// A mobile obstacle the player must avoid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub entity: Entity,
    pub policy: MotionPolicy,
}

impl Enemy {
    pub fn new(entity: Entity, policy: MotionPolicy) -> Self {
        Self { entity, policy }
    }

    /// Advance one tick. `rng` feeds the wild policy's decisions only.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        let step = (self.entity.speed * dt).floor();
        match self.policy {
            MotionPolicy::Straight => {}
            MotionPolicy::Wrapping => {
                self.entity.pos.x += step;
                if self.entity.pos.x > self.entity.screen_bounds.width {
                    self.entity.pos.x = 0.0;
                }
            }
            MotionPolicy::Bouncing { going_right } => {
                let flipped = bounce(&mut self.entity, going_right, step);
                self.policy = MotionPolicy::Bouncing {
                    going_right: flipped,
                };
            }
            MotionPolicy::Wild {
                mut going_right,
                mut decision_clock,
            } => {
                decision_clock += dt;
                if decision_clock >= WILD_DECISION_SECS {
                    decision_clock -= WILD_DECISION_SECS;
                    match rng.random_range(0..3u32) {
                        0 => going_right = !going_right,
                        1 => self.entity.speed += WILD_SPEED_STEP,
                        _ => self.entity.speed -= WILD_SPEED_STEP,
                    }
                    self.entity.speed = self.entity.speed.clamp(ENEMY_MIN_SPEED, ENEMY_MAX_SPEED);
                }
                let going_right = bounce(&mut self.entity, going_right, step);
                self.policy = MotionPolicy::Wild {
                    going_right,
                    decision_clock,
                };
            }
        }
    }

    /// Mirrored while a bouncing-family enemy moves leftward
    fn mirrored(&self) -> bool {
        matches!(
            self.policy,
            MotionPolicy::Bouncing { going_right: false }
                | MotionPolicy::Wild {
                    going_right: false,
                    ..
                }
        )
    }

    pub fn render(&self, canvas: &mut dyn Canvas, debug_boxes: bool) {
        self.entity.draw_sprite(canvas, self.mirrored());
        if debug_boxes {
            self.entity.draw_outlines(canvas, &self.bounding_boxes());
        }
    }
}

/// Shared bouncing step: move, then reverse-and-clamp at the crossed edge on
/// the same tick. Returns the new direction flag.
fn bounce(entity: &mut Entity, going_right: bool, step: f32) -> bool {
    let bounds = entity.screen_bounds;
    if going_right {
        entity.pos.x += step;
        if entity.pos.x + entity.local_bounds.left > bounds.width {
            entity.pos.x = bounds.width;
            return false;
        }
    } else {
        entity.pos.x -= step;
        if entity.pos.x + entity.local_bounds.right < bounds.x {
            entity.pos.x = bounds.x - entity.local_bounds.right;
            return true;
        }
    }
    going_right
}

impl Collider for Enemy {
    /// Wrapping enemies that overhang the right edge contribute a second box
    /// shifted onto the left edge, so seam collisions still register.
    fn bounding_boxes(&self) -> Boxes {
        let tight = self.entity.tight_box();
        if self.policy == MotionPolicy::Wrapping {
            let width = self.entity.screen_bounds.width;
            if tight.right > width {
                return Boxes::two(tight, tight.shifted(-width, 0.0));
            }
        }
        Boxes::one(tight)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::gfx::SpriteSize;
    use crate::sim::entity::ScreenBounds;
    use crate::sim::geometry::BoundingBox;
    use glam::Vec2;
    use rand::SeedableRng;

    const W: f32 = 505.0;

    fn enemy_at(x: f32, speed: f32, policy: MotionPolicy) -> Enemy {
        let mut entity = Entity::new(
            "enemy-bug",
            SpriteSize {
                width: 101.0,
                height: 171.0,
            },
            BoundingBox::new(2.0, 77.0, 99.0, 144.0),
            ScreenBounds {
                x: 0.0,
                y: 0.0,
                width: W,
                height: 606.0,
            },
        );
        entity.pos = Vec2::new(x, 63.0);
        entity.speed = speed;
        Enemy::new(entity, policy)
    }

    #[test]
    fn test_wrapping_teleports_to_zero_never_negative() {
        // 300 px/s at 60 Hz is an exact 5 px step
        let mut enemy = enemy_at(W - 5.0, 300.0, MotionPolicy::Wrapping);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wrapped = false;
        for _ in 0..10 {
            enemy.update(SIM_DT, &mut rng);
            assert!(enemy.entity.pos.x >= 0.0);
            assert!(enemy.entity.pos.x <= W);
            if enemy.entity.pos.x == 0.0 {
                wrapped = true;
            }
        }
        assert!(wrapped);
    }

    #[test]
    fn test_wrapping_contributes_seam_box() {
        let mut enemy = enemy_at(W - 50.0, 0.0, MotionPolicy::Wrapping);
        let boxes = enemy.bounding_boxes();
        assert_eq!(boxes.len(), 2);
        // The second box covers the portion re-entering on the left
        let seam = boxes.as_slice()[1];
        assert!(seam.left < 0.0);
        assert!(seam.right > 0.0);

        // Fully inside the arena: one box only
        enemy.entity.pos.x = 100.0;
        assert_eq!(enemy.bounding_boxes().len(), 1);
    }

    #[test]
    fn test_bouncing_flips_and_clamps_same_tick() {
        let mut enemy = enemy_at(
            W - 1.0,
            300.0,
            MotionPolicy::Bouncing { going_right: true },
        );
        let mut rng = Pcg32::seed_from_u64(1);
        enemy.update(SIM_DT, &mut rng);
        // x=504 + 5 = 509; tight left 511 > 505 flips and clamps immediately
        assert_eq!(enemy.entity.pos.x, W);
        assert_eq!(
            enemy.policy,
            MotionPolicy::Bouncing { going_right: false }
        );
    }

    #[test]
    fn test_bouncing_turns_around_at_left_edge() {
        let mut enemy = enemy_at(
            -98.0,
            300.0,
            MotionPolicy::Bouncing { going_right: false },
        );
        let mut rng = Pcg32::seed_from_u64(1);
        enemy.update(SIM_DT, &mut rng);
        assert_eq!(
            enemy.policy,
            MotionPolicy::Bouncing { going_right: true }
        );
        assert_eq!(enemy.entity.pos.x + enemy.entity.local_bounds.right, 0.0);
    }

    #[test]
    fn test_bouncing_mirrors_when_going_left() {
        let right = enemy_at(100.0, 0.0, MotionPolicy::Bouncing { going_right: true });
        let left = enemy_at(100.0, 0.0, MotionPolicy::Bouncing { going_right: false });
        assert!(!right.mirrored());
        assert!(left.mirrored());
    }

    #[test]
    fn test_wild_fires_one_decision_per_window() {
        let mut enemy = enemy_at(
            100.0,
            300.0,
            MotionPolicy::Wild {
                going_right: true,
                decision_clock: 0.0,
            },
        );
        let mut rng = Pcg32::seed_from_u64(7);
        let mut decisions = 0;
        // 121 ticks at 60 Hz cover one 2-second decision window with a tick
        // of slack for float accumulation at the boundary
        for _ in 0..121 {
            let before = match enemy.policy {
                MotionPolicy::Wild { decision_clock, .. } => decision_clock,
                _ => unreachable!(),
            };
            enemy.update(SIM_DT, &mut rng);
            let after = match enemy.policy {
                MotionPolicy::Wild { decision_clock, .. } => decision_clock,
                _ => unreachable!(),
            };
            if after < before {
                decisions += 1;
            }
        }
        assert_eq!(decisions, 1);
    }

    #[test]
    fn test_wild_speed_stays_in_bounds() {
        let mut enemy = enemy_at(
            100.0,
            ENEMY_MIN_SPEED,
            MotionPolicy::Wild {
                going_right: true,
                decision_clock: 0.0,
            },
        );
        let mut rng = Pcg32::seed_from_u64(99);
        // 60 simulated seconds, 30 decisions, any roll sequence stays clamped
        for _ in 0..3600 {
            enemy.update(SIM_DT, &mut rng);
            assert!(enemy.entity.speed >= ENEMY_MIN_SPEED);
            assert!(enemy.entity.speed <= ENEMY_MAX_SPEED);
        }
    }

    #[test]
    fn test_straight_does_not_move() {
        let mut enemy = enemy_at(100.0, 300.0, MotionPolicy::Straight);
        let mut rng = Pcg32::seed_from_u64(1);
        enemy.update(SIM_DT, &mut rng);
        assert_eq!(enemy.entity.pos.x, 100.0);
    }

    #[test]
    fn test_enemy_step_is_pixel_snapped() {
        // 130 px/s at 60 Hz: floor(2.1666) = 2 px per tick
        let mut enemy = enemy_at(100.0, 130.0, MotionPolicy::Wrapping);
        let mut rng = Pcg32::seed_from_u64(1);
        enemy.update(SIM_DT, &mut rng);
        assert_eq!(enemy.entity.pos.x, 102.0);
    }
}
