//! The session controller: fixed update -> collision -> render cycle
//!
//! Owns the enemy roster, the player, the ephemeral actors, and the seeded
//! RNG. A win/lose condition never interrupts a tick; it requests a reset
//! that is applied at the very start of the next tick, before anything else.

use glam::Vec2;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Collider, Entity, ScreenBounds};
use super::ephemeral::{Bonus, Chronos, MultiText, Text, TimerEvent};
use super::geometry::BoundingBox;
use super::player::{Direction, Player};
use super::policy::{Enemy, MotionPolicy};
use crate::consts::*;
use crate::gfx::{Canvas, SpriteSize, SpriteStore};
use crate::settings::Tuning;

/// Tight collision boxes per sprite; smaller than the sprite rectangle
/// because the art carries transparent padding
const ENEMY_BOUNDS: BoundingBox = BoundingBox {
    left: 2.0,
    top: 77.0,
    right: 99.0,
    bottom: 144.0,
};
const PLAYER_BOUNDS: BoundingBox = BoundingBox {
    left: 16.0,
    top: 62.0,
    right: 84.0,
    bottom: 140.0,
};
const GEM_BOUNDS: BoundingBox = BoundingBox {
    left: 12.0,
    top: 75.0,
    right: 88.0,
    bottom: 160.0,
};

/// Bonus spawns above the arena, centered on the player's start column
const BONUS_SPAWN: Vec2 = Vec2::new(PLAYER_START_X, -60.0);

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// A reset was requested this tick and applies at the start of the next
    ResetPending { success: bool },
}

/// Sprite dimensions, read from the store once at session construction
#[derive(Debug, Clone, Copy)]
struct SpriteSet {
    enemy: SpriteSize,
    player: SpriteSize,
    gem: SpriteSize,
}

impl SpriteSet {
    fn from_store(store: &dyn SpriteStore) -> Option<Self> {
        Some(Self {
            enemy: store.sprite(SPRITE_ENEMY)?,
            player: store.sprite(SPRITE_PLAYER)?,
            gem: store.sprite(SPRITE_GEM)?,
        })
    }
}

/// One interactive game session
#[derive(Debug)]
pub struct Session {
    rng: Pcg32,
    tuning: Tuning,
    sprites: SpriteSet,
    phase: Phase,
    started: bool,
    time_ticks: u64,
    pub enemies: Vec<Enemy>,
    pub player: Option<Player>,
    pub chronos: Option<Chronos>,
    pub bonus: Option<Bonus>,
    pub messages: Option<MultiText>,
}

impl Session {
    /// Returns None when the sprite store is missing a required key. The
    /// first tick applies the initial reset; no player exists before that.
    pub fn new(seed: u64, tuning: Tuning, store: &dyn SpriteStore) -> Option<Self> {
        let sprites = match SpriteSet::from_store(store) {
            Some(s) => s,
            None => {
                warn!("sprite store is missing a required sprite key");
                return None;
            }
        };
        info!("session start, seed {seed}");
        Some(Self {
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            sprites,
            phase: Phase::ResetPending { success: false },
            started: false,
            time_ticks: 0,
            enemies: Vec::new(),
            player: None,
            chronos: None,
            bonus: None,
            messages: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Forward a press/release to the player. Dropped (with a log line, not
    /// an error) if no player exists yet.
    pub fn handle_input(&mut self, direction: Direction, pressed: bool) {
        match self.player.as_mut() {
            Some(player) => player.handle_input(direction, pressed),
            None => warn!("input before the first reset completed, dropped"),
        }
    }

    /// Advance one tick of simulated time. Rendering is separate; call
    /// `render` after this, once per tick.
    pub fn tick(&mut self, dt: f32) {
        // 1. Apply a pending reset before any update
        if let Phase::ResetPending { success } = self.phase {
            self.apply_reset(success);
            self.phase = Phase::Running;
        }
        self.time_ticks += 1;

        // 2. Drop actors that died last tick (they already rendered once)
        if self.chronos.as_ref().is_some_and(|c| !c.is_alive()) {
            self.chronos = None;
        }
        if self.bonus.as_ref().is_some_and(|b| !b.is_alive()) {
            self.bonus = None;
        }
        if self.messages.as_ref().is_some_and(|m| !m.is_alive()) {
            self.messages = None;
        }

        // 3. Update everything
        for enemy in &mut self.enemies {
            enemy.update(dt, &mut self.rng);
        }
        let mut timer_expired = false;
        if let Some(player) = self.player.as_mut() {
            player.update(dt);
            if let Some(bonus) = self.bonus.as_mut() {
                bonus.update(dt, player);
            }
        }
        if let Some(chronos) = self.chronos.as_mut() {
            if chronos.update(dt) == TimerEvent::Expired {
                timer_expired = true;
            }
        }
        if let Some(messages) = self.messages.as_mut() {
            messages.update(dt);
        }

        // 4. Collision pass: clear every flag first so nothing sticks from
        // the previous tick, then player vs each enemy
        if let Some(player) = self.player.as_mut() {
            player.clear_hit();
            for enemy in &mut self.enemies {
                enemy.clear_hit();
            }
            for enemy in &mut self.enemies {
                player.collide(enemy);
            }

            // Win/lose. Goal-reached is evaluated last and wins a tie.
            let mut outcome = None;
            if timer_expired {
                outcome = Some(false);
            }
            if player.is_hit() {
                outcome = Some(false);
            }
            if player.reached_goal() {
                outcome = Some(true);
            }
            if let Some(success) = outcome {
                debug!(
                    "reset requested at tick {}, success={success}",
                    self.time_ticks
                );
                self.phase = Phase::ResetPending { success };
            }
        }
    }

    /// Draw current state: background, enemies, player, ephemerals, in that
    /// order so the player covers enemies and announcements cover everything
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let debug_boxes = self.tuning.debug_boxes;
        canvas.draw_background();
        for enemy in &self.enemies {
            enemy.render(canvas, debug_boxes);
        }
        if let Some(player) = self.player.as_ref() {
            player.render(canvas, debug_boxes);
        }
        if let Some(bonus) = self.bonus.as_ref() {
            bonus.render(canvas, debug_boxes);
        }
        if let Some(chronos) = self.chronos.as_ref() {
            chronos.render(canvas);
        }
        if let Some(messages) = self.messages.as_ref() {
            messages.render(canvas);
        }
    }

    /// Rebuild the roster, player, and ephemeral actors
    fn apply_reset(&mut self, success: bool) {
        debug!("reset applied, success={success}");

        self.enemies.clear();
        for i in 0..self.tuning.enemy_count {
            let row = ENEMY_ROWS[i % ENEMY_ROWS.len()];
            let enemy = self.spawn_enemy(row);
            self.enemies.push(enemy);
        }

        let mut player_entity = Entity::new(
            SPRITE_PLAYER,
            self.sprites.player,
            PLAYER_BOUNDS,
            ScreenBounds {
                x: 0.0,
                y: 0.0,
                width: ARENA_WIDTH,
                height: PLAYER_START_Y + PLAYER_BOUNDS.bottom,
            },
        );
        player_entity.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        player_entity.speed = self.tuning.player_speed;
        self.player = Some(Player::new(player_entity));

        self.chronos = Some(Chronos::new(self.tuning.countdown_secs));

        let lines: &[&str] = if !self.started {
            &["Get across!"]
        } else if success {
            &["You made it!", "Go again!"]
        } else {
            &["Game over", "Try again!"]
        };
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        self.messages = Some(MultiText::new(
            lines
                .iter()
                .map(|line| Text::new(line, center, ARENA_WIDTH))
                .collect(),
        ));

        let mut gem = Entity::new(
            SPRITE_GEM,
            self.sprites.gem,
            GEM_BOUNDS,
            ScreenBounds {
                x: 0.0,
                y: 0.0,
                width: ARENA_WIDTH,
                height: ARENA_HEIGHT,
            },
        );
        gem.pos = BONUS_SPAWN;
        gem.speed = self.tuning.bonus_fall_speed;
        self.bonus = Some(Bonus::new(gem, self.tuning.bonus_boost));

        self.started = true;
    }

    /// One enemy at a random x in its lane: uniformly random policy, then
    /// spawn x, then speed. The draw order is part of the deterministic
    /// spawn protocol; don't reorder it.
    fn spawn_enemy(&mut self, row_y: f32) -> Enemy {
        let policy = match self.rng.random_range(0..3u32) {
            0 => MotionPolicy::Wrapping,
            1 => MotionPolicy::Bouncing { going_right: true },
            _ => MotionPolicy::Wild {
                going_right: true,
                decision_clock: 0.0,
            },
        };
        let x = self.rng.random_range(0.0..ARENA_WIDTH);
        let (lo, hi) = (
            self.tuning.enemy_spawn_speed_min,
            self.tuning.enemy_spawn_speed_max,
        );
        // A degenerate tuned range collapses to its lower bound
        let speed = if lo < hi {
            self.rng.random_range(lo..hi)
        } else {
            lo
        };

        let mut entity = Entity::new(
            SPRITE_ENEMY,
            self.sprites.enemy,
            ENEMY_BOUNDS,
            ScreenBounds {
                x: 0.0,
                y: 0.0,
                width: ARENA_WIDTH,
                height: ARENA_HEIGHT,
            },
        );
        entity.pos = Vec2::new(x, row_y);
        entity.speed = speed;
        Enemy::new(entity, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{FixedSprites, NullCanvas};

    fn session(seed: u64) -> Session {
        Session::new(seed, Tuning::default(), &FixedSprites::stock()).unwrap()
    }

    fn session_tuned(seed: u64, tuning: Tuning) -> Session {
        Session::new(seed, tuning, &FixedSprites::stock()).unwrap()
    }

    #[test]
    fn test_first_tick_builds_the_roster() {
        let mut s = session(42);
        assert!(s.player.is_none());
        assert!(s.enemies.is_empty());

        s.tick(SIM_DT);
        assert_eq!(s.enemies.len(), 3);
        assert!(s.player.is_some());
        assert!(s.chronos.is_some());
        assert!(s.bonus.is_some());
        assert!(s.messages.is_some());
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_input_before_first_reset_is_dropped() {
        let mut s = session(42);
        // Must not panic, must not create a player
        s.handle_input(Direction::Up, true);
        assert!(s.player.is_none());

        s.tick(SIM_DT);
        s.handle_input(Direction::Up, true);
        let y0 = s.player.as_ref().unwrap().entity.pos.y;
        s.tick(SIM_DT);
        assert!(s.player.as_ref().unwrap().entity.pos.y < y0);
    }

    #[test]
    fn test_spawn_protocol_is_deterministic() {
        let mut a = session(1234);
        let mut b = session(1234);
        a.tick(SIM_DT);
        b.tick(SIM_DT);

        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(b.enemies.iter()) {
            assert_eq!(ea.policy, eb.policy);
            assert_eq!(ea.entity.pos, eb.entity.pos);
            assert_eq!(ea.entity.speed, eb.entity.speed);
        }
        // Lanes are assigned top to bottom
        for (i, enemy) in a.enemies.iter().enumerate() {
            assert_eq!(enemy.entity.pos.y, ENEMY_ROWS[i]);
        }
    }

    #[test]
    fn test_collision_requests_reset_applied_next_tick() {
        let mut s = session(7);
        s.tick(SIM_DT);

        // Park the player on top of the first enemy
        let target = s.enemies[0].entity.pos;
        let player = s.player.as_mut().unwrap();
        player.entity.pos = target;
        s.tick(SIM_DT);
        assert!(s.player.as_ref().unwrap().is_hit());
        assert_eq!(s.phase(), Phase::ResetPending { success: false });

        // The reset lands at the start of the following tick
        s.tick(SIM_DT);
        let player = s.player.as_ref().unwrap();
        assert!(!player.is_hit());
        assert_eq!(player.entity.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_hit_flags_clear_when_boxes_separate() {
        let mut s = session(7);
        s.tick(SIM_DT);

        let target = s.enemies[0].entity.pos;
        s.player.as_mut().unwrap().entity.pos = target;
        s.tick(SIM_DT);
        assert!(s.player.as_ref().unwrap().is_hit());

        // Cancel the pending reset and move the player clear; the next
        // unhit-then-collide pass leaves every flag false
        s.phase = Phase::Running;
        s.player.as_mut().unwrap().entity.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        s.tick(SIM_DT);
        assert!(!s.player.as_ref().unwrap().is_hit());
        assert!(s.enemies.iter().all(|e| !e.is_hit()));
    }

    #[test]
    fn test_goal_reached_resets_with_success() {
        let mut s = session(7);
        s.tick(SIM_DT);

        // Drop the player into the goal row, clear of the enemy lanes. The
        // tight top still sits inside the arena, so clamping leaves it alone.
        s.player.as_mut().unwrap().entity.pos = Vec2::new(0.0, GOAL_Y - 10.0);
        s.tick(SIM_DT);
        assert_eq!(s.phase(), Phase::ResetPending { success: true });
    }

    #[test]
    fn test_timer_expiry_resets_without_success() {
        let tuning = Tuning {
            countdown_secs: 0.02,
            ..Default::default()
        };
        let mut s = session_tuned(7, tuning);
        s.tick(SIM_DT);
        // Park the player away from the lanes so only the timer can fire
        s.player.as_mut().unwrap().entity.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        s.tick(SIM_DT);
        assert_eq!(s.phase(), Phase::ResetPending { success: false });

        // Next tick swaps in a fresh, alive timer
        s.tick(SIM_DT);
        assert!(s.chronos.as_ref().unwrap().is_alive());
    }

    #[test]
    fn test_sessions_replay_identically() {
        let mut a = session(9001);
        let mut b = session(9001);
        let script = [
            (10, Direction::Up, true),
            (40, Direction::Left, true),
            (60, Direction::Up, false),
            (90, Direction::Left, false),
        ];
        for tick_no in 0..240u32 {
            for (at, dir, pressed) in script {
                if tick_no == at {
                    a.handle_input(dir, pressed);
                    b.handle_input(dir, pressed);
                }
            }
            a.tick(SIM_DT);
            b.tick(SIM_DT);
        }
        assert_eq!(a.time_ticks(), b.time_ticks());
        assert_eq!(
            a.player.as_ref().unwrap().entity.pos,
            b.player.as_ref().unwrap().entity.pos
        );
        for (ea, eb) in a.enemies.iter().zip(b.enemies.iter()) {
            assert_eq!(ea.entity.pos, eb.entity.pos);
            assert_eq!(ea.entity.speed, eb.entity.speed);
        }
    }

    #[test]
    fn test_render_is_a_pure_read() {
        let mut s = session(5);
        s.tick(SIM_DT);
        let mut canvas = NullCanvas::default();
        let before = s.player.as_ref().unwrap().entity.pos;
        s.render(&mut canvas);
        s.render(&mut canvas);
        assert_eq!(s.player.as_ref().unwrap().entity.pos, before);
    }

    #[test]
    fn test_missing_sprite_fails_construction() {
        let sprites = FixedSprites::default();
        assert!(Session::new(1, Tuning::default(), &sprites).is_none());
    }
}
