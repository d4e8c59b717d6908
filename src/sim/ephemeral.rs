//! Ephemeral actors: countdown timer, falling bonus, animated text
//!
//! Each owns its own alive/dead lifecycle. The session keeps dead actors
//! around for the tick they die on (so they still render once) and drops
//! them at the start of the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Collider, Entity};
use super::geometry::intersects;
use super::player::Player;
use crate::gfx::{Canvas, Color};

/// What a timer tick produced. `Expired` is returned on every tick at or past
/// the target, so the session must swap the timer out before the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Running,
    Expired,
}

/// Countdown timer over simulated time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chronos {
    target: f32,
    elapsed: f32,
}

impl Chronos {
    pub fn new(target_secs: f32) -> Self {
        Self {
            target: target_secs,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) -> TimerEvent {
        self.elapsed += dt;
        if self.elapsed >= self.target {
            TimerEvent::Expired
        } else {
            TimerEvent::Running
        }
    }

    pub fn is_alive(&self) -> bool {
        self.elapsed < self.target
    }

    /// Inside the final 30% of the countdown
    fn in_alert_window(&self) -> bool {
        self.elapsed >= self.target * 0.7
    }

    pub fn remaining_secs(&self) -> f32 {
        (self.target - self.elapsed).max(0.0)
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let text = format!("{}", self.remaining_secs().ceil() as u32);
        let px = 36.0;
        let color = if self.in_alert_window() {
            Color::RED
        } else {
            Color::WHITE
        };
        let w = canvas.measure_text(&text, px);
        canvas.fill_text(&text, canvas.width() - w - 12.0, 40.0, px, color);
    }
}

/// Falling collectible that boosts whoever picks it up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub entity: Entity,
    boost: f32,
    alive: bool,
}

impl Bonus {
    pub fn new(entity: Entity, boost: f32) -> Self {
        Self {
            entity,
            boost,
            alive: true,
        }
    }

    /// Integrate the fall, then check arena exit and player pickup. The
    /// player is handed in explicitly; the bonus holds no reference to it.
    pub fn update(&mut self, dt: f32, player: &mut Player) {
        if !self.alive {
            return;
        }
        self.entity.pos.y += self.entity.speed * dt;

        if self.entity.tight_box().top > self.entity.screen_bounds.height {
            self.alive = false;
            return;
        }

        let mine = self.entity.tight_box();
        for theirs in player.bounding_boxes().iter() {
            if intersects(&mine, theirs) {
                player.entity.speed *= self.boost;
                self.alive = false;
                return;
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn render(&self, canvas: &mut dyn Canvas, debug_boxes: bool) {
        if self.alive {
            self.entity.draw_sprite(canvas, false);
            if debug_boxes {
                canvas.stroke_rect(&self.entity.tight_box());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum TextPhase {
    Growing,
    Sliding,
    Dead,
}

/// One announcement: font grows to a cap, then the line slides off the right
/// edge, then it is dead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    content: String,
    pos: Vec2,
    font_px: f32,
    screen_width: f32,
    phase: TextPhase,
}

/// Starting and capped font size, growth and slide rates
const TEXT_START_PX: f32 = 20.0;
const TEXT_MAX_PX: f32 = 72.0;
const TEXT_GROW_RATE: f32 = 60.0;
const TEXT_SLIDE_SPEED: f32 = 300.0;

impl Text {
    pub fn new(content: &str, pos: Vec2, screen_width: f32) -> Self {
        Self {
            content: content.to_string(),
            pos,
            font_px: TEXT_START_PX,
            screen_width,
            phase: TextPhase::Growing,
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self.phase {
            TextPhase::Growing => {
                self.font_px += TEXT_GROW_RATE * dt;
                if self.font_px >= TEXT_MAX_PX {
                    self.font_px = TEXT_MAX_PX;
                    self.phase = TextPhase::Sliding;
                }
            }
            TextPhase::Sliding => {
                self.pos.x += TEXT_SLIDE_SPEED * dt;
                if self.pos.x > self.screen_width {
                    self.phase = TextPhase::Dead;
                }
            }
            TextPhase::Dead => {}
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase != TextPhase::Dead
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let w = canvas.measure_text(&self.content, self.font_px);
        canvas.fill_text(
            &self.content,
            self.pos.x - w / 2.0,
            self.pos.y,
            self.font_px,
            Color::WHITE,
        );
    }
}

/// Plays a list of texts in order, advancing once the current one dies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiText {
    texts: Vec<Text>,
    index: usize,
}

impl MultiText {
    pub fn new(texts: Vec<Text>) -> Self {
        Self { texts, index: 0 }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(current) = self.texts.get_mut(self.index) {
            current.update(dt);
            if !current.is_alive() {
                self.index += 1;
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.index < self.texts.len()
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if let Some(current) = self.texts.get(self.index) {
            current.render(canvas);
        }
    }
}
