//! Game entity types — player ship, laser bullets and falling aliens.
//!
//! Each entity carries its bounds and the sprite slot it is drawn with, and
//! moves itself through the shared `Update` trait.  Bullets and aliens ignore
//! the key state; only the player reads it.

use rand::Rng;

use crate::config::{GameConfig, SpriteSize};
use crate::geometry::Rect;
use crate::input::KeyState;

/// Which loaded image an entity is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Laser,
    Alien,
}

/// Result of one `update` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Left the playfield; the owner must drop it this frame.
    Expired,
}

pub trait Update {
    fn update(&mut self, keys: &KeyState) -> Fate;
}

/// Read-only view handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityView {
    pub sprite: SpriteKind,
    pub bounds: Rect,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub bounds: Rect,
    pub speed: i32,
    screen_width: i32,
}

impl Player {
    /// Centred horizontally, `player_bottom_margin` above the bottom edge.
    pub fn new(config: &GameConfig) -> Self {
        let size = config.sprites.player;
        let mut bounds = Rect::new(0, 0, size.width, size.height);
        bounds.set_centerx(config.screen_width / 2);
        bounds.set_bottom(config.screen_height - config.player_bottom_margin);
        Self {
            bounds,
            speed: config.player_speed,
            screen_width: config.screen_width,
        }
    }

    /// Where a freshly fired bullet starts: (centre x, top edge).
    pub fn muzzle(&self) -> (i32, i32) {
        (self.bounds.centerx(), self.bounds.top())
    }
}

impl Update for Player {
    fn update(&mut self, keys: &KeyState) -> Fate {
        // Both directions apply independently, so holding both nets zero
        if keys.left {
            self.bounds.translate(-self.speed, 0);
        }
        if keys.right {
            self.bounds.translate(self.speed, 0);
        }

        if self.bounds.left() < 0 {
            self.bounds.set_left(0);
        }
        if self.bounds.right() > self.screen_width {
            self.bounds.set_right(self.screen_width);
        }
        Fate::Alive
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub bounds: Rect,
    /// Pixels per frame along y (negative = upward).
    pub speed: i32,
}

impl Bullet {
    /// Centre-x at `x`, bottom edge at `y` (the firing entity's top edge).
    pub fn new(size: SpriteSize, x: i32, y: i32, speed: i32) -> Self {
        let mut bounds = Rect::new(0, 0, size.width, size.height);
        bounds.set_centerx(x);
        bounds.set_bottom(y);
        Self { bounds, speed }
    }
}

impl Update for Bullet {
    fn update(&mut self, _keys: &KeyState) -> Fate {
        self.bounds.translate(0, self.speed);
        if self.bounds.bottom() < 0 {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub bounds: Rect,
    /// Downward pixels per frame, fixed at creation.
    pub speed: i32,
    screen_height: i32,
}

impl Alien {
    /// Top-left at (`x`, `y`); fall speed drawn from the configured range.
    pub fn new(config: &GameConfig, x: i32, y: i32, rng: &mut impl Rng) -> Self {
        let speed = rng.gen_range(config.alien_speed_min..=config.alien_speed_max);
        Self::with_speed(config, x, y, speed)
    }

    pub fn with_speed(config: &GameConfig, x: i32, y: i32, speed: i32) -> Self {
        let size = config.sprites.alien;
        Self {
            bounds: Rect::new(x, y, size.width, size.height),
            speed,
            screen_height: config.screen_height,
        }
    }
}

impl Update for Alien {
    fn update(&mut self, _keys: &KeyState) -> Fate {
        self.bounds.translate(0, self.speed);
        if self.bounds.top() > self.screen_height {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}
