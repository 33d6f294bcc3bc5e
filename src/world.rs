//! The live game world and its per-frame update-and-collision pipeline.
//!
//! All mutation happens inside `World::step` and `World::fire`; renderers only
//! read the world between frames through `World::entities`.  Randomness is
//! injected by the caller so a seeded RNG replays a session exactly.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Alien, Bullet, EntityView, Fate, Player, SpriteKind, Update};
use crate::input::KeyState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Lives ran out; the world no longer advances.
    Finished,
}

/// What happened during one `step`, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: bool,
    /// Aliens destroyed by bullets this frame.
    pub aliens_shot: u32,
    /// Aliens that hit the player this frame.
    pub player_hits: u32,
    pub bullets_expired: u32,
    pub aliens_expired: u32,
}

#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    pub player: Player,
    /// In firing order.
    pub bullets: Vec<Bullet>,
    /// In spawn order.
    pub aliens: Vec<Alien>,
    pub score: u32,
    pub lives: u32,
    /// Frames since the last spawn.
    pub spawn_timer: u32,
    pub frame: u64,
    pub status: GameStatus,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let player = Player::new(&config);
        let lives = config.starting_lives;
        Self {
            config,
            player,
            bullets: Vec::new(),
            aliens: Vec::new(),
            score: 0,
            lives,
            spawn_timer: 0,
            frame: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Fire a bullet from the player's top-centre.
    pub fn fire(&mut self) {
        let (x, y) = self.player.muzzle();
        self.bullets.push(Bullet::new(
            self.config.sprites.laser,
            x,
            y,
            self.config.bullet_speed,
        ));
        log::debug!("bullet fired at x={x} y={y}");
    }

    /// Every live entity: player first, then bullets, then aliens.
    pub fn entities(&self) -> impl Iterator<Item = EntityView> + '_ {
        let player = std::iter::once(EntityView {
            sprite: SpriteKind::Player,
            bounds: self.player.bounds,
        });
        let bullets = self.bullets.iter().map(|b| EntityView {
            sprite: SpriteKind::Laser,
            bounds: b.bounds,
        });
        let aliens = self.aliens.iter().map(|a| EntityView {
            sprite: SpriteKind::Alien,
            bounds: a.bounds,
        });
        player.chain(bullets).chain(aliens)
    }

    /// Advance the simulation by one frame.  Never fails; a finished world is
    /// left untouched.
    pub fn step(&mut self, keys: &KeyState, rng: &mut impl Rng) -> FrameReport {
        let mut report = FrameReport::default();
        if self.is_finished() {
            return report;
        }
        self.frame += 1;

        // ── 1. Spawn a new alien on the interval ─────────────────────────────
        self.spawn_timer += 1;
        if self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer = 0;
            let margin = self.config.spawn_margin;
            let x = rng.gen_range(margin..=self.config.screen_width - margin);
            let alien = Alien::new(&self.config, x, self.config.spawn_y, rng);
            log::debug!(
                "frame {}: alien spawned at x={} speed={}",
                self.frame,
                x,
                alien.speed
            );
            self.aliens.push(alien);
            report.spawned = true;
        }

        // ── 2. Move everything, dropping whatever left the screen ────────────
        self.player.update(keys);

        let before = self.bullets.len();
        self.bullets.retain_mut(|b| b.update(keys) == Fate::Alive);
        report.bullets_expired = (before - self.bullets.len()) as u32;

        let before = self.aliens.len();
        self.aliens.retain_mut(|a| a.update(keys) == Fate::Alive);
        report.aliens_expired = (before - self.aliens.len()) as u32;

        // ── 3. Collision: bullets ↔ aliens ───────────────────────────────────
        // Each bullet takes out at most the first live alien it touches.
        let mut killed_aliens = vec![false; self.aliens.len()];
        let mut used_bullets = vec![false; self.bullets.len()];

        for (bi, bullet) in self.bullets.iter().enumerate() {
            let hit = self
                .aliens
                .iter()
                .enumerate()
                .find(|(ai, alien)| !killed_aliens[*ai] && bullet.bounds.intersects(&alien.bounds));
            if let Some((ai, _)) = hit {
                killed_aliens[ai] = true;
                used_bullets[bi] = true;
                report.aliens_shot += 1;
            }
        }

        if report.aliens_shot > 0 {
            let mut killed = killed_aliens.iter();
            self.aliens.retain(|_| !killed.next().copied().unwrap_or(false));
            let mut used = used_bullets.iter();
            self.bullets.retain(|_| !used.next().copied().unwrap_or(false));

            self.score += report.aliens_shot * self.config.points_per_alien;
            log::info!(
                "frame {}: {} alien(s) shot, score {}",
                self.frame,
                report.aliens_shot,
                self.score
            );
        }

        // ── 4. Collision: aliens ↔ player ────────────────────────────────────
        let player_bounds = self.player.bounds;
        let before = self.aliens.len();
        self.aliens.retain(|a| !a.bounds.intersects(&player_bounds));
        report.player_hits = (before - self.aliens.len()) as u32;

        if report.player_hits > 0 {
            self.lives = self.lives.saturating_sub(report.player_hits);
            log::info!(
                "frame {}: player hit {} time(s), {} lives left",
                self.frame,
                report.player_hits,
                self.lives
            );
            if self.lives == 0 {
                self.status = GameStatus::Finished;
                log::info!("frame {}: out of lives, final score {}", self.frame, self.score);
            }
        }

        report
    }
}
