//! Game tunables.
//!
//! Every value has a documented default matching the classic 800×600 layout.
//! A TOML file may override any subset of fields; missing fields keep their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Width × height of a sprite in playfield pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: i32,
    pub height: i32,
}

impl SpriteSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Target sizes the sprite images are scaled to at load time.
/// Entity bounds use the same sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: SpriteSize,
    pub laser: SpriteSize,
    pub alien: SpriteSize,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: SpriteSize::new(64, 64),
            laser: SpriteSize::new(16, 32),
            alien: SpriteSize::new(48, 48),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub screen_width: i32,
    /// Playfield height in pixels.
    pub screen_height: i32,
    /// Horizontal pixels per frame while a direction key is held.
    pub player_speed: i32,
    /// Gap between the player's bottom edge and the bottom of the screen.
    pub player_bottom_margin: i32,
    /// Vertical pixels per frame; negative moves up.
    pub bullet_speed: i32,
    /// Inclusive range aliens draw their fall speed from.
    pub alien_speed_min: i32,
    pub alien_speed_max: i32,
    /// Frames between alien spawns.
    pub spawn_interval: u32,
    /// Aliens spawn with x in `[spawn_margin, screen_width - spawn_margin]`.
    pub spawn_margin: i32,
    /// Top edge of a freshly spawned alien (above the visible area).
    pub spawn_y: i32,
    pub starting_lives: u32,
    pub points_per_alien: u32,
    pub target_fps: u32,
    pub sprites: SpriteSizes,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            player_speed: 6,
            player_bottom_margin: 20,
            bullet_speed: -10,
            alien_speed_min: 2,
            alien_speed_max: 5,
            spawn_interval: 40,
            spawn_margin: 50,
            spawn_y: -60,
            starting_lives: 3,
            points_per_alien: 10,
            target_fps: 60,
            sprites: SpriteSizes::default(),
        }
    }
}

impl GameConfig {
    /// Read a TOML file, fill unspecified fields with defaults and validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.alien_speed_min <= 0 || self.alien_speed_min > self.alien_speed_max {
            return Err(ConfigError::Invalid(format!(
                "alien speed range [{}, {}] must be positive and non-empty",
                self.alien_speed_min, self.alien_speed_max
            )));
        }
        if self.spawn_margin < 0 || 2 * self.spawn_margin > self.screen_width {
            return Err(ConfigError::Invalid(format!(
                "spawn margin {} does not fit a {} px wide screen",
                self.spawn_margin, self.screen_width
            )));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::Invalid("spawn interval must be at least 1".into()));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target fps must be at least 1".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting lives must be at least 1".into()));
        }
        let sizes = [self.sprites.player, self.sprites.laser, self.sprites.alien];
        if sizes.iter().any(|s| s.width <= 0 || s.height <= 0) {
            return Err(ConfigError::Invalid("sprite sizes must be positive".into()));
        }
        if self.sprites.player.width > self.screen_width {
            return Err(ConfigError::Invalid("player is wider than the screen".into()));
        }
        Ok(())
    }

    /// Frame budget for one tick at `target_fps`.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.target_fps.max(1)
    }
}
