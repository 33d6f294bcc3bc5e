//! Sprite images, loaded once at startup.
//!
//! The player, laser and alien images are mandatory; the background is
//! optional and falls back to a solid fill when it cannot be read.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::config::{GameConfig, SpriteSize};
use crate::entities::SpriteKind;

/// Default directory the sprite files are looked up in.
pub const DEFAULT_ASSET_DIR: &str = "assets";

pub const PLAYER_FILE: &str = "player.png";
pub const LASER_FILE: &str = "laser.png";
pub const ALIEN_FILE: &str = "alien.png";
pub const BACKGROUND_FILE: &str = "background.png";

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// A mandatory sprite is missing or unreadable
    #[error("failed to load {name} sprite from {}: {source}", path.display())]
    ResourceLoad {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// RGBA pixels scaled to the size the sprite is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA.
    pub pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Load an image and resize it to exactly `size`.
    pub fn from_file<P: AsRef<Path>>(path: P, size: SpriteSize) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        log::debug!("Loading sprite from: {:?}", path);

        let img = image::open(path)?;
        let (width, height) = (size.width.max(1) as u32, size.height.max(1) as u32);
        let rgba = img.resize_exact(width, height, FilterType::Nearest).to_rgba8();

        log::info!("Loaded sprite {}x{} from {:?}", width, height, path);
        Ok(Self {
            width,
            height,
            pixels: rgba.pixels().map(|p| p.0).collect(),
        })
    }

    /// A single-colour sprite, used in tests and as a stand-in image.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the sprite.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    pub player: Sprite,
    pub laser: Sprite,
    pub alien: Sprite,
    /// `None` means "fill with a solid colour".
    pub background: Option<Sprite>,
}

impl AssetStore {
    /// Load all four sprites from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P, config: &GameConfig) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let sizes = &config.sprites;

        let player = load_required(dir, "player", PLAYER_FILE, sizes.player)?;
        let laser = load_required(dir, "laser", LASER_FILE, sizes.laser)?;
        let alien = load_required(dir, "alien", ALIEN_FILE, sizes.alien)?;

        let screen = SpriteSize::new(config.screen_width, config.screen_height);
        let background = match Sprite::from_file(dir.join(BACKGROUND_FILE), screen) {
            Ok(sprite) => Some(sprite),
            Err(e) => {
                log::warn!("Background unavailable ({e}), using solid fill");
                None
            }
        };

        Ok(Self { player, laser, alien, background })
    }

    pub fn from_sprites(player: Sprite, laser: Sprite, alien: Sprite, background: Option<Sprite>) -> Self {
        Self { player, laser, alien, background }
    }

    pub fn sprite(&self, kind: SpriteKind) -> &Sprite {
        match kind {
            SpriteKind::Player => &self.player,
            SpriteKind::Laser => &self.laser,
            SpriteKind::Alien => &self.alien,
        }
    }
}

fn load_required(
    dir: &Path,
    name: &'static str,
    file: &str,
    size: SpriteSize,
) -> Result<Sprite, AssetError> {
    let path = dir.join(file);
    Sprite::from_file(&path, size).map_err(|source| AssetError::ResourceLoad { name, path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, file: &str, w: u32, h: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(w, h, Rgba(color)).save(dir.join(file)).unwrap();
    }

    fn write_required(dir: &Path) {
        write_png(dir, PLAYER_FILE, 8, 8, [255, 255, 255, 255]);
        write_png(dir, LASER_FILE, 2, 4, [0, 255, 255, 255]);
        write_png(dir, ALIEN_FILE, 6, 6, [0, 255, 0, 255]);
    }

    #[test]
    fn loads_and_scales_to_target_sizes() {
        let dir = TempDir::new().unwrap();
        write_required(dir.path());
        write_png(dir.path(), BACKGROUND_FILE, 10, 10, [0, 0, 40, 255]);

        let config = GameConfig::default();
        let assets = AssetStore::load(dir.path(), &config).unwrap();

        assert_eq!((assets.player.width, assets.player.height), (64, 64));
        assert_eq!((assets.laser.width, assets.laser.height), (16, 32));
        assert_eq!((assets.alien.width, assets.alien.height), (48, 48));
        let bg = assets.background.expect("background present");
        assert_eq!((bg.width, bg.height), (800, 600));
        assert_eq!(assets.alien.pixel(47, 47), Some([0, 255, 0, 255]));
    }

    #[test]
    fn missing_background_falls_back_to_none() {
        let dir = TempDir::new().unwrap();
        write_required(dir.path());

        let assets = AssetStore::load(dir.path(), &GameConfig::default()).unwrap();
        assert!(assets.background.is_none());
    }

    #[test]
    fn unreadable_background_falls_back_to_none() {
        let dir = TempDir::new().unwrap();
        write_required(dir.path());
        std::fs::write(dir.path().join(BACKGROUND_FILE), b"not a png").unwrap();

        let assets = AssetStore::load(dir.path(), &GameConfig::default()).unwrap();
        assert!(assets.background.is_none());
    }

    #[test]
    fn missing_alien_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), PLAYER_FILE, 8, 8, [255, 255, 255, 255]);
        write_png(dir.path(), LASER_FILE, 2, 4, [0, 255, 255, 255]);

        let err = AssetStore::load(dir.path(), &GameConfig::default()).unwrap_err();
        let AssetError::ResourceLoad { name, path, .. } = err;
        assert_eq!(name, "alien");
        assert!(path.ends_with(ALIEN_FILE));
    }

    #[test]
    fn pixel_outside_sprite_is_none() {
        let s = Sprite::solid(2, 2, [1, 2, 3, 4]);
        assert_eq!(s.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(s.pixel(2, 0), None);
    }
}
