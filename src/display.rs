//! Rendering layer — all terminal output lives here.
//!
//! The 800×600 playfield is scaled onto whatever terminal size is current.
//! Each character cell shows two vertically stacked pixels using the upper
//! half-block glyph: foreground = upper pixel, background = lower pixel.
//! No game logic is performed; this module only translates world state into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::assets::{AssetStore, Sprite};
use crate::entities::EntityView;
use crate::world::World;

// ── Colour palette ────────────────────────────────────────────────────────────

/// Fill used when no background image is loaded.
pub const BACKGROUND_FILL: [u8; 3] = [0, 0, 0];
const C_HUD: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_TEXT: Color = Color::White;

const HALF_BLOCK: char = '▀';

// ── Frame buffer ──────────────────────────────────────────────────────────────

/// A `cols × rows*2` grid of opaque pixels ready to be written as cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub cols: u16,
    pub rows: u16,
    pixels: Vec<[u8; 3]>,
}

impl Frame {
    fn filled(cols: u16, rows: u16, color: [u8; 3]) -> Self {
        Self {
            cols,
            rows,
            pixels: vec![color; cols as usize * rows as usize * 2],
        }
    }

    /// Pixel rows are twice the character rows.
    pub fn pixel(&self, px: u16, py: u16) -> [u8; 3] {
        self.pixels[py as usize * self.cols as usize + px as usize]
    }

    fn set(&mut self, px: u16, py: u16, color: [u8; 3]) {
        let idx = py as usize * self.cols as usize + px as usize;
        self.pixels[idx] = color;
    }
}

/// Maps playfield pixels to frame pixels.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    scale_x: f32,
    scale_y: f32,
    cols: u16,
    pixel_rows: u16,
}

impl Viewport {
    fn new(world_w: i32, world_h: i32, cols: u16, rows: u16) -> Self {
        let pixel_rows = rows.saturating_mul(2);
        Self {
            scale_x: world_w.max(1) as f32 / cols.max(1) as f32,
            scale_y: world_h.max(1) as f32 / pixel_rows.max(1) as f32,
            cols,
            pixel_rows,
        }
    }

    /// Playfield coordinate at the centre of frame pixel `(px, py)`.
    fn world_at(&self, px: u16, py: u16) -> (f32, f32) {
        ((px as f32 + 0.5) * self.scale_x, (py as f32 + 0.5) * self.scale_y)
    }
}

/// Rasterise background and entities (later entities on top).
pub fn rasterize<I>(assets: &AssetStore, world_w: i32, world_h: i32, entities: I, cols: u16, rows: u16) -> Frame
where
    I: IntoIterator<Item = EntityView>,
{
    let view = Viewport::new(world_w, world_h, cols, rows);
    let mut frame = Frame::filled(cols, rows, BACKGROUND_FILL);

    if let Some(bg) = &assets.background {
        for py in 0..view.pixel_rows {
            for px in 0..view.cols {
                let (wx, wy) = view.world_at(px, py);
                if let Some(p) = bg.pixel(wx as u32, wy as u32) {
                    frame.set(px, py, [p[0], p[1], p[2]]);
                }
            }
        }
    }

    for entity in entities {
        draw_sprite(&mut frame, &view, assets.sprite(entity.sprite), &entity);
    }
    frame
}

/// Paint every frame pixel the entity's bounds touch.  Samples are clamped
/// into the bounds so sprites narrower than a cell still show up.
fn draw_sprite(frame: &mut Frame, view: &Viewport, sprite: &Sprite, entity: &EntityView) {
    let b = entity.bounds;
    if b.width <= 0 || b.height <= 0 {
        return;
    }
    let (left, right) = (b.left() as f32, b.right() as f32);
    let (top, bottom) = (b.top() as f32, b.bottom() as f32);

    let px0 = (left / view.scale_x).floor().max(0.0) as i64;
    let px1 = ((right / view.scale_x).ceil() as i64).min(view.cols as i64);
    let py0 = (top / view.scale_y).floor().max(0.0) as i64;
    let py1 = ((bottom / view.scale_y).ceil() as i64).min(view.pixel_rows as i64);

    for py in py0..py1 {
        for px in px0..px1 {
            let (wx, wy) = view.world_at(px as u16, py as u16);
            let wx = wx.clamp(left, right - 1.0);
            let wy = wy.clamp(top, bottom - 1.0);
            let sx = ((wx - left) * sprite.width as f32 / b.width as f32) as u32;
            let sy = ((wy - top) * sprite.height as f32 / b.height as f32) as u32;
            if let Some(p) = sprite.pixel(sx, sy) {
                if p[3] > 0 {
                    frame.set(px as u16, py as u16, [p[0], p[1], p[2]]);
                }
            }
        }
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb { r: c[0], g: c[1], b: c[2] }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives: {}", lives)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame sized to a `cols × rows` terminal.
pub fn render<W: Write>(out: &mut W, assets: &AssetStore, world: &World, cols: u16, rows: u16) -> std::io::Result<()> {
    let config = world.config();
    let frame = rasterize(
        assets,
        config.screen_width,
        config.screen_height,
        world.entities(),
        cols,
        rows,
    );

    write_frame(out, &frame)?;
    draw_hud(out, world, cols)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn write_frame<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let mut last: Option<([u8; 3], [u8; 3])> = None;
    for row in 0..frame.rows {
        out.queue(cursor::MoveTo(0, row))?;
        for col in 0..frame.cols {
            let upper = frame.pixel(col, row * 2);
            let lower = frame.pixel(col, row * 2 + 1);
            // Only emit colour changes
            if last != Some((upper, lower)) {
                out.queue(style::SetForegroundColor(rgb(upper)))?;
                out.queue(style::SetBackgroundColor(rgb(lower)))?;
                last = Some((upper, lower));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, cols: u16) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(rgb(BACKGROUND_FILL)))?;
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(score_text(world.score)))?;

    // Lives — right
    let lives = lives_text(world.lives);
    let x = cols.saturating_sub(lives.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(Print(&lives))?;

    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

pub fn render_game_over<W: Write>(out: &mut W, score: u32, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(rgb(BACKGROUND_FILL)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let score_line = format!("Final Score: {}", score);
    let lines: &[(&str, Color, i32)] = &[
        ("GAME OVER", C_GAME_OVER, -2),
        (&score_line, C_TEXT, 0),
        ("Press any key to quit", C_TEXT, 2),
    ];

    let cx = cols / 2;
    let cy = (rows / 2) as i32;
    for (msg, color, dy) in lines {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        let row = (cy + dy).clamp(0, rows.saturating_sub(1) as i32) as u16;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
