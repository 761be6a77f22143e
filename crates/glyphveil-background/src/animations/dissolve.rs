//! Tile dissolve played over the hero card when the pointer leaves it.
//!
//! A 4x4 grid of light and dark tiles fades in one tile at a time in random
//! order, holds, then fades out together. The timeline is a pure function
//! of the milliseconds elapsed since [`Dissolve::trigger`].

use rand::{Rng, seq::SliceRandom, seq::index};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::chars::TILE_CHAR;
use crate::color::blend;

/// Tiles per side.
pub const GRID_SIZE: usize = 4;
/// Tiles left out of each run.
pub const CLEARED_TILES: usize = 3;
/// Fade-in duration of a single tile.
pub const FADE_IN_MS: f32 = 450.0;
/// Pause between the last tile finishing its fade-in and the fade-out.
pub const HOLD_MS: f32 = 450.0;
/// Fade-out duration, shared by all tiles.
pub const FADE_OUT_MS: f32 = 300.0;

const LIGHT_TILE: (u8, u8, u8) = (255, 255, 255);
const DARK_TILE: (u8, u8, u8) = (39, 39, 42);

/// One tile of the dissolve grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub light: bool,
    /// Opacity reached at the end of the fade-in.
    pub target_opacity: f32,
    /// Delay before this tile starts fading in.
    pub delay_ms: f32,
}

impl Tile {
    /// `0.5` at the bottom-left corner up to `1.0` at the top-right.
    fn target_for(row: usize, col: usize) -> f32 {
        let span = ((GRID_SIZE - 1) * 2) as f32;
        let normalized = (col + (GRID_SIZE - 1 - row)) as f32 / span;
        0.5 + normalized * 0.5
    }
}

/// Dissolve animation state.
#[derive(Debug, Clone, Default)]
pub struct Dissolve {
    tiles: Vec<Tile>,
    started_ms: Option<u64>,
}

impl Dissolve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the animation at `now_ms` with a fresh grid.
    pub fn trigger<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        let total = GRID_SIZE * GRID_SIZE;
        let cleared = index::sample(rng, total, CLEARED_TILES);

        let mut tiles: Vec<Tile> = (0..total)
            .filter(|i| !cleared.iter().any(|c| c == *i))
            .map(|i| {
                let (row, col) = (i / GRID_SIZE, i % GRID_SIZE);
                Tile {
                    row,
                    col,
                    light: rng.gen_bool(0.5),
                    target_opacity: Tile::target_for(row, col),
                    delay_ms: 0.0,
                }
            })
            .collect();

        // Stagger the fade-in over random slots.
        let stagger = FADE_IN_MS / tiles.len() as f32;
        let mut slots: Vec<usize> = (0..tiles.len()).collect();
        slots.shuffle(rng);
        for (tile, slot) in tiles.iter_mut().zip(slots) {
            tile.delay_ms = slot as f32 * stagger;
        }

        tracing::debug!(tiles = tiles.len(), now_ms, "dissolve triggered");
        self.tiles = tiles;
        self.started_ms = Some(now_ms);
    }

    #[cfg(test)]
    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// When the shared fade-out starts, relative to the trigger.
    fn fade_out_start(&self) -> f32 {
        let last_fade_in_end = self
            .tiles
            .iter()
            .map(|t| t.delay_ms + FADE_IN_MS)
            .fold(0.0, f32::max);
        last_fade_in_end + HOLD_MS
    }

    /// Total length of the timeline in milliseconds.
    pub fn duration_ms(&self) -> f32 {
        self.fade_out_start() + FADE_OUT_MS
    }

    /// Whether the animation is visible at `now_ms`.
    pub fn is_active(&self, now_ms: u64) -> bool {
        match self.started_ms {
            Some(start) => now_ms >= start && ((now_ms - start) as f32) < self.duration_ms(),
            None => false,
        }
    }

    /// Opacity of `tile` at `now_ms`.
    pub fn tile_opacity(&self, tile: &Tile, now_ms: u64) -> f32 {
        let Some(start) = self.started_ms else {
            return 0.0;
        };
        if now_ms < start {
            return 0.0;
        }
        let t = (now_ms - start) as f32;
        let fade_out_start = self.fade_out_start();

        if t < tile.delay_ms {
            0.0
        } else if t < tile.delay_ms + FADE_IN_MS {
            tile.target_opacity * ease_in((t - tile.delay_ms) / FADE_IN_MS)
        } else if t < fade_out_start {
            tile.target_opacity
        } else if t < fade_out_start + FADE_OUT_MS {
            tile.target_opacity * (1.0 - ease_out((t - fade_out_start) / FADE_OUT_MS))
        } else {
            0.0
        }
    }

    /// Paint the tiles over `area`, blended against `background`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, now_ms: u64, background: (u8, u8, u8)) {
        if !self.is_active(now_ms) || area.is_empty() {
            return;
        }
        let grid = GRID_SIZE as u32;
        for tile in &self.tiles {
            let opacity = self.tile_opacity(tile, now_ms);
            if opacity <= 0.0 {
                continue;
            }
            let color = blend(
                if tile.light { LIGHT_TILE } else { DARK_TILE },
                background,
                opacity,
            );
            let (row, col) = (tile.row as u32, tile.col as u32);
            let (width, height) = (u32::from(area.width), u32::from(area.height));
            // Each fraction is at most the extent, so it fits back into u16.
            let x0 = area.x + (col * width / grid) as u16;
            let x1 = area.x + ((col + 1) * width / grid) as u16;
            let y0 = area.y + (row * height / grid) as u16;
            let y1 = area.y + ((row + 1) * height / grid) as u16;
            for y in y0..y1 {
                for x in x0..x1 {
                    if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                        cell.set_char(TILE_CHAR).set_fg(color);
                    }
                }
            }
        }
    }
}

fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn triggered(at: u64) -> Dissolve {
        let mut rng = StdRng::seed_from_u64(5);
        let mut dissolve = Dissolve::new();
        dissolve.trigger(at, &mut rng);
        dissolve
    }

    #[test]
    fn test_idle_until_triggered() {
        let dissolve = Dissolve::new();
        assert!(!dissolve.is_active(0));
        assert!(dissolve.tiles().is_empty());
    }

    #[test]
    fn test_grid_leaves_three_tiles_out() {
        let dissolve = triggered(0);
        assert_eq!(dissolve.tiles().len(), 13);
        let cells: HashSet<_> = dissolve.tiles().iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(cells.len(), 13);
    }

    #[test]
    fn test_target_opacity_gradient() {
        assert_eq!(Tile::target_for(3, 0), 0.5);
        assert_eq!(Tile::target_for(0, 3), 1.0);
        let dissolve = triggered(0);
        for tile in dissolve.tiles() {
            assert!((0.5..=1.0).contains(&tile.target_opacity));
        }
    }

    #[test]
    fn test_stagger_slots_are_distinct() {
        let dissolve = triggered(0);
        let mut delays: Vec<f32> = dissolve.tiles().iter().map(|t| t.delay_ms).collect();
        delays.sort_by(f32::total_cmp);
        let stagger = FADE_IN_MS / 13.0;
        for (i, d) in delays.iter().enumerate() {
            assert!((d - i as f32 * stagger).abs() < 1e-3);
        }
    }

    #[test]
    fn test_timeline() {
        let dissolve = triggered(1_000);
        let end = dissolve.duration_ms();
        let expected = 12.0 * FADE_IN_MS / 13.0 + FADE_IN_MS + HOLD_MS + FADE_OUT_MS;
        assert!((end - expected).abs() < 1e-2);

        let tile = &dissolve.tiles()[0];
        assert_eq!(dissolve.tile_opacity(tile, 999), 0.0);

        let held = 1_000 + dissolve.fade_out_start() as u64 - 1;
        assert_eq!(dissolve.tile_opacity(tile, held), tile.target_opacity);

        assert!(dissolve.is_active(1_000));
        assert!(!dissolve.is_active(1_000 + end as u64 + 1));
        assert_eq!(dissolve.tile_opacity(tile, 1_000 + end as u64 + 1), 0.0);
    }

    #[test]
    fn test_fade_in_is_monotonic() {
        let dissolve = triggered(0);
        let tile = &dissolve.tiles()[0];
        let start = tile.delay_ms as u64 + 1;
        let mut last = 0.0;
        for t in start..start + FADE_IN_MS as u64 {
            let o = dissolve.tile_opacity(tile, t);
            assert!(o >= last);
            last = o;
        }
    }

    #[test]
    fn test_render_paints_inside_area_only() {
        let dissolve = triggered(0);
        let area = Rect::new(2, 1, 8, 8);
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 10));
        let held = dissolve.fade_out_start() as u64 - 1;
        dissolve.render(area, &mut buf, held, (9, 9, 11));
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(11, 9)].symbol(), " ");
        let painted = (1..9)
            .flat_map(|y| (2..10).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() == "█")
            .count();
        assert_eq!(painted, 13 * 4);
    }

    #[test]
    fn test_render_wide_area() {
        let dissolve = triggered(0);
        let area = Rect::new(0, 0, 20_000, 3);
        let mut buf = Buffer::empty(area);
        let held = dissolve.fade_out_start() as u64 - 1;
        dissolve.render(area, &mut buf, held, (9, 9, 11));
        // With three rows the top tile row is zero cells tall.
        let expected = dissolve.tiles().iter().filter(|t| t.row > 0).count() * 5_000;
        let painted = buf.content().iter().filter(|c| c.symbol() == "█").count();
        assert_eq!(painted, expected);
        let right_edge = dissolve.tiles().iter().any(|t| t.col == 3 && t.row > 0);
        let last_column = buf.content().iter().skip(19_999).step_by(20_000);
        assert_eq!(last_column.filter(|c| c.symbol() == "█").count() > 0, right_edge);
    }

    #[test]
    fn test_retrigger_restarts() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut dissolve = Dissolve::new();
        dissolve.trigger(0, &mut rng);
        dissolve.trigger(10_000, &mut rng);
        assert!(dissolve.is_active(10_000));
        assert!(!dissolve.is_active(9_999));
    }
}
