//! Seeded mosaic tiling for landing and loading backgrounds
//!
//! Cells are scanned in row-major order. Each free cell opens a block whose
//! size is picked from one PRNG draw, shrunk to 1 wherever it would leave
//! the grid or run into an already placed block, then coloured and timed
//! from further draws. The full tile list is a pure function of
//! `(cols, rows, seed, style)`.

mod occupancy;
mod style;

pub use occupancy::Occupancy;
pub use style::{AnimRange, BlockCutoffs, ColorRange, CornerRadius, GridPreset, GridStyle};

use crate::error::{MosaicError, Result};
use crate::random::SeededRng;
use serde::{Deserialize, Serialize};

/// Per-unit-distance stagger of the exit animation
pub const EXIT_STAGGER: f64 = 0.03;

/// One placed block of the mosaic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTileSpec {
    /// `"{x}-{y}"` of the top-left cell
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub corner_radius: f64,
    /// Degrees in [0, 360)
    pub hue: u32,
    /// Percent
    pub sat: f64,
    /// Percent
    pub light: f64,
    /// Seconds
    pub anim_delay: f64,
    /// Seconds
    pub anim_duration: f64,
}

impl GridTileSpec {
    pub fn css_hsl(&self) -> String {
        format!("hsl({}, {:.1}%, {:.1}%)", self.hue, self.sat, self.light)
    }

    /// Every `(col, row)` this tile covers
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.h).flat_map(move |r| (self.x..self.x + self.w).map(move |c| (c, r)))
    }

    pub fn area(&self) -> u32 {
        self.w * self.h
    }
}

/// A complete tiling of a `cols × rows` grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub seed: u32,
    pub tiles: Vec<GridTileSpec>,
}

impl GridLayout {
    /// Exit-animation delay per tile, growing with distance from the grid centre
    pub fn exit_delays(&self) -> Vec<f64> {
        let cx = (f64::from(self.cols) - 1.0) / 2.0;
        let cy = (f64::from(self.rows) - 1.0) / 2.0;
        self.tiles
            .iter()
            .map(|t| {
                let dx = f64::from(t.x) - cx;
                let dy = f64::from(t.y) - cy;
                (dx * dx + dy * dy).sqrt() * EXIT_STAGGER
            })
            .collect()
    }
}

/// Grid tiler bound to a visual style
#[derive(Debug, Clone, Default)]
pub struct MosaicGrid {
    style: GridStyle,
}

impl MosaicGrid {
    pub fn new(style: GridStyle) -> Self {
        Self { style }
    }

    pub fn from_preset(preset: GridPreset) -> Self {
        Self::new(preset.style())
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    /// Tile a `cols × rows` grid from `seed`
    pub fn layout(&self, cols: u32, rows: u32, seed: u32) -> Result<GridLayout> {
        MosaicError::check_dimension("cols", f64::from(cols))?;
        MosaicError::check_dimension("rows", f64::from(rows))?;

        let style = &self.style;
        let mut rng = SeededRng::new(seed);
        let mut used = Occupancy::new(cols, rows);
        let mut tiles = Vec::new();

        for r in 0..rows {
            for c in 0..cols {
                if used.is_set(c, r) {
                    continue;
                }

                let (mut w, mut h) = style.cutoffs.block_size(rng.next_f64());

                if c + w > cols {
                    w = 1;
                }
                if r + h > rows {
                    h = 1;
                }
                // A tall block from the row above may already own the cell to the right
                if w == 2 && used.is_set(c + 1, r) {
                    w = 1;
                }

                used.mark_block(c, r, w, h);

                let hue = (rng.next_f64() * 360.0).floor() as u32;
                let sat = style.saturation.sample(&mut rng);
                let light = style.lightness.sample(&mut rng);
                let corner_radius = style.corner_radius.sample(&mut rng);
                let anim_delay = style.delay.sample(&mut rng);
                let anim_duration = style.duration.sample(&mut rng);

                tiles.push(GridTileSpec {
                    id: format!("{}-{}", c, r),
                    x: c,
                    y: r,
                    w,
                    h,
                    corner_radius,
                    hue,
                    sat,
                    light,
                    anim_delay,
                    anim_duration,
                });
            }
        }

        tracing::debug!(cols, rows, seed, tiles = tiles.len(), "mosaic grid laid out");

        Ok(GridLayout {
            cols,
            rows,
            seed,
            tiles,
        })
    }
}

/// Tile a grid with the default style
pub fn layout(cols: u32, rows: u32, seed: u32) -> Result<GridLayout> {
    MosaicGrid::default().layout(cols, rows, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(layout: &GridLayout) -> Vec<u32> {
        let mut hits = vec![0u32; (layout.cols * layout.rows) as usize];
        for tile in &layout.tiles {
            assert!(tile.x + tile.w <= layout.cols, "tile {} overflows columns", tile.id);
            assert!(tile.y + tile.h <= layout.rows, "tile {} overflows rows", tile.id);
            for (c, r) in tile.cells() {
                hits[(r * layout.cols + c) as usize] += 1;
            }
        }
        hits
    }

    #[test]
    fn test_seed_2026_covers_14_by_9() {
        let grid = layout(14, 9, 2026).unwrap();
        let hits = coverage(&grid);
        assert_eq!(hits.len(), 126);
        assert!(hits.iter().all(|&h| h == 1));
        let area: u32 = grid.tiles.iter().map(GridTileSpec::area).sum();
        assert_eq!(area, 126);
    }

    #[test]
    fn test_same_seed_identical_layout() {
        let a = layout(14, 9, 2026).unwrap();
        let b = layout(14, 9, 2026).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_changes_layout() {
        let a = layout(14, 9, 2026).unwrap();
        let b = layout(14, 9, 2027).unwrap();
        assert_ne!(a.tiles, b.tiles);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            layout(0, 9, 1),
            Err(MosaicError::InvalidDimensions { what: "cols", .. })
        ));
        assert!(matches!(
            layout(9, 0, 1),
            Err(MosaicError::InvalidDimensions { what: "rows", .. })
        ));
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = layout(1, 1, 7).unwrap();
        assert_eq!(grid.tiles.len(), 1);
        assert_eq!((grid.tiles[0].w, grid.tiles[0].h), (1, 1));
    }

    #[test]
    fn test_single_row_has_no_tall_blocks() {
        let grid = layout(40, 1, 99).unwrap();
        assert!(grid.tiles.iter().all(|t| t.h == 1));
        assert!(coverage(&grid).iter().all(|&h| h == 1));
    }

    #[test]
    fn test_visual_ranges_default_style() {
        let grid = layout(20, 20, 5).unwrap();
        for t in &grid.tiles {
            assert!(t.hue < 360);
            assert!((45.0..=85.0).contains(&t.sat));
            assert!((28.0..=62.0).contains(&t.light));
            assert!((0.0..0.8).contains(&t.anim_delay));
            assert!((1.8..3.6).contains(&t.anim_duration));
        }
    }

    #[test]
    fn test_loading_preset_ranges() {
        let grid = MosaicGrid::from_preset(GridPreset::Loading)
            .layout(14, 9, 31)
            .unwrap();
        for t in &grid.tiles {
            assert!((26.0..=64.0).contains(&t.light));
        }
        assert!(coverage(&grid).iter().all(|&h| h == 1));
    }

    #[test]
    fn test_start_screen_corner_radius() {
        let grid = MosaicGrid::from_preset(GridPreset::StartScreen)
            .layout(14, 9, 2026)
            .unwrap();
        for t in &grid.tiles {
            assert!((10.0..22.0).contains(&t.corner_radius));
            assert_eq!(t.corner_radius.fract(), 0.0);
        }
    }

    #[test]
    fn test_ids_match_origin() {
        let grid = layout(6, 4, 3).unwrap();
        for t in &grid.tiles {
            assert_eq!(t.id, format!("{}-{}", t.x, t.y));
        }
    }

    #[test]
    fn test_exit_delays_grow_from_centre() {
        let grid = layout(3, 3, 11).unwrap();
        let delays = grid.exit_delays();
        assert_eq!(delays.len(), grid.tiles.len());
        // The top-left tile always starts at (0, 0), distance sqrt(2) from centre
        assert!((delays[0] - 2f64.sqrt() * EXIT_STAGGER).abs() < 1e-12);
    }

    #[test]
    fn test_css_hsl() {
        let tile = GridTileSpec {
            id: "0-0".to_string(),
            x: 0,
            y: 0,
            w: 1,
            h: 1,
            corner_radius: 14.0,
            hue: 210,
            sat: 60.0,
            light: 40.0,
            anim_delay: 0.0,
            anim_duration: 2.0,
        };
        assert_eq!(tile.css_hsl(), "hsl(210, 60.0%, 40.0%)");
    }
}
