// Visual parameters of the mosaic grid and the built-in presets

use crate::random::SeededRng;
use serde::{Deserialize, Serialize};

/// PRNG cutoffs choosing the block size of a free cell
///
/// A draw above `big` opens a 2×2 block, above `wide` a 2×1, above `tall`
/// a 1×2; anything else is 1×1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockCutoffs {
    pub tall: f64,
    pub wide: f64,
    pub big: f64,
}

impl Default for BlockCutoffs {
    fn default() -> Self {
        Self {
            tall: 0.58,
            wide: 0.72,
            big: 0.86,
        }
    }
}

impl BlockCutoffs {
    /// `(w, h)` for one draw
    pub fn block_size(&self, pick: f64) -> (u32, u32) {
        if pick > self.big {
            (2, 2)
        } else if pick > self.wide {
            (2, 1)
        } else if pick > self.tall {
            (1, 2)
        } else {
            (1, 1)
        }
    }
}

/// `clamp(base + rand * span, min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub base: f64,
    pub span: f64,
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    pub fn sample(&self, rng: &mut SeededRng) -> f64 {
        rng.next_in(self.base, self.span).clamp(self.min, self.max)
    }
}

/// `base + rand * span`, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimRange {
    pub base: f64,
    pub span: f64,
}

impl AnimRange {
    pub fn sample(&self, rng: &mut SeededRng) -> f64 {
        rng.next_in(self.base, self.span)
    }
}

/// Tile corner rounding in pixels
///
/// A fixed radius consumes no PRNG draw; a random one draws once, after the
/// colour values and before the animation values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CornerRadius {
    Fixed { px: f64 },
    Random { base: f64, span: f64 },
}

impl CornerRadius {
    pub fn sample(&self, rng: &mut SeededRng) -> f64 {
        match *self {
            CornerRadius::Fixed { px } => px,
            CornerRadius::Random { base, span } => (rng.next_f64() * span).floor() + base,
        }
    }
}

/// Everything about a grid except its dimensions and seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub cutoffs: BlockCutoffs,
    pub saturation: ColorRange,
    pub lightness: ColorRange,
    pub corner_radius: CornerRadius,
    pub delay: AnimRange,
    pub duration: AnimRange,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cutoffs: BlockCutoffs::default(),
            saturation: ColorRange {
                base: 55.0,
                span: 30.0,
                min: 45.0,
                max: 85.0,
            },
            lightness: ColorRange {
                base: 35.0,
                span: 25.0,
                min: 28.0,
                max: 62.0,
            },
            corner_radius: CornerRadius::Fixed { px: 14.0 },
            delay: AnimRange {
                base: 0.0,
                span: 0.8,
            },
            duration: AnimRange {
                base: 1.8,
                span: 1.8,
            },
        }
    }
}

impl GridStyle {
    /// Landing page background: slow drift, 12px corners
    pub fn landing() -> Self {
        Self {
            corner_radius: CornerRadius::Fixed { px: 12.0 },
            duration: AnimRange {
                base: 2.6,
                span: 2.6,
            },
            ..Self::default()
        }
    }

    /// Loading overlay: slightly rarer large blocks and a wider lightness band
    pub fn loading() -> Self {
        Self {
            cutoffs: BlockCutoffs {
                tall: 0.60,
                wide: 0.74,
                big: 0.88,
            },
            saturation: ColorRange {
                base: 55.0,
                span: 25.0,
                min: 45.0,
                max: 85.0,
            },
            lightness: ColorRange {
                base: 32.0,
                span: 28.0,
                min: 26.0,
                max: 64.0,
            },
            ..Self::default()
        }
    }

    /// Start screen: per-tile random corner radius
    pub fn start_screen() -> Self {
        Self {
            corner_radius: CornerRadius::Random {
                base: 10.0,
                span: 12.0,
            },
            delay: AnimRange {
                base: 0.0,
                span: 0.6,
            },
            duration: AnimRange {
                base: 2.6,
                span: 2.6,
            },
            ..Self::default()
        }
    }
}

/// Named grid variants with their customary dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPreset {
    Landing,
    Loading,
    StartScreen,
}

impl GridPreset {
    pub fn style(&self) -> GridStyle {
        match self {
            GridPreset::Landing => GridStyle::landing(),
            GridPreset::Loading => GridStyle::loading(),
            GridPreset::StartScreen => GridStyle::start_screen(),
        }
    }

    /// `(cols, rows)`
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            GridPreset::Landing => (16, 10),
            GridPreset::Loading | GridPreset::StartScreen => (14, 9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_cutoffs() {
        let cutoffs = BlockCutoffs::default();
        assert_eq!(cutoffs.block_size(0.90), (2, 2));
        assert_eq!(cutoffs.block_size(0.86), (2, 1));
        assert_eq!(cutoffs.block_size(0.73), (2, 1));
        assert_eq!(cutoffs.block_size(0.72), (1, 2));
        assert_eq!(cutoffs.block_size(0.59), (1, 2));
        assert_eq!(cutoffs.block_size(0.58), (1, 1));
        assert_eq!(cutoffs.block_size(0.0), (1, 1));
    }

    #[test]
    fn test_fixed_radius_draws_nothing() {
        let mut rng = SeededRng::new(5u32);
        let before = rng.state();
        assert_eq!(CornerRadius::Fixed { px: 12.0 }.sample(&mut rng), 12.0);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_color_range_clamps() {
        let range = ColorRange {
            base: 80.0,
            span: 30.0,
            min: 45.0,
            max: 85.0,
        };
        let mut rng = SeededRng::new(1u32);
        for _ in 0..200 {
            assert!(range.sample(&mut rng) <= 85.0);
        }
    }

    #[test]
    fn test_corner_radius_toml_shape() {
        let style = GridStyle::start_screen();
        let text = toml::to_string(&style).unwrap();
        assert!(text.contains("mode = \"random\""));
        let back: GridStyle = toml::from_str(&text).unwrap();
        assert_eq!(back, style);
    }
}
