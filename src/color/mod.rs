//! Colours for sunburst sectors
//!
//! Ring colours are fixed per sentiment bucket or per cluster; leaf colours
//! are interpolated between a bucket's light and dark shade by intensity.

use crate::random::stable_hash;
use crate::sentiment::SentimentBucket;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex colour pattern is valid")
    })
}

/// An opaque sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        if !hex_pattern().is_match(s) {
            return None;
        }
        let digits = &s[1..];
        let channel = |i: usize, len: usize| u8::from_str_radix(&digits[i..i + len], 16).ok();
        if digits.len() == 3 {
            // #abc expands to #aabbcc
            let r = channel(0, 1)?;
            let g = channel(1, 1)?;
            let b = channel(2, 1)?;
            Some(Self::new(r * 17, g * 17, b * 17))
        } else {
            Some(Self::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?))
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear RGB blend; `t` is clamped to [0, 1]
    pub fn interpolate(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            (a + (f64::from(b) - a) * t).round() as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&value).ok_or_else(|| format!("invalid hex colour '{}'", value))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// The shades used for one sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shades {
    pub light: Rgb,
    pub mid: Rgb,
    pub dark: Rgb,
    /// Inner ring fill
    pub ring: Rgb,
}

/// Maps intensity onto the light→dark ramp: `t = intensity * span + floor`
///
/// The floor keeps calm articles from rendering indistinguishably pale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafShade {
    pub floor: f64,
    pub span: f64,
}

impl Default for LeafShade {
    fn default() -> Self {
        Self {
            floor: 0.18,
            span: 0.6,
        }
    }
}

/// Every colour the radial layout needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub positive: Shades,
    pub neutral: Shades,
    pub critical: Shades,
    /// Categorical colours for cluster rings, picked by cluster id hash
    pub clusters: Vec<Rgb>,
    /// Used when nothing more specific applies
    pub fallback: Rgb,
    #[serde(default)]
    pub leaf_shade: LeafShade,
}

impl Default for Palette {
    fn default() -> Self {
        let hex = |s: &str| Rgb::parse_hex(s).unwrap_or(Rgb::new(0xdd, 0xdd, 0xdd));
        Self {
            positive: Shades {
                light: hex("#e3f5ea"),
                mid: hex("#86d9a1"),
                dark: hex("#248a49"),
                ring: hex("#a8e4bb"),
            },
            neutral: Shades {
                light: hex("#eeece8"),
                mid: hex("#c5c1ba"),
                dark: hex("#6b6760"),
                ring: hex("#d6d2cc"),
            },
            critical: Shades {
                light: hex("#fce4e1"),
                mid: hex("#f0a09a"),
                dark: hex("#c0352c"),
                ring: hex("#f0b5b0"),
            },
            clusters: [
                "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1",
                "#ff9da7", "#9c755f", "#bab0ab",
            ]
            .iter()
            .map(|s| hex(s))
            .collect(),
            fallback: hex("#dddddd"),
            leaf_shade: LeafShade::default(),
        }
    }
}

impl Palette {
    pub fn shades(&self, bucket: SentimentBucket) -> &Shades {
        match bucket {
            SentimentBucket::Positive => &self.positive,
            SentimentBucket::Neutral => &self.neutral,
            SentimentBucket::Critical => &self.critical,
        }
    }

    pub fn bucket_ring(&self, bucket: SentimentBucket) -> Rgb {
        self.shades(bucket).ring
    }

    /// Stable per-cluster colour, independent of cluster order
    pub fn cluster_ring(&self, cluster_id: &str) -> Rgb {
        if self.clusters.is_empty() {
            return self.fallback;
        }
        let index = stable_hash(cluster_id) as usize % self.clusters.len();
        self.clusters[index]
    }

    /// Leaf fill for an article of the given bucket and clamped intensity
    pub fn leaf(&self, bucket: SentimentBucket, intensity01: f64) -> Rgb {
        let shades = self.shades(bucket);
        let t = intensity01 * self.leaf_shade.span + self.leaf_shade.floor;
        shades.light.interpolate(shades.dark, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgb::parse_hex("#248a49"), Some(Rgb::new(0x24, 0x8a, 0x49)));
        assert_eq!(Rgb::parse_hex("#ddd"), Some(Rgb::new(0xdd, 0xdd, 0xdd)));
        assert_eq!(Rgb::parse_hex("248a49"), None);
        assert_eq!(Rgb::parse_hex("#248a4"), None);
        assert_eq!(Rgb::parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_hex_round_trip_string() {
        let c = Rgb::new(0xc0, 0x35, 0x2c);
        assert_eq!(c.to_hex(), "#c0352c");
        assert_eq!(c.to_string(), "rgb(192, 53, 44)");
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.interpolate(white, 0.0), black);
        assert_eq!(black.interpolate(white, 1.0), white);
        assert_eq!(black.interpolate(white, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.interpolate(white, 7.0), white);
    }

    #[test]
    fn test_leaf_never_fully_light() {
        let palette = Palette::default();
        for bucket in SentimentBucket::ALL {
            let calm = palette.leaf(bucket, 0.0);
            assert_ne!(calm, palette.shades(bucket).light);
        }
    }

    #[test]
    fn test_leaf_darkens_with_intensity() {
        let palette = Palette::default();
        let calm = palette.leaf(SentimentBucket::Critical, 0.0);
        let hot = palette.leaf(SentimentBucket::Critical, 1.0);
        let lum = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(lum(hot) < lum(calm));
    }

    #[test]
    fn test_cluster_ring_is_stable() {
        let palette = Palette::default();
        assert_eq!(palette.cluster_ring("c4"), palette.cluster_ring("c4"));
        assert!(palette.clusters.contains(&palette.cluster_ring("anything")));
    }

    #[test]
    fn test_cluster_ring_empty_palette_falls_back() {
        let palette = Palette {
            clusters: vec![],
            ..Palette::default()
        };
        assert_eq!(palette.cluster_ring("c1"), palette.fallback);
    }

    #[test]
    fn test_rgb_serde_as_hex() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }
}
