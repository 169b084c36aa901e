//! Sunburst geometry
//!
//! The root spans the full circle. Each branch splits its angular interval
//! among its children in proportion to their leaf counts, and every tree
//! depth gets one ring of equal width between the centre disc and the
//! outer radius. The computation is a pure function of the tree, the
//! viewport and the (read-only) selection context.

mod arc;

pub use arc::arc_path;

use crate::color::{Palette, Rgb};
use crate::error::{MosaicError, Result};
use crate::hierarchy::{GroupingMode, HierarchyNode, NodeMeta};
use crate::sentiment::SentimentStats;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Scale applied to a hovered leaf
pub const HOVER_SCALE: f64 = 1.06;

/// Fraction of the centroid a hovered leaf is pushed outward
pub const HOVER_PUSH: f64 = 0.05;

/// Longest query shown in full on the centre disc
pub const CENTER_LABEL_MAX: usize = 14;

/// Tunables of the radial layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialOptions {
    /// Gap between the outer ring and the viewport edge, in px
    pub margin: f64,
    /// Centre disc radius as a fraction of the outer radius
    pub center_ratio: f64,
    /// Gap between neighbouring sectors, in radians
    pub pad_angle: f64,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            margin: 16.0,
            center_ratio: 0.24,
            pad_angle: 0.012,
        }
    }
}

/// Caller-owned interaction state, passed in read-only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Key of the sector the user picked
    pub selected: Option<String>,
    /// Key of the sector under the pointer
    pub hovered: Option<String>,
}

impl SelectionContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn selected(key: impl Into<String>) -> Self {
        Self {
            selected: Some(key.into()),
            hovered: None,
        }
    }
}

/// A point in view-box coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// SVG view box centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    fn centred(width: f64, height: f64) -> Self {
        Self {
            min_x: -width / 2.0,
            min_y: -height / 2.0,
            width,
            height,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// One drawable ring segment
#[derive(Debug, Clone, Serialize)]
pub struct Sector<'a> {
    /// `"{name}|{depth}|{start:.4}"`, stable across identical renders
    pub key: String,
    pub name: String,
    pub depth: usize,
    /// Index of the parent sector; `None` under the root
    pub parent: Option<usize>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub value: u32,
    pub fill: Rgb,
    pub is_leaf: bool,
    pub centroid: Point,
    /// Tooltip text
    pub title: String,
    pub path: String,
    pub selected: bool,
    pub hovered: bool,
    /// Translation for a hovered leaf, applied with [`HOVER_SCALE`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_offset: Option<Point>,
    /// Forwarded verbatim to the selection callback on click
    pub meta: &'a NodeMeta<'a>,
}

impl Sector<'_> {
    pub fn angular_span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Text shown on the centre disc
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterLabel {
    pub label: String,
    pub total: usize,
    pub stats: SentimentStats,
}

impl CenterLabel {
    fn new(query: &str, stats: SentimentStats) -> Self {
        let label = if query.chars().count() > CENTER_LABEL_MAX {
            let head: String = query.chars().take(CENTER_LABEL_MAX - 1).collect();
            format!("{}\u{2026}", head)
        } else {
            query.to_string()
        };
        Self {
            label,
            total: stats.total,
            stats,
        }
    }
}

/// Complete sunburst geometry for one render
#[derive(Debug, Clone, Serialize)]
pub struct RadialLayout<'a> {
    pub view_box: ViewBox,
    pub radius: f64,
    pub center_radius: f64,
    pub ring_width: f64,
    pub center: CenterLabel,
    pub sectors: Vec<Sector<'a>>,
}

impl<'a> RadialLayout<'a> {
    /// Sectors whose meta refers to an article
    pub fn leaves(&self) -> impl Iterator<Item = &Sector<'a>> {
        self.sectors.iter().filter(|s| s.is_leaf)
    }

    pub fn find(&self, key: &str) -> Option<&Sector<'a>> {
        self.sectors.iter().find(|s| s.key == key)
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &Sector<'a>> {
        self.sectors
            .iter()
            .filter(move |s| s.parent == Some(index))
    }
}

/// Sunburst layout engine
#[derive(Debug, Clone, Default)]
pub struct RadialPartition {
    options: RadialOptions,
    palette: Palette,
}

impl RadialPartition {
    pub fn new(options: RadialOptions, palette: Palette) -> Self {
        Self { options, palette }
    }

    pub fn options(&self) -> &RadialOptions {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn layout<'a>(
        &self,
        root: &'a HierarchyNode<'a>,
        width: f64,
        height: f64,
    ) -> Result<RadialLayout<'a>> {
        self.layout_with_selection(root, width, height, &SelectionContext::none())
    }

    pub fn layout_with_selection<'a>(
        &self,
        root: &'a HierarchyNode<'a>,
        width: f64,
        height: f64,
        selection: &SelectionContext,
    ) -> Result<RadialLayout<'a>> {
        MosaicError::check_dimension("width", width)?;
        MosaicError::check_dimension("height", height)?;

        let radius = width.min(height) / 2.0 - self.options.margin;
        MosaicError::check_dimension("radius", radius)?;

        let center_radius = radius * self.options.center_ratio;
        let depth = root.height();
        let ring_width = if depth > 0 {
            (radius - center_radius) / depth as f64
        } else {
            0.0
        };

        let mut pass = Pass {
            options: &self.options,
            palette: &self.palette,
            selection,
            center_radius,
            ring_width,
            sectors: Vec::new(),
            counts: [0; 3],
        };
        pass.place_children(root, 1, 0.0, TAU, None);

        let query = match root.meta() {
            NodeMeta::Root { query, .. } => query.as_str(),
            _ => root.name(),
        };
        let center = CenterLabel::new(query, SentimentStats::from_counts(pass.counts));

        tracing::debug!(
            sectors = pass.sectors.len(),
            depth,
            radius,
            "radial layout computed"
        );

        Ok(RadialLayout {
            view_box: ViewBox::centred(width, height),
            radius,
            center_radius,
            ring_width,
            center,
            sectors: pass.sectors,
        })
    }
}

/// Lay out a tree with default options and palette
pub fn layout<'a>(root: &'a HierarchyNode<'a>, width: f64, height: f64) -> Result<RadialLayout<'a>> {
    RadialPartition::default().layout(root, width, height)
}

/// Options for a grouping mode's customary centre disc
pub fn options_for(mode: GroupingMode) -> RadialOptions {
    match mode {
        GroupingMode::SentimentFirst => RadialOptions::default(),
        GroupingMode::ClusterFirst => RadialOptions {
            center_ratio: 0.22,
            ..RadialOptions::default()
        },
    }
}

struct Pass<'p, 'a> {
    options: &'p RadialOptions,
    palette: &'p Palette,
    selection: &'p SelectionContext,
    center_radius: f64,
    ring_width: f64,
    sectors: Vec<Sector<'a>>,
    counts: [usize; 3],
}

impl<'a> Pass<'_, 'a> {
    fn place_children(
        &mut self,
        node: &'a HierarchyNode<'a>,
        depth: usize,
        x0: f64,
        x1: f64,
        parent: Option<usize>,
    ) {
        let total = node.value();
        if total == 0 {
            return;
        }

        let span = x1 - x0;
        let mut cumulative = 0u32;
        for child in node.children() {
            let start = x0 + span * f64::from(cumulative) / f64::from(total);
            cumulative += child.value();
            let end = if cumulative == total {
                x1
            } else {
                x0 + span * f64::from(cumulative) / f64::from(total)
            };

            let index = self.push_sector(child, depth, start, end, parent);
            self.place_children(child, depth + 1, start, end, Some(index));
        }
    }

    fn push_sector(
        &mut self,
        node: &'a HierarchyNode<'a>,
        depth: usize,
        start: f64,
        end: f64,
        parent: Option<usize>,
    ) -> usize {
        let inner = self.center_radius + (depth - 1) as f64 * self.ring_width;
        let outer = inner + self.ring_width;
        let is_leaf = node.is_leaf();
        let meta = node.meta();

        if is_leaf {
            if let Some(bucket) = meta.bucket() {
                self.counts[bucket.index()] += 1;
            }
        }

        let mid_angle = (start + end) / 2.0;
        let mid_radius = (inner + outer) / 2.0;
        let centroid = Point {
            x: mid_angle.sin() * mid_radius,
            y: -mid_angle.cos() * mid_radius,
        };

        let key = format!("{}|{}|{:.4}", node.name(), depth, start);
        let selected = self.selection.selected.as_deref() == Some(key.as_str());
        let hovered = is_leaf && self.selection.hovered.as_deref() == Some(key.as_str());
        let hover_offset = hovered.then(|| Point {
            x: centroid.x * HOVER_PUSH,
            y: centroid.y * HOVER_PUSH,
        });

        self.sectors.push(Sector {
            key,
            name: node.name().to_string(),
            depth,
            parent,
            start_angle: start,
            end_angle: end,
            inner_radius: inner,
            outer_radius: outer,
            value: node.value(),
            fill: self.fill_for(meta),
            is_leaf,
            centroid,
            title: title_for(node),
            path: arc_path(start, end, inner, outer, self.options.pad_angle),
            selected,
            hovered,
            hover_offset,
            meta,
        });
        self.sectors.len() - 1
    }

    fn fill_for(&self, meta: &NodeMeta<'_>) -> Rgb {
        match meta {
            NodeMeta::Tile { tile, bucket, .. } => self.palette.leaf(*bucket, tile.intensity01()),
            NodeMeta::Sentiment { sentiment } | NodeMeta::Bucket { sentiment, .. } => {
                self.palette.bucket_ring(*sentiment)
            }
            NodeMeta::Cluster { cluster_id, .. } => self.palette.cluster_ring(cluster_id),
            NodeMeta::Root { .. } => self.palette.fallback,
        }
    }
}

fn title_for(node: &HierarchyNode<'_>) -> String {
    match node.meta().tile() {
        Some(tile) => format!(
            "{}\n{} \u{b7} {}\n{}",
            tile.display_title(),
            tile.display_source(),
            tile.display_time(),
            tile.one_line_takeaway
        ),
        None => node.name().to_string(),
    }
}
