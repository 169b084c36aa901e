// Tree node and the metadata each node carries back to the caller

use super::GroupingMode;
use crate::model::{ClusterSummary, Tile};
use crate::sentiment::SentimentBucket;
use serde::Serialize;

/// Weight of every leaf
pub const LEAF_VALUE: u32 = 1;

/// What a node stands for; forwarded verbatim to selection callbacks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeMeta<'a> {
    Root {
        query: String,
        mode: GroupingMode,
    },
    Sentiment {
        sentiment: SentimentBucket,
    },
    Cluster {
        cluster_id: &'a str,
        cluster_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<&'a ClusterSummary>,
    },
    Bucket {
        sentiment: SentimentBucket,
        cluster_id: &'a str,
        cluster_name: String,
    },
    Tile {
        tile: &'a Tile,
        cluster_id: &'a str,
        cluster_name: String,
        bucket: SentimentBucket,
    },
}

impl NodeMeta<'_> {
    /// The sentiment this node belongs to, if any
    pub fn bucket(&self) -> Option<SentimentBucket> {
        match self {
            NodeMeta::Sentiment { sentiment } | NodeMeta::Bucket { sentiment, .. } => {
                Some(*sentiment)
            }
            NodeMeta::Tile { bucket, .. } => Some(*bucket),
            NodeMeta::Root { .. } | NodeMeta::Cluster { .. } => None,
        }
    }

    pub fn cluster_id(&self) -> Option<&str> {
        match self {
            NodeMeta::Cluster { cluster_id, .. }
            | NodeMeta::Bucket { cluster_id, .. }
            | NodeMeta::Tile { cluster_id, .. } => Some(*cluster_id),
            NodeMeta::Root { .. } | NodeMeta::Sentiment { .. } => None,
        }
    }

    pub fn tile(&self) -> Option<&Tile> {
        match self {
            NodeMeta::Tile { tile, .. } => Some(*tile),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NodeMeta::Root { .. } => "root",
            NodeMeta::Sentiment { .. } => "sentiment",
            NodeMeta::Cluster { .. } => "cluster",
            NodeMeta::Bucket { .. } => "bucket",
            NodeMeta::Tile { .. } => "tile",
        }
    }
}

/// A sunburst tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HierarchyNode<'a> {
    Branch {
        name: String,
        children: Vec<HierarchyNode<'a>>,
        meta: NodeMeta<'a>,
    },
    /// Always weighs [`LEAF_VALUE`]
    Leaf { name: String, meta: NodeMeta<'a> },
}

impl<'a> HierarchyNode<'a> {
    pub(crate) fn leaf(
        tile: &'a Tile,
        cluster_id: &'a str,
        cluster_name: &str,
        bucket: SentimentBucket,
    ) -> Self {
        HierarchyNode::Leaf {
            name: tile.display_title().to_string(),
            meta: NodeMeta::Tile {
                tile,
                cluster_id,
                cluster_name: cluster_name.to_string(),
                bucket,
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HierarchyNode::Branch { name, .. } | HierarchyNode::Leaf { name, .. } => name,
        }
    }

    pub fn meta(&self) -> &NodeMeta<'a> {
        match self {
            HierarchyNode::Branch { meta, .. } | HierarchyNode::Leaf { meta, .. } => meta,
        }
    }

    pub fn children(&self) -> &[HierarchyNode<'a>] {
        match self {
            HierarchyNode::Branch { children, .. } => children,
            HierarchyNode::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HierarchyNode::Leaf { .. })
    }

    /// Sum of leaf values in this subtree
    pub fn value(&self) -> u32 {
        match self {
            HierarchyNode::Leaf { .. } => LEAF_VALUE,
            HierarchyNode::Branch { children, .. } => children.iter().map(Self::value).sum(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HierarchyNode::Leaf { .. } => 1,
            HierarchyNode::Branch { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Longest root-to-leaf edge count; a bare root has height 0
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Leaves in depth-first order
    pub fn leaves(&self) -> Leaves<'_, 'a> {
        Leaves { stack: vec![self] }
    }
}

/// Depth-first leaf iterator
pub struct Leaves<'t, 'a> {
    stack: Vec<&'t HierarchyNode<'a>>,
}

impl<'t, 'a> Iterator for Leaves<'t, 'a> {
    type Item = &'t HierarchyNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                HierarchyNode::Leaf { .. } => return Some(node),
                HierarchyNode::Branch { children, .. } => {
                    self.stack.extend(children.iter().rev());
                }
            }
        }
        None
    }
}
