//! Topic → group → article trees for the sunburst
//!
//! Trees borrow tiles from the caller's clusters and are rebuilt for every
//! render; they never own or mutate application state. Every leaf weighs
//! exactly one article, so sector sizes reflect counts and nothing else.

mod node;

pub use node::{HierarchyNode, Leaves, NodeMeta, LEAF_VALUE};

use crate::model::{Cluster, Tile};
use crate::random::stable_shuffle;
use crate::sentiment::{SentimentBucket, SentimentThresholds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root label used when the query is blank
pub const DEFAULT_ROOT_NAME: &str = "Topic";

/// How the tree groups articles below the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// root → cluster → sentiment bucket → article
    ClusterFirst,
    /// root → sentiment bucket → article
    #[default]
    SentimentFirst,
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingMode::ClusterFirst => f.write_str("cluster_first"),
            GroupingMode::SentimentFirst => f.write_str("sentiment_first"),
        }
    }
}

impl FromStr for GroupingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cluster" | "cluster_first" => Ok(GroupingMode::ClusterFirst),
            "sentiment" | "sentiment_first" => Ok(GroupingMode::SentimentFirst),
            other => Err(format!(
                "unknown grouping '{}', expected 'cluster' or 'sentiment'",
                other
            )),
        }
    }
}

/// Builds sunburst trees from clustered tiles
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    mode: GroupingMode,
    thresholds: SentimentThresholds,
}

impl HierarchyBuilder {
    pub fn new(mode: GroupingMode) -> Self {
        Self {
            mode,
            thresholds: SentimentThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: SentimentThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Build the tree for one query; empty groups contribute no node
    pub fn build<'a>(&self, query: &str, clusters: &'a [Cluster]) -> HierarchyNode<'a> {
        let children = match self.mode {
            GroupingMode::ClusterFirst => self.cluster_first(query, clusters),
            GroupingMode::SentimentFirst => self.sentiment_first(clusters),
        };

        let name = if query.trim().is_empty() {
            DEFAULT_ROOT_NAME.to_string()
        } else {
            query.to_string()
        };

        let root = HierarchyNode::Branch {
            name,
            children,
            meta: NodeMeta::Root {
                query: query.to_string(),
                mode: self.mode,
            },
        };

        tracing::debug!(
            mode = %self.mode,
            clusters = clusters.len(),
            leaves = root.leaf_count(),
            "hierarchy built"
        );

        root
    }

    fn cluster_first<'a>(&self, query: &str, clusters: &'a [Cluster]) -> Vec<HierarchyNode<'a>> {
        let mut groups = Vec::new();

        for cluster in clusters {
            if cluster.items.is_empty() {
                continue;
            }

            let cluster_name = cluster.display_name();
            let key = format!("{}::{}", query, cluster_name);
            let shuffled = stable_shuffle(cluster.items.iter().collect::<Vec<&Tile>>(), &key);

            let mut buckets: [Vec<HierarchyNode<'a>>; 3] = Default::default();
            for tile in shuffled {
                let bucket = self.thresholds.bucket(tile.valence);
                buckets[bucket.index()].push(HierarchyNode::leaf(
                    tile,
                    &cluster.cluster_id,
                    &cluster_name,
                    bucket,
                ));
            }

            let children: Vec<HierarchyNode<'a>> = SentimentBucket::ALL
                .into_iter()
                .zip(buckets)
                .filter(|(_, leaves)| !leaves.is_empty())
                .map(|(sentiment, leaves)| HierarchyNode::Branch {
                    name: sentiment.as_str().to_string(),
                    children: leaves,
                    meta: NodeMeta::Bucket {
                        sentiment,
                        cluster_id: &cluster.cluster_id,
                        cluster_name: cluster_name.clone(),
                    },
                })
                .collect();

            groups.push(HierarchyNode::Branch {
                name: cluster_name.clone(),
                children,
                meta: NodeMeta::Cluster {
                    cluster_id: &cluster.cluster_id,
                    cluster_name,
                    summary: cluster.summary.as_ref(),
                },
            });
        }

        groups
    }

    fn sentiment_first<'a>(&self, clusters: &'a [Cluster]) -> Vec<HierarchyNode<'a>> {
        let mut buckets: [Vec<HierarchyNode<'a>>; 3] = Default::default();

        for cluster in clusters {
            let cluster_name = cluster.display_name();
            for tile in &cluster.items {
                let bucket = self.thresholds.bucket(tile.valence);
                buckets[bucket.index()].push(HierarchyNode::leaf(
                    tile,
                    &cluster.cluster_id,
                    &cluster_name,
                    bucket,
                ));
            }
        }

        SentimentBucket::ALL
            .into_iter()
            .zip(buckets)
            .filter(|(_, leaves)| !leaves.is_empty())
            .map(|(sentiment, leaves)| HierarchyNode::Branch {
                name: sentiment.as_str().to_string(),
                children: leaves,
                meta: NodeMeta::Sentiment { sentiment },
            })
            .collect()
    }
}

/// Build with the given mode and default thresholds
pub fn build<'a>(query: &str, clusters: &'a [Cluster], mode: GroupingMode) -> HierarchyNode<'a> {
    HierarchyBuilder::new(mode).build(query, clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Article, ClusterSummary, TileType};

    fn tile(id: &str, valence: f64) -> Tile {
        Tile::new(Article::new(id, format!("Article {}", id)), TileType::Fact)
            .with_sentiment(valence, 0.5)
    }

    fn sample() -> Vec<Cluster> {
        vec![
            Cluster::new("c0", vec![tile("a", 0.4), tile("b", -0.3), tile("c", 0.0)]).with_summary(
                ClusterSummary {
                    cluster_title: "Model release".to_string(),
                    ..Default::default()
                },
            ),
            Cluster::new("c1", vec![]),
            Cluster::new("c2", vec![tile("d", 0.2), tile("e", 0.9)]),
        ]
    }

    fn child_names(node: &HierarchyNode<'_>) -> Vec<String> {
        node.children().iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_sentiment_first_shape() {
        let clusters = sample();
        let root = build("OpenAI", &clusters, GroupingMode::SentimentFirst);
        assert_eq!(root.name(), "OpenAI");
        assert_eq!(child_names(&root), vec!["positive", "neutral", "critical"]);
        assert_eq!(root.leaf_count(), 5);
        assert_eq!(root.children()[0].leaf_count(), 3);
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn test_sentiment_first_skips_empty_buckets() {
        let clusters = vec![Cluster::new("c0", vec![tile("a", 0.5), tile("b", 0.6)])];
        let root = build("q", &clusters, GroupingMode::SentimentFirst);
        assert_eq!(child_names(&root), vec!["positive"]);
    }

    #[test]
    fn test_cluster_first_shape() {
        let clusters = sample();
        let root = build("OpenAI", &clusters, GroupingMode::ClusterFirst);
        // Empty cluster c1 is omitted, untitled c2 gets a fallback name
        assert_eq!(child_names(&root), vec!["Model release", "Cluster c2"]);
        assert_eq!(
            child_names(&root.children()[0]),
            vec!["positive", "neutral", "critical"]
        );
        assert_eq!(child_names(&root.children()[1]), vec!["positive"]);
        assert_eq!(root.leaf_count(), 5);
        assert_eq!(root.height(), 3);
    }

    #[test]
    fn test_leaf_back_references() {
        let clusters = sample();
        let root = build("OpenAI", &clusters, GroupingMode::SentimentFirst);
        let critical = &root.children()[2];
        match critical.children()[0].meta() {
            NodeMeta::Tile {
                tile,
                cluster_id,
                cluster_name,
                bucket,
                ..
            } => {
                assert_eq!(tile.article.id, "b");
                assert_eq!(*cluster_id, "c0");
                assert_eq!(cluster_name, "Model release");
                assert_eq!(*bucket, SentimentBucket::Critical);
            }
            other => panic!("expected tile meta, got {:?}", other),
        }
    }

    #[test]
    fn test_cluster_first_order_is_reproducible() {
        let clusters = sample();
        let a = build("OpenAI", &clusters, GroupingMode::ClusterFirst);
        let b = build("OpenAI", &clusters, GroupingMode::ClusterFirst);
        let ids = |n: &HierarchyNode<'_>| -> Vec<String> {
            n.leaves().map(|l| l.name().to_string()).collect()
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_empty_input_gives_bare_root() {
        let root = build("", &[], GroupingMode::ClusterFirst);
        assert_eq!(root.name(), DEFAULT_ROOT_NAME);
        assert!(root.children().is_empty());
        assert_eq!(root.leaf_count(), 0);
    }

    #[test]
    fn test_grouping_mode_parse() {
        assert_eq!("cluster".parse::<GroupingMode>(), Ok(GroupingMode::ClusterFirst));
        assert_eq!(
            "Sentiment-First".parse::<GroupingMode>(),
            Ok(GroupingMode::SentimentFirst)
        );
        assert!("ranked".parse::<GroupingMode>().is_err());
    }
}
