// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coordinate, Graph, Node};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up nearest-neighbor search for large datasets.
/// [crate::Graph::find_nearest_node] needs to visit every node in the graph, and runs twice
/// for every path query. A k-d tree can help with that, trading memory usage for CPU time.
///
/// The tree returns the same node as [crate::Graph::find_nearest_node]: equidistant
/// candidates are resolved in favor of the node which came first in the input.
///
/// This implementation assumes euclidean geometry, even though the distance function
/// used is [earth_distance]. This results in undefined behavior when points
/// are close to the ante meridian (180°/-180° longitude) or poles (90°/-90° latitude),
/// or when the data spans multiple continents.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Node,
    rank: usize,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest [Node] to the given position.
    pub fn find_nearest_node(&self, at: Coordinate) -> Node {
        self.find_nearest_node_impl(at, false).0.node
    }

    fn find_nearest_node_impl(&self, at: Coordinate, lon_divides: bool) -> (Ranked, f64) {
        // Start by assuming that pivot is the closest
        let mut best = Ranked {
            node: self.pivot,
            rank: self.rank,
        };
        let mut best_dist = earth_distance(at, best.node.position);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            at.lon < self.pivot.position.lon
        } else {
            at.lat < self.pivot.position.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        // Recurse into the first branch
        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_node_impl(at, !lon_divides);
            if is_better(alt, alt_dist, best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        // (Optionally) recurse into the second branch
        if let Some(ref branch) = second {
            // A closer (or equally close) node is possible in the second branch if and only if
            // the splitting axis is not farther than the current best candidate.
            let axis = if lon_divides {
                Coordinate::new(at.lat, self.pivot.position.lon)
            } else {
                Coordinate::new(self.pivot.position.lat, at.lon)
            };

            if earth_distance(at, axis) <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_node_impl(at, !lon_divides);
                if is_better(alt, alt_dist, best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        (best, best_dist)
    }

    /// Builds a k-d tree from all positioned nodes of a [Graph], in [Graph::iter] order.
    /// Returns `None` if the graph has no such nodes.
    pub fn from_graph(g: &Graph) -> Option<Self> {
        Self::build(&g.iter().collect::<Vec<_>>())
    }

    /// Builds a k-d tree from a slice of [Nodes](Node). Ties between equidistant
    /// nodes are resolved using their order in the slice.
    pub fn build(nodes: &[Node]) -> Option<Self> {
        let mut ranked = nodes
            .iter()
            .enumerate()
            .map(|(rank, &node)| Ranked { node, rank })
            .collect::<Vec<_>>();
        Self::build_impl(&mut ranked, false)
    }

    fn build_impl(nodes: &mut [Ranked], lon_divides: bool) -> Option<Self> {
        match nodes.len() {
            0 => None,
            1 => Some(Self {
                pivot: nodes[0].node,
                rank: nodes[0].rank,
                left: None,
                right: None,
            }),
            _ => {
                if lon_divides {
                    nodes.sort_by(|a, b| a.node.position.lon.total_cmp(&b.node.position.lon));
                } else {
                    nodes.sort_by(|a, b| a.node.position.lat.total_cmp(&b.node.position.lat));
                }
                let median = nodes.len() / 2;
                let pivot = nodes[median];
                let (left, right_and_pivot) = nodes.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot: pivot.node,
                    rank: pivot.rank,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

/// A [Node] together with its position in the input sequence.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    node: Node,
    rank: usize,
}

#[inline]
fn is_better(candidate: Ranked, candidate_dist: f64, best: Ranked, best_dist: f64) -> bool {
    candidate_dist < best_dist || (candidate_dist == best_dist && candidate.rank < best.rank)
}
