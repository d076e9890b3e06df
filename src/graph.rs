// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coordinate, Edge, Node};
use std::collections::BTreeMap;

/// Represents an OpenStreetMap road network as a set of [Nodes](Node)
/// and speed-limited [Edges](Edge) between them.
///
/// A [Graph] is built once by [build_graph](crate::build_graph) (or one of the
/// [osm](crate::osm) loaders) and is read-only afterwards, so it can be shared
/// between any number of concurrent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    edges: BTreeMap<i64, Vec<Edge>>,
    positions: BTreeMap<i64, Coordinate>,

    /// Ids of positioned nodes, in the order their positions were first recorded.
    arrival: Vec<i64>,
}

impl Graph {
    /// Returns the number of nodes in the graph, including nodes without a known position.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no routable way has been added to the graph.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Checks whether a node with the given id is part of any routable way.
    pub fn contains(&self, id: i64) -> bool {
        self.edges.contains_key(&id)
    }

    /// Returns an iterator over all [Nodes](Node) with a known position,
    /// in the order their node records were added.
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.arrival.iter().filter_map(|&id| self.get_node(id))
    }

    /// Retrieves a [Node] with the provided id. Returns `None` if the node is not
    /// in the graph or its position is unknown.
    pub fn get_node(&self, id: i64) -> Option<Node> {
        self.positions
            .get(&id)
            .map(|&position| Node { id, position })
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// Nodes are compared in the order their records were added (see [Graph::iter]),
    /// and a node only replaces the current candidate if it is strictly closer.
    /// Thus, ties are resolved in favor of the node seen first.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// see [KDTree](crate::KDTree) for a faster alternative on large graphs.
    /// Returns `None` if the graph has no positioned nodes.
    pub fn find_nearest_node(&self, at: Coordinate) -> Option<Node> {
        let mut best: Option<(Node, f64)> = None;

        for nd in self.iter() {
            let dist = earth_distance(at, nd.position);
            let closer = match best {
                Some((_, best_dist)) => dist < best_dist,
                None => true,
            };
            if closer {
                best = Some((nd, dist));
            }
        }

        best.map(|(nd, _)| nd)
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.edges
            .get(&from_id)
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the speed limit of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns `None`.
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> Option<f64> {
        self.get_edges(from_id)
            .iter()
            .find(|e| e.to == to_id)
            .map(|e| e.speed_limit)
    }

    /// Ensures that a node with the given id exists, even if it has no outgoing edges.
    pub(crate) fn ensure_node(&mut self, id: i64) {
        self.edges.entry(id).or_default();
    }

    /// Records the position of a node. Nodes which are not part of the graph are ignored,
    /// and false is returned.
    ///
    /// Repeated records of the same node update its position, but keep its place in [Graph::iter].
    pub(crate) fn set_position(&mut self, id: i64, position: Coordinate) -> bool {
        if self.edges.contains_key(&id) {
            if self.positions.insert(id, position).is_none() {
                self.arrival.push(id);
            }
            true
        } else {
            false
        }
    }

    /// Creates an [Edge] from `from_id` or raises its speed limit.
    ///
    /// An existing edge only ever gets faster: overlapping ways contribute
    /// the most permissive of their speed limits.
    pub(crate) fn raise_edge(&mut self, from_id: i64, edge: Edge) {
        debug_assert!(edge.speed_limit.is_finite() && edge.speed_limit > 0.0);

        self.ensure_node(edge.to);
        let edges = self.edges.entry(from_id).or_default();

        if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
            candidate.speed_limit = candidate.speed_limit.max(edge.speed_limit);
        } else {
            edges.push(edge);
        }
    }

    /// Returns the number of nodes without a known position.
    pub(crate) fn count_unpositioned(&self) -> usize {
        self.edges.len() - self.positions.len()
    }
}
