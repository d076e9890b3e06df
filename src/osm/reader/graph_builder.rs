// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use crate::osm::{Profile, CAR_PROFILE};
use crate::{Coordinate, Edge, Graph};

use super::model::{NodeRecord, WayRecord};

/// Error which can occur when converting OSM features into a [Graph].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A way passed the [Profile::allowed_highways] filter, but has neither an explicit
    /// `maxspeed_mph` tag nor an entry in [Profile::default_speeds].
    #[error("way {way_id}: no default speed limit for highway={highway}")]
    MissingDefaultSpeed { way_id: i64, highway: String },
}

/// Helper object used for storing state related to converting [OSM features](super::model::Feature)
/// into a [Graph].
///
/// All [ways](WayRecord) need to be added before any [nodes](NodeRecord), as only
/// nodes referenced by routable ways are retained.
pub struct GraphBuilder<'a> {
    g: Graph,
    profile: &'a Profile<'a>,
    ways: usize,
    skipped_ways: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new, empty graph builder.
    pub fn new(profile: &'a Profile<'a>) -> Self {
        Self {
            g: Graph::default(),
            profile,
            ways: 0,
            skipped_ways: 0,
        }
    }

    /// Adds edges between consecutive nodes of a way, if the way is routable.
    ///
    /// A node pair traversed by multiple ways keeps the highest of their speed limits.
    pub fn add_way(&mut self, w: &WayRecord) -> Result<(), BuildError> {
        if !self.profile.is_allowed(&w.tags) {
            self.skipped_ways += 1;
            return Ok(());
        }

        let speed_limit =
            self.profile
                .way_speed_limit(&w.tags)
                .ok_or_else(|| BuildError::MissingDefaultSpeed {
                    way_id: w.id,
                    highway: w.tags.get("highway").cloned().unwrap_or_default(),
                })?;

        let backward = !self.profile.is_one_way(&w.tags);

        for &node_id in &w.nodes {
            self.g.ensure_node(node_id);
        }

        for pair in w.nodes.windows(2) {
            self.g.raise_edge(
                pair[0],
                Edge {
                    to: pair[1],
                    speed_limit,
                },
            );
            if backward {
                self.g.raise_edge(
                    pair[1],
                    Edge {
                        to: pair[0],
                        speed_limit,
                    },
                );
            }
        }

        self.ways += 1;
        Ok(())
    }

    /// Records the position of a node, if it was referenced by any routable way.
    /// Nodes with non-finite coordinates are logged and skipped.
    pub fn add_node(&mut self, n: &NodeRecord) {
        if !n.lat.is_finite() || !n.lon.is_finite() {
            log::warn!("node {}: invalid position ({}, {}) - ignoring", n.id, n.lat, n.lon);
            return;
        }
        self.g.set_position(n.id, Coordinate::new(n.lat, n.lon));
    }

    /// Finishes building and returns the [Graph].
    pub fn finish(self) -> Graph {
        let unpositioned = self.g.count_unpositioned();
        if unpositioned > 0 {
            log::warn!(
                "{}: {} node(s) referenced by ways have no known position and will be unreachable",
                self.profile.name,
                unpositioned,
            );
        }

        log::debug!(
            "{}: built graph with {} nodes from {} ways ({} ways skipped)",
            self.profile.name,
            self.g.len(),
            self.ways,
            self.skipped_ways,
        );

        self.g
    }
}

/// Builds a [Graph] from sequences of OSM node and way records,
/// using [CAR_PROFILE] to interpret the ways.
pub fn build_graph<N, W>(nodes: N, ways: W) -> Result<Graph, BuildError>
where
    N: IntoIterator<Item = NodeRecord>,
    W: IntoIterator<Item = WayRecord>,
{
    build_graph_with_profile(&CAR_PROFILE, nodes, ways)
}

/// Builds a [Graph] from sequences of OSM node and way records,
/// using the provided [Profile] to interpret the ways.
pub fn build_graph_with_profile<N, W>(
    profile: &Profile<'_>,
    nodes: N,
    ways: W,
) -> Result<Graph, BuildError>
where
    N: IntoIterator<Item = NodeRecord>,
    W: IntoIterator<Item = WayRecord>,
{
    let mut b = GraphBuilder::new(profile);
    for w in ways {
        b.add_way(&w)?;
    }
    for n in nodes {
        b.add_node(&n);
    }
    Ok(b.finish())
}
